//! Greedy word-wrap and page-break pagination for entry export.
//!
//! The layout engine turns structured export units (a document header plus,
//! per entry, a header line, an optional metadata line, and a body paragraph)
//! into page-scoped line placements under fixed page dimensions and margins.
//! Text measurement is pluggable so the same layout decisions serve any
//! rendering target; the engine itself never touches fonts or devices.
//!
//! Output is fully deterministic for identical inputs.

use tracing::debug;

/// Vertical spacing configuration, in multiples of the base line height.
#[derive(Debug, Clone)]
pub struct LayoutOptions {
    /// Base line height in rendering units.
    pub line_height: f64,
    /// Advance after an entry header line.
    pub title_spacing_multiplier: f64,
    /// Advance after an entry metadata line.
    pub meta_spacing_multiplier: f64,
    /// Advance after each body line.
    pub body_line_spacing_multiplier: f64,
    /// Gap between consecutive entries.
    pub inter_entry_spacing_multiplier: f64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        LayoutOptions {
            line_height: 1.0,
            title_spacing_multiplier: 1.8,
            meta_spacing_multiplier: 1.5,
            body_line_spacing_multiplier: 1.1,
            inter_entry_spacing_multiplier: 1.5,
        }
    }
}

/// Fixed page dimensions and margin, in rendering units.
#[derive(Debug, Clone, Copy)]
pub struct PageMetrics {
    pub width: f64,
    pub height: f64,
    pub margin: f64,
}

impl PageMetrics {
    /// Horizontal space available to text.
    pub fn usable_width(&self) -> f64 {
        self.width - 2.0 * self.margin
    }

    /// Lowest cursor position a block may still occupy.
    pub fn bottom(&self) -> f64 {
        self.height - self.margin
    }
}

/// Advance after the per-page document header.
const PAGE_HEADER_ADVANCE: f64 = 2.5;

/// Vertical room required before starting an entry (header plus metadata).
const ENTRY_HEADER_LOOKAHEAD: f64 = 4.0;

/// Role of a placed line, used by renderers for styling decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    PageHeader,
    EntryHeader,
    Meta,
    Body,
}

/// A single line placed on a page at a vertical position.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub y: f64,
    pub kind: LineKind,
    pub text: String,
}

/// An ordered sequence of line placements on one page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub lines: Vec<PlacedLine>,
}

/// One entry prepared for layout: header, optional metadata, body paragraph.
#[derive(Debug, Clone)]
pub struct EntryBlock {
    pub header: String,
    pub meta: Option<String>,
    pub body: String,
}

/// Wraps text greedily into lines no wider than `max_width`.
///
/// Words are accumulated while the measured line stays within `max_width`;
/// a word that would exceed it closes the current line and starts the next.
/// A single word wider than `max_width` is placed alone on its own line,
/// never split. Text with no words yields no lines.
pub fn wrap_text(text: &str, max_width: f64, measure: &dyn Fn(&str) -> f64) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", current, word)
        };

        if measure(&candidate) > max_width && !current.is_empty() {
            lines.push(current);
            current = word.to_string();
        } else {
            current = candidate;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Lays out export units into pages.
pub struct LayoutEngine<'a> {
    metrics: PageMetrics,
    options: LayoutOptions,
    measure: &'a dyn Fn(&str) -> f64,
}

impl<'a> LayoutEngine<'a> {
    pub fn new(
        metrics: PageMetrics,
        options: LayoutOptions,
        measure: &'a dyn Fn(&str) -> f64,
    ) -> Self {
        LayoutEngine {
            metrics,
            options,
            measure,
        }
    }

    /// Wraps body text to the page's usable width.
    pub fn wrap_body(&self, text: &str) -> Vec<String> {
        wrap_text(text, self.metrics.usable_width(), self.measure)
    }

    /// Paginates the document header and entry blocks into placed pages.
    ///
    /// The document header is re-emitted at the top of every page. The first
    /// placement creates the first page; an empty entry list yields zero
    /// pages.
    pub fn paginate(&self, document_header: &str, entries: &[EntryBlock]) -> Vec<Page> {
        if entries.is_empty() {
            return Vec::new();
        }

        let lh = self.options.line_height;
        let mut pages: Vec<Page> = Vec::new();
        let mut cursor = 0.0_f64;

        let new_page = |pages: &mut Vec<Page>, cursor: &mut f64| {
            let mut page = Page::default();
            *cursor = self.metrics.margin;
            page.lines.push(PlacedLine {
                y: *cursor,
                kind: LineKind::PageHeader,
                text: document_header.to_string(),
            });
            *cursor += lh * PAGE_HEADER_ADVANCE;
            pages.push(page);
        };

        // Starts a new page when the block would cross the bottom margin.
        let ensure_space = |pages: &mut Vec<Page>, cursor: &mut f64, needed: f64| {
            if pages.is_empty() || *cursor + needed > self.metrics.bottom() {
                new_page(pages, cursor);
            }
        };

        for entry in entries {
            ensure_space(&mut pages, &mut cursor, lh * ENTRY_HEADER_LOOKAHEAD);
            let page = pages.last_mut().expect("ensure_space created a page");
            page.lines.push(PlacedLine {
                y: cursor,
                kind: LineKind::EntryHeader,
                text: entry.header.clone(),
            });
            cursor += lh * self.options.title_spacing_multiplier;

            if let Some(meta) = &entry.meta {
                let page = pages.last_mut().expect("page exists");
                page.lines.push(PlacedLine {
                    y: cursor,
                    kind: LineKind::Meta,
                    text: meta.clone(),
                });
                cursor += lh * self.options.meta_spacing_multiplier;
            }

            for line in self.wrap_body(&entry.body) {
                ensure_space(
                    &mut pages,
                    &mut cursor,
                    lh * self.options.body_line_spacing_multiplier,
                );
                let page = pages.last_mut().expect("page exists");
                page.lines.push(PlacedLine {
                    y: cursor,
                    kind: LineKind::Body,
                    text: line,
                });
                cursor += lh * self.options.body_line_spacing_multiplier;
            }

            cursor += lh * self.options.inter_entry_spacing_multiplier;
        }

        debug!("Laid out {} entries onto {} pages", entries.len(), pages.len());
        pages
    }
}
