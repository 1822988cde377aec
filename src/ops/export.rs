//! Paginated text export of journal entries.
//!
//! Renders every entry in a closed date range into a fixed-page plain-text
//! document: a document header on each page, then per entry a header line,
//! an optional metadata line, and the word-wrapped body. Layout decisions
//! (wrap points, page breaks, header re-emission) come from the layout
//! engine; this module only maps placed lines onto a character grid.

use crate::db::entries::{self, Entry};
use crate::db::Database;
use crate::errors::AppResult;
use crate::layout::{EntryBlock, LayoutEngine, LayoutOptions, Page, PageMetrics};
use crate::text;
use chrono::NaiveDate;
use tracing::{debug, info};

/// Page width of the text device, in character cells.
const PAGE_WIDTH: f64 = 80.0;
/// Page height of the text device, in rows.
const PAGE_HEIGHT: f64 = 66.0;
/// Margin on all sides, in cells.
const PAGE_MARGIN: f64 = 3.0;

/// Character-cell text measurement: every character is one unit wide.
fn cell_width(s: &str) -> f64 {
    s.chars().count() as f64
}

/// Formats the per-page document header for a range.
fn document_header(start: NaiveDate, end: NaiveDate) -> String {
    format!("Journal Export: {} to {}", start, end)
}

/// Formats an entry's header line, e.g. `Monday, January 1, 2024 - New year`.
fn entry_header(entry: &Entry) -> String {
    format!("{} - {}", entry.date.format("%A, %B %-d, %Y"), entry.title)
}

/// Builds an entry's metadata line from its moods and tags.
///
/// Blank fields are omitted; when all are blank there is no metadata line.
fn entry_meta(entry: &Entry) -> Option<String> {
    let mut segments = Vec::new();
    if !entry.primary_mood.trim().is_empty() {
        segments.push(format!("Mood: {}", entry.primary_mood));
    }
    if !entry.secondary_moods.trim().is_empty() {
        segments.push(format!("Secondary: {}", entry.secondary_moods));
    }
    if !entry.tags.trim().is_empty() {
        segments.push(format!("Tags: {}", entry.tags));
    }

    if segments.is_empty() {
        None
    } else {
        Some(segments.join(" | "))
    }
}

/// Prepares entries as layout blocks, stripping body markup.
fn entry_blocks(entries: &[Entry]) -> Vec<EntryBlock> {
    entries
        .iter()
        .map(|entry| EntryBlock {
            header: entry_header(entry),
            meta: entry_meta(entry),
            body: text::strip_markup(&entry.content),
        })
        .collect()
}

/// Renders placed pages onto a character grid, one row per line slot.
///
/// Rows are indented by the left margin; pages are joined with a form feed.
fn render_pages(pages: &[Page], margin: usize) -> Vec<u8> {
    let indent = " ".repeat(margin);
    let mut rendered_pages = Vec::with_capacity(pages.len());

    for page in pages {
        let mut rows: Vec<String> = Vec::new();
        let mut next_row = 0usize;
        for line in &page.lines {
            // Placements never collide, but rounding could; keep rows ordered.
            let target = (line.y.round() as usize).max(next_row);
            while rows.len() < target {
                rows.push(String::new());
            }
            rows.push(format!("{}{}", indent, line.text));
            next_row = target + 1;
        }
        rendered_pages.push(rows.join("\n"));
    }

    let mut bytes = rendered_pages.join("\n\x0c\n").into_bytes();
    bytes.push(b'\n');
    bytes
}

/// Exports every entry in the closed range `[start, end]` as a paginated
/// text document.
///
/// Entries render oldest first. A range with no entries produces an empty
/// byte vector: a defined "nothing to export" outcome, not an error.
///
/// # Errors
///
/// Returns an error if fetching entries from the store fails.
pub fn export_range(db: &Database, start: NaiveDate, end: NaiveDate) -> AppResult<Vec<u8>> {
    info!("Exporting entries from {} to {}", start, end);

    let conn = db.get_conn()?;
    let range_entries = entries::entries_in_range(&conn, start, end)?;

    if range_entries.is_empty() {
        info!("No entries in range, nothing to export");
        return Ok(Vec::new());
    }

    let metrics = PageMetrics {
        width: PAGE_WIDTH,
        height: PAGE_HEIGHT,
        margin: PAGE_MARGIN,
    };
    let engine = LayoutEngine::new(metrics, LayoutOptions::default(), &cell_width);
    let pages = engine.paginate(&document_header(start, end), &entry_blocks(&range_entries));

    debug!(
        "Rendered {} entries onto {} pages",
        range_entries.len(),
        pages.len()
    );
    Ok(render_pages(&pages, PAGE_MARGIN as usize))
}
