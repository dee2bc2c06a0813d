//! Outline task codec
//!
//! Reads and rewrites markdown checkbox tasks that use the Obsidian Tasks
//! emoji conventions:
//!
//! ```text
//! - [ ] Review [[Project]] notes #work 📅 2024-01-15 ⏫ 🆔 abc123
//!     - [ ] Sub-task #work
//! - [x] Done task ✅ 2024-01-16
//! ```
//!
//! Parsing never fails: lines that are not tasks are simply skipped, and
//! rewrites of lines that don't carry the expected markers return the line
//! otherwise unchanged.

mod buffer;
mod formatter;
mod parser;

pub use buffer::LineBuffer;
pub use formatter::{append_id, mark_completed, remove_id};
pub use parser::{parse_content, parse_line};

use crate::models::Priority;

/// Due date marker
pub const DUE_MARKER: &str = "📅";
/// Scheduled date marker
pub const SCHEDULED_MARKER: &str = "⏳";
/// Remote id marker
pub const ID_MARKER: &str = "🆔";
/// Recurrence marker (stripped from titles, not synced)
pub const RECURRENCE_MARKER: &str = "🔁";
/// Completion date marker
pub const DONE_MARKER: &str = "✅";

/// Priority markers in resolution order
///
/// The first marker in this list that appears anywhere in a line decides the
/// tier, regardless of where in the line the markers sit.
pub const PRIORITY_MARKERS: [(&str, Priority); 4] = [
    ("⏫", Priority::Urgent),
    ("🔼", Priority::High),
    ("🔽", Priority::Low),
    ("⏬", Priority::Low),
];

/// Date format used by all date markers
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// Compile a pattern that is known to be valid
pub(crate) fn static_regex(pattern: &str) -> regex::Regex {
    match regex::Regex::new(pattern) {
        Ok(re) => re,
        Err(_) => unreachable!("static regex pattern"),
    }
}
