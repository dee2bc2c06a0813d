//! Task line rewriting
//!
//! Rewrites keep the author's formatting intact and only touch the sync
//! markers: the remote id, the checkbox, and the completion date.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use super::{static_regex, DATE_FORMAT, DONE_MARKER, ID_MARKER};

static ID_STRIP_RE: LazyLock<Regex> = LazyLock::new(|| static_regex(r"\s*🆔\s*\S+"));

const OPEN_CHECKBOX: &str = "- [ ]";
const DONE_CHECKBOX: &str = "- [x]";

/// Append (or replace) the remote id on a task line
pub fn append_id(line: &str, id: &str) -> String {
    format!("{} {} {}", remove_id(line), ID_MARKER, id)
}

/// Check off a task line and stamp it with a completion date
///
/// The remote id is dropped: completed tasks are no longer tracked.
pub fn mark_completed(line: &str, date: NaiveDate) -> String {
    let checked = line.replacen(OPEN_CHECKBOX, DONE_CHECKBOX, 1);
    let without_id = ID_STRIP_RE.replace_all(&checked, "");
    format!(
        "{} {} {}",
        without_id.trim_end(),
        DONE_MARKER,
        date.format(DATE_FORMAT)
    )
}

/// Remove the remote id from a task line
pub fn remove_id(line: &str) -> String {
    ID_STRIP_RE.replace_all(line, "").trim_end().to_string()
}
