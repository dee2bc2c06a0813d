//! Task line parsing

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use super::{static_regex, DATE_FORMAT, PRIORITY_MARKERS};
use crate::models::{Priority, TaskRecord};

/// Spaces per indent level; a tab counts as one full level
const INDENT_SIZE: usize = 4;

static TASK_RE: LazyLock<Regex> = LazyLock::new(|| static_regex(r"^(\s*)- \[([ xX])\] (.+)$"));
static DUE_RE: LazyLock<Regex> = LazyLock::new(|| static_regex(r"📅\s*(\d{4}-\d{2}-\d{2})"));
static SCHEDULED_RE: LazyLock<Regex> =
    LazyLock::new(|| static_regex(r"⏳\s*(\d{4}-\d{2}-\d{2})"));
static ID_RE: LazyLock<Regex> = LazyLock::new(|| static_regex(r"🆔\s*(\S+)"));
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| static_regex(r"#[\w-]+"));
static RECURRENCE_RE: LazyLock<Regex> = LazyLock::new(|| static_regex(r"🔁\s*\S+"));
static LINK_RE: LazyLock<Regex> = LazyLock::new(|| static_regex(r"\[\[([^\]]+)\]\]"));
static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| static_regex(r"\s+"));

/// Parse every task in a document
///
/// Line numbers are zero-based indexes into `content.split('\n')`.
pub fn parse_content(content: &str) -> Vec<TaskRecord> {
    content
        .split('\n')
        .enumerate()
        .filter_map(|(index, line)| parse_line(line, index))
        .collect()
}

/// Parse a single line as a task
///
/// Returns `None` for anything that isn't a `- [ ]` / `- [x]` checkbox line.
pub fn parse_line(line: &str, line_number: usize) -> Option<TaskRecord> {
    let captures = TASK_RE.captures(line)?;
    let indent = captures.get(1).map_or("", |m| m.as_str());
    let checkbox = captures.get(2).map_or(" ", |m| m.as_str());
    let content = captures.get(3).map_or("", |m| m.as_str());

    Some(TaskRecord {
        line_number,
        raw_text: line.to_string(),
        title: clean_title(content),
        tags: extract_tags(content),
        due_date: extract_date(&DUE_RE, content),
        scheduled_date: extract_date(&SCHEDULED_RE, content),
        priority: extract_priority(content),
        remote_id: ID_RE.captures(content).map(|c| c[1].to_string()),
        indent_level: indent_level(indent),
        is_completed: checkbox.eq_ignore_ascii_case("x"),
    })
}

fn indent_level(indent: &str) -> usize {
    let width: usize = indent
        .chars()
        .map(|c| if c == '\t' { INDENT_SIZE } else { 1 })
        .sum();
    width / INDENT_SIZE
}

// Digits that don't form a real date (2024-13-40) are treated as absent.
fn extract_date(pattern: &Regex, content: &str) -> Option<NaiveDate> {
    let captures = pattern.captures(content)?;
    NaiveDate::parse_from_str(&captures[1], DATE_FORMAT).ok()
}

fn extract_tags(content: &str) -> Vec<String> {
    TAG_RE
        .find_iter(content)
        .map(|m| m.as_str().to_string())
        .collect()
}

fn extract_priority(content: &str) -> Priority {
    PRIORITY_MARKERS
        .iter()
        .find(|(marker, _)| content.contains(marker))
        .map(|(_, priority)| *priority)
        .unwrap_or_default()
}

/// Strip metadata markers, unwrap `[[links]]`, and normalize whitespace
fn clean_title(content: &str) -> String {
    let mut title = DUE_RE.replace(content, "").into_owned();
    title = SCHEDULED_RE.replace(&title, "").into_owned();
    title = ID_RE.replace(&title, "").into_owned();
    title = TAG_RE.replace_all(&title, "").into_owned();
    title = RECURRENCE_RE.replace_all(&title, "").into_owned();
    title = LINK_RE.replace_all(&title, "${1}").into_owned();

    for (marker, _) in PRIORITY_MARKERS {
        title = title.replacen(marker, "", 1);
    }

    WHITESPACE_RE.replace_all(&title, " ").trim().to_string()
}
