//! Data models for taskbridge
//!
//! Defines the records that flow through a sync pass: tasks parsed from the
//! outline, items owned by the remote service, tag mappings, and the
//! aggregated result of a pass.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Priority tier as understood by the remote service
///
/// Tier 1 is the most urgent. The outline has no marker for tier 3, but the
/// remote service can still report it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Priority {
    /// Tier 1
    Urgent,
    /// Tier 2
    High,
    /// Tier 3; only ever reported by the remote service
    Medium,
    /// Tier 4: the low and lowest markers, and tasks without a marker
    #[default]
    Low,
}

impl Priority {
    /// Numeric tier sent over the wire
    pub fn tier(self) -> u8 {
        match self {
            Priority::Urgent => 1,
            Priority::High => 2,
            Priority::Medium => 3,
            Priority::Low => 4,
        }
    }
}

/// A tier outside 1..=4
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid priority tier: {0} (expected 1-4)")]
pub struct InvalidPriority(pub u8);

impl TryFrom<u8> for Priority {
    type Error = InvalidPriority;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Priority::Urgent),
            2 => Ok(Priority::High),
            3 => Ok(Priority::Medium),
            4 => Ok(Priority::Low),
            other => Err(InvalidPriority(other)),
        }
    }
}

impl From<Priority> for u8 {
    fn from(priority: Priority) -> Self {
        priority.tier()
    }
}

/// A task extracted from one line of outline text
///
/// Records are rebuilt on every parse; `line_number` is only meaningful
/// within the text snapshot it was parsed from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskRecord {
    /// Zero-based line index in the source text
    pub line_number: usize,
    /// The line exactly as it appeared
    pub raw_text: String,
    /// Title with all metadata markers removed
    pub title: String,
    /// Hashtags in text order (including the leading `#`)
    pub tags: Vec<String>,
    pub due_date: Option<NaiveDate>,
    pub scheduled_date: Option<NaiveDate>,
    pub priority: Priority,
    /// Present once the task has been pushed to the remote service
    pub remote_id: Option<String>,
    /// 0 = top level, 1+ = nested
    pub indent_level: usize,
    pub is_completed: bool,
}

impl TaskRecord {
    /// Date sent to the remote service: due date first, else scheduled date
    pub fn effective_date(&self) -> Option<NaiveDate> {
        self.due_date.or(self.scheduled_date)
    }

    /// Check whether the task carries an exact tag (e.g. `#work`)
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// A task as the remote service represents it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemoteItem {
    pub id: String,
    pub title: String,
    pub collection_id: String,
    pub priority: Priority,
    pub due_date: Option<NaiveDate>,
    pub parent_id: Option<String>,
    pub is_completed: bool,
}

/// A remote collection (project) that tasks can be filed into
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    pub id: String,
    pub name: String,
}

/// Payload for creating a remote item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    pub title: String,
    pub collection_id: String,
    pub priority: Option<Priority>,
    pub due_date: Option<NaiveDate>,
    pub parent_id: Option<String>,
}

impl NewItem {
    /// Build the create payload for a parsed task
    pub fn from_task(task: &TaskRecord, collection_id: &str, parent_id: Option<&str>) -> Self {
        Self {
            title: task.title.clone(),
            collection_id: collection_id.to_string(),
            priority: Some(task.priority),
            due_date: task.effective_date(),
            parent_id: parent_id.map(str::to_string),
        }
    }
}

/// Partial payload for updating a remote item; `None` fields are left as-is
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemUpdate {
    pub title: Option<String>,
    pub priority: Option<Priority>,
    pub due_date: Option<NaiveDate>,
}

impl ItemUpdate {
    /// Build the update payload for a parsed task
    pub fn from_task(task: &TaskRecord) -> Self {
        Self {
            title: Some(task.title.clone()),
            priority: Some(task.priority),
            due_date: task.effective_date(),
        }
    }
}

/// Maps an outline tag to a remote collection
///
/// Mappings are ordered; the first mapping whose tag a task carries wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagMapping {
    /// Tag including the leading `#`
    pub tag: String,
    pub collection_id: String,
    /// Collection name, kept for display without a network call
    #[serde(default)]
    pub name: String,
}

impl TagMapping {
    pub fn new(
        tag: impl Into<String>,
        collection_id: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            tag: tag.into(),
            collection_id: collection_id.into(),
            name: name.into(),
        }
    }
}

/// One task that could not be synced
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncFailure {
    pub title: String,
    pub message: String,
    pub line_number: usize,
}

impl SyncFailure {
    pub fn new(task: &TaskRecord, error: &impl std::fmt::Display) -> Self {
        Self {
            title: task.title.clone(),
            message: error.to_string(),
            line_number: task.line_number,
        }
    }
}

/// Number of failures shown in a summary before truncating
pub const FAILURE_PREVIEW_LIMIT: usize = 3;

/// Aggregated result of one sync pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncResult {
    pub created: usize,
    pub updated: usize,
    pub completed: usize,
    pub failed: usize,
    /// Pull failures followed by push failures
    pub errors: Vec<SyncFailure>,
}

impl SyncResult {
    /// Check if the pass touched nothing
    pub fn is_empty(&self) -> bool {
        self.created == 0 && self.updated == 0 && self.completed == 0 && self.failed == 0
    }

    /// Human-readable summary with a bounded preview of failures
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();

        if self.created > 0 || self.updated > 0 {
            parts.push(format!("{} created, {} updated", self.created, self.updated));
        }
        if self.completed > 0 {
            parts.push(format!("{} marked complete", self.completed));
        }
        if self.failed > 0 {
            parts.push(format!("{} failed", self.failed));
        }

        if parts.is_empty() {
            return "No tasks to sync".to_string();
        }

        let mut message = format!("Synced with Todoist\n• {}", parts.join("\n• "));

        if !self.errors.is_empty() {
            let details: Vec<String> = self
                .errors
                .iter()
                .take(FAILURE_PREVIEW_LIMIT)
                .map(|e| format!("\"{}\" - {}", e.title, e.message))
                .collect();
            message.push_str(&format!("\n• Failed: {}", details.join("\n• ")));
        }

        message
    }
}
