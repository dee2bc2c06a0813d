//! JSON shapes of the REST API
//!
//! Kept apart from the domain models so field naming and leniency rules live
//! in one place. Unknown response fields are ignored.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{ItemUpdate, NewItem, Priority, RemoteItem};

#[derive(Debug, Deserialize)]
pub(crate) struct WireItem {
    id: String,
    #[serde(default)]
    content: String,
    #[serde(default)]
    project_id: String,
    #[serde(default)]
    priority: Option<u8>,
    #[serde(default)]
    due: Option<WireDue>,
    #[serde(default)]
    parent_id: Option<String>,
    #[serde(default)]
    is_completed: bool,
}

#[derive(Debug, Deserialize)]
struct WireDue {
    date: String,
}

impl From<WireItem> for RemoteItem {
    fn from(item: WireItem) -> Self {
        Self {
            id: item.id,
            title: item.content,
            collection_id: item.project_id,
            priority: item
                .priority
                .and_then(|p| Priority::try_from(p).ok())
                .unwrap_or_default(),
            due_date: item.due.and_then(|due| parse_due_date(&due.date)),
            parent_id: item.parent_id,
            is_completed: item.is_completed,
        }
    }
}

// Due dates may carry a time component ("2024-01-15T09:00:00"); only the
// calendar date is kept.
fn parse_due_date(value: &str) -> Option<NaiveDate> {
    let date = value.get(..10).unwrap_or(value);
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}

#[derive(Debug, Serialize)]
pub(crate) struct WireNewItem<'a> {
    content: &'a str,
    project_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    priority: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    due_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    parent_id: Option<&'a str>,
}

impl<'a> From<&'a NewItem> for WireNewItem<'a> {
    fn from(item: &'a NewItem) -> Self {
        Self {
            content: &item.title,
            project_id: &item.collection_id,
            priority: item.priority.map(Priority::tier),
            due_date: item.due_date.map(|d| d.format("%Y-%m-%d").to_string()),
            parent_id: item.parent_id.as_deref(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct WireUpdate<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    priority: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    due_date: Option<String>,
}

impl<'a> From<&'a ItemUpdate> for WireUpdate<'a> {
    fn from(update: &'a ItemUpdate) -> Self {
        Self {
            content: update.title.as_deref(),
            priority: update.priority.map(Priority::tier),
            due_date: update.due_date.map(|d| d.format("%Y-%m-%d").to_string()),
        }
    }
}
