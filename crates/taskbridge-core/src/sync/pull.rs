//! Pull: completion state from the remote service into the outline
//!
//! Only tasks that have been pushed (carry a remote id) and are still open
//! locally are checked. A task completed remotely is checked off locally and
//! loses its id.

use chrono::{Local, NaiveDate};
use tracing::{debug, info, warn};

use crate::models::SyncFailure;
use crate::outline::{mark_completed, parse_content, LineBuffer};
use crate::remote::TaskApi;

/// Result of a pull pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PullOutcome {
    pub content: String,
    pub completed: usize,
    pub errors: Vec<SyncFailure>,
}

/// Refreshes local completion state from the remote service
pub struct PullReconciler<'a, A: TaskApi + ?Sized> {
    api: &'a A,
    today: Option<NaiveDate>,
}

impl<'a, A: TaskApi + ?Sized> PullReconciler<'a, A> {
    pub fn new(api: &'a A) -> Self {
        Self { api, today: None }
    }

    /// Use a fixed completion date instead of today's
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.today = Some(date);
        self
    }

    /// Check each synced, open task and check off the ones completed remotely
    ///
    /// Tasks are fetched one at a time in line order. A failed fetch is
    /// recorded and the pass moves on.
    pub async fn pull_completions(&self, content: &str) -> PullOutcome {
        let mut buffer = LineBuffer::from_text(content);
        let today = self.today.unwrap_or_else(|| Local::now().date_naive());
        let mut outcome = PullOutcome::default();

        for task in parse_content(content).iter().filter(|t| !t.is_completed) {
            let Some(id) = task.remote_id.as_deref() else {
                continue;
            };

            match self.api.get_item(id).await {
                Ok(Some(item)) if item.is_completed => {
                    buffer.rewrite(task.line_number, |line| mark_completed(line, today));
                    outcome.completed += 1;
                    info!("Marked \"{}\" complete (line {})", task.title, task.line_number);
                }
                Ok(Some(_)) => {}
                Ok(None) => debug!("Task {} no longer exists remotely", id),
                Err(e) => {
                    warn!("Failed to fetch \"{}\": {}", task.title, e);
                    outcome.errors.push(SyncFailure::new(task, &e));
                }
            }
        }

        outcome.content = buffer.into_text();
        outcome
    }
}
