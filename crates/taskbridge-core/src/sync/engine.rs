//! One full sync pass: pull, then push

use anyhow::Result;
use chrono::NaiveDate;
use tracing::info;

use super::pull::PullReconciler;
use super::push::PushReconciler;
use crate::models::{SyncResult, TagMapping};
use crate::remote::TaskApi;
use crate::source::{Notifier, OutlineSource};

/// Text and result of a sync pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOutcome {
    pub content: String,
    pub result: SyncResult,
}

impl SyncOutcome {
    pub fn changed(&self, original: &str) -> bool {
        self.content != original
    }
}

/// Sequences the reconcilers over one outline
///
/// Pull runs first so that tasks completed remotely are parsed as completed
/// and never pushed again.
pub struct SyncEngine<A: TaskApi> {
    api: A,
    mappings: Vec<TagMapping>,
    today: Option<NaiveDate>,
}

impl<A: TaskApi> SyncEngine<A> {
    pub fn new(api: A, mappings: Vec<TagMapping>) -> Self {
        Self {
            api,
            mappings,
            today: None,
        }
    }

    /// Use a fixed completion date instead of today's
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.today = Some(date);
        self
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn mappings(&self) -> &[TagMapping] {
        &self.mappings
    }

    /// Run pull then push over `content`
    pub async fn sync(&self, content: &str) -> SyncOutcome {
        let mut pull = PullReconciler::new(&self.api);
        if let Some(date) = self.today {
            pull = pull.with_date(date);
        }
        let pulled = pull.pull_completions(content).await;

        let pushed = PushReconciler::new(&self.api, &self.mappings)
            .push_tasks(&pulled.content)
            .await;

        let mut errors = pulled.errors;
        errors.extend(pushed.errors);

        let result = SyncResult {
            created: pushed.created,
            updated: pushed.updated,
            completed: pulled.completed,
            failed: errors.len(),
            errors,
        };
        info!(
            "Sync finished: {} created, {} updated, {} completed, {} failed",
            result.created, result.updated, result.completed, result.failed
        );

        SyncOutcome {
            content: pushed.content,
            result,
        }
    }

    /// Sync a document in place and report the summary
    ///
    /// The document is only written back when the pass changed it.
    pub async fn sync_source(
        &self,
        source: &dyn OutlineSource,
        notifier: &dyn Notifier,
    ) -> Result<SyncResult> {
        let original = source.read()?;
        let outcome = self.sync(&original).await;

        if outcome.changed(&original) {
            source.replace(&outcome.content)?;
        }

        notifier.notify(&outcome.result.summary());
        Ok(outcome.result)
    }
}
