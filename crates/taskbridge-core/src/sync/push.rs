//! Push: local tasks to the remote service
//!
//! Open tasks whose tags match a mapping are created remotely (and stamped
//! with the new id) or updated in place. Tasks are processed shallowest
//! first so a child always sees its parent's id, even one assigned in the
//! same pass.

use std::collections::HashMap;

use tracing::{debug, info, warn};

use super::hierarchy::Hierarchy;
use crate::models::{ItemUpdate, NewItem, SyncFailure, TagMapping, TaskRecord};
use crate::outline::{append_id, parse_content, LineBuffer};
use crate::remote::{RemoteResult, TaskApi};

/// Result of a push pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PushOutcome {
    pub content: String,
    pub created: usize,
    pub updated: usize,
    pub errors: Vec<SyncFailure>,
}

enum PushAction {
    Created(String),
    Updated(String),
}

/// Find the collection for a task: first mapping whose tag it carries
pub fn resolve_collection<'m>(mappings: &'m [TagMapping], task: &TaskRecord) -> Option<&'m str> {
    mappings
        .iter()
        .find(|mapping| task.has_tag(&mapping.tag))
        .map(|mapping| mapping.collection_id.as_str())
}

/// Creates and updates remote items from the outline
pub struct PushReconciler<'a, A: TaskApi + ?Sized> {
    api: &'a A,
    mappings: &'a [TagMapping],
}

impl<'a, A: TaskApi + ?Sized> PushReconciler<'a, A> {
    pub fn new(api: &'a A, mappings: &'a [TagMapping]) -> Self {
        Self { api, mappings }
    }

    /// Push every open, mapped task
    pub async fn push_tasks(&self, content: &str) -> PushOutcome {
        let mut buffer = LineBuffer::from_text(content);
        let records = parse_content(content);
        let hierarchy = Hierarchy::build(&records);
        let mut assigned: HashMap<usize, String> = HashMap::new();
        let mut outcome = PushOutcome::default();

        let mut pending: Vec<&TaskRecord> = records.iter().filter(|t| !t.is_completed).collect();
        // Stable: siblings keep their line order
        pending.sort_by_key(|t| t.indent_level);

        for task in pending {
            let Some(collection_id) = resolve_collection(self.mappings, task) else {
                debug!("No mapping for \"{}\", skipping", task.title);
                continue;
            };
            let parent_id = hierarchy.parent_id(task.line_number, &assigned);

            match self.push_one(task, collection_id, parent_id.as_deref()).await {
                Ok(PushAction::Created(id)) => {
                    buffer.rewrite(task.line_number, |line| append_id(line, &id));
                    info!("Created \"{}\" as {}", task.title, id);
                    assigned.insert(task.line_number, id);
                    outcome.created += 1;
                }
                Ok(PushAction::Updated(id)) => {
                    debug!("Updated \"{}\" ({})", task.title, id);
                    assigned.insert(task.line_number, id);
                    outcome.updated += 1;
                }
                Err(e) => {
                    warn!("Failed to push \"{}\": {}", task.title, e);
                    outcome.errors.push(SyncFailure::new(task, &e));
                }
            }
        }

        outcome.content = buffer.into_text();
        outcome
    }

    async fn push_one(
        &self,
        task: &TaskRecord,
        collection_id: &str,
        parent_id: Option<&str>,
    ) -> RemoteResult<PushAction> {
        if let Some(id) = task.remote_id.as_deref() {
            match self.api.update_item(id, &ItemUpdate::from_task(task)).await {
                Ok(_) => return Ok(PushAction::Updated(id.to_string())),
                Err(e) if e.is_not_found() => {
                    info!("Task {} was deleted remotely, recreating", id);
                }
                Err(e) => return Err(e),
            }
        }

        let item = NewItem::from_task(task, collection_id, parent_id);
        let created = self.api.create_item(&item).await?;
        Ok(PushAction::Created(created.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Priority;
    use crate::outline::parse_line;
    use crate::sync::test_helpers::{Call, FakeApi};
    use chrono::NaiveDate;

    fn work_mappings() -> Vec<TagMapping> {
        vec![TagMapping::new("#work", "proj-work", "Work")]
    }

    #[tokio::test]
    async fn test_creates_new_task_and_appends_id() {
        let api = FakeApi::new();
        let mappings = work_mappings();

        let outcome = PushReconciler::new(&api, &mappings)
            .push_tasks("- [ ] New task #work")
            .await;

        let creates = api.creates();
        assert_eq!(creates.len(), 1);
        assert_eq!(creates[0].title, "New task");
        assert_eq!(creates[0].collection_id, "proj-work");
        assert_eq!(creates[0].parent_id, None);
        assert_eq!(outcome.content, "- [ ] New task #work 🆔 new-1");
        assert_eq!(api.item("new-1").map(|i| i.collection_id).as_deref(), Some("proj-work"));
        assert_eq!(outcome.created, 1);
        assert_eq!(outcome.updated, 0);
    }

    #[tokio::test]
    async fn test_updates_existing_task() {
        let api = FakeApi::new();
        api.insert("existing-123", false);
        let mappings = work_mappings();
        let content = "- [ ] Updated task #work 📅 2024-01-20 ⏳ 2024-01-15 🔼 🆔 existing-123";

        let outcome = PushReconciler::new(&api, &mappings).push_tasks(content).await;

        let updates = api.updates();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].0, "existing-123");
        assert_eq!(
            updates[0].1,
            ItemUpdate {
                title: Some("Updated task".to_string()),
                priority: Some(Priority::High),
                due_date: NaiveDate::from_ymd_opt(2024, 1, 20),
            }
        );
        assert!(api.creates().is_empty());
        assert_eq!(outcome.content, content);
        assert_eq!(outcome.updated, 1);
    }

    #[tokio::test]
    async fn test_scheduled_date_used_without_due_date() {
        let api = FakeApi::new();
        let mappings = work_mappings();

        PushReconciler::new(&api, &mappings)
            .push_tasks("- [ ] Plan #work ⏳ 2024-01-15")
            .await;

        assert_eq!(api.creates()[0].due_date, NaiveDate::from_ymd_opt(2024, 1, 15));
    }

    #[tokio::test]
    async fn test_skips_unmapped_tasks() {
        let api = FakeApi::new();
        let mappings = work_mappings();
        let content = "- [ ] Task #personal\n- [ ] Untagged";

        let outcome = PushReconciler::new(&api, &mappings).push_tasks(content).await;

        assert!(api.calls().is_empty());
        assert_eq!(outcome, PushOutcome {
            content: content.to_string(),
            ..Default::default()
        });
    }

    #[tokio::test]
    async fn test_first_matching_mapping_wins() {
        let api = FakeApi::new();
        let mappings = vec![
            TagMapping::new("#home", "proj-home", "Home"),
            TagMapping::new("#work", "proj-work", "Work"),
        ];

        PushReconciler::new(&api, &mappings)
            .push_tasks("- [ ] Both #work #home")
            .await;

        // Mapping order decides, not tag order in the line
        assert_eq!(api.creates()[0].collection_id, "proj-home");
    }

    #[tokio::test]
    async fn test_skips_completed_tasks() {
        let api = FakeApi::new();
        let mappings = work_mappings();

        PushReconciler::new(&api, &mappings)
            .push_tasks("- [x] Done #work ✅ 2024-01-16")
            .await;

        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_recreates_task_deleted_remotely() {
        let api = FakeApi::new();
        let mappings = work_mappings();

        let outcome = PushReconciler::new(&api, &mappings)
            .push_tasks("- [ ] Task #work 🆔 deleted-123")
            .await;

        let calls = api.calls();
        assert_eq!(calls.len(), 2);
        assert!(matches!(calls[0], Call::Update(ref id, _) if id == "deleted-123"));
        assert!(matches!(calls[1], Call::Create(_)));
        assert_eq!(outcome.content, "- [ ] Task #work 🆔 new-1");
        assert_eq!(outcome.created, 1);
        assert_eq!(outcome.updated, 0);
        assert!(outcome.errors.is_empty());
    }

    #[tokio::test]
    async fn test_other_update_failure_is_recorded() {
        let api = FakeApi::new();
        api.fail_item("flaky", 401);
        let mappings = work_mappings();
        let content = "- [ ] Broken #work 🆔 flaky\n- [ ] Fresh #work";

        let outcome = PushReconciler::new(&api, &mappings).push_tasks(content).await;

        assert_eq!(outcome.errors.len(), 1);
        assert_eq!(outcome.errors[0].title, "Broken");
        assert!(outcome.errors[0].message.contains("401"));
        // The failing line is untouched, the batch carried on
        assert_eq!(outcome.created, 1);
        assert_eq!(
            outcome.content,
            "- [ ] Broken #work 🆔 flaky\n- [ ] Fresh #work 🆔 new-1"
        );
    }

    #[tokio::test]
    async fn test_create_failure_is_recorded() {
        let api = FakeApi::new();
        api.fail_creates(400);
        let mappings = work_mappings();
        let content = "- [ ] Rejected #work";

        let outcome = PushReconciler::new(&api, &mappings).push_tasks(content).await;

        assert_eq!(outcome.created, 0);
        assert_eq!(outcome.errors.len(), 1);
        assert_eq!(outcome.content, content);
    }

    #[tokio::test]
    async fn test_hierarchy_uses_ids_assigned_in_same_pass() {
        let api = FakeApi::new();
        let mappings = work_mappings();
        let content = "\
- [ ] Root #work
    - [ ] Child A #work
    - [ ] Child B #work
        - [ ] Grandchild #work";

        let outcome = PushReconciler::new(&api, &mappings).push_tasks(content).await;

        let creates = api.creates();
        let parent_of = |title: &str| {
            creates
                .iter()
                .find(|c| c.title == title)
                .and_then(|c| c.parent_id.clone())
        };
        assert_eq!(parent_of("Root"), None);
        assert_eq!(parent_of("Child A").as_deref(), Some("new-1"));
        assert_eq!(parent_of("Child B").as_deref(), Some("new-1"));
        // Grandchild hangs off its nearest shallower sibling, not the root
        assert_eq!(parent_of("Grandchild").as_deref(), Some("new-3"));
        assert_eq!(outcome.created, 4);

        // Lines keep their indentation and carry their own ids
        let lines: Vec<&str> = outcome.content.lines().collect();
        assert_eq!(lines[3], "        - [ ] Grandchild #work 🆔 new-4");
    }

    #[tokio::test]
    async fn test_parents_processed_before_children() {
        let api = FakeApi::new();
        let mappings = work_mappings();
        let content = "- [ ] A #work\n    - [ ] A1 #work\n- [ ] B #work";

        PushReconciler::new(&api, &mappings).push_tasks(content).await;

        let titles: Vec<String> = api.creates().into_iter().map(|c| c.title).collect();
        assert_eq!(titles, vec!["A", "B", "A1"]);
    }

    #[tokio::test]
    async fn test_unmapped_parent_still_provides_known_id() {
        let api = FakeApi::new();
        let mappings = work_mappings();
        let content = "- [ ] Personal parent #home 🆔 home-1\n    - [ ] Work child #work";

        PushReconciler::new(&api, &mappings).push_tasks(content).await;

        assert_eq!(api.creates()[0].parent_id.as_deref(), Some("home-1"));
    }

    #[tokio::test]
    async fn test_second_run_creates_nothing() {
        let api = FakeApi::new();
        let mappings = work_mappings();
        let reconciler = PushReconciler::new(&api, &mappings);
        let content = "- [ ] Root #work\n    - [ ] Child #work";

        let first = reconciler.push_tasks(content).await;
        assert_eq!(first.created, 2);
        api.clear_calls();

        let second = reconciler.push_tasks(&first.content).await;

        assert_eq!(second.created, 0);
        assert_eq!(second.updated, 2);
        assert!(api.creates().is_empty());
        assert_eq!(second.content, first.content);
    }

    #[test]
    fn test_resolve_collection() {
        let mappings = work_mappings();
        let tagged = parse_line("- [ ] Task #work", 0).unwrap();
        let untagged = parse_line("- [ ] Task #workshop", 0).unwrap();

        assert_eq!(resolve_collection(&mappings, &tagged), Some("proj-work"));
        assert_eq!(resolve_collection(&mappings, &untagged), None);
    }
}
