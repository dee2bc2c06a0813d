//! Shared test helpers for sync module tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::models::{Collection, ItemUpdate, NewItem, Priority, RemoteItem};
use crate::remote::{RemoteError, RemoteResult, TaskApi};

/// A call made against the fake service
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ListCollections,
    Get(String),
    Create(NewItem),
    Update(String, ItemUpdate),
    Close(String),
}

#[derive(Default)]
struct FakeState {
    items: HashMap<String, RemoteItem>,
    failures: HashMap<String, u16>,
    fail_creates: Option<u16>,
    next_id: u32,
    calls: Vec<Call>,
}

/// In-memory remote service that records every call
#[derive(Default)]
pub struct FakeApi {
    state: Mutex<FakeState>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an existing remote item
    pub fn insert(&self, id: &str, is_completed: bool) {
        let item = RemoteItem {
            id: id.to_string(),
            title: format!("Remote {}", id),
            collection_id: "proj-1".to_string(),
            priority: Priority::Low,
            due_date: None,
            parent_id: None,
            is_completed,
        };
        self.state.lock().unwrap().items.insert(id.to_string(), item);
    }

    /// Make every get/update/close of `id` fail with `status`
    pub fn fail_item(&self, id: &str, status: u16) {
        self.state
            .lock()
            .unwrap()
            .failures
            .insert(id.to_string(), status);
    }

    /// Make every create fail with `status`
    pub fn fail_creates(&self, status: u16) {
        self.state.lock().unwrap().fail_creates = Some(status);
    }

    pub fn item(&self, id: &str) -> Option<RemoteItem> {
        self.state.lock().unwrap().items.get(id).cloned()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn creates(&self) -> Vec<NewItem> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Create(item) => Some(item),
                _ => None,
            })
            .collect()
    }

    pub fn updates(&self) -> Vec<(String, ItemUpdate)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Update(id, update) => Some((id, update)),
                _ => None,
            })
            .collect()
    }

    pub fn clear_calls(&self) {
        self.state.lock().unwrap().calls.clear();
    }
}

#[async_trait]
impl TaskApi for FakeApi {
    async fn list_collections(&self) -> RemoteResult<Vec<Collection>> {
        self.state.lock().unwrap().calls.push(Call::ListCollections);
        Ok(vec![Collection {
            id: "proj-1".to_string(),
            name: "Work".to_string(),
        }])
    }

    async fn get_item(&self, id: &str) -> RemoteResult<Option<RemoteItem>> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::Get(id.to_string()));

        if let Some(status) = state.failures.get(id) {
            return Err(RemoteError::from_status(*status));
        }
        Ok(state.items.get(id).cloned())
    }

    async fn create_item(&self, item: &NewItem) -> RemoteResult<RemoteItem> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::Create(item.clone()));

        if let Some(status) = state.fail_creates {
            return Err(RemoteError::from_status(status));
        }

        state.next_id += 1;
        let created = RemoteItem {
            id: format!("new-{}", state.next_id),
            title: item.title.clone(),
            collection_id: item.collection_id.clone(),
            priority: item.priority.unwrap_or_default(),
            due_date: item.due_date,
            parent_id: item.parent_id.clone(),
            is_completed: false,
        };
        state.items.insert(created.id.clone(), created.clone());
        Ok(created)
    }

    async fn update_item(&self, id: &str, update: &ItemUpdate) -> RemoteResult<RemoteItem> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::Update(id.to_string(), update.clone()));

        if let Some(status) = state.failures.get(id) {
            return Err(RemoteError::from_status(*status));
        }

        let item = state.items.get_mut(id).ok_or(RemoteError::NotFound)?;
        if let Some(ref title) = update.title {
            item.title = title.clone();
        }
        if let Some(priority) = update.priority {
            item.priority = priority;
        }
        if update.due_date.is_some() {
            item.due_date = update.due_date;
        }
        Ok(item.clone())
    }

    async fn close_item(&self, id: &str) -> RemoteResult<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::Close(id.to_string()));

        if let Some(status) = state.failures.get(id) {
            return Err(RemoteError::from_status(*status));
        }

        let item = state.items.get_mut(id).ok_or(RemoteError::NotFound)?;
        item.is_completed = true;
        Ok(())
    }
}
