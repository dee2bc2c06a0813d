//! Remote task service
//!
//! Talks to a Todoist-compatible REST API:
//!
//! | Operation          | Route                     | Retried |
//! |--------------------|---------------------------|---------|
//! | list collections   | `GET /projects`           | yes     |
//! | get item           | `GET /tasks/{id}`         | no      |
//! | create item        | `POST /tasks`             | yes     |
//! | update item        | `POST /tasks/{id}`        | yes     |
//! | close item         | `POST /tasks/{id}/close`  | yes     |
//!
//! ## Usage
//!
//! ```ignore
//! let client = RemoteClient::new(DEFAULT_BASE_URL, &token)?;
//! let projects = client.list_collections().await?;
//! ```

mod client;
mod error;
mod retry;
mod transport;
mod wire;

pub use client::{RemoteClient, DEFAULT_BASE_URL};
pub use error::{RemoteError, RemoteResult};
pub use retry::{is_retryable_status, RetryPolicy, Sleeper, TokioSleeper, RETRYABLE_STATUS_CODES};
pub use transport::{ApiRequest, ApiResponse, HttpTransport, Method, Transport};

use async_trait::async_trait;

use crate::models::{Collection, ItemUpdate, NewItem, RemoteItem};

/// Operations the reconcilers need from the remote service
#[async_trait]
pub trait TaskApi: Send + Sync {
    /// All collections (projects) visible to the token
    async fn list_collections(&self) -> RemoteResult<Vec<Collection>>;

    /// Fetch one item; `Ok(None)` when it has been deleted
    async fn get_item(&self, id: &str) -> RemoteResult<Option<RemoteItem>>;

    async fn create_item(&self, item: &NewItem) -> RemoteResult<RemoteItem>;

    /// Apply a partial update; fails with `RemoteError::NotFound` if the item
    /// is gone
    async fn update_item(&self, id: &str, update: &ItemUpdate) -> RemoteResult<RemoteItem>;

    async fn close_item(&self, id: &str) -> RemoteResult<()>;
}
