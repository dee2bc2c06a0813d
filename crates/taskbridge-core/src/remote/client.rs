//! Remote task service client
//!
//! Typed operations over the REST API with retry/backoff on transient
//! failures. Reads of single items are never retried and treat a missing item
//! as an ordinary `None`.

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use super::error::{RemoteError, RemoteResult};
use super::retry::{RetryPolicy, Sleeper, TokioSleeper};
use super::transport::{ApiRequest, ApiResponse, HttpTransport, Transport};
use super::wire::{WireItem, WireNewItem, WireUpdate};
use super::TaskApi;
use crate::models::{Collection, ItemUpdate, NewItem, RemoteItem};

/// Production API root
pub const DEFAULT_BASE_URL: &str = "https://api.todoist.com/rest/v2";

/// Client for the remote task service
pub struct RemoteClient<T: Transport = HttpTransport, S: Sleeper = TokioSleeper> {
    transport: T,
    sleeper: S,
    policy: RetryPolicy,
}

impl RemoteClient {
    /// Create a client that talks HTTP to `base_url` with a bearer token
    pub fn new(base_url: &str, token: &str) -> RemoteResult<Self> {
        let transport = HttpTransport::new(base_url, token)?;
        Ok(Self::with_transport(
            transport,
            TokioSleeper,
            RetryPolicy::default(),
        ))
    }
}

impl<T: Transport, S: Sleeper> RemoteClient<T, S> {
    /// Create a client with a custom transport and delay mechanism
    pub fn with_transport(transport: T, sleeper: S, policy: RetryPolicy) -> Self {
        Self {
            transport,
            sleeper,
            policy,
        }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Send a request, retrying retryable statuses with exponential backoff
    async fn send_with_retry(&self, request: ApiRequest) -> RemoteResult<ApiResponse> {
        let max_attempts = self.policy.max_attempts;
        let mut last_status = 0;

        for attempt in 1..=max_attempts {
            let response = self.transport.execute(&request).await?;

            if response.is_success() {
                return Ok(response);
            }

            if !self.policy.should_retry(response.status) {
                return Err(RemoteError::from_status(response.status));
            }

            last_status = response.status;
            warn!(
                "{} returned {} (attempt {}/{})",
                request.path, response.status, attempt, max_attempts
            );

            if attempt < max_attempts {
                self.sleeper.sleep(self.policy.delay_for(attempt - 1)).await;
            }
        }

        Err(RemoteError::RetriesExhausted {
            attempts: max_attempts,
            last_status,
        })
    }
}

fn to_body<B: serde::Serialize>(body: &B) -> RemoteResult<Value> {
    Ok(serde_json::to_value(body)?)
}

#[async_trait]
impl<T: Transport, S: Sleeper> TaskApi for RemoteClient<T, S> {
    async fn list_collections(&self) -> RemoteResult<Vec<Collection>> {
        let response = self.send_with_retry(ApiRequest::get("/projects")).await?;
        response.json()
    }

    async fn get_item(&self, id: &str) -> RemoteResult<Option<RemoteItem>> {
        let request = ApiRequest::get(format!("/tasks/{}", id));

        let response = match self.transport.execute(&request).await {
            Ok(response) => response,
            Err(e) if e.is_not_found() => {
                debug!("Task {} not found remotely", id);
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        if response.status == 404 {
            debug!("Task {} not found remotely", id);
            return Ok(None);
        }
        if !response.is_success() {
            return Err(RemoteError::Status {
                status: response.status,
            });
        }

        let item: WireItem = response.json()?;
        Ok(Some(item.into()))
    }

    async fn create_item(&self, item: &NewItem) -> RemoteResult<RemoteItem> {
        let body = to_body(&WireNewItem::from(item))?;
        let response = self
            .send_with_retry(ApiRequest::post("/tasks").with_body(body))
            .await?;

        let created: RemoteItem = response.json::<WireItem>()?.into();
        debug!("Created task {}", created.id);
        Ok(created)
    }

    async fn update_item(&self, id: &str, update: &ItemUpdate) -> RemoteResult<RemoteItem> {
        let body = to_body(&WireUpdate::from(update))?;
        let response = self
            .send_with_retry(ApiRequest::post(format!("/tasks/{}", id)).with_body(body))
            .await?;

        let updated: WireItem = response.json()?;
        Ok(updated.into())
    }

    async fn close_item(&self, id: &str) -> RemoteResult<()> {
        self.send_with_retry(ApiRequest::post(format!("/tasks/{}/close", id)))
            .await?;
        Ok(())
    }
}
