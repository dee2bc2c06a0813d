//! taskbridge core library
//!
//! Keeps a plain-text task outline and a Todoist-compatible task service in
//! step: completions are pulled back into the outline and locally written
//! tasks are pushed forward, keeping their nesting and their remote ids
//! across runs.
//!
//! # Architecture
//!
//! - **Outline**: parses task lines into [`TaskRecord`]s and rewrites lines
//!   (id stamping, completion marking). State lives in the text itself.
//! - **Remote**: retrying REST client behind the [`TaskApi`] trait
//! - **Sync**: pull and push reconcilers, sequenced by [`SyncEngine`]
//!
//! # Quick Start
//!
//! ```text
//! let config = Config::load()?;
//! config.validate_for_sync()?;
//!
//! let client = RemoteClient::new(config.effective_base_url(), token)?;
//! let engine = SyncEngine::new(client, config.tag_mappings.clone());
//! let result = engine.sync_source(&FileOutline::new("tasks.md"), &notifier).await?;
//! ```
//!
//! # Modules
//!
//! - `outline`: line codec and line buffer
//! - `models`: task records, remote items, mappings and results
//! - `remote`: HTTP transport, retry policy and the task service client
//! - `sync`: reconciliation
//! - `source`: document and notification collaborators
//! - `config`: application configuration

pub mod config;
pub mod models;
pub mod outline;
pub mod remote;
pub mod source;
pub mod sync;

pub use config::{normalize_tag, Config, ConfigError};
pub use models::{
    Collection, ItemUpdate, NewItem, Priority, RemoteItem, SyncFailure, SyncResult, TagMapping,
    TaskRecord,
};
pub use remote::{RemoteClient, RemoteError, TaskApi};
pub use source::{FileOutline, Notifier, OutlineSource};
pub use sync::{SyncEngine, SyncOutcome};
