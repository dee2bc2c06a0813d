//! Reconciliation between an outline and the remote task service
//!
//! ## Flow
//!
//! 1. Pull: fetch every synced, open task and check off the ones completed
//!    remotely
//! 2. Push: create or update every open task whose tags map to a collection,
//!    parents before children
//!
//! Both phases turn per-task failures into [`SyncFailure`](crate::models::SyncFailure)
//! entries; neither aborts the pass.
//!
//! ## Usage
//!
//! ```ignore
//! let engine = SyncEngine::new(client, config.tag_mappings.clone());
//! let outcome = engine.sync(&text).await;
//! println!("{}", outcome.result.summary());
//! ```

mod engine;
mod hierarchy;
mod pull;
mod push;

#[cfg(test)]
mod test_helpers;

pub use engine::{SyncEngine, SyncOutcome};
pub use hierarchy::Hierarchy;
pub use pull::{PullOutcome, PullReconciler};
pub use push::{resolve_collection, PushOutcome, PushReconciler};
