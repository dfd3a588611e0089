//! Transaction-scoped entity change tracking for ledgerline.
//!
//! # Architecture
//!
//! - **Context**: [`TransactionContext`] is the explicit per-transaction scope
//!   threaded through every call; it owns the ledger and the snapshot slot.
//! - **Ledger**: [`EntityChangeLedger`] merges repeated create/update/delete
//!   reports per entity and keeps one [`PropertyChangeRecord`] per property.
//! - **Tracker**: [`ChangeTracker`] implements [`EntityChangeTracker`], the
//!   contract the persistence layer calls during the transaction body.
//! - **Snapshot**: [`ChangeSnapshotter`] drains the ledger once, captures
//!   post-values and filters out changes nobody outside could observe.
//!
//! # Lifecycle
//!
//! 1. `enlist_*` / `recognize_*` calls during the transaction body
//! 2. one `snapshot` at pre-commit (later enlistment fails)
//! 3. publishing of the snapshot
//! 4. `TransactionContext::reset`, on commit and abort alike
//!
//! # Example
//!
//! ```
//! use ledgerline_model::{EntityHandle, EntityTypeSchema, LiveEntity, PropertyDescriptor};
//! use ledgerline_tracker::{ChangeTracker, EntityChangeTracker, TrackAll, TransactionContext};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! let schema = Arc::new(EntityTypeSchema::new(
//!     "note",
//!     vec![PropertyDescriptor::stored("/title")],
//! ));
//! let note = Arc::new(LiveEntity::new(schema, json!({"title": "draft"})));
//! let handle: EntityHandle = note.clone();
//!
//! let tracker = ChangeTracker::new(Arc::new(TrackAll));
//! let mut ctx = TransactionContext::new("alice");
//!
//! tracker.enlist_updating(&mut ctx, &handle).unwrap();
//! note.set("/title", json!("final"));
//!
//! let snapshot = tracker.snapshot(&mut ctx);
//! assert_eq!(snapshot.records().len(), 1);
//! ```

mod context;
mod error;
mod ledger;
mod policy;
mod record;
mod snapshot;
mod tracker;
mod warning;

pub use context::TransactionContext;
pub use error::{TrackerError, TrackerResult};
pub use ledger::EntityChangeLedger;
pub use policy::{ChangePublishingPolicy, PolicyMode, TrackAll, TypeSetPolicy};
pub use record::PropertyChangeRecord;
pub use snapshot::{ChangeSnapshotter, Snapshot, SnapshotCell, SnapshotCounts};
pub use tracker::{ChangeTracker, EntityChangeTracker};
pub use warning::ConsistencyWarning;
