//! Commit-time publishing for ledgerline.
//!
//! At pre-commit the [`PublishingCoordinator`] takes the transaction's
//! snapshot once, turns every retained property record into an
//! [`AuditEntry`], summarizes the changed entities in a [`ChangeSummary`],
//! and hands both to their sinks. Transaction state is reset afterwards
//! whether delivery succeeded or not; on abort it is simply discarded.
//!
//! Configuration ([`LedgerConfig`]) is read from `ledgerline.toml` and
//! supplies the tracking policy, audit settings and entity display names.

mod audit;
mod config;
mod coordinator;
mod error;
mod sink;
mod summary;

pub use audit::AuditEntry;
pub use config::{AuditConfig, CONFIG_FILE_NAME, LedgerConfig, TrackingConfig};
pub use coordinator::{PublishReport, PublishingCoordinator};
pub use error::{PublishError, PublishResult, SinkFailure, SinkKind};
pub use sink::{AuditSink, ChangeSink};
pub use summary::ChangeSummary;
