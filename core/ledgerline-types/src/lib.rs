//! Core type definitions for ledgerline.
//!
//! This crate defines the small, dependency-light types every other
//! ledgerline crate builds on:
//! - Entity and transaction identifiers (UUID v7)
//! - [`ChangeKind`] and the merge rule for repeated observations
//! - [`PropertyValue`], with explicit placeholders for "did not exist yet"
//!   and "no longer exists"

mod change;
mod ids;
mod value;

pub use change::{ChangeKind, MergeOutcome};
pub use ids::{EntityRef, PropertyId, TransactionId};
pub use value::PropertyValue;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid UUID: {0}")]
    InvalidUuid(#[from] uuid::Error),
}
