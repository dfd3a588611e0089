//! Entity model for ledgerline.
//!
//! Defines what the change tracker needs to know about persistent entities:
//! - [`TrackedEntity`]: identity, schema, live property reads, destroyed flag
//! - [`EntityTypeSchema`] / [`PropertyDescriptor`]: which properties are tracked
//! - [`LiveEntity`]: a JSON-backed implementation for embedders and tests
//! - [`LifecycleObserver`]: notifications fired by the tracker
//!
//! The persistence layer owns the entities; the tracker only holds
//! [`EntityHandle`]s to them for the duration of one transaction.

mod entity;
mod observer;
mod schema;

pub use entity::{EntityHandle, LiveEntity, TrackedEntity};
pub use observer::{LifecycleObserver, NoopObserver};
pub use schema::{EntityTypeSchema, PropertyDescriptor};
