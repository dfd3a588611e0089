//! Which entity types take part in change publishing.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Decides whether changes to an entity type are tracked at all.
///
/// Consulted before every enlistment and recognition; types it rejects are
/// invisible to the tracker.
pub trait ChangePublishingPolicy: Send + Sync {
    fn is_change_publishing_enabled(&self, entity_type: &str) -> bool;
}

impl<F> ChangePublishingPolicy for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn is_change_publishing_enabled(&self, entity_type: &str) -> bool {
        self(entity_type)
    }
}

/// Tracks every entity type.
#[derive(Debug, Default, Clone, Copy)]
pub struct TrackAll;

impl ChangePublishingPolicy for TrackAll {
    fn is_change_publishing_enabled(&self, _entity_type: &str) -> bool {
        true
    }
}

/// How a [`TypeSetPolicy`] interprets its type list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyMode {
    /// Every type is tracked; the list is ignored.
    #[default]
    All,
    /// Only listed types are tracked.
    Allowlist,
    /// All types except listed ones are tracked.
    Denylist,
}

/// Policy driven by a set of entity type names.
#[derive(Debug, Clone, Default)]
pub struct TypeSetPolicy {
    mode: PolicyMode,
    entity_types: HashSet<String>,
}

impl TypeSetPolicy {
    pub fn new<I, S>(mode: PolicyMode, entity_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            mode,
            entity_types: entity_types.into_iter().map(Into::into).collect(),
        }
    }

    /// Shorthand for an allowlist.
    pub fn allow<I, S>(entity_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(PolicyMode::Allowlist, entity_types)
    }

    /// Shorthand for a denylist.
    pub fn deny<I, S>(entity_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(PolicyMode::Denylist, entity_types)
    }

    pub fn mode(&self) -> PolicyMode {
        self.mode
    }
}

impl ChangePublishingPolicy for TypeSetPolicy {
    fn is_change_publishing_enabled(&self, entity_type: &str) -> bool {
        match self.mode {
            PolicyMode::All => true,
            PolicyMode::Allowlist => self.entity_types.contains(entity_type),
            PolicyMode::Denylist => !self.entity_types.contains(entity_type),
        }
    }
}
