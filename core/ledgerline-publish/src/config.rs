//! Publishing configuration, read from `ledgerline.toml`.
//!
//! ```toml
//! [tracking]
//! mode = "allowlist"
//! entity-types = ["invoice", "customer"]
//!
//! [audit]
//! enabled = true
//! max-value-length = 4096
//!
//! [display-names]
//! invoice = "Invoice"
//! ```

use crate::PublishResult;
use ledgerline_tracker::{PolicyMode, TypeSetPolicy};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{info, warn};

/// Conventional config file name.
pub const CONFIG_FILE_NAME: &str = "ledgerline.toml";

/// Which entity types are tracked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TrackingConfig {
    #[serde(default)]
    pub mode: PolicyMode,
    #[serde(default)]
    pub entity_types: Vec<String>,
}

/// Audit trail settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct AuditConfig {
    #[serde(default = "default_audit_enabled")]
    pub enabled: bool,
    /// Rendered values longer than this many characters are truncated.
    #[serde(default = "default_max_value_length")]
    pub max_value_length: usize,
}

fn default_audit_enabled() -> bool {
    true
}

fn default_max_value_length() -> usize {
    4096
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: default_audit_enabled(),
            max_value_length: default_max_value_length(),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct LedgerConfig {
    #[serde(default)]
    pub tracking: TrackingConfig,
    #[serde(default)]
    pub audit: AuditConfig,
    /// Entity type → display name used in audit entries.
    #[serde(default)]
    pub display_names: BTreeMap<String, String>,
}

impl LedgerConfig {
    /// Parses configuration from TOML text.
    pub fn from_toml_str(contents: &str) -> PublishResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Loads configuration from a file.
    /// Falls back to defaults (track everything, audit on) if the file is
    /// missing, unreadable, or malformed.
    pub fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            info!("No config file found at {:?}, using defaults", path);
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(contents) => match Self::from_toml_str(&contents) {
                Ok(config) => {
                    info!("Loaded ledgerline config from {:?}", path);
                    config
                }
                Err(e) => {
                    warn!(
                        "Failed to parse config file {:?}: {}. Falling back to defaults.",
                        path, e
                    );
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read config file {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    /// Builds the publishing policy described by `[tracking]`.
    pub fn tracking_policy(&self) -> TypeSetPolicy {
        TypeSetPolicy::new(self.tracking.mode, self.tracking.entity_types.iter().cloned())
    }

    /// Display name for an entity type, falling back to the type itself.
    pub fn display_name<'a>(&'a self, entity_type: &'a str) -> &'a str {
        self.display_names
            .get(entity_type)
            .map(String::as_str)
            .unwrap_or(entity_type)
    }
}
