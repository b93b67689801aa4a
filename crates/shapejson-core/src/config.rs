//! Configuration for parsing and structural change detection
//!
//! All types deserialize from any serde format so hosts can embed them in
//! their own configuration files. Missing fields take their defaults.

use serde::{Deserialize, Serialize};

/// Root validation rules applied after decoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Accept a `null` root
    pub allow_null: bool,
    /// Reject any root that is not an object
    pub require_object: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            allow_null: true,
            require_object: false,
        }
    }
}

impl ParseOptions {
    /// Options that only accept object roots
    pub fn strict() -> Self {
        Self {
            allow_null: false,
            require_object: true,
        }
    }
}

/// Default persistence namespace
pub const DEFAULT_NAMESPACE: &str = "shapejson";

/// Default key of the session descriptor inside the namespace
pub const DEFAULT_SCHEMA_KEY: &str = "last_schema";

/// Session-level detection and persistence settings
///
/// Expiry of stored descriptors belongs to the store, see
/// [`InMemorySchemaStore::with_freshness_window`](crate::infrastructure::InMemorySchemaStore::with_freshness_window).
///
/// # Examples
/// ```
/// # use shapejson::config::DetectionConfig;
/// let config: DetectionConfig =
///     serde_json::from_str(r#"{"schema_key": "orders"}"#).unwrap();
/// assert_eq!(config.namespace, "shapejson");
/// assert!(config.persist);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Persistence key namespace
    pub namespace: String,
    /// Key under which the last-seen descriptor is stored
    pub schema_key: String,
    /// Write to the attached store
    ///
    /// When false the store is only read, once, when it is attached: new
    /// descriptors are not saved and resets leave the stored entry alone.
    pub persist: bool,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            schema_key: DEFAULT_SCHEMA_KEY.to_string(),
            persist: true,
        }
    }
}

impl DetectionConfig {
    /// Set the persistence namespace
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Set the descriptor key
    pub fn with_schema_key(mut self, key: impl Into<String>) -> Self {
        self.schema_key = key.into();
        self
    }

    /// Enable or disable writes to the store
    pub fn with_persist(mut self, persist: bool) -> Self {
        self.persist = persist;
        self
    }
}
