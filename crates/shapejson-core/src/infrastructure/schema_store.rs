//! Descriptor persistence
//!
//! [`SchemaStore`] is the contract a session uses to keep its last-seen
//! descriptor across process restarts. [`InMemorySchemaStore`] is a
//! thread-safe implementation backed by `DashMap`, suitable for tests and
//! for hosts that persist the map themselves.

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use std::sync::Arc;

use crate::domain::SchemaDescriptor;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Store failure
///
/// Sessions log and swallow these; they never reach parse or diff callers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// Descriptor could not be encoded or a stored entry could not be decoded
    #[error("Descriptor serialization failed: {0}")]
    Serialization(String),

    /// Underlying storage failed
    #[error("Storage backend error: {0}")]
    Backend(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Bookkeeping for one stored descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheMetadata {
    /// When the entry was written
    pub cached_at: DateTime<Utc>,
    /// Length of the stored JSON text
    pub size_bytes: usize,
    /// Entry is older than the store's freshness window
    pub is_expired: bool,
}

/// Keyed descriptor storage
///
/// Keys passed to `save`, `load`, `clear` and `metadata` are full keys,
/// usually built with [`namespaced_key`]. `clear_all` and `list_keys`
/// operate on every key under a namespace.
pub trait SchemaStore: Send + Sync {
    /// Write `descriptor` under `key`, replacing any previous entry
    fn save(&self, key: &str, descriptor: &SchemaDescriptor) -> StoreResult<()>;

    /// Read the descriptor under `key`
    ///
    /// Returns `Ok(None)` when absent or expired.
    fn load(&self, key: &str) -> StoreResult<Option<SchemaDescriptor>>;

    /// Remove the entry under `key`
    fn clear(&self, key: &str) -> StoreResult<()>;

    /// Remove every entry under `namespace`
    fn clear_all(&self, namespace: &str) -> StoreResult<()>;

    /// Keys under `namespace`, sorted
    fn list_keys(&self, namespace: &str) -> StoreResult<Vec<String>>;

    /// Bookkeeping for `key`, if present
    fn metadata(&self, key: &str) -> StoreResult<Option<CacheMetadata>>;
}

/// Join `namespace` and `key` into a full store key
pub fn namespaced_key(namespace: &str, key: &str) -> String {
    format!("{namespace}:{key}")
}

fn namespace_prefix(namespace: &str) -> String {
    format!("{namespace}:")
}

#[derive(Debug, Clone)]
struct StoredDescriptor {
    json: String,
    cached_at: DateTime<Utc>,
}

/// Thread-safe in-memory descriptor store
///
/// Descriptors are kept in their persisted JSON text form so that size
/// bookkeeping and decode failures behave like a durable backend. Clones
/// share the same underlying map.
///
/// # Examples
/// ```
/// # use shapejson::infrastructure::{InMemorySchemaStore, SchemaStore, namespaced_key};
/// # use shapejson::domain::SchemaDescriptor;
/// let store = InMemorySchemaStore::new();
/// let key = namespaced_key("app", "users");
/// store.save(&key, &SchemaDescriptor::Integer).unwrap();
/// assert_eq!(store.load(&key).unwrap(), Some(SchemaDescriptor::Integer));
/// assert_eq!(store.list_keys("app").unwrap(), ["app:users"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemorySchemaStore {
    entries: Arc<DashMap<String, StoredDescriptor>>,
    freshness_window: Option<Duration>,
}

impl InMemorySchemaStore {
    /// Create an empty store whose entries never expire
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store that expires entries older than `window`
    pub fn with_freshness_window(window: std::time::Duration) -> Self {
        Self {
            entries: Arc::default(),
            freshness_window: Duration::from_std(window).ok(),
        }
    }

    /// Number of entries, expired ones included
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    fn is_expired(&self, entry: &StoredDescriptor, now: DateTime<Utc>) -> bool {
        self.freshness_window
            .is_some_and(|window| now - entry.cached_at > window)
    }

    /// Write raw JSON text under `key` with an explicit timestamp
    #[cfg(test)]
    fn insert_raw(&self, key: &str, json: &str, cached_at: DateTime<Utc>) {
        self.entries.insert(
            key.to_string(),
            StoredDescriptor {
                json: json.to_string(),
                cached_at,
            },
        );
    }
}

impl SchemaStore for InMemorySchemaStore {
    fn save(&self, key: &str, descriptor: &SchemaDescriptor) -> StoreResult<()> {
        let json = descriptor.to_json_string()?;
        self.entries.insert(
            key.to_string(),
            StoredDescriptor {
                json,
                cached_at: Utc::now(),
            },
        );
        Ok(())
    }

    fn load(&self, key: &str) -> StoreResult<Option<SchemaDescriptor>> {
        let Some(entry) = self.entries.get(key).map(|e| e.value().clone()) else {
            return Ok(None);
        };
        if self.is_expired(&entry, Utc::now()) {
            tracing::debug!(key, cached_at = %entry.cached_at, "evicting expired descriptor");
            self.entries.remove(key);
            return Ok(None);
        }
        Ok(Some(SchemaDescriptor::from_json_str(&entry.json)?))
    }

    fn clear(&self, key: &str) -> StoreResult<()> {
        self.entries.remove(key);
        Ok(())
    }

    fn clear_all(&self, namespace: &str) -> StoreResult<()> {
        let prefix = namespace_prefix(namespace);
        self.entries.retain(|key, _| !key.starts_with(&prefix));
        Ok(())
    }

    fn list_keys(&self, namespace: &str) -> StoreResult<Vec<String>> {
        let prefix = namespace_prefix(namespace);
        let mut keys: Vec<String> = self
            .entries
            .iter()
            .filter(|entry| entry.key().starts_with(&prefix))
            .map(|entry| entry.key().clone())
            .collect();
        keys.sort();
        Ok(keys)
    }

    fn metadata(&self, key: &str) -> StoreResult<Option<CacheMetadata>> {
        let now = Utc::now();
        Ok(self.entries.get(key).map(|entry| CacheMetadata {
            cached_at: entry.cached_at,
            size_bytes: entry.json.len(),
            is_expired: self.is_expired(entry.value(), now),
        }))
    }
}
