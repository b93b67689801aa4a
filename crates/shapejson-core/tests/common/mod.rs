//! Common test utilities and mock implementations
//!
//! Provides a recording change listener, a store that fails every call and
//! a store whose removals fail, shared across the session test files.

#![allow(dead_code)]

use parking_lot::Mutex;
use shapejson::domain::{SchemaChange, SchemaDescriptor};
use shapejson::infrastructure::{
    CacheMetadata, InMemorySchemaStore, SchemaStore, StoreError, StoreResult,
};
use std::sync::Arc;

/// Listener that records every notification it receives
#[derive(Clone, Default)]
pub struct RecordingListener {
    calls: Arc<Mutex<Vec<Vec<SchemaChange>>>>,
}

impl RecordingListener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn calls(&self) -> Vec<Vec<SchemaChange>> {
        self.calls.lock().clone()
    }

    pub fn last(&self) -> Option<Vec<SchemaChange>> {
        self.calls.lock().last().cloned()
    }
}

impl shapejson::SchemaChangeListener for RecordingListener {
    fn on_schema_change(&self, changes: &[SchemaChange]) {
        self.calls.lock().push(changes.to_vec());
    }
}

/// Store whose every operation fails with a backend error
#[derive(Debug, Default)]
pub struct FailingStore;

impl FailingStore {
    fn fail<T>() -> StoreResult<T> {
        Err(StoreError::Backend("disk unavailable".to_string()))
    }
}

impl SchemaStore for FailingStore {
    fn save(&self, _key: &str, _descriptor: &SchemaDescriptor) -> StoreResult<()> {
        Self::fail()
    }

    fn load(&self, _key: &str) -> StoreResult<Option<SchemaDescriptor>> {
        Self::fail()
    }

    fn clear(&self, _key: &str) -> StoreResult<()> {
        Self::fail()
    }

    fn clear_all(&self, _namespace: &str) -> StoreResult<()> {
        Self::fail()
    }

    fn list_keys(&self, _namespace: &str) -> StoreResult<Vec<String>> {
        Self::fail()
    }

    fn metadata(&self, _key: &str) -> StoreResult<Option<CacheMetadata>> {
        Self::fail()
    }
}

/// Install a test subscriber so `RUST_LOG=shapejson=debug` shows session logs
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Store that reads and writes normally but fails every removal
#[derive(Debug, Clone, Default)]
pub struct StickyStore {
    inner: InMemorySchemaStore,
}

impl StickyStore {
    pub fn new(inner: InMemorySchemaStore) -> Self {
        Self { inner }
    }
}

impl SchemaStore for StickyStore {
    fn save(&self, key: &str, descriptor: &SchemaDescriptor) -> StoreResult<()> {
        self.inner.save(key, descriptor)
    }

    fn load(&self, key: &str) -> StoreResult<Option<SchemaDescriptor>> {
        self.inner.load(key)
    }

    fn clear(&self, _key: &str) -> StoreResult<()> {
        Err(StoreError::Backend("delete not permitted".to_string()))
    }

    fn clear_all(&self, _namespace: &str) -> StoreResult<()> {
        Err(StoreError::Backend("delete not permitted".to_string()))
    }

    fn list_keys(&self, namespace: &str) -> StoreResult<Vec<String>> {
        self.inner.list_keys(namespace)
    }

    fn metadata(&self, key: &str) -> StoreResult<Option<CacheMetadata>> {
        self.inner.metadata(key)
    }
}
