//! Infrastructure layer - adapters for external collaborators
//!
//! Currently limited to descriptor persistence.

pub mod schema_store;

pub use schema_store::{
    CacheMetadata, InMemorySchemaStore, SchemaStore, StoreError, StoreResult, namespaced_key,
};
