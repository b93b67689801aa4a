//! Domain Value Objects
//!
//! Immutable objects that represent concepts in the domain
//! with no conceptual identity, only defined by their attributes.

mod change;
mod descriptor;
mod json_node;
mod json_path;
mod kind;

pub use change::{ChangeKind, SchemaChange};
pub use descriptor::SchemaDescriptor;
pub use json_node::JsonNode;
pub use json_path::{JsonPath, PathSegment};
pub use kind::NodeKind;
