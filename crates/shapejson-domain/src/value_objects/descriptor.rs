//! Structural descriptor value object
//!
//! A value-stripped shadow of a [`JsonNode`](super::JsonNode) tree. Two
//! payloads with the same keys and kinds produce equal descriptors, which
//! makes descriptors cheap to cache and compare between parses.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::NodeKind;

/// Shape of a JSON value without its data
///
/// Serializes as `{"type": "<kind>"}` for scalars,
/// `{"type": "object", "properties": {...}}` for objects and
/// `{"type": "list", "items": {...}}` for lists.
///
/// A list descriptor records only the shape of its first element; an empty
/// list records [`SchemaDescriptor::Unknown`]. Heterogeneous lists are
/// therefore summarised approximately.
///
/// # Examples
/// ```
/// # use shapejson_domain::value_objects::{NodeKind, SchemaDescriptor};
/// let descriptor = SchemaDescriptor::object([("id", SchemaDescriptor::Integer)]);
/// assert_eq!(descriptor.kind(), NodeKind::Object);
/// assert_eq!(
///     descriptor.to_json_string().unwrap(),
///     r#"{"type":"object","properties":{"id":{"type":"integer"}}}"#
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SchemaDescriptor {
    /// String leaf
    String,
    /// Integer leaf
    Integer,
    /// Float leaf
    Float,
    /// Boolean leaf
    Boolean,
    /// Null leaf
    Null,
    /// Unclassified leaf, also the item placeholder of an empty list
    Unknown,
    /// Object with per-key descriptors in insertion order
    Object {
        /// Key to child descriptor
        properties: IndexMap<String, SchemaDescriptor>,
    },
    /// List described by its first element
    List {
        /// Descriptor of the first element
        items: Box<SchemaDescriptor>,
    },
}

impl SchemaDescriptor {
    /// Descriptor for a bare kind
    ///
    /// Containers get an empty object or a list of unknown items.
    pub fn leaf(kind: NodeKind) -> Self {
        match kind {
            NodeKind::String => Self::String,
            NodeKind::Integer => Self::Integer,
            NodeKind::Float => Self::Float,
            NodeKind::Boolean => Self::Boolean,
            NodeKind::Null => Self::Null,
            NodeKind::Unknown => Self::Unknown,
            NodeKind::Object => Self::Object {
                properties: IndexMap::new(),
            },
            NodeKind::List => Self::list(Self::Unknown),
        }
    }

    /// Object descriptor from key/descriptor pairs
    pub fn object<K, I>(properties: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, SchemaDescriptor)>,
    {
        Self::Object {
            properties: properties
                .into_iter()
                .map(|(k, v)| (k.into(), v))
                .collect(),
        }
    }

    /// List descriptor with the given item shape
    pub fn list(items: SchemaDescriptor) -> Self {
        Self::List {
            items: Box::new(items),
        }
    }

    /// Kind recorded in the `type` field
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::String => NodeKind::String,
            Self::Integer => NodeKind::Integer,
            Self::Float => NodeKind::Float,
            Self::Boolean => NodeKind::Boolean,
            Self::Null => NodeKind::Null,
            Self::Unknown => NodeKind::Unknown,
            Self::Object { .. } => NodeKind::Object,
            Self::List { .. } => NodeKind::List,
        }
    }

    /// Child descriptors of an object descriptor
    pub fn properties(&self) -> Option<&IndexMap<String, SchemaDescriptor>> {
        match self {
            Self::Object { properties } => Some(properties),
            _ => None,
        }
    }

    /// Item descriptor of a list descriptor
    pub fn items(&self) -> Option<&SchemaDescriptor> {
        match self {
            Self::List { items } => Some(items),
            _ => None,
        }
    }

    /// Compact JSON text, the persisted form
    pub fn to_json_string(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Parse the persisted form
    pub fn from_json_str(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }
}
