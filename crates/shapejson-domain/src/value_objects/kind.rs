//! Closed kind tag shared by nodes, descriptors and change records

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::DomainError;

/// Discriminant of a [`JsonNode`](super::JsonNode)
///
/// The same tag labels descriptors and the old/new types carried by
/// change records, so a kind printed in a report always matches the
/// `type` field of the persisted descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// UTF-8 text
    String,
    /// Signed 64-bit integer
    Integer,
    /// 64-bit floating point number
    Float,
    /// Boolean
    Boolean,
    /// JSON null
    Null,
    /// Key-ordered mapping
    Object,
    /// Ordered sequence
    List,
    /// Input that fits none of the other kinds
    Unknown,
}

impl NodeKind {
    /// All kinds, in declaration order
    pub const ALL: [NodeKind; 8] = [
        Self::String,
        Self::Integer,
        Self::Float,
        Self::Boolean,
        Self::Null,
        Self::Object,
        Self::List,
        Self::Unknown,
    ];

    /// Lowercase label used in descriptors and reports
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Boolean => "boolean",
            Self::Null => "null",
            Self::Object => "object",
            Self::List => "list",
            Self::Unknown => "unknown",
        }
    }

    /// `true` for kinds that own child nodes
    pub const fn is_container(self) -> bool {
        matches!(self, Self::Object | Self::List)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| DomainError::InvalidKind(s.to_string()))
    }
}
