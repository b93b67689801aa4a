//! Change record value object

use serde::{Deserialize, Serialize};
use std::fmt;

use super::NodeKind;

/// Classification of one structural difference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChangeKind {
    /// Key present only in the newer shape
    Added,
    /// Key present only in the older shape
    Removed,
    /// Same path, different kind
    TypeChanged,
}

impl ChangeKind {
    /// Removals and type changes break consumers of the older shape;
    /// additions never do.
    pub const fn is_breaking(self) -> bool {
        matches!(self, Self::Removed | Self::TypeChanged)
    }

    /// Human-readable label
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Removed => "removed",
            Self::TypeChanged => "type changed",
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One detected difference between two shapes
///
/// `path` uses dot notation; list elements appear as `[*]`. The root is the
/// empty path. Records are created by the diff engine and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SchemaChange {
    kind: ChangeKind,
    path: String,
    old_type: Option<NodeKind>,
    new_type: Option<NodeKind>,
}

impl SchemaChange {
    /// Key added at `path`
    pub fn added(path: impl Into<String>, new_type: NodeKind) -> Self {
        Self {
            kind: ChangeKind::Added,
            path: path.into(),
            old_type: None,
            new_type: Some(new_type),
        }
    }

    /// Key removed from `path`
    pub fn removed(path: impl Into<String>, old_type: NodeKind) -> Self {
        Self {
            kind: ChangeKind::Removed,
            path: path.into(),
            old_type: Some(old_type),
            new_type: None,
        }
    }

    /// Kind at `path` changed
    pub fn type_changed(path: impl Into<String>, old_type: NodeKind, new_type: NodeKind) -> Self {
        Self {
            kind: ChangeKind::TypeChanged,
            path: path.into(),
            old_type: Some(old_type),
            new_type: Some(new_type),
        }
    }

    /// Change classification
    pub fn kind(&self) -> ChangeKind {
        self.kind
    }

    /// Dot-notation location
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Kind before the change, absent for additions
    pub fn old_type(&self) -> Option<NodeKind> {
        self.old_type
    }

    /// Kind after the change, absent for removals
    pub fn new_type(&self) -> Option<NodeKind> {
        self.new_type
    }

    /// See [`ChangeKind::is_breaking`]
    pub fn is_breaking(&self) -> bool {
        self.kind.is_breaking()
    }
}

impl fmt::Display for SchemaChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = if self.path.is_empty() {
            "<root>"
        } else {
            &self.path
        };
        match (self.kind, self.old_type, self.new_type) {
            (ChangeKind::Added, _, Some(new)) => write!(f, "+ {path} ({new})"),
            (ChangeKind::Removed, Some(old), _) => write!(f, "- {path} ({old})"),
            (ChangeKind::TypeChanged, Some(old), Some(new)) => {
                write!(f, "~ {path}: {old} -> {new}")
            }
            (kind, _, _) => write!(f, "? {path} ({kind})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breaking_classification() {
        assert!(!ChangeKind::Added.is_breaking());
        assert!(ChangeKind::Removed.is_breaking());
        assert!(ChangeKind::TypeChanged.is_breaking());
    }

    #[test]
    fn test_constructors_fill_types() {
        let added = SchemaChange::added("email", NodeKind::String);
        assert_eq!(added.old_type(), None);
        assert_eq!(added.new_type(), Some(NodeKind::String));

        let removed = SchemaChange::removed("name", NodeKind::String);
        assert_eq!(removed.old_type(), Some(NodeKind::String));
        assert_eq!(removed.new_type(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            SchemaChange::type_changed("value", NodeKind::String, NodeKind::Integer).to_string(),
            "~ value: string -> integer"
        );
        assert_eq!(
            SchemaChange::type_changed("", NodeKind::Object, NodeKind::List).to_string(),
            "~ <root>: object -> list"
        );
        assert_eq!(
            SchemaChange::added("items[*].sku", NodeKind::String).to_string(),
            "+ items[*].sku (string)"
        );
    }
}
