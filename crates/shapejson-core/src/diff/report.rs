//! Change classification and human-readable reports

use std::fmt;

use crate::domain::{ChangeKind, SchemaChange};

/// Check if any record is breaking (removed or type changed)
pub fn has_breaking_changes(changes: &[SchemaChange]) -> bool {
    changes.iter().any(SchemaChange::is_breaking)
}

/// Breaking records in their original relative order
pub fn breaking_changes(changes: &[SchemaChange]) -> Vec<SchemaChange> {
    changes.iter().filter(|c| c.is_breaking()).cloned().collect()
}

/// Render `changes` grouped by kind
///
/// # Examples
/// ```
/// # use shapejson::diff::summarize;
/// # use shapejson::domain::{NodeKind, SchemaChange};
/// let report = summarize(&[
///     SchemaChange::added("email", NodeKind::String),
///     SchemaChange::removed("fax", NodeKind::String),
/// ]);
/// assert_eq!(
///     report,
///     "2 schema changes (1 breaking)\nAdded (1):\n  + email (string)\nRemoved (1):\n  - fax (string)"
/// );
/// ```
pub fn summarize(changes: &[SchemaChange]) -> String {
    ChangeSummary::new(changes).to_string()
}

/// Records grouped by kind, each group in original order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSummary {
    added: Vec<SchemaChange>,
    removed: Vec<SchemaChange>,
    type_changed: Vec<SchemaChange>,
}

impl ChangeSummary {
    /// Group `changes` by kind
    pub fn new(changes: &[SchemaChange]) -> Self {
        let mut summary = Self::default();
        for change in changes {
            let group = match change.kind() {
                ChangeKind::Added => &mut summary.added,
                ChangeKind::Removed => &mut summary.removed,
                ChangeKind::TypeChanged => &mut summary.type_changed,
            };
            group.push(change.clone());
        }
        summary
    }

    /// Added records
    pub fn added(&self) -> &[SchemaChange] {
        &self.added
    }

    /// Removed records
    pub fn removed(&self) -> &[SchemaChange] {
        &self.removed
    }

    /// Type-changed records
    pub fn type_changed(&self) -> &[SchemaChange] {
        &self.type_changed
    }

    /// Number of records
    pub fn total(&self) -> usize {
        self.added.len() + self.removed.len() + self.type_changed.len()
    }

    /// Number of breaking records
    pub fn breaking(&self) -> usize {
        self.removed.len() + self.type_changed.len()
    }

    /// Check if there are no records
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

impl fmt::Display for ChangeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("No schema changes");
        }
        let total = self.total();
        let noun = if total == 1 { "change" } else { "changes" };
        write!(f, "{total} schema {noun} ({} breaking)", self.breaking())?;

        let groups = [
            ("Added", &self.added),
            ("Removed", &self.removed),
            ("Type changed", &self.type_changed),
        ];
        for (title, group) in groups {
            if group.is_empty() {
                continue;
            }
            write!(f, "\n{title} ({}):", group.len())?;
            for change in group {
                write!(f, "\n  {change}")?;
            }
        }
        Ok(())
    }
}
