//! Structural diff engine
//!
//! Compares two shapes and emits an ordered list of [`SchemaChange`]
//! records. Values never produce records; only keys and kinds do.
//!
//! Two entry points exist:
//! - [`compare`] walks full trees and follows lists into their first
//!   elements (paths suffixed with `[*]`).
//! - [`compare_descriptors`] walks structural descriptors and stops at list
//!   boundaries. Sessions use it so only descriptors need to be retained
//!   between parses.
//!
//! Within one object, records are emitted as additions (newer key order),
//! then removals (older key order), then the results of recursing into
//! shared keys (older key order).

mod report;

pub use report::{ChangeSummary, breaking_changes, has_breaking_changes, summarize};

use indexmap::IndexMap;

use crate::domain::{JsonNode, NodeKind, SchemaChange, SchemaDescriptor};

/// Compare two trees
///
/// # Examples
/// ```
/// # use shapejson::{diff::compare, parser::parse, domain::ChangeKind};
/// let old = parse(r#"{"id": 1, "name": "Test"}"#).unwrap();
/// let new = parse(r#"{"id": 2, "name": "Test 2", "email": "x@y.com"}"#).unwrap();
/// let changes = compare(&old, &new);
/// assert_eq!(changes.len(), 1);
/// assert_eq!(changes[0].kind(), ChangeKind::Added);
/// assert_eq!(changes[0].path(), "email");
/// ```
pub fn compare(old: &JsonNode, new: &JsonNode) -> Vec<SchemaChange> {
    let mut changes = Vec::new();
    compare_nodes(old, new, "", &mut changes);
    changes
}

/// Compare two descriptors
///
/// Mirrors [`compare`] for kinds and object keys, but list item shapes are
/// not inspected: two lists always compare equal here.
pub fn compare_descriptors(old: &SchemaDescriptor, new: &SchemaDescriptor) -> Vec<SchemaChange> {
    let mut changes = Vec::new();
    compare_shapes(old, new, "", &mut changes);
    changes
}

fn compare_nodes(old: &JsonNode, new: &JsonNode, path: &str, changes: &mut Vec<SchemaChange>) {
    if old.kind() != new.kind() {
        changes.push(SchemaChange::type_changed(path, old.kind(), new.kind()));
        return;
    }
    match (old, new) {
        (JsonNode::Object(old_map), JsonNode::Object(new_map)) => {
            for (child_path, old_child, new_child) in
                diff_keys(old_map, new_map, path, JsonNode::kind, changes)
            {
                compare_nodes(old_child, new_child, &child_path, changes);
            }
        }
        (JsonNode::List(old_items), JsonNode::List(new_items)) => {
            if let (Some(old_first), Some(new_first)) = (old_items.first(), new_items.first()) {
                compare_nodes(old_first, new_first, &format!("{path}[*]"), changes);
            }
        }
        _ => {}
    }
}

fn compare_shapes(
    old: &SchemaDescriptor,
    new: &SchemaDescriptor,
    path: &str,
    changes: &mut Vec<SchemaChange>,
) {
    if old.kind() != new.kind() {
        changes.push(SchemaChange::type_changed(path, old.kind(), new.kind()));
        return;
    }
    if let (Some(old_props), Some(new_props)) = (old.properties(), new.properties()) {
        for (child_path, old_child, new_child) in
            diff_keys(old_props, new_props, path, SchemaDescriptor::kind, changes)
        {
            compare_shapes(old_child, new_child, &child_path, changes);
        }
    }
}

/// Emit added/removed records and return the shared keys to recurse into
fn diff_keys<'a, T>(
    old: &'a IndexMap<String, T>,
    new: &'a IndexMap<String, T>,
    path: &str,
    kind_of: fn(&T) -> NodeKind,
    changes: &mut Vec<SchemaChange>,
) -> Vec<(String, &'a T, &'a T)> {
    for (key, child) in new {
        if !old.contains_key(key) {
            changes.push(SchemaChange::added(child_path(path, key), kind_of(child)));
        }
    }
    for (key, child) in old {
        if !new.contains_key(key) {
            changes.push(SchemaChange::removed(child_path(path, key), kind_of(child)));
        }
    }
    old.iter()
        .filter_map(|(key, old_child)| {
            new.get(key)
                .map(|new_child| (child_path(path, key), old_child, new_child))
        })
        .collect()
}

fn child_path(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{path}.{key}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ChangeKind;
    use crate::parser::extract_schema;
    use serde_json::json;

    fn node(value: serde_json::Value) -> JsonNode {
        JsonNode::from_value(&value)
    }

    #[test]
    fn test_value_changes_are_ignored() {
        let changes = compare(&node(json!({"a": 1, "b": "x"})), &node(json!({"a": 2, "b": "y"})));
        assert!(changes.is_empty());
    }

    #[test]
    fn test_type_change_stops_recursion() {
        let changes = compare(
            &node(json!({"value": "s"})),
            &node(json!({"value": {"deep": 1, "deeper": {"x": 1}}})),
        );
        assert_eq!(
            changes,
            vec![SchemaChange::type_changed("value", NodeKind::String, NodeKind::Object)]
        );
    }

    #[test]
    fn test_root_type_change_has_empty_path() {
        let changes = compare(&node(json!({})), &node(json!([])));
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].path(), "");
    }

    #[test]
    fn test_record_order() {
        let changes = compare(
            &node(json!({"keep": {"x": 1}, "gone": 1, "also_gone": true})),
            &node(json!({"new1": 1, "keep": {"x": "s"}, "new2": null})),
        );
        let summary: Vec<(ChangeKind, &str)> =
            changes.iter().map(|c| (c.kind(), c.path())).collect();
        assert_eq!(
            summary,
            vec![
                (ChangeKind::Added, "new1"),
                (ChangeKind::Added, "new2"),
                (ChangeKind::Removed, "gone"),
                (ChangeKind::Removed, "also_gone"),
                (ChangeKind::TypeChanged, "keep.x"),
            ]
        );
    }

    #[test]
    fn test_list_first_elements_compared() {
        let changes = compare(
            &node(json!({"items": [{"id": 1}]})),
            &node(json!({"items": [{"id": 1, "sku": "a"}]})),
        );
        assert_eq!(changes, vec![SchemaChange::added("items[*].sku", NodeKind::String)]);
    }

    #[test]
    fn test_list_length_alone_is_not_a_change() {
        assert!(compare(&node(json!({"l": []})), &node(json!({"l": [1, 2]}))).is_empty());
        assert!(compare(&node(json!({"l": [1]})), &node(json!({"l": []}))).is_empty());
    }

    #[test]
    fn test_descriptors_do_not_enter_lists() {
        let old = node(json!({"items": [{"id": 1}]}));
        let new = node(json!({"items": [{"id": "1", "sku": "a"}]}));
        assert!(compare_descriptors(&extract_schema(&old), &extract_schema(&new)).is_empty());
        assert_eq!(compare(&old, &new).len(), 2);
    }

    #[test]
    fn test_descriptor_compare_matches_tree_outside_lists() {
        let old = node(json!({"a": 1, "b": {"c": true, "d": 1.5}}));
        let new = node(json!({"b": {"c": "yes", "e": null}, "f": []}));
        assert_eq!(
            compare_descriptors(&extract_schema(&old), &extract_schema(&new)),
            compare(&old, &new)
        );
    }
}
