//! Integration tests for the structural diff engine and change reports

use shapejson::diff::{breaking_changes, compare, compare_descriptors, has_breaking_changes, summarize};
use shapejson::parser::{extract_schema, parse};
use shapejson::prelude::*;

fn node(text: &str) -> JsonNode {
    parse(text).unwrap()
}

fn paths(changes: &[SchemaChange]) -> Vec<&str> {
    changes.iter().map(SchemaChange::path).collect()
}

// ============================================================================
// Tree Comparison Tests
// ============================================================================

#[test]
fn test_value_changes_are_ignored() {
    let changes = compare(
        &node(r#"{"id": 1, "name": "Test"}"#),
        &node(r#"{"id": 2, "name": "Test 2", "email": "test@example.com"}"#),
    );
    assert_eq!(changes, vec![SchemaChange::added("email", NodeKind::String)]);
}

#[test]
fn test_type_change_stops_descent() {
    let changes = compare(
        &node(r#"{"value": {"x": 1, "y": 2}}"#),
        &node(r#"{"value": "flat"}"#),
    );
    assert_eq!(
        changes,
        vec![SchemaChange::type_changed("value", NodeKind::Object, NodeKind::String)]
    );
}

#[test]
fn test_string_to_integer_is_a_single_record() {
    let changes = compare(&node(r#"{"value": "s"}"#), &node(r#"{"value": 123}"#));
    assert_eq!(
        changes,
        vec![SchemaChange::type_changed("value", NodeKind::String, NodeKind::Integer)]
    );
    assert!(changes[0].is_breaking());
}

#[test]
fn test_integer_to_float_is_a_type_change() {
    let changes = compare(&node(r#"{"n": 1}"#), &node(r#"{"n": 1.5}"#));
    assert_eq!(changes[0].kind(), ChangeKind::TypeChanged);
    assert_eq!(changes[0].old_type(), Some(NodeKind::Integer));
    assert_eq!(changes[0].new_type(), Some(NodeKind::Float));
}

#[test]
fn test_null_is_its_own_kind() {
    let changes = compare(&node(r#"{"n": null}"#), &node(r#"{"n": "set"}"#));
    assert_eq!(
        changes,
        vec![SchemaChange::type_changed("n", NodeKind::Null, NodeKind::String)]
    );
}

#[test]
fn test_nested_paths_and_record_order() {
    let old = node(r#"{"user": {"id": 1, "fax": "x", "address": {"zip": 1}}, "gone": true}"#);
    let new = node(r#"{"user": {"id": 1, "email": "e", "address": {"zip": "N1"}}, "fresh": []}"#);

    let changes = compare(&old, &new);
    assert_eq!(
        paths(&changes),
        ["fresh", "gone", "user.email", "user.fax", "user.address.zip"]
    );
    assert_eq!(changes[0].kind(), ChangeKind::Added);
    assert_eq!(changes[1].kind(), ChangeKind::Removed);
    assert_eq!(changes[4].kind(), ChangeKind::TypeChanged);
}

#[test]
fn test_identical_shapes_yield_nothing() {
    let text = r#"{"a": [{"b": 1}], "c": {"d": null}}"#;
    assert!(compare(&node(text), &node(text)).is_empty());
}

#[test]
fn test_root_type_change() {
    let changes = compare(&node("{}"), &node("[]"));
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].path(), "");
    assert_eq!(changes[0].to_string(), "~ <root>: object -> list");
}

#[test]
fn test_tree_compare_descends_into_lists() {
    let old = node(r#"{"items": [{"id": 1}]}"#);
    let new = node(r#"{"items": [{"id": "1", "qty": 2}]}"#);

    let changes = compare(&old, &new);
    assert_eq!(paths(&changes), ["items[*].qty", "items[*].id"]);
}

#[test]
fn test_empty_list_is_not_compared_element_wise() {
    let changes = compare(&node(r#"{"xs": []}"#), &node(r#"{"xs": [1]}"#));
    assert!(changes.is_empty());
}

// ============================================================================
// Descriptor Comparison Tests
// ============================================================================

#[test]
fn test_descriptor_compare_matches_tree_compare_for_objects() {
    let old = node(r#"{"a": 1, "b": {"c": true}}"#);
    let new = node(r#"{"b": {"c": "yes"}, "d": null}"#);

    assert_eq!(
        compare_descriptors(&extract_schema(&old), &extract_schema(&new)),
        compare(&old, &new)
    );
}

#[test]
fn test_descriptor_compare_stops_at_lists() {
    let old = extract_schema(&node(r#"{"items": [{"id": 1}]}"#));
    let new = extract_schema(&node(r#"{"items": ["flat"]}"#));
    assert!(compare_descriptors(&old, &new).is_empty());
}

// ============================================================================
// Report Tests
// ============================================================================

#[test]
fn test_breaking_filter_order() {
    let changes = vec![
        SchemaChange::added("a", NodeKind::String),
        SchemaChange::removed("b", NodeKind::Integer),
        SchemaChange::added("c", NodeKind::Boolean),
        SchemaChange::type_changed("d", NodeKind::Integer, NodeKind::String),
    ];

    assert!(has_breaking_changes(&changes));
    assert_eq!(paths(&breaking_changes(&changes)), ["b", "d"]);
    assert!(!has_breaking_changes(&changes[..1]));
}

#[test]
fn test_summary_report() {
    let changes = compare(
        &node(r#"{"id": 1, "fax": "x"}"#),
        &node(r#"{"id": "1", "email": "e"}"#),
    );
    assert_eq!(
        summarize(&changes),
        "3 schema changes (2 breaking)\n\
         Added (1):\n  + email (string)\n\
         Removed (1):\n  - fax (string)\n\
         Type changed (1):\n  ~ id: integer -> string"
    );
}

#[test]
fn test_empty_summary() {
    assert_eq!(summarize(&[]), "No schema changes");
    assert!(ChangeSummary::new(&[]).is_empty());
}

#[test]
fn test_summary_counts() {
    let summary = ChangeSummary::new(&[
        SchemaChange::added("a", NodeKind::String),
        SchemaChange::removed("b", NodeKind::Integer),
    ]);
    assert_eq!(summary.total(), 2);
    assert_eq!(summary.breaking(), 1);
    assert_eq!(summary.added().len(), 1);
    assert!(summary.type_changed().is_empty());
}
