//! Path enumeration and resolution over typed trees
//!
//! Paths use dot notation with an optional `[index]` per segment, for
//! example `orders[0].items`. Resolution never fails loudly: malformed
//! paths, missing keys, wrong kinds and out-of-range indices all resolve
//! to `None`.

use serde_json::Value;

use crate::domain::{JsonNode, JsonPath};

/// Every reachable object-key path, depth first in key insertion order
///
/// Lists are entered through their first element only, addressed as
/// `key[0]`. A list nested directly inside another list is not entered.
/// Keys are not escaped, so a key containing `.` or `[` yields a path that
/// does not resolve.
///
/// # Examples
/// ```
/// # use shapejson::parser::{get_all_paths, parse};
/// let node = parse(r#"{"id": 1, "items": [{"sku": "a"}, {"qty": 2}]}"#).unwrap();
/// assert_eq!(get_all_paths(&node), ["id", "items", "items[0].sku"]);
/// ```
pub fn get_all_paths(node: &JsonNode) -> Vec<String> {
    let mut paths = Vec::new();
    collect_paths(node, "", &mut paths);
    paths
}

fn collect_paths(node: &JsonNode, prefix: &str, paths: &mut Vec<String>) {
    match node {
        JsonNode::Object(map) => {
            for (key, child) in map {
                let path = join(prefix, key);
                paths.push(path.clone());
                collect_paths(child, &path, paths);
            }
        }
        JsonNode::List(items) => match items.first() {
            Some(first) if !first.is_list() => {
                collect_paths(first, &format!("{prefix}[0]"), paths);
            }
            _ => {}
        },
        _ => {}
    }
}

fn join(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

/// Node addressed by `path`, or `None` when any hop fails
///
/// The empty path addresses `node` itself.
pub fn node_at_path<'a>(node: &'a JsonNode, path: &str) -> Option<&'a JsonNode> {
    let path = JsonPath::parse(path).ok()?;
    path.segments().iter().try_fold(node, |current, segment| {
        let target = if segment.name().is_empty() {
            current
        } else {
            current.get(segment.name())?
        };
        match segment.index() {
            Some(index) => target.index(index),
            None => Some(target),
        }
    })
}

/// Plain JSON value addressed by `path`, or `None` when any hop fails
///
/// # Examples
/// ```
/// # use shapejson::parser::{get_value_at_path, parse};
/// let node = parse(r#"{"a": {"b": [{"c": true}]}}"#).unwrap();
/// assert_eq!(get_value_at_path(&node, "a.b[0].c"), Some(serde_json::json!(true)));
/// assert_eq!(get_value_at_path(&node, "a.b[1].c"), None);
/// ```
pub fn get_value_at_path(node: &JsonNode, path: &str) -> Option<Value> {
    node_at_path(node, path).map(JsonNode::to_value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tree() -> JsonNode {
        JsonNode::from_value(&json!({
            "user": {"name": "Ada", "roles": ["admin", "dev"]},
            "orders": [{"id": 7, "lines": [{"sku": "X1"}]}],
            "matrix": [[1, 2], [3]],
            "empty": []
        }))
    }

    #[test]
    fn test_all_paths_order() {
        assert_eq!(
            get_all_paths(&tree()),
            [
                "user",
                "user.name",
                "user.roles",
                "orders",
                "orders[0].id",
                "orders[0].lines",
                "orders[0].lines[0].sku",
                "matrix",
                "empty",
            ]
        );
    }

    #[test]
    fn test_all_paths_root_list() {
        let node = JsonNode::from_value(&json!([{"id": 1}, {"other": 2}]));
        assert_eq!(get_all_paths(&node), ["[0].id"]);
    }

    #[test]
    fn test_all_paths_resolve() {
        let node = tree();
        for path in get_all_paths(&node) {
            assert!(node_at_path(&node, &path).is_some(), "{path} did not resolve");
        }
    }

    #[test]
    fn test_resolve_scalars_and_structures() {
        let node = tree();
        assert_eq!(get_value_at_path(&node, "user.name"), Some(json!("Ada")));
        assert_eq!(get_value_at_path(&node, "user.roles[1]"), Some(json!("dev")));
        assert_eq!(get_value_at_path(&node, "orders[0].lines"), Some(json!([{"sku": "X1"}])));
        assert_eq!(get_value_at_path(&node, "matrix[0]"), Some(json!([1, 2])));
    }

    #[test]
    fn test_resolve_failures_are_none() {
        let node = tree();
        assert_eq!(get_value_at_path(&node, "user.age"), None);
        assert_eq!(get_value_at_path(&node, "user.roles[5]"), None);
        assert_eq!(get_value_at_path(&node, "user.name[0]"), None);
        assert_eq!(get_value_at_path(&node, "user.name.first"), None);
        assert_eq!(get_value_at_path(&node, "empty[0]"), None);
        assert_eq!(get_value_at_path(&node, "user..name"), None);
    }

    #[test]
    fn test_empty_path_is_root() {
        let node = tree();
        assert_eq!(node_at_path(&node, ""), Some(&node));
    }

    #[test]
    fn test_index_only_segment() {
        let node = JsonNode::from_value(&json!([{"id": 1}]));
        assert_eq!(get_value_at_path(&node, "[0].id"), Some(json!(1)));
    }
}
