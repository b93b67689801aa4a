//! Structural descriptor extraction

use crate::domain::{JsonNode, SchemaDescriptor};

/// Build the value-stripped descriptor of `node`
///
/// Lists are described by their first element only; an empty list gets an
/// `unknown` item placeholder. Later elements of a heterogeneous list do
/// not influence the result.
///
/// # Examples
/// ```
/// # use shapejson::parser::{extract_schema, parse};
/// # use shapejson::domain::SchemaDescriptor;
/// let node = parse(r#"{"tags": ["a", 1], "empty": []}"#).unwrap();
/// assert_eq!(
///     extract_schema(&node),
///     SchemaDescriptor::object([
///         ("tags", SchemaDescriptor::list(SchemaDescriptor::String)),
///         ("empty", SchemaDescriptor::list(SchemaDescriptor::Unknown)),
///     ])
/// );
/// ```
pub fn extract_schema(node: &JsonNode) -> SchemaDescriptor {
    match node {
        JsonNode::Object(map) => SchemaDescriptor::object(
            map.iter()
                .map(|(key, child)| (key.as_str(), extract_schema(child))),
        ),
        JsonNode::List(items) => SchemaDescriptor::list(
            items
                .first()
                .map_or(SchemaDescriptor::Unknown, extract_schema),
        ),
        leaf => SchemaDescriptor::leaf(leaf.kind()),
    }
}
