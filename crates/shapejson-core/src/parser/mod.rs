//! JSON parsing into typed trees
//!
//! Input is decoded with `serde_json` (text and bytes) or taken as an
//! already-decoded `serde_json::Value`, then classified into a
//! [`JsonNode`] tree. Optional root validation runs after decoding.

pub mod path;
pub mod schema;

pub use path::{get_all_paths, get_value_at_path, node_at_path};
pub use schema::extract_schema;

use serde_json::Value;
use std::borrow::Cow;

use crate::{
    config::ParseOptions,
    domain::{JsonNode, SchemaDescriptor},
    error::{Error, Result},
};

/// Dynamic input accepted by the parser
#[derive(Debug, Clone)]
pub enum RawInput<'a> {
    /// JSON text
    Text(&'a str),
    /// UTF-8 encoded JSON text
    Bytes(&'a [u8]),
    /// Already-decoded JSON data
    Value(Cow<'a, Value>),
}

impl<'a> RawInput<'a> {
    fn decode(self) -> Result<Cow<'a, Value>> {
        match self {
            Self::Text(text) => Ok(Cow::Owned(serde_json::from_str(text)?)),
            Self::Bytes(bytes) => Ok(Cow::Owned(serde_json::from_slice(bytes)?)),
            Self::Value(value) => Ok(value),
        }
    }
}

impl<'a> From<&'a str> for RawInput<'a> {
    fn from(text: &'a str) -> Self {
        Self::Text(text)
    }
}

impl<'a> From<&'a String> for RawInput<'a> {
    fn from(text: &'a String) -> Self {
        Self::Text(text)
    }
}

impl<'a> From<&'a [u8]> for RawInput<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Self::Bytes(bytes)
    }
}

impl<'a> From<&'a Value> for RawInput<'a> {
    fn from(value: &'a Value) -> Self {
        Self::Value(Cow::Borrowed(value))
    }
}

impl From<Value> for RawInput<'_> {
    fn from(value: Value) -> Self {
        Self::Value(Cow::Owned(value))
    }
}

/// Stateless parser with default root validation rules
///
/// # Examples
/// ```
/// # use shapejson::parser::JsonParser;
/// let parser = JsonParser::new();
/// let node = parser.parse(r#"{"user": {"name": "Ada"}}"#).unwrap();
/// assert_eq!(node.get_nested("user").unwrap().get_string("name", ""), "Ada");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonParser {
    options: ParseOptions,
}

impl JsonParser {
    /// Create a parser that accepts any JSON root
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser that applies `options` on every [`parse`](Self::parse)
    pub fn with_options(options: ParseOptions) -> Self {
        Self { options }
    }

    /// Root validation rules in effect
    pub fn options(&self) -> ParseOptions {
        self.options
    }

    /// Decode `input` and build its tree
    ///
    /// # Errors
    /// [`Error::Parse`] when text input is not JSON, [`Error::Validation`]
    /// when the root breaks this parser's options.
    pub fn parse<'a>(&self, input: impl Into<RawInput<'a>>) -> Result<JsonNode> {
        parse_with_options(input, self.options)
    }

    /// Decode `input`, build its tree, and validate the root
    ///
    /// # Errors
    /// [`Error::Parse`] when text input is not JSON. [`Error::Validation`]
    /// when `allow_null` is false and the root is null, or when
    /// `require_object` is true and the root is not an object.
    pub fn parse_with_validation<'a>(
        &self,
        input: impl Into<RawInput<'a>>,
        allow_null: bool,
        require_object: bool,
    ) -> Result<JsonNode> {
        parse_with_options(
            input,
            ParseOptions {
                allow_null,
                require_object,
            },
        )
    }

    /// See [`extract_schema`]
    pub fn extract_schema(&self, node: &JsonNode) -> SchemaDescriptor {
        extract_schema(node)
    }

    /// See [`get_all_paths`]
    pub fn get_all_paths(&self, node: &JsonNode) -> Vec<String> {
        get_all_paths(node)
    }

    /// See [`get_value_at_path`]
    pub fn get_value_at_path(&self, node: &JsonNode, path: &str) -> Option<Value> {
        get_value_at_path(node, path)
    }

    /// See [`to_json_string`]
    pub fn to_json_string(&self, node: &JsonNode, pretty: bool) -> Result<String> {
        to_json_string(node, pretty)
    }
}

/// Render `node` as compact or two-space indented JSON text
///
/// # Errors
/// [`Error::Serialization`] when the encoder fails.
///
/// # Examples
/// ```
/// # use shapejson::parser::{parse, to_json_string};
/// let node = parse(r#"{ "a" : [1, 2] }"#).unwrap();
/// assert_eq!(to_json_string(&node, false).unwrap(), r#"{"a":[1,2]}"#);
/// ```
pub fn to_json_string(node: &JsonNode, pretty: bool) -> Result<String> {
    node.to_json_string(pretty).map_err(Error::serialization)
}

/// Decode `input` and build its tree without validation
///
/// # Errors
/// [`Error::Parse`] when text input is not JSON.
pub fn parse<'a>(input: impl Into<RawInput<'a>>) -> Result<JsonNode> {
    parse_with_options(input, ParseOptions::default())
}

/// Decode `input`, build its tree, and validate the root
///
/// # Errors
/// See [`JsonParser::parse_with_validation`].
pub fn parse_with_validation<'a>(
    input: impl Into<RawInput<'a>>,
    allow_null: bool,
    require_object: bool,
) -> Result<JsonNode> {
    JsonParser::new().parse_with_validation(input, allow_null, require_object)
}

/// Decode `input`, build its tree, and apply `options`
///
/// # Errors
/// See [`JsonParser::parse_with_validation`].
pub fn parse_with_options<'a>(
    input: impl Into<RawInput<'a>>,
    options: ParseOptions,
) -> Result<JsonNode> {
    let value = input.into().decode()?;
    let node = JsonNode::from_value(&value);
    validate_root(&node, options)?;
    tracing::trace!(kind = %node.kind(), children = node.len(), "parsed input");
    Ok(node)
}

fn validate_root(node: &JsonNode, options: ParseOptions) -> Result<()> {
    if !options.allow_null && node.is_null() {
        return Err(Error::validation("root value is null"));
    }
    if options.require_object && !node.is_object() {
        return Err(Error::validation(format!(
            "expected an object root, got {}",
            node.kind()
        )));
    }
    Ok(())
}
