//! Typed JSON tree value object
//!
//! `JsonNode` wraps one parsed unit of JSON-shaped data behind a closed
//! tagged union. Dynamic input is classified once, at construction; every
//! accessor afterwards matches on the variant instead of casting.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer, ser::SerializeMap};
use serde_json::{Number, Value};
use std::fmt;

use super::NodeKind;

/// One node of a parsed JSON tree
///
/// Object nodes own their children in insertion order, list nodes own an
/// ordered sequence. Scalars own only their payload. Because the payload
/// lives inside the variant, the kind tag and the populated payload can
/// never disagree.
///
/// # Examples
/// ```
/// # use shapejson_domain::value_objects::JsonNode;
/// let node = JsonNode::from_value(&serde_json::json!({"id": "42", "ratio": 0.5}));
/// assert_eq!(node.get_int("id", 0), 42);
/// assert_eq!(node.get_float("ratio", 0.0), 0.5);
/// assert_eq!(node.get_string("missing", "n/a"), "n/a");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub enum JsonNode {
    /// UTF-8 text
    String(String),
    /// Integral number representable as `i64`
    Integer(i64),
    /// Fractional number
    Float(f64),
    /// Boolean
    Boolean(bool),
    /// JSON null
    #[default]
    Null,
    /// Key-ordered mapping of child nodes
    Object(IndexMap<String, JsonNode>),
    /// Ordered sequence of child nodes
    List(Vec<JsonNode>),
    /// Input that fits no other kind, kept verbatim
    ///
    /// Unsigned integers above `i64::MAX` land here so projection stays exact.
    Unknown(Value),
}

impl JsonNode {
    /// Classify arbitrary JSON input by its runtime shape
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Boolean(*b),
            Value::Number(n) => Self::from_number(n),
            Value::String(s) => Self::String(s.clone()),
            Value::Array(items) => Self::List(items.iter().map(Self::from_value).collect()),
            Value::Object(map) => Self::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), Self::from_value(v)))
                    .collect(),
            ),
        }
    }

    /// Classify any serializable value
    ///
    /// # Errors
    /// Returns the serializer error when `value` has no JSON representation
    /// (for example a map with non-string keys).
    pub fn from_serializable<T>(value: &T) -> serde_json::Result<Self>
    where
        T: Serialize + ?Sized,
    {
        serde_json::to_value(value).map(|v| Self::from_value(&v))
    }

    fn from_number(n: &Number) -> Self {
        if let Some(i) = n.as_i64() {
            Self::Integer(i)
        } else if n.is_u64() {
            Self::Unknown(Value::Number(n.clone()))
        } else {
            n.as_f64()
                .map_or_else(|| Self::Unknown(Value::Number(n.clone())), Self::Float)
        }
    }

    /// Build an object node from key/child pairs, keeping their order
    ///
    /// A repeated key keeps its first position and takes the last value.
    pub fn object<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, JsonNode)>,
    {
        Self::Object(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Build a list node from child nodes
    pub fn list<I>(items: I) -> Self
    where
        I: IntoIterator<Item = JsonNode>,
    {
        Self::List(items.into_iter().collect())
    }

    /// Kind tag of this node
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::String(_) => NodeKind::String,
            Self::Integer(_) => NodeKind::Integer,
            Self::Float(_) => NodeKind::Float,
            Self::Boolean(_) => NodeKind::Boolean,
            Self::Null => NodeKind::Null,
            Self::Object(_) => NodeKind::Object,
            Self::List(_) => NodeKind::List,
            Self::Unknown(_) => NodeKind::Unknown,
        }
    }

    /// Check if node is an object
    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(_))
    }

    /// Check if node is a list
    pub fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    /// Check if node is null
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Children of an object node
    pub fn as_object(&self) -> Option<&IndexMap<String, JsonNode>> {
        match self {
            Self::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Children of a list node
    pub fn as_list(&self) -> Option<&[JsonNode]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Strict string view, no coercion
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Strict integer view, no coercion
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Strict float view, no coercion
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Strict boolean view, no coercion
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Number of children for containers, 0 for scalars
    pub fn len(&self) -> usize {
        match self {
            Self::Object(map) => map.len(),
            Self::List(items) => items.len(),
            _ => 0,
        }
    }

    /// `true` when [`len`](Self::len) is 0
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Child at `key` of an object node
    pub fn get(&self, key: &str) -> Option<&JsonNode> {
        self.as_object().and_then(|map| map.get(key))
    }

    /// Element at `index` of a list node
    pub fn index(&self, index: usize) -> Option<&JsonNode> {
        self.as_list().and_then(|items| items.get(index))
    }

    /// Insertion-ordered keys of an object node, empty otherwise
    pub fn keys(&self) -> Vec<&str> {
        self.as_object()
            .map(|map| map.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Check if an object node has `key`
    pub fn has_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    // --- Coercions -------------------------------------------------------

    /// Text form of a scalar
    ///
    /// Strings are returned unchanged; integers, floats and booleans are
    /// rendered as decimal or `true`/`false` text. Other kinds have no text form.
    pub fn coerce_string(&self) -> Option<String> {
        match self {
            Self::String(s) => Some(s.clone()),
            Self::Integer(i) => Some(i.to_string()),
            Self::Float(f) => Some(f.to_string()),
            Self::Boolean(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Integer form of a scalar
    ///
    /// Floats truncate toward zero, numeric text is parsed.
    pub fn coerce_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            Self::Float(f) if f.is_finite() => Some(f.trunc() as i64),
            Self::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Float form of a scalar
    ///
    /// Integers widen, numeric text is parsed.
    pub fn coerce_f64(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Integer(i) => Some(*i as f64),
            Self::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Boolean form of a scalar
    ///
    /// Accepts native booleans and the literals `"true"`, `"1"`,
    /// `"false"`, `"0"`.
    pub fn coerce_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            Self::String(s) => match s.as_str() {
                "true" | "1" => Some(true),
                "false" | "0" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }

    // --- Defaulting getters ---------------------------------------------

    /// String at `key`, or `default` when missing or not coercible
    pub fn get_string(&self, key: &str, default: &str) -> String {
        self.get(key)
            .and_then(Self::coerce_string)
            .unwrap_or_else(|| default.to_string())
    }

    /// Integer at `key`, or `default` when missing or not coercible
    pub fn get_int(&self, key: &str, default: i64) -> i64 {
        self.get(key).and_then(Self::coerce_i64).unwrap_or(default)
    }

    /// Float at `key`, or `default` when missing or not coercible
    pub fn get_float(&self, key: &str, default: f64) -> f64 {
        self.get(key).and_then(Self::coerce_f64).unwrap_or(default)
    }

    /// Boolean at `key`, or `default` when missing or not coercible
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        self.get(key).and_then(Self::coerce_bool).unwrap_or(default)
    }

    /// Object child at `key`
    ///
    /// Returns `None` when the key is missing or its value is not an object,
    /// so lookups chain with `and_then`:
    /// ```
    /// # use shapejson_domain::value_objects::JsonNode;
    /// let node = JsonNode::from_value(&serde_json::json!({"a": {"b": {"c": 1}}}));
    /// let c = node.get_nested("a").and_then(|a| a.get_nested("b")).map(|b| b.get_int("c", 0));
    /// assert_eq!(c, Some(1));
    /// ```
    pub fn get_nested(&self, key: &str) -> Option<&JsonNode> {
        self.get(key).filter(|child| child.is_object())
    }

    /// List elements at `key`, or an empty slice when missing or not a list
    pub fn get_list(&self, key: &str) -> &[JsonNode] {
        self.get(key).and_then(Self::as_list).unwrap_or(&[])
    }

    // --- Projection -----------------------------------------------------

    /// Project back to plain JSON data
    ///
    /// Non-finite floats have no JSON form and project to `null`.
    pub fn to_value(&self) -> Value {
        match self {
            Self::String(s) => Value::String(s.clone()),
            Self::Integer(i) => Value::Number((*i).into()),
            Self::Float(f) => Number::from_f64(*f).map_or(Value::Null, Value::Number),
            Self::Boolean(b) => Value::Bool(*b),
            Self::Null => Value::Null,
            Self::Object(map) => Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.to_value()))
                    .collect(),
            ),
            Self::List(items) => Value::Array(items.iter().map(Self::to_value).collect()),
            Self::Unknown(raw) => raw.clone(),
        }
    }

    /// Serialize to JSON text, two-space indented when `pretty`
    pub fn to_json_string(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}

impl Serialize for JsonNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::String(s) => serializer.serialize_str(s),
            Self::Integer(i) => serializer.serialize_i64(*i),
            Self::Float(f) if f.is_finite() => serializer.serialize_f64(*f),
            Self::Float(_) | Self::Null => serializer.serialize_unit(),
            Self::Boolean(b) => serializer.serialize_bool(*b),
            Self::Object(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (k, v) in map {
                    out.serialize_entry(k, v)?;
                }
                out.end()
            }
            Self::List(items) => serializer.collect_seq(items),
            Self::Unknown(raw) => raw.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for JsonNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(|value| Self::from_value(&value))
    }
}

impl fmt::Display for JsonNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

impl From<&Value> for JsonNode {
    fn from(value: &Value) -> Self {
        Self::from_value(value)
    }
}

impl From<Value> for JsonNode {
    fn from(value: Value) -> Self {
        Self::from_value(&value)
    }
}

impl From<&JsonNode> for Value {
    fn from(node: &JsonNode) -> Self {
        node.to_value()
    }
}

impl From<&str> for JsonNode {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for JsonNode {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i64> for JsonNode {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for JsonNode {
    fn from(value: i32) -> Self {
        Self::Integer(value.into())
    }
}

impl From<f64> for JsonNode {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for JsonNode {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl<T: Into<JsonNode>> From<Option<T>> for JsonNode {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}
