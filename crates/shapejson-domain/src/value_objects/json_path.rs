//! Dot/bracket path value object
//!
//! Grammar: `segment(.segment)*` where a segment is a key optionally
//! followed by a single `[index]`. A segment may omit the key when it
//! carries an index (`[0].id`), meaning "index into the current node".

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::{fmt, str::FromStr};

use crate::{DomainError, DomainResult};

/// One hop of a [`JsonPath`]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PathSegment {
    key: String,
    index: Option<usize>,
}

impl PathSegment {
    /// Object-key hop
    pub fn key(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            index: None,
        }
    }

    /// Object-key hop followed by a list index
    pub fn indexed(key: impl Into<String>, index: usize) -> Self {
        Self {
            key: key.into(),
            index: Some(index),
        }
    }

    /// Key to resolve, empty when the segment only indexes
    pub fn name(&self) -> &str {
        &self.key
    }

    /// List index, if any
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    fn parse(text: &str, full: &str) -> DomainResult<Self> {
        let invalid = |reason: &str| DomainError::invalid_path(format!("'{full}': {reason}"));

        let Some(open) = text.find('[') else {
            if text.is_empty() {
                return Err(invalid("empty segment"));
            }
            if text.contains(']') {
                return Err(invalid("unbalanced ']'"));
            }
            return Ok(Self::key(text));
        };

        let (key, rest) = text.split_at(open);
        if key.contains(']') {
            return Err(invalid("unbalanced ']'"));
        }
        let inner = rest
            .strip_prefix('[')
            .and_then(|r| r.strip_suffix(']'))
            .ok_or_else(|| invalid("index must close the segment"))?;
        if inner.is_empty() || !inner.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("index must be a non-negative integer"));
        }
        let index = inner
            .parse::<usize>()
            .map_err(|_| invalid("index out of range"))?;
        Ok(Self::indexed(key, index))
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)?;
        if let Some(index) = self.index {
            write!(f, "[{index}]")?;
        }
        Ok(())
    }
}

/// Parsed navigation path
///
/// The empty path addresses the root.
///
/// # Examples
/// ```
/// # use shapejson_domain::value_objects::JsonPath;
/// let path = JsonPath::parse("a.b[0].c").unwrap();
/// assert_eq!(path.len(), 3);
/// assert_eq!(path.segments()[1].index(), Some(0));
/// assert!(JsonPath::parse("a..b").is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JsonPath {
    segments: SmallVec<[PathSegment; 8]>,
}

impl JsonPath {
    /// Path addressing the root
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse path text
    ///
    /// # Errors
    /// Returns [`DomainError::InvalidPath`] for empty segments, malformed
    /// or repeated brackets, and non-numeric indices.
    pub fn parse(text: &str) -> DomainResult<Self> {
        if text.is_empty() {
            return Ok(Self::root());
        }
        let segments = text
            .split('.')
            .map(|segment| PathSegment::parse(segment, text))
            .collect::<DomainResult<_>>()?;
        Ok(Self { segments })
    }

    /// Segments in resolution order
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Number of segments
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Check if this is the root path
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Append a segment
    pub fn push(&mut self, segment: PathSegment) {
        self.segments.push(segment);
    }
}

impl FromStr for JsonPath {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}
