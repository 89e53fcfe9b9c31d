//! Paths locating a value inside a nested input.
//!
//! A [`JsonPath`] is the list of [`PathSegment`]s a rejection crossed on its
//! way out of `key` and `items` nodes. Segments double as the projection keys
//! of `key` nodes: a field name selects an object member, an index selects an
//! array element.

use std::fmt::{self, Display};

use serde_json::Value;

/// A single step into a nested value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// An object member (rendered `.name`).
    Field(String),
    /// An array element (rendered `[0]`).
    Index(usize),
}

impl PathSegment {
    /// Creates a new field segment.
    pub fn field(name: impl Into<String>) -> Self {
        PathSegment::Field(name.into())
    }

    /// Creates a new index segment.
    pub fn index(idx: usize) -> Self {
        PathSegment::Index(idx)
    }

    /// Projects this segment out of `value`.
    ///
    /// Anything that cannot be projected yields `Value::Null`, the stand-in
    /// for an absent value. Strings and arrays additionally expose a virtual
    /// `length` field so length checks can be written as ordinary key checks.
    pub fn project(&self, value: &Value) -> Value {
        match (value, self) {
            (Value::Object(map), PathSegment::Field(name)) => {
                map.get(name).cloned().unwrap_or(Value::Null)
            }
            (Value::Array(items), PathSegment::Index(idx)) => {
                items.get(*idx).cloned().unwrap_or(Value::Null)
            }
            (Value::Array(items), PathSegment::Field(name)) if name == "length" => {
                Value::from(items.len())
            }
            (Value::String(s), PathSegment::Field(name)) if name == "length" => {
                Value::from(s.chars().count())
            }
            (Value::String(s), PathSegment::Index(idx)) => s
                .chars()
                .nth(*idx)
                .map(|c| Value::String(c.to_string()))
                .unwrap_or(Value::Null),
            _ => Value::Null,
        }
    }
}

impl From<&str> for PathSegment {
    fn from(name: &str) -> Self {
        PathSegment::Field(name.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(name: String) -> Self {
        PathSegment::Field(name)
    }
}

impl From<usize> for PathSegment {
    fn from(idx: usize) -> Self {
        PathSegment::Index(idx)
    }
}

impl Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Field(name) => write!(f, ".{}", name),
            PathSegment::Index(idx) => write!(f, "[{}]", idx),
        }
    }
}

/// A path to a value in a nested JSON-like structure.
///
/// Paths are relative: the root name chosen at `validate` time is put in
/// front of them by [`JsonPath::qualify`].
///
/// # Example
///
/// ```rust
/// use chainval::Schema;
/// use serde_json::json;
///
/// let user = Schema::new().object().field("email", Schema::new().string());
/// let schema = Schema::new().object().field("users", Schema::new().array().items(user));
///
/// let error = schema.validate(&json!({"users": [{"email": 1}]})).unwrap_err();
/// assert_eq!(error.path.to_string(), "users[0].email");
/// assert_eq!(error.path.qualify("body"), "body.users[0].email");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct JsonPath {
    segments: Vec<PathSegment>,
}

impl JsonPath {
    /// Creates an empty path representing the root value.
    pub fn root() -> Self {
        Self::default()
    }

    /// Puts `segment` in front of this path.
    ///
    /// Rejections bubble from the innermost node outwards, so each enclosing
    /// `key` node prepends its segment.
    pub(crate) fn prepend(&mut self, segment: PathSegment) {
        self.segments.insert(0, segment);
    }

    /// Returns true if this is the root path (no segments).
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns an iterator over the path segments.
    pub fn segments(&self) -> impl Iterator<Item = &PathSegment> {
        self.segments.iter()
    }

    /// Renders the path below a named root, e.g. `options.retry.count`.
    pub fn qualify(&self, root: &str) -> String {
        let mut out = root.to_string();
        for segment in &self.segments {
            out.push_str(&segment.to_string());
        }
        out
    }
}

impl Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Field(name) if i == 0 => write!(f, "{}", name)?,
                other => write!(f, "{}", other)?,
            }
        }
        Ok(())
    }
}
