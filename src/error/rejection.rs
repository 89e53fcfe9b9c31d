//! The in-flight rejection signal.

use serde_json::Value;

use crate::path::{JsonPath, PathSegment};

use super::SchemaError;

/// A recoverable validation failure.
///
/// A `Rejection` is plain data: `check`, `when` and `try_` nodes inspect it
/// and only the outermost `validate` turns an uncaught one into a
/// [`SchemaError`]. While it bubbles out of `key` and `items` nodes it picks
/// up path segments, so by the time it reaches the top the path reads
/// outer-to-inner.
///
/// # Example
///
/// ```rust
/// use chainval::Rejection;
/// use serde_json::json;
///
/// let rejection = Rejection::new("should be a number").with_value(json!("x"));
/// let error = rejection.into_error("count", &json!({"count": "x"}));
///
/// assert_eq!(error.to_string(), r#"count should be a number, but got "x""#);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Rejection {
    /// Human-readable reason, e.g. `should not be less than 1`.
    pub message: String,
    /// Segments crossed between the root and the failing value.
    pub path: JsonPath,
    /// The value present where the failure happened.
    pub value: Option<Value>,
}

impl Rejection {
    /// Creates a rejection with no path and no recorded value.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: JsonPath::root(),
            value: None,
        }
    }

    /// Records the offending value.
    pub fn with_value(mut self, value: Value) -> Self {
        self.value = Some(value);
        self
    }

    /// Records `value` unless an inner node already did.
    pub(crate) fn or_value(mut self, value: &Value) -> Self {
        if self.value.is_none() {
            self.value = Some(value.clone());
        }
        self
    }

    /// Marks the rejection as having happened below `segment`.
    pub(crate) fn within(mut self, segment: PathSegment) -> Self {
        self.path.prepend(segment);
        self
    }

    /// Converts into the public error, rooted at `name`.
    ///
    /// `input` is only used when no offending value was ever recorded.
    pub fn into_error(self, name: &str, input: &Value) -> SchemaError {
        let got = self.value.unwrap_or_else(|| input.clone());
        SchemaError::new(name, self.path, self.message, got)
    }
}
