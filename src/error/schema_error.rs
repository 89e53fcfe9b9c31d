//! Schema validation error types.
//!
//! This module provides [`SchemaError`] for a failed `validate` call and
//! [`SchemaErrors`] for accumulating failures across several inputs.

use std::fmt::{self, Display};

use serde_json::Value;
use stillwater::prelude::*;

use crate::path::JsonPath;

/// A validation failure with its full context.
///
/// `SchemaError` captures:
/// - **name**: the root name given to `validate` (`value` by default)
/// - **path**: where below the root the failure occurred
/// - **message**: why the value was rejected
/// - **got**: the offending value at the point of failure, not the root input
///
/// Its `Display` output follows the fixed format
/// `<name><path> <message>, but got <json>`.
///
/// # Example
///
/// ```rust
/// use chainval::{JsonPath, SchemaError};
/// use serde_json::json;
///
/// let error = SchemaError::new(
///     "options",
///     JsonPath::root(),
///     "should be an object",
///     json!([1.0, 2.5]),
/// );
///
/// assert_eq!(
///     error.to_string(),
///     "options should be an object, but got [1,2.5]"
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaError {
    /// The root name the input was validated under.
    pub name: String,
    /// The path from the root to the value that failed validation.
    pub path: JsonPath,
    /// Human-readable error message.
    pub message: String,
    /// The value that failed validation.
    pub got: Value,
}

impl SchemaError {
    /// Creates a new schema error.
    pub fn new(
        name: impl Into<String>,
        path: JsonPath,
        message: impl Into<String>,
        got: Value,
    ) -> Self {
        Self {
            name: name.into(),
            path,
            message: message.into(),
            got,
        }
    }

    /// Returns the root name followed by the path, e.g. `foo[0]`.
    pub fn qualified_path(&self) -> String {
        self.path.qualify(&self.name)
    }
}

impl Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}, but got {}",
            self.qualified_path(),
            self.message,
            to_json_text(&self.got)
        )
    }
}

/// Largest magnitude at which every whole `f64` is an exact integer.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Serializes `value` as compact JSON, writing whole floats without a
/// fractional part (`2`, not `2.0`).
pub(crate) fn to_json_text(value: &Value) -> String {
    whole_floats_as_integers(value).to_string()
}

fn whole_floats_as_integers(value: &Value) -> Value {
    match value {
        Value::Number(n) if n.is_f64() => match n.as_f64() {
            Some(f) if f.fract() == 0.0 && f.abs() <= MAX_SAFE_INTEGER => Value::from(f as i64),
            _ => value.clone(),
        },
        Value::Array(items) => Value::Array(items.iter().map(whole_floats_as_integers).collect()),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), whole_floats_as_integers(v)))
                .collect(),
        ),
        other => other.clone(),
    }
}

impl std::error::Error for SchemaError {}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<SchemaError>();
    assert_sync::<SchemaError>();
};

/// A non-empty collection of schema validation errors.
///
/// Validating a single value stops at the first rejection, so one call never
/// yields more than one [`SchemaError`]. `SchemaErrors` collects the failures
/// of several independent validations, as done by
/// [`Schema::validate_all`](crate::Schema::validate_all).
///
/// ```rust
/// use chainval::{JsonPath, SchemaError, SchemaErrors};
/// use serde_json::json;
/// use stillwater::prelude::*;
///
/// let first = SchemaErrors::single(
///     SchemaError::new("value[0]", JsonPath::root(), "is required", json!(null))
/// );
/// let second = SchemaErrors::single(
///     SchemaError::new("value[3]", JsonPath::root(), "should be a string", json!(1))
/// );
///
/// assert_eq!(first.combine(second).len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaErrors(NonEmptyVec<SchemaError>);

impl SchemaErrors {
    /// Creates a `SchemaErrors` containing a single error.
    pub fn single(error: SchemaError) -> Self {
        Self(NonEmptyVec::singleton(error))
    }

    /// Creates a `SchemaErrors` from a vec, or `None` if it is empty.
    pub fn from_vec(errors: Vec<SchemaError>) -> Option<Self> {
        let mut errors = errors.into_iter();
        let head = Self::single(errors.next()?);
        Some(errors.fold(head, |acc, error| acc.combine(Self::single(error))))
    }

    /// Returns the number of errors in this collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns an iterator over the contained errors.
    pub fn iter(&self) -> impl Iterator<Item = &SchemaError> {
        self.0.iter()
    }

    /// Returns the first error in the collection.
    pub fn first(&self) -> &SchemaError {
        self.0.head()
    }

    /// Converts this collection into a `Vec<SchemaError>`.
    pub fn into_vec(self) -> Vec<SchemaError> {
        self.0.into_vec()
    }
}

impl Semigroup for SchemaErrors {
    fn combine(self, other: Self) -> Self {
        SchemaErrors(self.0.combine(other.0))
    }
}

impl Display for SchemaErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validation failed with {} error(s):", self.len())?;
        for (i, error) in self.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, error)?;
        }
        Ok(())
    }
}

impl std::error::Error for SchemaErrors {}

impl IntoIterator for SchemaErrors {
    type Item = SchemaError;
    type IntoIter = std::vec::IntoIter<SchemaError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_vec().into_iter()
    }
}
