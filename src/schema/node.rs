//! The node tree a [`Schema`] is made of.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::Rejection;
use crate::path::PathSegment;

use super::Schema;

/// User transformation stored in a `Function` node.
pub type TransformFn = Arc<dyn Fn(&Value) -> Outcome + Send + Sync>;

/// User predicate stored in a `Satisfy` node.
pub type PredicateFn = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// One step of a validator.
///
/// Nodes are immutable once built. Composite nodes hold their children
/// through `Arc`, so a sub-schema can be shared by any number of parents.
#[derive(Clone)]
pub enum Node {
    /// Passes the value through unchanged.
    Identity,
    /// Ignores the input and yields a constant.
    Value(Value),
    /// Applies a user function and interprets its [`Outcome`].
    Function(TransformFn),
    /// Always rejects.
    Reject(String),
    /// Rejects with `message` unless `is_valid` holds.
    Satisfy {
        is_valid: PredicateFn,
        message: String,
    },
    /// Runs the inner node for its verdict only and keeps the input.
    Check(Arc<Node>),
    /// Runs `first`, then `second` on its output.
    Next(Arc<Node>, Arc<Node>),
    /// Picks `then` or `else_` depending on whether `when` rejects.
    /// Both branches receive the input of the `When` node.
    When {
        when: Arc<Node>,
        then: Arc<Node>,
        else_: Arc<Node>,
    },
    /// Runs `try_`; if it rejects, runs `catch_` on the input instead.
    Try {
        try_: Arc<Node>,
        catch_: Arc<Node>,
    },
    /// Projects `key` out of the input and runs `value` on it.
    Key { key: PathSegment, value: Arc<Node> },
    /// Runs the inner node on every array element.
    Items(Arc<Node>),
}

impl Node {
    /// Short name of the node kind, as reported in trace logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Identity => "identity",
            Node::Value(_) => "value",
            Node::Function(_) => "function",
            Node::Reject(_) => "reject",
            Node::Satisfy { .. } => "satisfy",
            Node::Check(_) => "check",
            Node::Next(..) => "next",
            Node::When { .. } => "when",
            Node::Try { .. } => "try",
            Node::Key { .. } => "key",
            Node::Items(_) => "items",
        }
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Identity => f.write_str("Identity"),
            Node::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Node::Function(_) => f.write_str("Function(<fn>)"),
            Node::Reject(message) => f.debug_tuple("Reject").field(message).finish(),
            Node::Satisfy { message, .. } => f
                .debug_struct("Satisfy")
                .field("message", message)
                .finish_non_exhaustive(),
            Node::Check(check) => f.debug_tuple("Check").field(check).finish(),
            Node::Next(first, second) => {
                f.debug_tuple("Next").field(first).field(second).finish()
            }
            Node::When { when, then, else_ } => f
                .debug_struct("When")
                .field("when", when)
                .field("then", then)
                .field("else_", else_)
                .finish(),
            Node::Try { try_, catch_ } => f
                .debug_struct("Try")
                .field("try_", try_)
                .field("catch_", catch_)
                .finish(),
            Node::Key { key, value } => f
                .debug_struct("Key")
                .field("key", key)
                .field("value", value)
                .finish(),
            Node::Items(item) => f.debug_tuple("Items").field(item).finish(),
        }
    }
}

/// What a function step hands back to the evaluator.
///
/// # Example
///
/// ```rust
/// use chainval::{Outcome, Schema};
/// use serde_json::json;
///
/// // Data-dependent validation: strings continue into a length check.
/// let schema = Schema::new().then(|value| {
///     if value.is_string() {
///         Outcome::Continue(Schema::new().min_length(2))
///     } else {
///         Outcome::Value(value.clone())
///     }
/// });
///
/// assert!(schema.validate(&json!("a")).is_err());
/// assert_eq!(schema.validate(&json!(7)).unwrap(), json!(7));
/// ```
#[derive(Debug, Clone)]
pub enum Outcome {
    /// Continue the chain with this value.
    Value(Value),
    /// Evaluate this schema against the function's input.
    Continue(Schema),
    /// Fail the chain.
    Rejected(Rejection),
    /// Skip the rest of the chain and resolve to this value.
    Broken(Value),
}

impl Outcome {
    /// Shorthand for `Outcome::Rejected(Rejection::new(message))`.
    pub fn reject(message: impl Into<String>) -> Self {
        Outcome::Rejected(Rejection::new(message))
    }

    /// Shorthand for `Outcome::Broken(value)`.
    pub fn break_(value: impl Into<Value>) -> Self {
        Outcome::Broken(value.into())
    }
}

impl From<Value> for Outcome {
    fn from(value: Value) -> Self {
        Outcome::Value(value)
    }
}

impl From<Schema> for Outcome {
    fn from(schema: Schema) -> Self {
        Outcome::Continue(schema)
    }
}

impl From<Rejection> for Outcome {
    fn from(rejection: Rejection) -> Self {
        Outcome::Rejected(rejection)
    }
}
