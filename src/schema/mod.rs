//! The combinator algebra.
//!
//! A [`Schema`] is an immutable tree of [`Node`]s plus the [`SchemaType`] it
//! belongs to. Every combinator takes the schema by value and returns a new
//! one that runs the receiver first and the new step after it; the inputs are
//! shared, never mutated, so sub-schemas can be reused freely. No user code
//! runs while a schema is being built.
//!
//! # Example
//!
//! ```rust
//! use chainval::Schema;
//! use serde_json::json;
//!
//! let retry = Schema::new()
//!     .object()
//!     .field("count", Schema::new().integer().required().min(1))
//!     .field("interval", Schema::new().number().default_(0));
//!
//! assert_eq!(
//!     retry.validate(&json!({"count": 2})).unwrap(),
//!     json!({"count": 2, "interval": 0})
//! );
//!
//! let error = retry.validate(&json!({"count": 0})).unwrap_err();
//! assert_eq!(
//!     error.to_string(),
//!     "value.count should not be less than 1, but got 0"
//! );
//! ```

mod node;

pub use node::{Node, Outcome, PredicateFn, TransformFn};

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tracing::trace;

use crate::error::{PluginError, SchemaError};
use crate::eval::Evaluator;
use crate::path::PathSegment;
use crate::plugin::{PluginArg, SchemaType};

/// An immutable, composable validator.
///
/// Cloning is cheap: the node tree is reference counted.
#[derive(Clone)]
pub struct Schema {
    node: Arc<Node>,
    kind: SchemaType,
}

impl Schema {
    /// Creates the identity schema of the standard schema type.
    ///
    /// The standard type carries every built-in predicate as a named
    /// method; see [`SchemaType::standard`].
    pub fn new() -> Self {
        SchemaType::standard().schema()
    }

    pub(crate) fn from_node(node: Arc<Node>, kind: SchemaType) -> Self {
        Self { node, kind }
    }

    /// Returns the identity schema of this schema's type.
    ///
    /// Plugins use it to build fresh sub-schemas that do not repeat the
    /// receiver's steps.
    pub fn empty(&self) -> Self {
        self.kind.schema()
    }

    /// Returns the root node.
    pub fn node(&self) -> &Node {
        &self.node
    }

    /// Returns the schema type this schema was built from.
    pub fn schema_type(&self) -> &SchemaType {
        &self.kind
    }

    fn chain(self, node: Node) -> Self {
        let kind = self.kind.clone();
        self.next(Self::from_node(Arc::new(node), kind))
    }

    /// Runs `self`, then `other` on the result.
    ///
    /// Identity steps are dropped, so `empty().next(s)` is `s`. The result
    /// belongs to `self`'s [`SchemaType`]: `other`'s methods and evaluation
    /// settings (such as the depth limit) do not carry over. To apply a
    /// type's settings to an existing schema, put that type's schema first:
    /// `sv.schema().next(s)`.
    pub fn next(self, other: Schema) -> Self {
        let node = match (&*self.node, &*other.node) {
            (Node::Identity, _) => other.node,
            (_, Node::Identity) => self.node,
            _ => Arc::new(Node::Next(self.node, other.node)),
        };
        Self::from_node(node, self.kind)
    }

    /// Runs `self`, then the function `f` on the result.
    ///
    /// `f` may return a plain value, a schema to continue with, a rejection
    /// or a break; see [`Outcome`].
    pub fn then<F>(self, f: F) -> Self
    where
        F: Fn(&Value) -> Outcome + Send + Sync + 'static,
    {
        self.chain(Node::Function(Arc::new(f)))
    }

    /// Runs the function `f` before any step already in `self`.
    ///
    /// This is how `required` and `default_` take effect regardless of where
    /// they appear in a chain.
    pub fn first<F>(self, f: F) -> Self
    where
        F: Fn(&Value) -> Outcome + Send + Sync + 'static,
    {
        let head = Self::from_node(Arc::new(Node::Function(Arc::new(f))), self.kind.clone());
        head.next(self)
    }

    /// Replaces the value with a constant once `self` passes.
    pub fn value(self, value: impl Into<Value>) -> Self {
        self.chain(Node::Value(value.into()))
    }

    /// Rejects with `message` once `self` passes.
    pub fn reject(self, message: impl Into<String>) -> Self {
        self.chain(Node::Reject(message.into()))
    }

    /// Rejects with `message` unless `is_valid` holds for the value.
    pub fn satisfy<F>(self, is_valid: F, message: impl Into<String>) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.chain(Node::Satisfy {
            is_valid: Arc::new(is_valid),
            message: message.into(),
        })
    }

    /// Requires `checker` to pass but keeps the value it was given.
    pub fn check(self, checker: Schema) -> Self {
        self.chain(Node::Check(checker.node))
    }

    /// Runs `then` on the value if `condition` does not reject it; otherwise
    /// passes the value through.
    pub fn when(self, condition: Schema, then: Schema) -> Self {
        let otherwise = self.empty();
        self.when_else(condition, then, otherwise)
    }

    /// Runs `then` if `condition` does not reject, `otherwise` if it does.
    ///
    /// Only the verdict of `condition` matters: both branches receive the
    /// original value, never the condition's output.
    pub fn when_else(self, condition: Schema, then: Schema, otherwise: Schema) -> Self {
        self.chain(Node::When {
            when: condition.node,
            then: then.node,
            else_: otherwise.node,
        })
    }

    /// Runs `attempt`; if it rejects, the original value passes through.
    pub fn try_(self, attempt: Schema) -> Self {
        let recover = self.empty();
        self.try_catch(attempt, recover)
    }

    /// Runs `attempt`; if it rejects, runs `recover` on the original value.
    ///
    /// ```rust
    /// use chainval::Schema;
    /// use serde_json::json;
    ///
    /// // Accept either a bare port number or `{"port": n}`.
    /// let port = Schema::new().try_catch(
    ///     Schema::new().integer().then(|v| json!({"port": v}).into()),
    ///     Schema::new().object().field("port", Schema::new().integer()),
    /// );
    ///
    /// assert_eq!(port.validate(&json!(80)).unwrap(), json!({"port": 80}));
    /// assert_eq!(
    ///     port.validate(&json!({"port": 8080})).unwrap(),
    ///     json!({"port": 8080})
    /// );
    /// ```
    pub fn try_catch(self, attempt: Schema, recover: Schema) -> Self {
        self.chain(Node::Try {
            try_: attempt.node,
            catch_: recover.node,
        })
    }

    /// Replaces the value with `value[key]` validated by `schema`.
    ///
    /// String keys select object members (`.key` in error paths), integer
    /// keys select array elements (`[key]`).
    pub fn key(self, key: impl Into<PathSegment>, schema: Schema) -> Self {
        self.chain(Node::Key {
            key: key.into(),
            value: schema.node,
        })
    }

    /// Validates every element of an array with `item`.
    ///
    /// Stops at the first rejected element; on success yields the array of
    /// validated elements in order.
    pub fn items(self, item: Schema) -> Self {
        self.chain(Node::Items(item.node))
    }

    /// Calls a named method registered on this schema's type.
    ///
    /// # Errors
    ///
    /// Returns [`PluginError::UnknownMethod`] if no such method exists, or
    /// whatever the plugin reports for bad arguments.
    pub fn invoke(self, method: &str, args: &[PluginArg]) -> Result<Schema, PluginError> {
        let plugin = self
            .kind
            .method(method)
            .cloned()
            .ok_or_else(|| PluginError::UnknownMethod(method.to_string()))?;
        plugin(&self, args)
    }

    /// Validates `value` under the root name `value`.
    ///
    /// # Errors
    ///
    /// Returns the first rejection as a [`SchemaError`].
    pub fn validate(&self, value: &Value) -> Result<Value, SchemaError> {
        self.validate_named(value, "value")
    }

    /// Validates `value` under the root name `name`.
    ///
    /// ```rust
    /// use chainval::Schema;
    /// use serde_json::json;
    ///
    /// let schema = Schema::new().array().items(Schema::new().string());
    /// let error = schema.validate_named(&json!([1]), "foo").unwrap_err();
    ///
    /// assert_eq!(error.qualified_path(), "foo[0]");
    /// assert_eq!(error.got, json!(1));
    /// ```
    pub fn validate_named(&self, value: &Value, name: &str) -> Result<Value, SchemaError> {
        Evaluator::new(self.kind.config())
            .run(&self.node, value.clone())
            .map_err(|rejection| {
                let error = rejection.into_error(name, value);
                trace!(path = %error.qualified_path(), message = %error.message, "value rejected");
                error
            })
    }
}

impl Default for Schema {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema").field("node", &self.node).finish()
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<Schema>();
    assert_sync::<Schema>();
};
