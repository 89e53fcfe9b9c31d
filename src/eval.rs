//! The evaluator.
//!
//! [`Evaluator`] interprets a node tree against a value. It never raises an
//! error itself: failures come back as [`Rejection`] data and only the public
//! `validate` entry point turns them into a [`SchemaError`](crate::SchemaError).
//!
//! Sequencing is walked with an explicit work-list, so long builder chains do
//! not grow the call stack. Structural descent (sub-schemas of `check`,
//! `when`, `try_`, `key`, `items` and function continuations) does recurse and
//! is bounded by [`EvalConfig::max_depth`].

use serde_json::Value;
use tracing::trace;

use crate::error::Rejection;
use crate::path::PathSegment;
use crate::schema::{Node, Outcome};

/// Default bound on nested sub-schema evaluation.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Evaluation settings carried by a [`SchemaType`](crate::SchemaType).
///
/// # Example
///
/// ```rust
/// use chainval::EvalConfig;
///
/// let config = EvalConfig::new().with_max_depth(32);
/// assert_eq!(config.max_depth(), 32);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvalConfig {
    max_depth: usize,
}

impl EvalConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Sets the maximum sub-schema nesting depth.
    ///
    /// Going deeper rejects with `exceeds maximum nesting depth of <n>`
    /// instead of risking a stack overflow on adversarial input.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Returns the maximum allowed depth.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of evaluating a chain that did not reject.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Step {
    Done(Value),
    Break(Value),
}

impl Step {
    fn into_value(self) -> Value {
        match self {
            Step::Done(value) | Step::Break(value) => value,
        }
    }
}

/// Interprets node trees under a fixed configuration.
pub(crate) struct Evaluator {
    config: EvalConfig,
}

impl Evaluator {
    pub(crate) fn new(config: EvalConfig) -> Self {
        Self { config }
    }

    /// Evaluates `node` as a whole schema: a `Break` is unwrapped here.
    pub(crate) fn run(&self, node: &Node, value: Value) -> Result<Value, Rejection> {
        self.boundary(node, value, 0)
    }

    /// Evaluates a sub-schema. Breaks never cross a schema boundary.
    fn boundary(&self, node: &Node, value: Value, depth: usize) -> Result<Value, Rejection> {
        if depth > self.config.max_depth {
            trace!(node = node.kind(), depth, "nesting limit reached");
            return Err(Rejection::new(format!(
                "exceeds maximum nesting depth of {}",
                self.config.max_depth
            ))
            .with_value(value));
        }
        self.sequence(node, value, depth).map(Step::into_value)
    }

    /// Walks the `Next` spine of `node` left to right.
    fn sequence(&self, node: &Node, value: Value, depth: usize) -> Result<Step, Rejection> {
        let mut pending = vec![node];
        let mut current = value;

        while let Some(node) = pending.pop() {
            match node {
                Node::Next(first, second) => {
                    pending.push(second);
                    pending.push(first);
                }
                step => match self.step(step, current, depth)? {
                    Step::Done(value) => current = value,
                    Step::Break(value) => return Ok(Step::Break(value)),
                },
            }
        }

        Ok(Step::Done(current))
    }

    fn step(&self, node: &Node, value: Value, depth: usize) -> Result<Step, Rejection> {
        let child = depth + 1;
        match node {
            Node::Identity => Ok(Step::Done(value)),
            Node::Value(constant) => Ok(Step::Done(constant.clone())),
            Node::Function(f) => match f(&value) {
                Outcome::Value(next) => Ok(Step::Done(next)),
                Outcome::Continue(schema) => {
                    self.boundary(schema.node(), value, child).map(Step::Done)
                }
                Outcome::Rejected(rejection) => Err(rejection.or_value(&value)),
                Outcome::Broken(next) => Ok(Step::Break(next)),
            },
            Node::Reject(message) => Err(Rejection::new(message.clone()).with_value(value)),
            Node::Satisfy { is_valid, message } => {
                if is_valid(&value) {
                    Ok(Step::Done(value))
                } else {
                    Err(Rejection::new(message.clone()).with_value(value))
                }
            }
            Node::Check(check) => {
                self.boundary(check, value.clone(), child)?;
                Ok(Step::Done(value))
            }
            Node::Next(..) => self.sequence(node, value, depth),
            Node::When { when, then, else_ } => {
                let branch = match self.boundary(when, value.clone(), child) {
                    Ok(_) => then,
                    Err(_) => else_,
                };
                self.boundary(branch, value, child).map(Step::Done)
            }
            Node::Try { try_, catch_ } => match self.boundary(try_, value.clone(), child) {
                Ok(next) => Ok(Step::Done(next)),
                Err(_) => self.boundary(catch_, value, child).map(Step::Done),
            },
            Node::Key { key, value: schema } => {
                let projected = key.project(&value);
                self.boundary(schema, projected, child)
                    .map(Step::Done)
                    .map_err(|rejection| rejection.within(key.clone()))
            }
            Node::Items(item) => match value {
                Value::Array(items) => {
                    let mut validated = Vec::with_capacity(items.len());
                    for (idx, element) in items.into_iter().enumerate() {
                        let next = self
                            .boundary(item, element, child)
                            .map_err(|rejection| rejection.within(PathSegment::Index(idx)))?;
                        validated.push(next);
                    }
                    Ok(Step::Done(Value::Array(validated)))
                }
                other => Err(Rejection::new("should be an array").with_value(other)),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Arc;

    fn run(node: Node, value: Value) -> Result<Value, Rejection> {
        Evaluator::new(EvalConfig::new()).run(&node, value)
    }

    fn function(f: impl Fn(&Value) -> Outcome + Send + Sync + 'static) -> Arc<Node> {
        Arc::new(Node::Function(Arc::new(f)))
    }

    #[test]
    fn test_identity_and_constant() {
        assert_eq!(run(Node::Identity, json!(3)).unwrap(), json!(3));
        assert_eq!(run(Node::Value(json!("x")), json!(3)).unwrap(), json!("x"));
    }

    #[test]
    fn test_reject_records_value() {
        let rejection = run(Node::Reject("nope".to_string()), json!(1)).unwrap_err();
        assert_eq!(rejection.message, "nope");
        assert_eq!(rejection.value, Some(json!(1)));
        assert!(rejection.path.is_root());
    }

    #[test]
    fn test_break_skips_rest_of_chain() {
        let node = Node::Next(
            Arc::new(Node::Next(
                function(|_| Outcome::break_(5)),
                Arc::new(Node::Reject("unreachable".to_string())),
            )),
            Arc::new(Node::Reject("also unreachable".to_string())),
        );
        assert_eq!(run(node, Value::Null).unwrap(), json!(5));
    }

    #[test]
    fn test_break_stops_at_key_boundary() {
        let node = Node::Next(
            Arc::new(Node::Key {
                key: PathSegment::field("a"),
                value: function(|_| Outcome::break_(1)),
            }),
            function(|v| Outcome::Value(json!([v.clone()]))),
        );
        assert_eq!(run(node, json!({})).unwrap(), json!([1]));
    }

    #[test]
    fn test_key_prepends_segment() {
        let node = Node::Key {
            key: PathSegment::field("a"),
            value: Arc::new(Node::Key {
                key: PathSegment::index(1),
                value: Arc::new(Node::Reject("bad".to_string())),
            }),
        };
        let rejection = run(node, json!({"a": [0, 9]})).unwrap_err();
        assert_eq!(rejection.path.qualify("root"), "root.a[1]");
        assert_eq!(rejection.value, Some(json!(9)));
    }

    #[test]
    fn test_items_on_non_array_rejects() {
        let rejection = run(Node::Items(Arc::new(Node::Identity)), json!(4)).unwrap_err();
        assert_eq!(rejection.message, "should be an array");
    }

    #[test]
    fn test_long_chain_does_not_recurse() {
        let mut node = Arc::new(Node::Identity);
        for _ in 0..2_000 {
            let increment = function(|v| Outcome::Value(json!(v.as_i64().unwrap_or(0) + 1)));
            node = Arc::new(Node::Next(node, increment));
        }
        let shallow = Evaluator::new(EvalConfig::new().with_max_depth(1));
        assert_eq!(shallow.run(&node, json!(0)).unwrap(), json!(2_000));
    }

    #[test]
    fn test_depth_limit_rejects() {
        let mut node = Arc::new(Node::Identity);
        for _ in 0..10 {
            node = Arc::new(Node::Check(node));
        }
        let shallow = Evaluator::new(EvalConfig::new().with_max_depth(4));
        let rejection = shallow.run(&node, json!(1)).unwrap_err();
        assert_eq!(rejection.message, "exceeds maximum nesting depth of 4");

        let deep = Evaluator::new(EvalConfig::new().with_max_depth(10));
        assert_eq!(deep.run(&node, json!(1)).unwrap(), json!(1));
    }
}
