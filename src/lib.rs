//! # Chainval
//!
//! Composable validation combinators for JSON-like values.
//!
//! ## Overview
//!
//! A validator is built by chaining primitive checks and structural
//! combinators into an immutable [`Schema`]. Building runs no user code, so a
//! schema can be stored, combined into larger schemas and reused across
//! threads. Validating a value walks the tree once and either returns the
//! (possibly transformed) value or the first rejection, reported with the
//! path where it happened and the value found there.
//!
//! ## Core Types
//!
//! - [`Schema`]: the combinator algebra and the `validate` entry point
//! - [`Node`]: the tree a schema is made of
//! - [`Outcome`]: what a function step returns (value, continuation, reject, break)
//! - [`SchemaType`]: a set of named plugin methods schemas are built from
//! - [`SchemaError`]: a failed validation, formatted as
//!   `<path> <message>, but got <value>`
//!
//! ## Example
//!
//! ```rust
//! use chainval::Schema;
//! use serde_json::json;
//!
//! let options = Schema::new().object().field(
//!     "retry",
//!     Schema::new()
//!         .object()
//!         .field("count", Schema::new().integer().min(1)),
//! );
//!
//! let error = options
//!     .validate_named(&json!({"retry": {"count": 0}}), "options")
//!     .unwrap_err();
//!
//! assert_eq!(
//!     error.to_string(),
//!     "options.retry.count should not be less than 1, but got 0"
//! );
//! ```

pub mod batch;
pub mod error;
pub mod eval;
pub mod path;
pub mod plugin;
mod plugins;
pub mod schema;

pub use error::{PluginError, Rejection, SchemaError, SchemaErrors};
pub use eval::{EvalConfig, DEFAULT_MAX_DEPTH};
pub use path::{JsonPath, PathSegment};
pub use plugin::{PluginArg, PluginFn, PluginTable, SchemaType};
pub use schema::{Node, Outcome, Schema};

/// Type alias for accumulated validation results.
pub type ValidationResult<T> = stillwater::Validation<T, SchemaErrors>;
