//! Error types for validation failures.
//!
//! Three signals are kept apart:
//! - [`Rejection`]: a recoverable failure flowing through the evaluator as data
//! - [`SchemaError`]: the single error a failed `validate` call returns
//! - [`PluginError`]: misuse detected while a schema or schema type is built

mod plugin_error;
mod rejection;
mod schema_error;

pub use plugin_error::PluginError;
pub use rejection::Rejection;
pub use schema_error::{SchemaError, SchemaErrors};

pub(crate) use schema_error::to_json_text;
