//! Built-in validator methods.
//!
//! Each layer adds typed methods to [`Schema`](crate::Schema) and exposes the
//! same methods as a [`PluginTable`](crate::PluginTable), so they can also be
//! reached through [`Schema::invoke`](crate::Schema::invoke) and so user
//! plugins cannot take their names. The layers stack in the order
//! comparison → types → structures.

pub(crate) mod comparison;
pub(crate) mod structures;
pub(crate) mod types;

use serde_json::Value;

use crate::error::{to_json_text, PluginError};
use crate::plugin::PluginArg;
use crate::schema::Schema;

/// Positional argument access for dynamic plugin calls.
pub(crate) struct Args<'a> {
    method: &'static str,
    args: &'a [PluginArg],
}

impl<'a> Args<'a> {
    pub(crate) fn new(method: &'static str, args: &'a [PluginArg]) -> Self {
        Self { method, args }
    }

    fn error(&self, reason: impl Into<String>) -> PluginError {
        PluginError::invalid_arguments(self.method, reason)
    }

    /// Fails unless exactly `count` arguments were passed.
    pub(crate) fn arity(&self, count: usize) -> Result<&Self, PluginError> {
        if self.args.len() == count {
            Ok(self)
        } else {
            Err(self.error(format!(
                "expected {} argument(s), got {}",
                count,
                self.args.len()
            )))
        }
    }

    pub(crate) fn value(&self, idx: usize) -> Result<&'a Value, PluginError> {
        match self.args.get(idx) {
            Some(PluginArg::Value(value)) => Ok(value),
            Some(PluginArg::Schema(_)) => {
                Err(self.error(format!("argument {} must be a value", idx)))
            }
            None => Err(self.error(format!("missing argument {}", idx))),
        }
    }

    pub(crate) fn number(&self, idx: usize) -> Result<f64, PluginError> {
        self.value(idx)?
            .as_f64()
            .ok_or_else(|| self.error(format!("argument {} must be a number", idx)))
    }

    pub(crate) fn count(&self, idx: usize) -> Result<usize, PluginError> {
        self.value(idx)?
            .as_u64()
            .and_then(|n| usize::try_from(n).ok())
            .ok_or_else(|| self.error(format!("argument {} must be a non-negative integer", idx)))
    }

    pub(crate) fn string(&self, idx: usize) -> Result<&'a str, PluginError> {
        self.value(idx)?
            .as_str()
            .ok_or_else(|| self.error(format!("argument {} must be a string", idx)))
    }

    pub(crate) fn schema(&self, idx: usize) -> Result<Schema, PluginError> {
        match self.args.get(idx) {
            Some(PluginArg::Schema(schema)) => Ok(schema.clone()),
            Some(PluginArg::Value(_)) => {
                Err(self.error(format!("argument {} must be a schema", idx)))
            }
            None => Err(self.error(format!("missing argument {}", idx))),
        }
    }
}

/// Renders a value the way it reads inside a message: strings unquoted.
pub(crate) fn describe(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => to_json_text(other),
    }
}
