//! Comparison and requisition methods.

use std::fmt::Display;

use regex::Regex;
use serde_json::Value;

use crate::error::PluginError;
use crate::plugin::PluginTable;
use crate::schema::{Outcome, Schema};

use super::{describe, Args};

/// `null`, `false`, `0` and `""` are falsy; everything else is truthy.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn compare(value: &Value, test: impl Fn(f64) -> bool) -> bool {
    value.as_f64().is_some_and(test)
}

impl Schema {
    /// Rejects with `should be <message>` unless `is_valid` holds.
    pub fn is<F>(self, message: impl Display, is_valid: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.satisfy(is_valid, format!("should be {}", message))
    }

    /// Rejects with `should not be <message>` unless `is_valid` holds.
    pub fn isnt<F>(self, message: impl Display, is_valid: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.satisfy(is_valid, format!("should not be {}", message))
    }

    /// Requires a truthy value: anything but `null`, `false`, `0` or `""`.
    ///
    /// Empty arrays and objects are truthy.
    pub fn truthy(self) -> Self {
        self.is("truthy", is_truthy)
    }

    /// Requires a falsy value: `null`, `false`, `0` or `""`.
    pub fn falsy(self) -> Self {
        self.is("falsy", |v| !is_truthy(v))
    }

    /// Requires the value to equal `expected`.
    pub fn equal(self, expected: impl Into<Value>) -> Self {
        let expected = expected.into();
        let message = format!("equal to {}", describe(&expected));
        self.is(message, move |v| *v == expected)
    }

    /// Requires a number strictly below `limit`.
    pub fn lt(self, limit: impl Into<f64>) -> Self {
        let limit = limit.into();
        self.is(format!("less than {}", limit), move |v| compare(v, |n| n < limit))
    }

    /// Requires a number strictly above `limit`.
    pub fn gt(self, limit: impl Into<f64>) -> Self {
        let limit = limit.into();
        self.is(format!("greater than {}", limit), move |v| {
            compare(v, |n| n > limit)
        })
    }

    /// Requires a number of at least `limit`.
    ///
    /// ```rust
    /// use chainval::Schema;
    /// use serde_json::json;
    ///
    /// let error = Schema::new().number().min(1).validate(&json!(0)).unwrap_err();
    /// assert_eq!(error.to_string(), "value should not be less than 1, but got 0");
    /// ```
    pub fn min(self, limit: impl Into<f64>) -> Self {
        let limit = limit.into();
        self.isnt(format!("less than {}", limit), move |v| {
            compare(v, |n| n >= limit)
        })
    }

    /// Requires a number of at most `limit`.
    pub fn max(self, limit: impl Into<f64>) -> Self {
        let limit = limit.into();
        self.isnt(format!("greater than {}", limit), move |v| {
            compare(v, |n| n <= limit)
        })
    }

    /// Rejects an absent (`null`) value before any other step runs.
    pub fn required(self) -> Self {
        self.first(|v| {
            if v.is_null() {
                Outcome::reject("is required")
            } else {
                Outcome::Value(v.clone())
            }
        })
    }

    /// Resolves an absent (`null`) value to `default` and skips every other
    /// step of the chain.
    ///
    /// ```rust
    /// use chainval::Schema;
    /// use serde_json::{json, Value};
    ///
    /// let schema = Schema::new().number().min(10).default_(5);
    /// assert_eq!(schema.validate(&Value::Null).unwrap(), json!(5));
    /// assert!(schema.validate(&json!(7)).is_err());
    /// ```
    pub fn default_(self, default: impl Into<Value>) -> Self {
        let default = default.into();
        self.first(move |v| {
            if v.is_null() {
                Outcome::Broken(default.clone())
            } else {
                Outcome::Value(v.clone())
            }
        })
    }

    /// Requires a string matching `pattern`.
    ///
    /// # Errors
    ///
    /// Returns the regex error if `pattern` does not compile.
    pub fn pattern(self, pattern: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(pattern)?;
        let message = format!("matching /{}/", pattern);
        Ok(self.is(message, move |v| v.as_str().is_some_and(|s| regex.is_match(s))))
    }
}

pub(crate) fn plugins() -> PluginTable {
    PluginTable::new()
        .method("truthy", |s, args| {
            Args::new("truthy", args).arity(0)?;
            Ok(s.clone().truthy())
        })
        .method("falsy", |s, args| {
            Args::new("falsy", args).arity(0)?;
            Ok(s.clone().falsy())
        })
        .method("equal", |s, args| {
            let expected = Args::new("equal", args).arity(1)?.value(0)?;
            Ok(s.clone().equal(expected.clone()))
        })
        .method("lt", |s, args| {
            Ok(s.clone().lt(Args::new("lt", args).arity(1)?.number(0)?))
        })
        .method("gt", |s, args| {
            Ok(s.clone().gt(Args::new("gt", args).arity(1)?.number(0)?))
        })
        .method("min", |s, args| {
            Ok(s.clone().min(Args::new("min", args).arity(1)?.number(0)?))
        })
        .method("max", |s, args| {
            Ok(s.clone().max(Args::new("max", args).arity(1)?.number(0)?))
        })
        .method("required", |s, args| {
            Args::new("required", args).arity(0)?;
            Ok(s.clone().required())
        })
        .method("default_", |s, args| {
            let default = Args::new("default_", args).arity(1)?.value(0)?;
            Ok(s.clone().default_(default.clone()))
        })
        .method("pattern", |s, args| {
            let args = Args::new("pattern", args);
            let pattern = args.arity(1)?.string(0)?;
            s.clone()
                .pattern(pattern)
                .map_err(|e| PluginError::invalid_arguments("pattern", e.to_string()))
        })
}
