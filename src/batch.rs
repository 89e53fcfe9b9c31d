//! Validating many inputs against one schema.
//!
//! A single `validate` call stops at the first rejection. When a schema is
//! applied to a list of independent inputs, every failing input is reported:
//! results are accumulated into a [`stillwater::Validation`] whose failure
//! side holds one [`SchemaError`] per rejected input.

use rayon::prelude::*;
use serde_json::Value;
use stillwater::Validation;

use crate::error::{SchemaError, SchemaErrors};
use crate::schema::Schema;

fn root_name(idx: usize) -> String {
    format!("value[{}]", idx)
}

fn accumulate(results: Vec<Result<Value, SchemaError>>) -> Validation<Vec<Value>, SchemaErrors> {
    let mut validated = Vec::with_capacity(results.len());
    let mut errors = Vec::new();

    for result in results {
        match result {
            Ok(value) => validated.push(value),
            Err(error) => errors.push(error),
        }
    }

    match SchemaErrors::from_vec(errors) {
        Some(errors) => Validation::Failure(errors),
        None => Validation::Success(validated),
    }
}

impl Schema {
    /// Validates each value independently, naming them `value[0]`,
    /// `value[1]`, ...
    ///
    /// ```rust
    /// use chainval::Schema;
    /// use serde_json::json;
    ///
    /// let schema = Schema::new().number().min(0);
    /// let result = schema.validate_all(&[json!(1), json!(-1), json!("x")]);
    ///
    /// let errors = result.into_result().unwrap_err();
    /// assert_eq!(errors.len(), 2);
    /// assert_eq!(errors.first().qualified_path(), "value[1]");
    /// ```
    pub fn validate_all(&self, values: &[Value]) -> Validation<Vec<Value>, SchemaErrors> {
        let results = values
            .iter()
            .enumerate()
            .map(|(idx, value)| self.validate_named(value, &root_name(idx)))
            .collect();
        accumulate(results)
    }

    /// Same as [`validate_all`](Self::validate_all), spread over the rayon
    /// thread pool. Results and errors keep input order.
    pub fn par_validate_all(&self, values: &[Value]) -> Validation<Vec<Value>, SchemaErrors> {
        let results = values
            .par_iter()
            .enumerate()
            .map(|(idx, value)| self.validate_named(value, &root_name(idx)))
            .collect();
        accumulate(results)
    }
}
