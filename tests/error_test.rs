//! Integration tests for error reporting.

use chainval::{JsonPath, Outcome, Rejection, Schema, SchemaError};
use serde_json::json;

#[test]
fn test_message_format_is_stable() {
    let schema = Schema::new()
        .object()
        .field(
            "options",
            Schema::new().object().field(
                "retry",
                Schema::new()
                    .object()
                    .field("count", Schema::new().integer().min(1)),
            ),
        );

    let error = schema
        .validate(&json!({"options": {"retry": {"count": 0}}}))
        .unwrap_err();

    assert_eq!(
        error.to_string(),
        "value.options.retry.count should not be less than 1, but got 0"
    );
}

#[test]
fn test_error_reports_value_at_failure_not_root_input() {
    let schema = Schema::new().key("a", Schema::new().key("b", Schema::new().truthy()));
    let input = json!({"a": {"b": 0}, "other": [1, 2, 3]});

    let error = schema.validate(&input).unwrap_err();
    assert_eq!(error.got, json!(0));
    assert_ne!(error.got, input);
}

#[test]
fn test_transformed_value_is_reported() {
    let schema = Schema::new()
        .number()
        .then(|v| json!(v.as_i64().unwrap_or(0) * 2).into())
        .max(5);

    let error = schema.validate(&json!(3)).unwrap_err();
    assert_eq!(error.to_string(), "value should not be greater than 5, but got 6");
}

#[test]
fn test_structured_value_serialized_as_json() {
    let error = Schema::new()
        .string()
        .validate(&json!({"a": [1, null]}))
        .unwrap_err();
    assert_eq!(
        error.to_string(),
        r#"value should be a string, but got {"a":[1,null]}"#
    );
}

#[test]
fn test_function_rejection_records_input() {
    let schema = Schema::new().then(|_| Outcome::reject("is odd"));
    let error = schema.validate(&json!(3)).unwrap_err();
    assert_eq!(error.got, json!(3));
}

#[test]
fn test_function_rejection_with_explicit_value() {
    let schema = Schema::new().then(|v| {
        let first = v.get(0).cloned().unwrap_or_default();
        Outcome::Rejected(Rejection::new("has a bad head").with_value(first))
    });
    let error = schema.validate(&json!([9, 1])).unwrap_err();
    assert_eq!(error.to_string(), "value has a bad head, but got 9");
}

#[test]
fn test_schema_error_is_std_error() {
    fn takes_error(_: &dyn std::error::Error) {}

    let error = SchemaError::new("value", JsonPath::root(), "is required", json!(null));
    takes_error(&error);
    assert_eq!(error.to_string(), "value is required, but got null");
}

#[test]
fn test_whole_float_rendered_without_fraction() {
    let error = Schema::new().max(1).validate(&json!(2.0)).unwrap_err();
    assert_eq!(error.to_string(), "value should not be greater than 1, but got 2");

    let error = Schema::new().equal(2.0).validate(&json!(3)).unwrap_err();
    assert_eq!(error.to_string(), "value should be equal to 2, but got 3");
}
