//! Integration tests for array validation.

use chainval::Schema;
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn test_empty_arrays() {
    assert_eq!(
        Schema::new().array().items(Schema::new().number()).validate(&json!([])).unwrap(),
        json!([])
    );
    assert_eq!(Schema::new().array().validate(&json!([])).unwrap(), json!([]));
}

#[test]
fn test_array_without_item_schema_accepts_anything() {
    assert_eq!(
        Schema::new().array().validate(&json!(["", 1])).unwrap(),
        json!(["", 1])
    );
}

#[test]
fn test_items_with_constraints() {
    let schema = Schema::new().array().items(Schema::new().number().max(1));
    assert_eq!(schema.validate(&json!([0])).unwrap(), json!([0]));

    let schema = Schema::new().array().items(Schema::new().number().min(3));
    let error = schema.validate(&json!([5, 2, 4])).unwrap_err();
    assert_eq!(error.to_string(), "value[1] should not be less than 3, but got 2");
}

#[test]
fn test_items_type_failures() {
    let schema = Schema::new().array().items(Schema::new().number());
    assert!(schema.validate(&json!(["1"])).is_err());
    assert!(schema.validate(&json!(["1", 2])).is_err());
}

#[test]
fn test_array_check_runs_before_items() {
    let schema = Schema::new().array().items(Schema::new().number());
    let error = schema.validate(&json!({"0": 1})).unwrap_err();
    assert_eq!(error.message, "should be an array");
    assert!(error.path.is_root());
}

#[test]
fn test_nested_arrays() {
    let matrix = Schema::new()
        .array()
        .items(Schema::new().array().items(Schema::new().integer()));

    assert!(matrix.validate(&json!([[1, 2], [3]])).is_ok());
    let error = matrix.validate_named(&json!([[1, 2], [3, 0.5]]), "m").unwrap_err();
    assert_eq!(error.to_string(), "m[1][1] should be an integer, but got 0.5");
}

#[test]
fn test_array_of_objects() {
    let user = Schema::new()
        .object()
        .field("name", Schema::new().string().min_length(1))
        .field("admin", Schema::new().boolean().default_(false));
    let schema = Schema::new().array().items(user);

    assert_eq!(
        schema.validate(&json!([{"name": "a"}, {"name": "b", "admin": true}])).unwrap(),
        json!([{"name": "a", "admin": false}, {"name": "b", "admin": true}])
    );

    let error = schema.validate(&json!([{"name": "a"}, {"name": ""}])).unwrap_err();
    assert_eq!(
        error.to_string(),
        "value[1].name.length should not be less than 1, but got 0"
    );
}

#[test]
fn test_length_limits() {
    let schema = Schema::new().array().min_length(1).max_length(2);
    assert!(schema.validate(&json!([1])).is_ok());
    assert!(schema.validate(&json!([1, 2])).is_ok());
    assert_eq!(
        schema.validate(&json!([])).unwrap_err().to_string(),
        "value.length should not be less than 1, but got 0"
    );
    assert_eq!(
        schema.validate(&json!([1, 2, 3])).unwrap_err().to_string(),
        "value.length should not be greater than 2, but got 3"
    );
}
