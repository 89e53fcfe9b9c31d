//! Integration tests for `required`, `default_` and break semantics.

use chainval::{Outcome, Schema};
use serde_json::{json, Value};

#[test]
fn test_required_in_either_position() {
    assert_eq!(Schema::new().number().required().validate(&json!(0)).unwrap(), json!(0));
    assert_eq!(Schema::new().required().number().validate(&json!(0)).unwrap(), json!(0));

    let error = Schema::new().number().required().validate(&Value::Null).unwrap_err();
    assert_eq!(error.message, "is required");
    let error = Schema::new().required().number().validate(&Value::Null).unwrap_err();
    assert_eq!(error.message, "is required");
}

#[test]
fn test_absent_without_required_fails_type_check() {
    let error = Schema::new().number().validate(&Value::Null).unwrap_err();
    assert_eq!(error.message, "should be a number");
}

#[test]
fn test_default_in_either_position() {
    assert_eq!(Schema::new().default_(1).number().validate(&json!(0)).unwrap(), json!(0));
    assert_eq!(Schema::new().number().default_(1).validate(&json!(0)).unwrap(), json!(0));
    assert_eq!(Schema::new().default_(1).number().validate(&Value::Null).unwrap(), json!(1));
    assert_eq!(Schema::new().number().default_(1).validate(&Value::Null).unwrap(), json!(1));
}

#[test]
fn test_default_skips_later_checks() {
    let schema = Schema::new().number().min(10).default_(5);
    assert_eq!(schema.validate(&Value::Null).unwrap(), json!(5));
    assert!(schema.validate(&json!(5)).is_err());
}

#[test]
fn test_break_is_not_validated_against_the_chain() {
    let schema = Schema::new().string().default_(json!({"not": "a string"}));
    assert_eq!(schema.validate(&Value::Null).unwrap(), json!({"not": "a string"}));
}

#[test]
fn test_break_stays_inside_its_schema() {
    let inner = Schema::new().then(|_| Outcome::break_(1));
    let schema = Schema::new()
        .check(inner.clone())
        .key("a", inner)
        .then(|v| json!([v]).into());
    assert_eq!(schema.validate(&json!({"a": 0})).unwrap(), json!([1]));
}

#[test]
fn test_break_before_reject_wins() {
    let schema = Schema::new()
        .then(|_| Outcome::break_("early"))
        .reject("never reached");
    assert_eq!(schema.validate(&json!(1)).unwrap(), json!("early"));
}

#[test]
fn test_reject_before_break_wins() {
    let schema = Schema::new()
        .reject("first")
        .then(|_| Outcome::break_("late"));
    assert_eq!(schema.validate(&json!(1)).unwrap_err().message, "first");
}
