//! Tests for sharing schemas across threads.

use chainval::Schema;
use serde_json::json;
use std::sync::Arc;
use std::thread;

fn user_schema() -> Schema {
    Schema::new()
        .object()
        .field("name", Schema::new().string().min_length(1))
        .field("age", Schema::new().integer().min(0))
}

#[test]
fn test_concurrent_validation() {
    let schema = Arc::new(user_schema());

    let handles: Vec<_> = (0..10)
        .map(|i| {
            let schema = Arc::clone(&schema);
            thread::spawn(move || {
                let input = json!({"name": format!("User{}", i), "age": 20 + i});
                assert_eq!(schema.validate(&input).unwrap(), input);
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_cloned_schema_moves_between_threads() {
    let schema = user_schema();

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let schema = schema.clone();
            thread::spawn(move || schema.validate(&json!({"name": "", "age": i})))
        })
        .collect();

    for handle in handles {
        let error = handle.join().unwrap().unwrap_err();
        assert_eq!(error.qualified_path(), "value.name.length");
    }
}

#[test]
fn test_parallel_batch() {
    let schema = user_schema();
    let values: Vec<_> = (0..100)
        .map(|i| json!({"name": "u", "age": if i % 10 == 0 { -1 } else { i }}))
        .collect();

    let errors = schema.par_validate_all(&values).into_result().unwrap_err();
    assert_eq!(errors.len(), 10);
    assert_eq!(errors.first().qualified_path(), "value[0].age");
    assert_eq!(
        errors
            .iter()
            .filter(|e| e.qualified_path() == "value[90].age")
            .count(),
        1
    );
}

#[test]
fn test_batch_successes_keep_transformations() {
    let schema = Schema::new().object().field("n", Schema::new().number().default_(1));
    let values = vec![json!({}), json!({"n": 2})];
    let result = schema.par_validate_all(&values).into_result().unwrap();
    assert_eq!(result, vec![json!({"n": 1}), json!({"n": 2})]);
}
