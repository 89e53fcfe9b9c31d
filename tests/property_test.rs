//! Property tests for the combinator laws.

use chainval::{Outcome, Schema};
use proptest::prelude::*;
use serde_json::{json, Value};

fn arb_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i32>().prop_map(Value::from),
        "[a-z]{0,6}".prop_map(Value::from),
    ];
    leaf.prop_recursive(3, 16, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::from),
            prop::collection::btree_map("[a-c]", inner, 0..3)
                .prop_map(|map| json!(map)),
        ]
    })
}

/// A small set of schemas with differing pass/fail and transform behavior.
fn arb_schema() -> impl Strategy<Value = Schema> {
    prop_oneof![
        Just(Schema::new()),
        Just(Schema::new().number()),
        Just(Schema::new().string().min_length(2)),
        Just(Schema::new().number().min(0).default_(7)),
        Just(Schema::new().then(|v| json!([v.clone()]).into())),
        Just(Schema::new().key("a", Schema::new().defined())),
        Just(Schema::new().array().items(Schema::new().integer())),
        Just(Schema::new().then(|_| Outcome::break_("stop"))),
        Just(Schema::new().try_catch(Schema::new().number(), Schema::new().value(0))),
    ]
}

proptest! {
    #[test]
    fn prop_identity_law(schema in arb_schema(), value in arb_value()) {
        let expected = schema.validate(&value);
        prop_assert_eq!(Schema::new().next(schema.clone()).validate(&value), expected.clone());
        prop_assert_eq!(schema.clone().next(Schema::new()).validate(&value), expected);
    }

    #[test]
    fn prop_associativity(
        a in arb_schema(),
        b in arb_schema(),
        c in arb_schema(),
        value in arb_value(),
    ) {
        let left = a.clone().next(b.clone()).next(c.clone());
        let right = a.next(b.next(c));
        prop_assert_eq!(left.validate(&value), right.validate(&value));
    }

    #[test]
    fn prop_rejection_short_circuits(schema in arb_schema(), value in arb_value()) {
        let rejected = Schema::new().reject("no").next(schema);
        let error = rejected.validate(&value).unwrap_err();
        prop_assert_eq!(error.message, "no");
        prop_assert_eq!(error.got, value);
    }

    #[test]
    fn prop_check_preserves_value(schema in arb_schema(), value in arb_value()) {
        if let Ok(output) = Schema::new().check(schema).validate(&value) {
            prop_assert_eq!(output, value);
        }
    }

    #[test]
    fn prop_validation_is_deterministic(schema in arb_schema(), value in arb_value()) {
        prop_assert_eq!(schema.validate(&value), schema.validate(&value));
    }
}
