//! Property-based tests for the cast registry.

use super::{Cast, ListCast};
use crate::value::Value;
use proptest::prelude::*;

// Every case spelling of a boolean literal
fn bool_literal_strategy() -> impl Strategy<Value = (String, bool)> {
    prop_oneof![
        "[tT][rR][uU][eE]".prop_map(|s| (s, true)),
        "[fF][aA][lL][sS][eE]".prop_map(|s| (s, false)),
        Just(("1".to_string(), true)),
        Just(("0".to_string(), false)),
    ]
}

// List elements that survive a join/split without quoting
fn element_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_.:/-]{1,12}"
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 1000,
        .. ProptestConfig::default()
    })]

    // Boolean parsing ignores case
    #[test]
    fn bool_cast_is_case_insensitive((raw, expected) in bool_literal_strategy()) {
        let value = Cast::boolean().apply("B", &Value::from(raw)).unwrap();
        prop_assert_eq!(value, Value::Bool(expected));
    }

    // Anything that is not a boolean literal is rejected
    #[test]
    fn bool_cast_rejects_other_words(raw in "[a-z]{2,8}") {
        prop_assume!(raw != "true" && raw != "false");
        prop_assert!(Cast::boolean().apply("B", &Value::from(raw)).is_err());
    }

    // Integers survive formatting and parsing
    #[test]
    fn int_cast_round_trips(n in any::<i64>()) {
        let value = Cast::integer().apply("N", &Value::from(n.to_string())).unwrap();
        prop_assert_eq!(value, Value::Int(n));
    }

    // Joining elements with the delimiter and casting yields the elements
    #[test]
    fn list_cast_splits_joined_elements(
        elements in prop::collection::vec(element_strategy(), 0..10)
    ) {
        let raw = elements.join(",");
        let value = Cast::list(ListCast::new()).apply("L", &Value::from(raw)).unwrap();
        let expected: Vec<Value> = elements.iter().map(|e| Value::from(e.as_str())).collect();
        prop_assert_eq!(value, Value::List(expected));
    }

    // Padding around elements is stripped
    #[test]
    fn list_cast_strips_padding(
        elements in prop::collection::vec(element_strategy(), 1..10),
        pad in "[ \t]{0,3}"
    ) {
        let raw = elements
            .iter()
            .map(|e| format!("{pad}{e}{pad}"))
            .collect::<Vec<_>>()
            .join(",");
        let value = Cast::list(ListCast::new()).apply("L", &Value::from(raw)).unwrap();
        prop_assert_eq!(value.deserialize_into::<Vec<String>>("L").unwrap(), elements);
    }

    // Casting never panics on arbitrary input
    #[test]
    fn list_cast_never_panics(raw in ".*") {
        let _ = Cast::list(ListCast::new()).apply("L", &Value::from(raw));
    }
}
