//! Property-based tests over generated nested values.

use proptest::prelude::*;
use serde_flat::{flatten, FlatMap, Map, Scalar, Value};

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Undefined),
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        "[a-z]{0,8}".prop_map(Value::from),
    ]
}

/// Field names without the delimiter, so generated keys cannot collide.
fn field_name() -> impl Strategy<Value = String> {
    "[a-z]{1,6}"
}

fn object_of<S>(values: S, max: usize) -> impl Strategy<Value = Map>
where
    S: Strategy<Value = Value>,
{
    prop::collection::btree_map(field_name(), values, 0..max)
        .prop_map(|fields| fields.into_iter().collect())
}

fn nested_value() -> impl Strategy<Value = Value> {
    scalar().prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            object_of(inner, 6).prop_map(Value::Object),
        ]
    })
}

fn empty_container() -> impl Strategy<Value = Value> {
    prop_oneof![Just(Value::Array(vec![])), Just(Value::Object(Map::new()))].prop_recursive(
        3,
        16,
        4,
        |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
                object_of(inner, 4).prop_map(Value::Object),
            ]
        },
    )
}

fn leaf_count(value: &Value) -> usize {
    match value {
        Value::Array(items) => items.iter().map(leaf_count).sum(),
        Value::Object(fields) => fields.values().map(leaf_count).sum(),
        _ => 1,
    }
}

proptest! {
    #[test]
    fn prop_flat_input_is_unchanged(root in object_of(scalar(), 12)) {
        let flat = flatten(&root).unwrap();
        let expected: FlatMap = root
            .iter()
            .map(|(k, v)| (k.clone(), Scalar::try_from(v.clone()).unwrap()))
            .collect();
        prop_assert_eq!(flat, expected);
    }

    #[test]
    fn prop_empty_containers_yield_nothing(root in object_of(empty_container(), 8)) {
        prop_assert!(flatten(&root).unwrap().is_empty());
    }

    #[test]
    fn prop_delimiter_free_names_never_conflict(root in object_of(nested_value(), 6)) {
        let flat = flatten(&root).unwrap();
        let leaves: usize = root.values().map(leaf_count).sum();
        prop_assert_eq!(flat.len(), leaves);
    }

    #[test]
    fn prop_key_set_independent_of_root_order(root in object_of(nested_value(), 6)) {
        let reversed: Map = root
            .iter()
            .rev()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        prop_assert_eq!(flatten(&root).unwrap(), flatten(&reversed).unwrap());
    }
}
