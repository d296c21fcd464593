//! Property-based tests for flattening, layering and durations.

use std::collections::BTreeMap;

use chrono::TimeDelta;
use proptest::prelude::*;
use serde_json::{Map, Value};

use super::{flatten, Configurations, ConfigurationsBuilder};
use crate::duration;

// Strategy for generating nested documents with scalar leaves
fn document_strategy() -> impl Strategy<Value = Map<String, Value>> {
    let leaf = prop_oneof![
        "[a-zA-Z0-9 ]{0,12}".prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        any::<bool>().prop_map(Value::from),
        Just(Value::Null),
    ];
    let value = leaf.prop_recursive(4, 64, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[a-z]{1,6}", inner, 0..6)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    });
    prop::collection::btree_map("[a-z]{1,6}", value, 0..8).prop_map(|m| m.into_iter().collect())
}

fn flat_strategy() -> impl Strategy<Value = BTreeMap<String, String>> {
    prop::collection::btree_map("[a-e]{1,3}", "[a-z0-9]{0,6}", 0..10)
}

fn as_document(flat: &BTreeMap<String, String>) -> Map<String, Value> {
    flat.iter()
        .map(|(k, v)| (k.clone(), Value::String(v.clone())))
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 1000,
        .. ProptestConfig::default()
    })]

    // Flattening an already-flat map changes nothing
    #[test]
    fn flatten_is_idempotent(document in document_strategy()) {
        let once = flatten(&document).unwrap();
        let twice = flatten(&as_document(&once)).unwrap();
        prop_assert_eq!(once, twice);
    }

    // Nested keys never produce empty path segments
    #[test]
    fn flattened_keys_are_well_formed(document in document_strategy()) {
        for key in flatten(&document).unwrap().keys() {
            prop_assert!(!key.is_empty());
            prop_assert!(key.split('.').all(|segment| !segment.is_empty()));
        }
    }

    // Explicit puts beat the base; untouched base keys survive
    #[test]
    fn builder_put_wins(base in flat_strategy(), overrides in flat_strategy()) {
        let configurations = ConfigurationsBuilder::new()
            .base(Configurations::from(base.clone()))
            .put_all(overrides.clone())
            .build();

        for (key, value) in &overrides {
            prop_assert_eq!(configurations.get(key), Some(value.as_str()));
        }
        for (key, value) in base.iter().filter(|(k, _)| !overrides.contains_key(*k)) {
            prop_assert_eq!(configurations.get(key), Some(value.as_str()));
        }
        let expected_len = base.keys().chain(overrides.keys()).collect::<std::collections::BTreeSet<_>>().len();
        prop_assert_eq!(configurations.len(), expected_len);
    }

    // The ISO form of a duration parses back to the same duration
    #[test]
    fn duration_iso_round_trip(
        negative in any::<bool>(),
        seconds in 0i64..10_000_000,
        nanos in 0u32..1_000_000_000,
    ) {
        let magnitude = TimeDelta::new(seconds, nanos).unwrap();
        let duration = if negative { -magnitude } else { magnitude };
        let formatted = duration::format_iso(duration);
        prop_assert_eq!(duration::parse(&formatted).unwrap(), duration);
    }

    // Free-form and ISO literals agree
    #[test]
    fn duration_forms_agree(days in 0i64..1000, hours in 0i64..100, minutes in 0i64..100, seconds in 0i64..100) {
        let human = format!("{days} days {hours} hours {minutes} minutes {seconds} seconds");
        let iso = format!("P{days}DT{hours}H{minutes}M{seconds}S");
        prop_assert_eq!(duration::parse(&human).unwrap(), duration::parse(&iso).unwrap());
    }
}
