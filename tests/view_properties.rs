//! Properties of the filter-sort engine
//!
//! These tests verify that, for arbitrary collections and queries:
//! - the view is a subset of the collection and every record matches
//! - deriving twice gives the same view
//! - ties keep their filtered order
//! - descending is the reverse of ascending when no keys tie

use fleetview::prelude::*;
use proptest::prelude::*;
use std::collections::HashSet;

// =============================================================================
// Fixtures
// =============================================================================

fn build(rows: &[(String, Option<i64>, bool)]) -> Vec<DynamicRecord> {
    rows.iter()
        .enumerate()
        .map(|(i, (name, score, active))| {
            let record = DynamicRecord::new(format!("r{}", i))
                .with("name", name.clone())
                .with("active", *active);
            match score {
                Some(score) => record.with("score", *score),
                None => record,
            }
        })
        .collect()
}

fn rows() -> impl Strategy<Value = Vec<(String, Option<i64>, bool)>> {
    prop::collection::vec(
        ("[a-cA-C]{0,3}", prop::option::of(0i64..5), any::<bool>()),
        0..24,
    )
}

/// Whether any string attribute contains `needle`, ignoring case
fn contains_text(record: &DynamicRecord, needle: &str) -> bool {
    let needle = needle.to_lowercase();
    record.attributes().into_iter().any(|(_, value)| match value {
        FieldValue::String(text) => text.to_lowercase().contains(&needle),
        _ => false,
    })
}

fn position(collection: &[DynamicRecord], id: &str) -> usize {
    collection.iter().position(|r| r.id() == id).unwrap()
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn prop_empty_search_keeps_everything(rows in rows(), field in "name|score|active") {
        let collection = build(&rows);
        let view = derive_view(&collection, &QueryState::sorted_by(field));

        prop_assert_eq!(view.len(), collection.len());
        let ids: HashSet<&str> = view.ids().into_iter().collect();
        prop_assert_eq!(ids.len(), collection.len());
    }

    #[test]
    fn prop_every_result_matches(rows in rows(), needle in "[a-cA-C]{0,2}") {
        let collection = build(&rows);
        let query = QueryState::sorted_by("name").with_search(needle.clone());
        let view = derive_view(&collection, &query);

        for record in &view {
            prop_assert!(contains_text(record, &needle));
        }
        let expected: HashSet<&str> = collection
            .iter()
            .filter(|r| contains_text(r, &needle))
            .map(|r| r.id())
            .collect();
        let found: HashSet<&str> = view.ids().into_iter().collect();
        prop_assert_eq!(found, expected);
    }

    #[test]
    fn prop_derive_is_idempotent(
        rows in rows(),
        needle in "[a-c]{0,1}",
        field in "name|score|active",
        descending in any::<bool>(),
    ) {
        let collection = build(&rows);
        let direction = if descending { SortDirection::Desc } else { SortDirection::Asc };
        let query = QueryState::sorted_by(field).with_search(needle).with_direction(direction);

        let first = derive_view(&collection, &query).to_collection();
        let second = derive_view(&first, &query);
        let first_ids: Vec<&str> = first.iter().map(|r| r.id()).collect();
        prop_assert_eq!(second.ids(), first_ids);
    }

    #[test]
    fn prop_ties_keep_input_order(rows in rows(), field in "name|score|active") {
        let collection = build(&rows);
        let view = derive_view(&collection, &QueryState::sorted_by(field.clone()));

        for pair in view.records().windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if a.field_value(&field) == b.field_value(&field) {
                prop_assert!(position(&collection, a.id()) < position(&collection, b.id()));
            }
        }
    }

    #[test]
    fn prop_descending_reverses_distinct_keys(scores in prop::collection::hash_set(0i64..1000, 0..20)) {
        let collection: Vec<DynamicRecord> = scores
            .iter()
            .map(|score| DynamicRecord::new(format!("s{}", score)).with("score", *score))
            .collect();

        let asc = derive_view(&collection, &QueryState::sorted_by("score"));
        let desc = derive_view(
            &collection,
            &QueryState::sorted_by("score").with_direction(SortDirection::Desc),
        );

        let mut reversed = asc.ids();
        reversed.reverse();
        prop_assert_eq!(desc.ids(), reversed);
    }

    #[test]
    fn prop_missing_values_sort_last(rows in rows(), descending in any::<bool>()) {
        let collection = build(&rows);
        let direction = if descending { SortDirection::Desc } else { SortDirection::Asc };
        let view = derive_view(&collection, &QueryState::sorted_by("score").with_direction(direction));

        let first_missing = view
            .iter()
            .position(|r| r.field_value("score").is_none())
            .unwrap_or(view.len());
        prop_assert!(view.iter().skip(first_missing).all(|r| r.field_value("score").is_none()));
    }
}

// =============================================================================
// Scenarios
// =============================================================================

fn crew() -> Vec<DynamicRecord> {
    vec![
        DynamicRecord::new("1").with("name", "Bob").with("active", true),
        DynamicRecord::new("2").with("name", "Amy").with("active", false),
    ]
}

#[test]
fn test_names_ascending_and_descending() {
    let collection = crew();
    let asc = derive_view(&collection, &QueryState::sorted_by("name"));
    assert_eq!(asc.ids(), vec!["2", "1"]);

    let desc = derive_view(
        &collection,
        &QueryState::sorted_by("name").with_direction(SortDirection::Desc),
    );
    assert_eq!(desc.ids(), vec!["1", "2"]);
}

#[test]
fn test_search_is_case_insensitive() {
    let collection = crew();
    let view = derive_view(&collection, &QueryState::sorted_by("name").with_search("AM"));
    assert_eq!(view.ids(), vec!["2"]);
}

#[test]
fn test_active_first_ascending() {
    let collection = crew();
    let view = derive_view(&collection, &QueryState::sorted_by("active"));
    assert_eq!(view.ids(), vec!["1", "2"]);
}

#[test]
fn test_empty_collection_gives_empty_view() {
    let collection: Vec<DynamicRecord> = Vec::new();
    let view = derive_view(&collection, &QueryState::sorted_by("name").with_search("x"));
    assert!(view.is_empty());
}

#[test]
fn test_entities_work_as_records() {
    let collection = vec![
        Ship {
            active: false,
            ..sample_ship("a", "Shannon")
        },
        sample_ship("b", "GO Quest"),
    ];
    let query = QueryState::sorted_by("active").with_search_fields(["name"]);
    let view = derive_view(&collection, &query);
    assert_eq!(view.ids(), vec!["b", "a"]);
}

fn sample_ship(id: &str, name: &str) -> Ship {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "name": name,
        "type": "Cargo",
        "active": true,
    }))
    .unwrap()
}
