//! Filter-sort engine deriving listing views from a collection
//!
//! [`derive_view`] is a pure function of its inputs: it never mutates the
//! collection, keeps no state between calls and cannot fail. Invalid sort
//! fields simply leave the filtered order untouched.
//!
//! Ordering rules on the sort attribute:
//! - strings compare by case-folded collation
//! - booleans put `true` first when ascending
//! - numbers compare numerically
//!
//! The type of the first present value (in filtered order) is the column
//! type. Records whose value is missing, null or of another type sort after
//! every comparable record in both directions and keep their filtered order.

use crate::core::field::{FieldKind, FieldValue};
use crate::core::query::{QueryState, SortDirection};
use crate::core::record::Record;
use std::cmp::Ordering;

/// Read-only, ordered selection of records borrowed from a collection
#[derive(Debug)]
pub struct View<'a, R> {
    records: Vec<&'a R>,
}

impl<'a, R> View<'a, R> {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&'a R> {
        self.records.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a R> + '_ {
        self.records.iter().copied()
    }

    pub fn records(&self) -> &[&'a R] {
        &self.records
    }

    /// Clone the selected records into an owned collection
    pub fn to_collection(&self) -> Vec<R>
    where
        R: Clone,
    {
        self.records.iter().map(|r| (*r).clone()).collect()
    }
}

impl<'a, R: Record> View<'a, R> {
    /// Identifiers of the selected records, in view order
    pub fn ids(&self) -> Vec<&'a str> {
        self.records.iter().map(|r| R::id(*r)).collect()
    }
}

impl<R> Clone for View<'_, R> {
    fn clone(&self) -> Self {
        Self {
            records: self.records.clone(),
        }
    }
}

impl<'v, 'a, R> IntoIterator for &'v View<'a, R> {
    type Item = &'a R;
    type IntoIter = std::iter::Copied<std::slice::Iter<'v, &'a R>>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter().copied()
    }
}

/// Derive the filtered and sorted view of `collection` for `query`
pub fn derive_view<'a, R: Record>(collection: &'a [R], query: &QueryState) -> View<'a, R> {
    let needle = query.search_query.to_lowercase();
    let search_fields = query.effective_search_fields();

    let mut records: Vec<&'a R> = collection
        .iter()
        .filter(|record| matches_search(*record, &needle, search_fields))
        .collect();

    sort_records(&mut records, &query.sort_field, query.sort_direction);

    View { records }
}

/// Whether a record satisfies the search predicate
///
/// `needle` must already be lower-cased. Only string attributes are searched.
pub fn matches_search<R: Record>(record: &R, needle: &str, search_fields: Option<&[String]>) -> bool {
    if needle.is_empty() {
        return true;
    }

    let contains = |value: &FieldValue| {
        value
            .as_string()
            .is_some_and(|s| s.to_lowercase().contains(needle))
    };

    match search_fields {
        Some(fields) => fields
            .iter()
            .any(|field| record.field_value(field).as_ref().is_some_and(contains)),
        None => record.attributes().iter().any(|(_, value)| contains(value)),
    }
}

fn sort_records<R: Record>(records: &mut Vec<&R>, field: &str, direction: SortDirection) {
    if field.is_empty() || records.len() < 2 {
        return;
    }

    let mut keyed: Vec<(Option<FieldValue>, &R)> = records
        .iter()
        .map(|record| (record.field_value(field), *record))
        .collect();

    let Some(column_kind) = keyed
        .iter()
        .find_map(|(value, _)| value.as_ref().and_then(FieldValue::kind))
    else {
        return;
    };

    // sort_by is stable, so ties keep filtered order
    keyed.sort_by(|(a, _), (b, _)| compare_keys(a.as_ref(), b.as_ref(), column_kind, direction));

    records.clear();
    records.extend(keyed.into_iter().map(|(_, record)| record));
}

fn compare_keys<'v>(
    a: Option<&'v FieldValue>,
    b: Option<&'v FieldValue>,
    kind: FieldKind,
    direction: SortDirection,
) -> Ordering {
    let comparable = |value: Option<&'v FieldValue>| value.filter(|v| v.kind() == Some(kind));

    match (comparable(a), comparable(b)) {
        (Some(a), Some(b)) => {
            let ordering = a.compare_same_kind(b).unwrap_or(Ordering::Equal);
            match direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record::DynamicRecord;

    fn crew() -> Vec<DynamicRecord> {
        vec![
            DynamicRecord::new("1").with("name", "Bob").with("active", true),
            DynamicRecord::new("2").with("name", "Amy").with("active", false),
        ]
    }

    #[test]
    fn test_sorts_names_ascending() {
        let collection = crew();
        let view = derive_view(&collection, &QueryState::sorted_by("name"));
        assert_eq!(view.ids(), vec!["2", "1"]);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let collection = crew();
        let view = derive_view(&collection, &QueryState::sorted_by("name").with_search("bo"));
        assert_eq!(view.ids(), vec!["1"]);
    }

    #[test]
    fn test_booleans_true_first_ascending() {
        let collection = crew();
        let view = derive_view(&collection, &QueryState::sorted_by("active"));
        assert_eq!(view.ids(), vec!["1", "2"]);

        let view = derive_view(
            &collection,
            &QueryState::sorted_by("active").with_direction(SortDirection::Desc),
        );
        assert_eq!(view.ids(), vec!["2", "1"]);
    }

    #[test]
    fn test_empty_collection() {
        let collection: Vec<DynamicRecord> = Vec::new();
        let view = derive_view(&collection, &QueryState::sorted_by("name").with_search("x"));
        assert!(view.is_empty());
    }

    #[test]
    fn test_non_string_values_are_not_searched() {
        let collection = vec![DynamicRecord::new("a").with("year", 2015i64)];
        let view = derive_view(&collection, &QueryState::default().with_search("2015"));
        assert!(view.is_empty());
    }

    #[test]
    fn test_search_fields_restrict_search() {
        let collection = vec![
            DynamicRecord::new("x1").with("name", "Alpha").with("port", "Boston"),
            DynamicRecord::new("x2").with("name", "Boston Strong").with("port", "LA"),
        ];
        let query = QueryState::sorted_by("name")
            .with_search("boston")
            .with_search_fields(["name"]);
        assert_eq!(derive_view(&collection, &query).ids(), vec!["x2"]);
    }

    #[test]
    fn test_search_without_fields_includes_id() {
        let collection = vec![DynamicRecord::new("5ea6ed2e").with("name", "Alpha")];
        let view = derive_view(&collection, &QueryState::default().with_search("ED2E"));
        assert_eq!(view.len(), 1);
    }

    #[test]
    fn test_missing_values_sort_last_both_directions() {
        let collection = vec![
            DynamicRecord::new("a"),
            DynamicRecord::new("b").with("year", 2010i64),
            DynamicRecord::new("c").with("year", FieldValue::Null),
            DynamicRecord::new("d").with("year", 2001i64),
        ];

        let asc = derive_view(&collection, &QueryState::sorted_by("year"));
        assert_eq!(asc.ids(), vec!["d", "b", "a", "c"]);

        let desc = derive_view(
            &collection,
            &QueryState::sorted_by("year").with_direction(SortDirection::Desc),
        );
        assert_eq!(desc.ids(), vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn test_mismatched_types_follow_comparable_values() {
        let collection = vec![
            DynamicRecord::new("s").with("rank", "high"),
            DynamicRecord::new("n1").with("rank", 3i64),
            DynamicRecord::new("t").with("rank", "alpha"),
            DynamicRecord::new("n2").with("rank", 1i64),
        ];
        // first present value is a string, so numbers become incomparable
        let view = derive_view(&collection, &QueryState::sorted_by("rank"));
        assert_eq!(view.ids(), vec!["t", "s", "n1", "n2"]);
    }

    #[test]
    fn test_unknown_sort_field_keeps_input_order() {
        let collection = crew();
        let view = derive_view(&collection, &QueryState::sorted_by("nope"));
        assert_eq!(view.ids(), vec!["1", "2"]);
    }

    #[test]
    fn test_view_to_collection_clones_records() {
        let collection = crew();
        let view = derive_view(&collection, &QueryState::sorted_by("name"));
        let owned = view.to_collection();
        assert_eq!(owned[0].id, "2");
        assert_eq!(collection[0].id, "1");
    }
}
