//! History sort.
//!
//! # Invariants
//! - Sorting is stable; equal keys keep their input order in both directions.
//! - `Date` compares parsed instants; rows with an unparsable timestamp
//!   order before every parsable one (ascending).
//! - Text keys compare at base strength (see [`crate::engine::collate`]).

use crate::engine::collate::collation_key;
use crate::model::query::{SortKey, SortOrder};
use crate::model::registration::Registration;
use std::cmp::Ordering;

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum SortValue {
    Instant(Option<i64>),
    Text(String),
}

impl SortValue {
    fn of(registration: &Registration, sort_by: SortKey) -> Self {
        match sort_by {
            SortKey::Date => Self::Instant(registration.timestamp_millis()),
            SortKey::User => Self::Text(collation_key(&registration.user)),
            SortKey::Product => Self::Text(collation_key(&registration.product)),
            SortKey::Location => Self::Text(collation_key(&registration.location)),
        }
    }
}

/// Returns a sorted copy of `registrations`.
pub fn sort_registrations(
    registrations: &[Registration],
    sort_by: SortKey,
    order: SortOrder,
) -> Vec<Registration> {
    // Keys are computed once per row; collation keys are not free.
    let mut keyed = registrations
        .iter()
        .map(|registration| (SortValue::of(registration, sort_by), registration))
        .collect::<Vec<_>>();
    keyed.sort_by(|(left, _), (right, _)| order.apply(left.cmp(right)));
    keyed
        .into_iter()
        .map(|(_, registration)| registration.clone())
        .collect()
}

/// Compares two registrations the way [`sort_registrations`] orders them.
pub fn compare_registrations(
    left: &Registration,
    right: &Registration,
    sort_by: SortKey,
    order: SortOrder,
) -> Ordering {
    order.apply(SortValue::of(left, sort_by).cmp(&SortValue::of(right, sort_by)))
}

#[cfg(test)]
mod tests {
    use super::{compare_registrations, sort_registrations};
    use crate::model::query::{SortKey, SortOrder};
    use crate::model::registration::Registration;
    use std::cmp::Ordering;

    fn at(id: &str, user: &str, timestamp: &str) -> Registration {
        Registration {
            id: id.to_string(),
            user: user.to_string(),
            product: "p".to_string(),
            location: "l".to_string(),
            purpose: "x".to_string(),
            timestamp: timestamp.to_string(),
            date: String::new(),
            time: String::new(),
            qr_code: None,
        }
    }

    fn ids(rows: &[Registration]) -> Vec<&str> {
        rows.iter().map(|row| row.id.as_str()).collect()
    }

    #[test]
    fn unparsable_timestamps_sort_first_ascending() {
        let rows = vec![
            at("a", "u", "2025-06-15T05:41:00Z"),
            at("b", "u", "garbage"),
        ];
        let sorted = sort_registrations(&rows, SortKey::Date, SortOrder::Oldest);
        assert_eq!(ids(&sorted), vec!["b", "a"]);
    }

    #[test]
    fn text_sort_ignores_case_and_keeps_ties_stable() {
        let rows = vec![
            at("1", "bob", "2025-01-01T00:00:00Z"),
            at("2", "Alice", "2025-01-01T00:00:00Z"),
            at("3", "BOB", "2025-01-01T00:00:00Z"),
            at("4", "alice", "2025-01-01T00:00:00Z"),
        ];
        let ascending = sort_registrations(&rows, SortKey::User, SortOrder::Oldest);
        assert_eq!(ids(&ascending), vec!["2", "4", "1", "3"]);

        let descending = sort_registrations(&rows, SortKey::User, SortOrder::Newest);
        assert_eq!(ids(&descending), vec!["1", "3", "2", "4"]);
    }

    #[test]
    fn compare_matches_sort_direction() {
        let early = at("e", "u", "2025-06-10T00:00:00Z");
        let late = at("l", "u", "2025-06-11T00:00:00Z");
        assert_eq!(
            compare_registrations(&early, &late, SortKey::Date, SortOrder::Newest),
            Ordering::Greater
        );
    }
}
