//! Closed enums for filter scope, sort key/order and aggregation dimension.
//!
//! Raw strings from forms or the command line are parsed here, once, and the
//! engine only ever sees the typed values.

use crate::model::registration::Registration;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

const SCOPE_ALL: &str = "all";

/// Selection scope for a single-valued filter (user, location, category).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Scope {
    /// No restriction.
    #[default]
    All,
    /// Only rows whose value equals the given one exactly.
    Only(String),
}

impl Scope {
    /// Parses selector input. `"all"` and blank input mean [`Scope::All`].
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed == SCOPE_ALL {
            Self::All
        } else {
            Self::Only(trimmed.to_string())
        }
    }

    pub fn only(value: impl Into<String>) -> Self {
        Self::Only(value.into())
    }

    /// Returns whether `value` passes this scope.
    pub fn admits(&self, value: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(expected) => expected == value,
        }
    }

    /// Same as [`Scope::admits`] for optional values; `None` only passes `All`.
    pub fn admits_opt(&self, value: Option<&str>) -> bool {
        match (self, value) {
            (Self::All, _) => true,
            (Self::Only(expected), Some(value)) => expected == value,
            (Self::Only(_), None) => false,
        }
    }
}

impl Display for Scope {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => write!(f, "{SCOPE_ALL}"),
            Self::Only(value) => write!(f, "{value}"),
        }
    }
}

/// History sort key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Date,
    User,
    Product,
    Location,
}

impl SortKey {
    /// Parses a sort key; unrecognized input falls back to [`SortKey::Date`].
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "user" => Self::User,
            "product" => Self::Product,
            "location" => Self::Location,
            _ => Self::Date,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::User => "user",
            Self::Product => "product",
            Self::Location => "location",
        }
    }
}

/// History sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Descending (inverted natural order).
    #[default]
    Newest,
    /// Ascending (natural order).
    Oldest,
}

impl SortOrder {
    /// Parses a sort order; anything other than `newest` sorts ascending.
    pub fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("newest") {
            Self::Newest
        } else {
            Self::Oldest
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Oldest => "oldest",
        }
    }

    /// Applies this direction to an ascending comparison result.
    pub fn apply(self, ordering: std::cmp::Ordering) -> std::cmp::Ordering {
        match self {
            Self::Newest => ordering.reverse(),
            Self::Oldest => ordering,
        }
    }
}

/// Registration field used for frequency statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    User,
    Product,
    Location,
}

impl Dimension {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "user" => Some(Self::User),
            "product" => Some(Self::Product),
            "location" => Some(Self::Location),
            _ => None,
        }
    }

    /// Extracts this dimension's value from a registration.
    pub fn value_of(self, registration: &Registration) -> &str {
        match self {
            Self::User => registration.user.as_str(),
            Self::Product => registration.product.as_str(),
            Self::Location => registration.location.as_str(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Dimension, Scope, SortKey, SortOrder};
    use std::cmp::Ordering;

    #[test]
    fn scope_parse_maps_all_and_blank_to_unrestricted() {
        assert_eq!(Scope::parse("all"), Scope::All);
        assert_eq!(Scope::parse("   "), Scope::All);
        assert_eq!(Scope::parse("Kantoor 1.1"), Scope::only("Kantoor 1.1"));
    }

    #[test]
    fn scope_only_is_exact_and_case_sensitive() {
        let scope = Scope::only("Tom Peckstadt");
        assert!(scope.admits("Tom Peckstadt"));
        assert!(!scope.admits("tom peckstadt"));
        assert!(!scope.admits_opt(None));
        assert!(Scope::All.admits_opt(None));
    }

    #[test]
    fn unknown_sort_key_falls_back_to_date() {
        assert_eq!(SortKey::parse("location"), SortKey::Location);
        assert_eq!(SortKey::parse("purpose"), SortKey::Date);
    }

    #[test]
    fn sort_order_newest_reverses() {
        assert_eq!(SortOrder::parse("newest"), SortOrder::Newest);
        assert_eq!(SortOrder::parse("whatever"), SortOrder::Oldest);
        assert_eq!(SortOrder::Newest.apply(Ordering::Less), Ordering::Greater);
        assert_eq!(SortOrder::Oldest.apply(Ordering::Less), Ordering::Less);
    }

    #[test]
    fn dimension_parse_rejects_unknown() {
        assert_eq!(Dimension::parse("Product"), Some(Dimension::Product));
        assert_eq!(Dimension::parse("purpose"), None);
    }
}
