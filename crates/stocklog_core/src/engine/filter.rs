//! History filter predicates.
//!
//! # Invariants
//! - Criteria combine as a conjunction.
//! - Date bounds compare against the calendar date of `timestamp` (UTC),
//!   never the stored `date` column.
//! - Output keeps input order.

use crate::model::query::Scope;
use crate::model::registration::Registration;
use chrono::NaiveDate;
use log::warn;

/// Filter criteria for the registration history.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Case-insensitive substring; empty means no text filter.
    pub search_text: String,
    pub user: Scope,
    pub location: Scope,
    /// Inclusive lower bound.
    pub date_from: Option<NaiveDate>,
    /// Inclusive upper bound.
    pub date_to: Option<NaiveDate>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into();
        self
    }

    pub fn with_user(mut self, user: Scope) -> Self {
        self.user = user;
        self
    }

    pub fn with_location(mut self, location: Scope) -> Self {
        self.location = location;
        self
    }

    pub fn with_date_range(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.date_from = from;
        self.date_to = to;
        self
    }

    fn has_date_bound(&self) -> bool {
        self.date_from.is_some() || self.date_to.is_some()
    }
}

/// Parses a `YYYY-MM-DD` date input.
///
/// Blank input means "no bound". Malformed input is logged and also treated
/// as "no bound".
pub fn parse_date_bound(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    match NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(err) => {
            warn!("event=date_bound_parse module=engine status=ignored input={trimmed} error={err}");
            None
        }
    }
}

/// Returns the registrations that satisfy every criterion.
pub fn filter_registrations(
    registrations: &[Registration],
    criteria: &FilterCriteria,
) -> Vec<Registration> {
    let needle = criteria.search_text.to_lowercase();
    registrations
        .iter()
        .filter(|registration| passes(registration, criteria, needle.as_str()))
        .cloned()
        .collect()
}

/// Single-row form of [`filter_registrations`].
pub fn matches_criteria(registration: &Registration, criteria: &FilterCriteria) -> bool {
    passes(
        registration,
        criteria,
        criteria.search_text.to_lowercase().as_str(),
    )
}

fn passes(registration: &Registration, criteria: &FilterCriteria, needle: &str) -> bool {
    matches_search(registration, needle)
        && criteria.user.admits(&registration.user)
        && criteria.location.admits(&registration.location)
        && within_date_range(registration, criteria)
}

fn matches_search(registration: &Registration, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    let contains = |value: &str| value.to_lowercase().contains(needle);
    contains(registration.user.as_str())
        || contains(registration.product.as_str())
        || contains(registration.location.as_str())
        || contains(registration.purpose.as_str())
        || registration.qr_code.as_deref().is_some_and(contains)
}

fn within_date_range(registration: &Registration, criteria: &FilterCriteria) -> bool {
    if !criteria.has_date_bound() {
        return true;
    }
    let Some(date) = registration.calendar_date() else {
        return false;
    };
    criteria.date_from.map_or(true, |from| date >= from)
        && criteria.date_to.map_or(true, |to| date <= to)
}

#[cfg(test)]
mod tests {
    use super::{matches_criteria, parse_date_bound, FilterCriteria};
    use crate::model::registration::Registration;
    use chrono::NaiveDate;

    fn registration(timestamp: &str, date: &str) -> Registration {
        Registration {
            id: "r1".to_string(),
            user: "Nele Herteleer".to_string(),
            product: "Interflon Fin Super".to_string(),
            location: "Kantoor 1.1".to_string(),
            purpose: "Training".to_string(),
            timestamp: timestamp.to_string(),
            date: date.to_string(),
            time: "10:00:00".to_string(),
            qr_code: None,
        }
    }

    #[test]
    fn date_bound_uses_timestamp_not_stored_date() {
        let stale = registration("2025-06-15T10:00:00Z", "2025-01-01");
        let day = NaiveDate::from_ymd_opt(2025, 6, 15);
        let criteria = FilterCriteria::new().with_date_range(day, day);
        assert!(matches_criteria(&stale, &criteria));
    }

    #[test]
    fn unparsable_timestamp_only_fails_bounded_filters() {
        let broken = registration("not a date", "2025-06-15");
        assert!(matches_criteria(&broken, &FilterCriteria::new()));

        let bounded =
            FilterCriteria::new().with_date_range(NaiveDate::from_ymd_opt(2025, 1, 1), None);
        assert!(!matches_criteria(&broken, &bounded));
    }

    #[test]
    fn search_skips_missing_qr_code() {
        let row = registration("2025-06-15T10:00:00Z", "2025-06-15");
        assert!(!matches_criteria(&row, &FilterCriteria::new().with_search("IFMK")));
        assert!(matches_criteria(&row, &FilterCriteria::new().with_search("fin super")));
    }

    #[test]
    fn parse_date_bound_ignores_blank_and_malformed_input() {
        assert_eq!(parse_date_bound(""), None);
        assert_eq!(parse_date_bound("15/06/2025"), None);
        assert_eq!(
            parse_date_bound(" 2025-06-15 "),
            NaiveDate::from_ymd_opt(2025, 6, 15)
        );
    }
}
