//! Pure filter/sort/aggregation passes over registration snapshots.
//!
//! # Responsibility
//! - Turn borrowed snapshots into filtered, sorted and ranked views.
//!
//! # Invariants
//! - No function here performs I/O or keeps state between calls.
//! - Inputs are never mutated; every call returns freshly allocated output.

pub mod catalog;
pub mod collate;
pub mod filter;
pub mod sort;
pub mod stats;

use crate::model::query::{SortKey, SortOrder};
use crate::model::registration::Registration;
use filter::{filter_registrations, FilterCriteria};
use sort::sort_registrations;

/// Filters then sorts one registration snapshot for the history table.
pub fn history_view(
    registrations: &[Registration],
    criteria: &FilterCriteria,
    sort_by: SortKey,
    order: SortOrder,
) -> Vec<Registration> {
    let filtered = filter_registrations(registrations, criteria);
    sort_registrations(&filtered, sort_by, order)
}
