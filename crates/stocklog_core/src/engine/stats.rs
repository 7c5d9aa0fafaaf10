//! Frequency statistics and chart segments.
//!
//! # Invariants
//! - Counts are ranked descending; equal counts keep first-encountered order.
//! - Chart sweep angles of a non-empty chart sum to 360 degrees.

use crate::model::query::Dimension;
use crate::model::registration::Registration;
use indexmap::IndexMap;
use serde::Serialize;

/// Number of entries shown in each ranking.
pub const TOP_N_DEFAULT: usize = 5;

/// Pie chart colors, assigned by rank modulo palette length.
pub const CHART_PALETTE: [&str; 8] = [
    "#ff6b6b", "#4ecdc4", "#45b7d1", "#96ceb4", "#feca57", "#ff9ff3", "#54a0ff", "#5f27cd",
];

/// One ranked dimension value and its occurrence count.
pub type RankedEntry = (String, usize);

/// One pie chart slice.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSegment {
    pub product: String,
    pub count: usize,
    pub color: &'static str,
    /// Degrees, measured from 0.
    pub start_angle: f64,
    /// Degrees covered by this slice.
    pub sweep_angle: f64,
}

/// Aggregate overview for the statistics tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Statistics {
    pub total_registrations: usize,
    pub distinct_users: usize,
    pub distinct_products: usize,
    pub distinct_locations: usize,
    pub top_users: Vec<RankedEntry>,
    pub top_products: Vec<RankedEntry>,
    pub top_locations: Vec<RankedEntry>,
}

/// Counts occurrences per dimension value in first-encountered order.
pub fn count_by(registrations: &[Registration], dimension: Dimension) -> IndexMap<String, usize> {
    let mut counts: IndexMap<String, usize> = IndexMap::new();
    for registration in registrations {
        *counts
            .entry(dimension.value_of(registration).to_string())
            .or_insert(0) += 1;
    }
    counts
}

/// Returns the `n` most frequent values of `dimension`.
pub fn top_n(registrations: &[Registration], dimension: Dimension, n: usize) -> Vec<RankedEntry> {
    let mut ranked = count_by(registrations, dimension)
        .into_iter()
        .collect::<Vec<_>>();
    ranked.sort_by(|(_, left), (_, right)| right.cmp(left));
    ranked.truncate(n);
    ranked
}

pub fn top_users(registrations: &[Registration]) -> Vec<RankedEntry> {
    top_n(registrations, Dimension::User, TOP_N_DEFAULT)
}

pub fn top_products(registrations: &[Registration]) -> Vec<RankedEntry> {
    top_n(registrations, Dimension::Product, TOP_N_DEFAULT)
}

pub fn top_locations(registrations: &[Registration]) -> Vec<RankedEntry> {
    top_n(registrations, Dimension::Location, TOP_N_DEFAULT)
}

/// Builds pie chart slices for the top products.
///
/// Returns an empty list when there are no registrations.
pub fn product_chart_data(registrations: &[Registration]) -> Vec<ChartSegment> {
    let ranked = top_products(registrations);
    let total = ranked.iter().map(|(_, count)| *count).sum::<usize>();
    if total == 0 {
        return Vec::new();
    }

    let mut start_angle = 0.0_f64;
    ranked
        .into_iter()
        .enumerate()
        .map(|(index, (product, count))| {
            let sweep_angle = count as f64 / total as f64 * 360.0;
            let segment = ChartSegment {
                product,
                count,
                color: CHART_PALETTE[index % CHART_PALETTE.len()],
                start_angle,
                sweep_angle,
            };
            start_angle += sweep_angle;
            segment
        })
        .collect()
}

/// Computes the statistics overview with rankings of length `n`.
pub fn summarize(registrations: &[Registration], n: usize) -> Statistics {
    Statistics {
        total_registrations: registrations.len(),
        distinct_users: count_by(registrations, Dimension::User).len(),
        distinct_products: count_by(registrations, Dimension::Product).len(),
        distinct_locations: count_by(registrations, Dimension::Location).len(),
        top_users: top_n(registrations, Dimension::User, n),
        top_products: top_n(registrations, Dimension::Product, n),
        top_locations: top_n(registrations, Dimension::Location, n),
    }
}

#[cfg(test)]
mod tests {
    use super::{product_chart_data, top_n, CHART_PALETTE};
    use crate::model::query::Dimension;
    use crate::model::registration::Registration;

    fn by_product(product: &str) -> Registration {
        Registration {
            id: product.to_string(),
            user: "u".to_string(),
            product: product.to_string(),
            location: "l".to_string(),
            purpose: "p".to_string(),
            timestamp: "2025-06-15T05:41:00Z".to_string(),
            date: "2025-06-15".to_string(),
            time: "05:41".to_string(),
            qr_code: None,
        }
    }

    #[test]
    fn ties_keep_first_encountered_order() {
        let rows = ["b", "a", "c", "a", "b"].map(by_product);
        let ranked = top_n(&rows, Dimension::Product, 5);
        assert_eq!(
            ranked,
            vec![
                ("b".to_string(), 2),
                ("a".to_string(), 2),
                ("c".to_string(), 1)
            ]
        );
    }

    #[test]
    fn zero_n_yields_nothing() {
        let rows = ["a"].map(by_product);
        assert!(top_n(&rows, Dimension::Product, 0).is_empty());
    }

    #[test]
    fn chart_colors_follow_rank_and_angles_accumulate() {
        let rows = ["a", "a", "a", "b"].map(by_product);
        let chart = product_chart_data(&rows);
        assert_eq!(chart.len(), 2);
        assert_eq!(chart[0].color, CHART_PALETTE[0]);
        assert_eq!(chart[1].color, CHART_PALETTE[1]);
        assert!((chart[0].sweep_angle - 270.0).abs() < 1e-9);
        assert!((chart[1].start_angle - 270.0).abs() < 1e-9);
    }

    #[test]
    fn chart_is_empty_without_registrations() {
        assert!(product_chart_data(&[]).is_empty());
    }
}
