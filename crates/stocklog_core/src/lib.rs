//! Core domain logic for Stocklog.
//!
//! Registration history filtering, sorting and statistics, plus the data
//! source, state layer and services the front ends share.

pub mod config;
pub mod db;
pub mod demo;
pub mod engine;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod state;

pub use config::{AppConfig, ConfigError};
pub use engine::catalog::{
    category_name, filter_products, filter_users, find_category, find_product_by_name,
    find_product_by_qr_code, generate_qr_code, search_products_admin, UNKNOWN_CATEGORY,
};
pub use engine::collate::{collate, collation_key};
pub use engine::filter::{
    filter_registrations, matches_criteria, parse_date_bound, FilterCriteria,
};
pub use engine::history_view;
pub use engine::sort::{compare_registrations, sort_registrations};
pub use engine::stats::{
    count_by, product_chart_data, summarize, top_locations, top_n, top_products, top_users,
    ChartSegment, RankedEntry, Statistics, CHART_PALETTE, TOP_N_DEFAULT,
};
pub use logging::{default_log_level, init_logging, logging_status, LoggingStatus};
pub use model::query::{Dimension, Scope, SortKey, SortOrder};
pub use model::reference::{Category, CategoryId, NameList, Product, ProductId};
pub use model::registration::{Registration, RegistrationId, RegistrationValidationError};
pub use repo::reference_repo::{ReferenceRepository, SqliteReferenceRepository};
pub use repo::registration_repo::{RegistrationRepository, SqliteRegistrationRepository};
pub use repo::{RepoError, RepoResult};
pub use service::reference_service::{
    NewProduct, ReferenceResult, ReferenceService, ReferenceServiceError,
};
pub use service::registration_service::{
    RegistrationError, RegistrationRequest, RegistrationService,
};
pub use state::{AppState, DataOrigin, ReferenceData};

/// Minimal health-check API for front-end wiring probes.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
