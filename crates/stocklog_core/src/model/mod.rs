//! Domain model for registrations and reference lists.
//!
//! # Responsibility
//! - Define the record shapes exchanged with the data source and the engine.
//! - Replace free-form filter/sort strings with closed enums.
//!
//! # Invariants
//! - Products and categories are identified by a stable string `id`.
//! - Users, locations and purposes are identified by their display name.
//! - Registrations reference users/products/locations by name only.

pub mod query;
pub mod reference;
pub mod registration;
