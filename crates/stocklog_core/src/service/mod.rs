//! Use-case services over the data source.
//!
//! # Responsibility
//! - Validate form input before it reaches a repository.
//! - Keep the front end decoupled from storage details.
//!
//! # Invariants
//! - Services only write; callers re-fetch state afterwards
//!   (see `AppState::refresh_*`).

pub mod reference_service;
pub mod registration_service;
