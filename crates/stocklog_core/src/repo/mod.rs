//! Data source contracts and their SQLite implementations.
//!
//! # Responsibility
//! - Define the read/write contracts the state layer and services rely on.
//! - Keep SQL details out of services and the engine.
//!
//! # Invariants
//! - Registration writes call `Registration::validate()` first.
//! - Registration reads tolerate legacy rows; `date`/`time` are not re-checked.
//! - Missing rows surface as `RepoError::NotFound`, duplicate keys as
//!   `RepoError::Duplicate`.

use crate::db::DbError;
use crate::model::registration::RegistrationValidationError;
use rusqlite::ErrorCode;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod reference_repo;
pub mod registration_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for reference and registration storage.
#[derive(Debug)]
pub enum RepoError {
    Validation(RegistrationValidationError),
    Db(DbError),
    NotFound { kind: &'static str, key: String },
    Duplicate { kind: &'static str, key: String },
    InvalidData(String),
}

impl RepoError {
    pub(crate) fn not_found(kind: &'static str, key: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            key: key.into(),
        }
    }

    /// Maps a uniqueness violation to `Duplicate`, anything else to `Db`.
    pub(crate) fn from_write(err: rusqlite::Error, kind: &'static str, key: &str) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(failure, _)
                if failure.code == ErrorCode::ConstraintViolation =>
            {
                Self::Duplicate {
                    kind,
                    key: key.to_string(),
                }
            }
            _ => Self::Db(DbError::Sqlite(err)),
        }
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { kind, key } => write!(f, "{kind} not found: {key}"),
            Self::Duplicate { kind, key } => write!(f, "{kind} already exists: {key}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound { .. } | Self::Duplicate { .. } | Self::InvalidData(_) => None,
        }
    }
}

impl From<RegistrationValidationError> for RepoError {
    fn from(value: RegistrationValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}
