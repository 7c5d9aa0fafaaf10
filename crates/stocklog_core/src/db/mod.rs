//! SQLite bootstrap for the local data source.
//!
//! # Responsibility
//! - Open and configure SQLite connections.
//! - Apply schema migrations before any repository touches the data.
//!
//! # Invariants
//! - Schema version is tracked via `PRAGMA user_version`.
//! - A database written by a newer binary is refused, not downgraded.
//! - Errors raised while opening name the database they concern.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory, IN_MEMORY_TARGET};

pub type DbResult<T> = Result<T, DbError>;

/// Storage-level failure.
#[derive(Debug)]
pub enum DbError {
    /// The connection could not be established or configured.
    Open {
        target: String,
        source: rusqlite::Error,
    },
    /// A statement failed on an open connection.
    Sqlite(rusqlite::Error),
    /// The file carries a schema from a newer build.
    SchemaTooNew {
        target: String,
        found: u32,
        supported: u32,
    },
}

impl DbError {
    /// Database path (or [`IN_MEMORY_TARGET`]) the error refers to, if known.
    pub fn target(&self) -> Option<&str> {
        match self {
            Self::Open { target, .. } | Self::SchemaTooNew { target, .. } => Some(target),
            Self::Sqlite(_) => None,
        }
    }
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open { target, source } => {
                write!(f, "cannot open stock database `{target}`: {source}")
            }
            Self::Sqlite(err) => write!(f, "stock database query failed: {err}"),
            Self::SchemaTooNew {
                target,
                found,
                supported,
            } => write!(
                f,
                "stock database `{target}` has schema version {found}; this build reads up to {supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Open { source, .. } => Some(source),
            Self::Sqlite(err) => Some(err),
            Self::SchemaTooNew { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
