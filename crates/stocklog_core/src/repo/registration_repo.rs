//! Registration repository contracts and SQLite implementation.
//!
//! # Invariants
//! - Rows are only ever inserted or fully replaced; there is no partial
//!   field update path.
//! - Lists are ordered newest first by `timestamp`, then `id`.

use crate::model::registration::{Registration, RegistrationId};
use crate::repo::{RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

const REGISTRATION_SELECT_SQL: &str = "SELECT
    id,
    user_name,
    product_name,
    location,
    purpose,
    timestamp,
    date,
    time,
    qr_code
FROM registrations";

/// Repository interface for registration events.
pub trait RegistrationRepository {
    fn list_registrations(&self) -> RepoResult<Vec<Registration>>;
    fn get_registration(&self, id: &str) -> RepoResult<Option<Registration>>;
    fn create_registration(&self, registration: &Registration) -> RepoResult<RegistrationId>;
    /// Replaces every field of an existing registration.
    fn replace_registration(&self, registration: &Registration) -> RepoResult<()>;
}

/// SQLite-backed registration repository.
pub struct SqliteRegistrationRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteRegistrationRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl RegistrationRepository for SqliteRegistrationRepository<'_> {
    fn list_registrations(&self) -> RepoResult<Vec<Registration>> {
        let mut stmt = self.conn.prepare(&format!(
            "{REGISTRATION_SELECT_SQL} ORDER BY timestamp DESC, id ASC;"
        ))?;
        let mut rows = stmt.query([])?;
        let mut registrations = Vec::new();
        while let Some(row) = rows.next()? {
            registrations.push(parse_registration_row(row)?);
        }
        Ok(registrations)
    }

    fn get_registration(&self, id: &str) -> RepoResult<Option<Registration>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{REGISTRATION_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_registration_row(row)?));
        }
        Ok(None)
    }

    fn create_registration(&self, registration: &Registration) -> RepoResult<RegistrationId> {
        registration.validate()?;

        self.conn
            .execute(
                "INSERT INTO registrations (
                    id,
                    user_name,
                    product_name,
                    location,
                    purpose,
                    timestamp,
                    date,
                    time,
                    qr_code
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9);",
                params![
                    registration.id,
                    registration.user,
                    registration.product,
                    registration.location,
                    registration.purpose,
                    registration.timestamp,
                    registration.date,
                    registration.time,
                    registration.qr_code,
                ],
            )
            .map_err(|err| RepoError::from_write(err, "registration", &registration.id))?;

        Ok(registration.id.clone())
    }

    fn replace_registration(&self, registration: &Registration) -> RepoResult<()> {
        registration.validate()?;

        let changed = self.conn.execute(
            "UPDATE registrations
             SET
                user_name = ?1,
                product_name = ?2,
                location = ?3,
                purpose = ?4,
                timestamp = ?5,
                date = ?6,
                time = ?7,
                qr_code = ?8
             WHERE id = ?9;",
            params![
                registration.user,
                registration.product,
                registration.location,
                registration.purpose,
                registration.timestamp,
                registration.date,
                registration.time,
                registration.qr_code,
                registration.id,
            ],
        )?;
        if changed == 0 {
            return Err(RepoError::not_found(
                "registration",
                registration.id.as_str(),
            ));
        }
        Ok(())
    }
}

fn parse_registration_row(row: &Row<'_>) -> RepoResult<Registration> {
    let registration = Registration {
        id: row.get("id")?,
        user: row.get("user_name")?,
        product: row.get("product_name")?,
        location: row.get("location")?,
        purpose: row.get("purpose")?,
        timestamp: row.get("timestamp")?,
        date: row.get("date")?,
        time: row.get("time")?,
        qr_code: row.get("qr_code")?,
    };
    if registration.id.trim().is_empty() {
        return Err(RepoError::InvalidData(
            "empty id in registrations.id".to_string(),
        ));
    }
    Ok(registration)
}
