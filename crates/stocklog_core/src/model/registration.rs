//! Registration domain model.
//!
//! # Responsibility
//! - Define the recorded "who took what where and why" event.
//! - Derive `date`/`time` display fields from the event instant.
//!
//! # Invariants
//! - `timestamp` is an ISO-8601 instant; `date` and `time` are its UTC parts.
//! - Stored rows may carry legacy values; readers degrade instead of failing.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier of one registration row.
pub type RegistrationId = String;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S";
const MINUTE_OFFSET_FORMAT: &str = "%Y-%m-%dT%H:%M%:z";
const NAIVE_DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Validation errors for registration write paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationValidationError {
    /// Identifier is blank.
    EmptyId,
    /// One of the form fields is blank after trim.
    MissingField(&'static str),
    /// `timestamp` is not a parsable instant.
    InvalidTimestamp(String),
    /// `date` or `time` does not describe the same instant as `timestamp`.
    DerivedFieldMismatch {
        field: &'static str,
        expected: String,
        actual: String,
    },
}

impl Display for RegistrationValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "registration id must not be empty"),
            Self::MissingField(field) => write!(f, "registration field `{field}` is required"),
            Self::InvalidTimestamp(value) => write!(f, "invalid registration timestamp `{value}`"),
            Self::DerivedFieldMismatch {
                field,
                expected,
                actual,
            } => write!(
                f,
                "registration `{field}` is `{actual}` but timestamp implies `{expected}`"
            ),
        }
    }
}

impl Error for RegistrationValidationError {}

/// One recorded usage event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub id: RegistrationId,
    /// User display name at the time of registration.
    pub user: String,
    /// Product display name at the time of registration.
    pub product: String,
    pub location: String,
    pub purpose: String,
    /// ISO-8601 instant, e.g. `2025-06-15T05:41:00.000Z`.
    pub timestamp: String,
    /// `YYYY-MM-DD`, UTC calendar date of `timestamp`.
    pub date: String,
    /// `HH:MM:SS`, UTC wall-clock time of `timestamp`.
    pub time: String,
    /// QR code of the product when it had one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qr_code: Option<String>,
}

impl Registration {
    /// Records a new registration at `at` with a generated ID.
    ///
    /// # Invariants
    /// - `date` and `time` are derived from `at` in UTC.
    /// - The result passes [`Registration::validate`].
    pub fn record(
        user: impl Into<String>,
        product: impl Into<String>,
        location: impl Into<String>,
        purpose: impl Into<String>,
        at: DateTime<Utc>,
        qr_code: Option<String>,
    ) -> Result<Self, RegistrationValidationError> {
        let registration = Self {
            id: Uuid::new_v4().to_string(),
            user: user.into().trim().to_string(),
            product: product.into().trim().to_string(),
            location: location.into().trim().to_string(),
            purpose: purpose.into().trim().to_string(),
            timestamp: at.to_rfc3339_opts(SecondsFormat::Millis, true),
            date: at.format(DATE_FORMAT).to_string(),
            time: at.format(TIME_FORMAT).to_string(),
            qr_code: qr_code.filter(|code| !code.trim().is_empty()),
        };
        registration.validate()?;
        Ok(registration)
    }

    /// Parses `timestamp` into a UTC instant.
    ///
    /// Accepts RFC 3339 instants, offset-less date-times (read as UTC) and
    /// bare dates (UTC midnight). Returns `None` for anything else.
    pub fn instant(&self) -> Option<DateTime<Utc>> {
        parse_instant(&self.timestamp)
    }

    /// UTC calendar date of the event instant.
    pub fn calendar_date(&self) -> Option<NaiveDate> {
        self.instant().map(|instant| instant.date_naive())
    }

    /// Event instant in epoch milliseconds.
    pub fn timestamp_millis(&self) -> Option<i64> {
        self.instant().map(|instant| instant.timestamp_millis())
    }

    /// Validates write-path invariants.
    ///
    /// `time` may be the `HH:MM` prefix of the derived value; older rows
    /// were stored without seconds.
    pub fn validate(&self) -> Result<(), RegistrationValidationError> {
        if self.id.trim().is_empty() {
            return Err(RegistrationValidationError::EmptyId);
        }
        for (field, value) in [
            ("user", &self.user),
            ("product", &self.product),
            ("location", &self.location),
            ("purpose", &self.purpose),
        ] {
            if value.trim().is_empty() {
                return Err(RegistrationValidationError::MissingField(field));
            }
        }

        let instant = self
            .instant()
            .ok_or_else(|| RegistrationValidationError::InvalidTimestamp(self.timestamp.clone()))?;

        let expected_date = instant.format(DATE_FORMAT).to_string();
        if self.date != expected_date {
            return Err(RegistrationValidationError::DerivedFieldMismatch {
                field: "date",
                expected: expected_date,
                actual: self.date.clone(),
            });
        }

        let expected_time = instant.format(TIME_FORMAT).to_string();
        if self.time.len() < 5 || !expected_time.starts_with(self.time.as_str()) {
            return Err(RegistrationValidationError::DerivedFieldMismatch {
                field: "time",
                expected: expected_time,
                actual: self.time.clone(),
            });
        }

        Ok(())
    }
}

/// Parses an ISO-8601 instant leniently.
///
/// Seconds are optional (`2025-06-15T05:41Z`). Missing offsets read as UTC.
pub fn parse_instant(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(instant.with_timezone(&Utc));
    }
    if let Ok(instant) = DateTime::parse_from_str(trimmed, MINUTE_OFFSET_FORMAT) {
        return Some(instant.with_timezone(&Utc));
    }
    let utc_text = trimmed.strip_suffix(['Z', 'z']).unwrap_or(trimmed);
    for format in NAIVE_DATE_TIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(utc_text, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
