//! Registration use-case service.
//!
//! # Invariants
//! - All four form fields are required.
//! - The product's QR code is copied onto the registration when the product
//!   is known; an unknown product name is still accepted.

use crate::engine::catalog::find_product_by_name;
use crate::model::reference::Product;
use crate::model::registration::{Registration, RegistrationValidationError};
use crate::repo::registration_repo::RegistrationRepository;
use crate::repo::RepoError;
use chrono::{DateTime, Utc};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from recording a registration.
#[derive(Debug)]
pub enum RegistrationError {
    /// A form field is blank.
    MissingField(&'static str),
    /// The assembled record failed validation.
    Invalid(RegistrationValidationError),
    Repo(RepoError),
}

impl Display for RegistrationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "`{field}` must be selected"),
            Self::Invalid(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RegistrationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::MissingField(_) => None,
            Self::Invalid(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RegistrationValidationError> for RegistrationError {
    fn from(value: RegistrationValidationError) -> Self {
        match value {
            RegistrationValidationError::MissingField(field) => Self::MissingField(field),
            other => Self::Invalid(other),
        }
    }
}

impl From<RepoError> for RegistrationError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => err.into(),
            other => Self::Repo(other),
        }
    }
}

/// Form input for one registration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationRequest {
    pub user: String,
    pub product: String,
    pub location: String,
    pub purpose: String,
}

impl RegistrationRequest {
    fn first_missing_field(&self) -> Option<&'static str> {
        [
            ("user", &self.user),
            ("product", &self.product),
            ("location", &self.location),
            ("purpose", &self.purpose),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
    }
}

/// Registration service facade.
pub struct RegistrationService<R: RegistrationRepository> {
    repo: R,
}

impl<R: RegistrationRepository> RegistrationService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Records one registration at `at`.
    ///
    /// `products` is the current product snapshot, used to attach the QR code.
    pub fn register(
        &self,
        request: &RegistrationRequest,
        products: &[Product],
        at: DateTime<Utc>,
    ) -> Result<Registration, RegistrationError> {
        if let Some(field) = request.first_missing_field() {
            return Err(RegistrationError::MissingField(field));
        }

        let qr_code = find_product_by_name(products, request.product.trim())
            .and_then(|product| product.qr_code.clone());
        let registration = Registration::record(
            request.user.as_str(),
            request.product.as_str(),
            request.location.as_str(),
            request.purpose.as_str(),
            at,
            qr_code,
        )?;

        match self.repo.create_registration(&registration) {
            Ok(_) => {
                info!(
                    "event=registration_saved module=service status=ok id={} has_qr_code={}",
                    registration.id,
                    registration.qr_code.is_some()
                );
                Ok(registration)
            }
            Err(err) => {
                error!("event=registration_saved module=service status=error error={err}");
                Err(err.into())
            }
        }
    }

    /// Records one registration at the current instant.
    pub fn register_now(
        &self,
        request: &RegistrationRequest,
        products: &[Product],
    ) -> Result<Registration, RegistrationError> {
        self.register(request, products, Utc::now())
    }
}
