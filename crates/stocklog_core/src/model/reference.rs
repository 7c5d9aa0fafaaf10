//! Reference list records maintained by administrators.
//!
//! # Responsibility
//! - Define products, categories and the plain-name lists.
//!
//! # Invariants
//! - `Product::id` / `Category::id` never change after creation.
//! - `Product::category_id` is a weak reference; it may dangle.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type ProductId = String;
pub type CategoryId = String;

/// Plain-name reference lists keyed by display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameList {
    Users,
    Locations,
    Purposes,
}

impl NameList {
    /// Singular label used in logs and error messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::Users => "user",
            Self::Locations => "location",
            Self::Purposes => "purpose",
        }
    }
}

/// Product that can be registered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Scan code; lookups take the first product with an exact match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qr_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
    /// ISO-8601 creation instant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment_name: Option<String>,
}

impl Product {
    /// Creates a product with a generated ID and the current creation time.
    pub fn new(name: impl Into<String>) -> Self {
        let mut product = Self::with_id(Uuid::new_v4().to_string(), name);
        product.created_at = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true));
        product
    }

    /// Creates a product with a caller-provided ID and no optional fields.
    pub fn with_id(id: impl Into<ProductId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            qr_code: None,
            category_id: None,
            created_at: None,
            attachment_url: None,
            attachment_name: None,
        }
    }

    pub fn has_attachment(&self) -> bool {
        self.attachment_url.is_some()
    }

    /// Whether the editable fields (name, QR code, category) differ.
    pub fn differs_in_editable_fields(&self, other: &Product) -> bool {
        self.name != other.name
            || self.qr_code != other.qr_code
            || self.category_id != other.category_id
    }
}

/// Product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), name)
    }

    pub fn with_id(id: impl Into<CategoryId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}
