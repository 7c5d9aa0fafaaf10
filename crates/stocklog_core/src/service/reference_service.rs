//! Reference list administration service.
//!
//! # Responsibility
//! - Add, rename and remove users, locations, purposes and categories.
//! - Create and edit products, their attachments and generated QR codes.
//!
//! # Invariants
//! - Names are trimmed; blank names are rejected before any write.
//! - An edit that changes nothing is reported as `Unchanged` and not written.
//! - Product edits keep the attachment fields of the stored product.

use crate::engine::catalog::generate_qr_code;
use crate::model::reference::{Category, NameList, Product};
use crate::repo::reference_repo::ReferenceRepository;
use crate::repo::RepoError;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from reference list administration.
#[derive(Debug)]
pub enum ReferenceServiceError {
    /// Name is blank after trim.
    BlankName,
    /// A record with this name or id already exists.
    Duplicate(String),
    /// The edit leaves every field as it was.
    Unchanged,
    Repo(RepoError),
}

impl Display for ReferenceServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankName => write!(f, "name must not be blank"),
            Self::Duplicate(key) => write!(f, "`{key}` already exists"),
            Self::Unchanged => write!(f, "nothing to save"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ReferenceServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ReferenceServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Duplicate { key, .. } => Self::Duplicate(key),
            other => Self::Repo(other),
        }
    }
}

pub type ReferenceResult<T> = Result<T, ReferenceServiceError>;

/// Input for creating a product from the admin form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewProduct {
    pub name: String,
    /// Blank means "no QR code".
    pub qr_code: String,
    pub category_id: Option<String>,
}

/// Reference administration facade.
pub struct ReferenceService<R: ReferenceRepository> {
    repo: R,
}

impl<R: ReferenceRepository> ReferenceService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Adds a name to a plain list.
    ///
    /// `existing` is the caller's current snapshot of that list; names already
    /// present are rejected without a write.
    pub fn add_name(
        &self,
        list: NameList,
        raw_name: &str,
        existing: &[String],
    ) -> ReferenceResult<String> {
        let name = normalize_name(raw_name)?;
        if existing.iter().any(|known| *known == name) {
            return Err(ReferenceServiceError::Duplicate(name));
        }
        self.repo.add_name(list, &name)?;
        info!("event=reference_add module=service status=ok list={}", list.label());
        Ok(name)
    }

    /// Renames an entry of a plain list. Registrations keep the old name.
    pub fn rename_name(
        &self,
        list: NameList,
        original: &str,
        raw_name: &str,
    ) -> ReferenceResult<String> {
        let name = normalize_name(raw_name)?;
        if name == original {
            return Err(ReferenceServiceError::Unchanged);
        }
        self.repo.rename_name(list, original, &name)?;
        info!(
            "event=reference_rename module=service status=ok list={}",
            list.label()
        );
        Ok(name)
    }

    pub fn remove_name(&self, list: NameList, name: &str) -> ReferenceResult<()> {
        self.repo.delete_name(list, name)?;
        info!(
            "event=reference_remove module=service status=ok list={}",
            list.label()
        );
        Ok(())
    }

    /// Adds a category; `existing` is the caller's current category snapshot.
    pub fn add_category(
        &self,
        raw_name: &str,
        existing: &[Category],
    ) -> ReferenceResult<Category> {
        let name = normalize_name(raw_name)?;
        ensure_category_name_free(&name, None, existing)?;
        let category = Category::new(name);
        self.repo.create_category(&category)?;
        Ok(category)
    }

    /// Renames a category. Names must stay unique across `existing`.
    pub fn rename_category(
        &self,
        original: &Category,
        raw_name: &str,
        existing: &[Category],
    ) -> ReferenceResult<Category> {
        let name = normalize_name(raw_name)?;
        if name == original.name {
            return Err(ReferenceServiceError::Unchanged);
        }
        ensure_category_name_free(&name, Some(&original.id), existing)?;
        self.repo.rename_category(&original.id, &name)?;
        Ok(Category::with_id(original.id.clone(), name))
    }

    /// Removes a category. Products keep their (now dangling) category id.
    pub fn remove_category(&self, id: &str) -> ReferenceResult<()> {
        self.repo.delete_category(id)?;
        Ok(())
    }

    pub fn add_product(&self, input: &NewProduct) -> ReferenceResult<Product> {
        let mut product = Product::new(normalize_name(&input.name)?);
        product.qr_code = non_blank(&input.qr_code);
        product.category_id = input.category_id.clone();
        self.repo.create_product(&product)?;
        info!(
            "event=product_add module=service status=ok has_qr_code={}",
            product.qr_code.is_some()
        );
        Ok(product)
    }

    /// Saves name/QR code/category edits of `original`.
    pub fn update_product(
        &self,
        original: &Product,
        edited: &Product,
    ) -> ReferenceResult<Product> {
        let mut updated = original.clone();
        updated.name = normalize_name(&edited.name)?;
        updated.qr_code = edited.qr_code.as_deref().and_then(non_blank);
        updated.category_id = edited.category_id.clone();
        if !updated.differs_in_editable_fields(original) {
            return Err(ReferenceServiceError::Unchanged);
        }
        self.repo.update_product(&updated)?;
        Ok(updated)
    }

    /// Stores an already-uploaded attachment reference on a product.
    pub fn set_attachment(
        &self,
        product: &Product,
        url: &str,
        file_name: &str,
    ) -> ReferenceResult<Product> {
        let mut updated = product.clone();
        updated.attachment_url = non_blank(url);
        updated.attachment_name = non_blank(file_name);
        self.repo.update_product(&updated)?;
        Ok(updated)
    }

    pub fn remove_attachment(&self, product: &Product) -> ReferenceResult<Product> {
        let mut updated = product.clone();
        updated.attachment_url = None;
        updated.attachment_name = None;
        self.repo.update_product(&updated)?;
        Ok(updated)
    }

    /// Replaces a product's QR code with one derived from its name.
    pub fn assign_generated_qr_code(
        &self,
        product: &Product,
        epoch_ms: i64,
    ) -> ReferenceResult<Product> {
        let mut updated = product.clone();
        updated.qr_code = Some(generate_qr_code(&product.name, epoch_ms));
        self.repo.update_product(&updated)?;
        info!("event=qr_code_generated module=service status=ok");
        Ok(updated)
    }

    pub fn remove_product(&self, id: &str) -> ReferenceResult<()> {
        self.repo.delete_product(id)?;
        Ok(())
    }
}

fn ensure_category_name_free(
    name: &str,
    own_id: Option<&str>,
    existing: &[Category],
) -> ReferenceResult<()> {
    let taken = existing
        .iter()
        .any(|category| category.name == name && Some(category.id.as_str()) != own_id);
    if taken {
        return Err(ReferenceServiceError::Duplicate(name.to_string()));
    }
    Ok(())
}

fn normalize_name(raw: &str) -> ReferenceResult<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ReferenceServiceError::BlankName);
    }
    Ok(trimmed.to_string())
}

fn non_blank(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
