//! Product and user list helpers for selectors and admin tables.
//!
//! # Responsibility
//! - Narrow product/user lists by category and free text.
//! - Resolve weak references (category id, QR code, product name).
//! - Derive generated QR codes for products without one.
//!
//! # Invariants
//! - Lookups return the first match in list order; uniqueness is not assumed.
//! - A dangling category id resolves to [`UNKNOWN_CATEGORY`], never an error.

use crate::engine::collate::collation_key;
use crate::model::query::Scope;
use crate::model::reference::{Category, Product};
use once_cell::sync::Lazy;
use regex::Regex;

/// Display value for a product whose category no longer exists.
pub const UNKNOWN_CATEGORY: &str = "Onbekende categorie";

const QR_PREFIX_CHARS: usize = 10;
const QR_SUFFIX_DIGITS: usize = 6;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Narrows products for the registration selector.
///
/// `category` scopes by category id; `query` matches name or QR code,
/// case-insensitively. An empty query matches everything.
pub fn filter_products<'a>(
    products: &'a [Product],
    category: &Scope,
    query: &str,
) -> Vec<&'a Product> {
    let needle = query.to_lowercase();
    products
        .iter()
        .filter(|product| category.admits_opt(product.category_id.as_deref()))
        .filter(|product| {
            product.name.to_lowercase().contains(&needle)
                || product
                    .qr_code
                    .as_deref()
                    .is_some_and(|code| code.to_lowercase().contains(&needle))
        })
        .collect()
}

/// Searches products for the admin table by name, QR code or category name.
pub fn search_products_admin<'a>(
    products: &'a [Product],
    categories: &[Category],
    query: &str,
) -> Vec<&'a Product> {
    if query.is_empty() {
        return products.iter().collect();
    }
    let needle = query.to_lowercase();
    products
        .iter()
        .filter(|product| {
            let category = product
                .category_id
                .as_deref()
                .and_then(|id| find_category(categories, id))
                .map(|category| category.name.to_lowercase())
                .unwrap_or_default();
            product.name.to_lowercase().contains(&needle)
                || product
                    .qr_code
                    .as_deref()
                    .is_some_and(|code| code.to_lowercase().contains(&needle))
                || category.contains(&needle)
        })
        .collect()
}

/// Finds the first product whose QR code equals `code` exactly.
pub fn find_product_by_qr_code<'a>(products: &'a [Product], code: &str) -> Option<&'a Product> {
    products
        .iter()
        .find(|product| product.qr_code.as_deref() == Some(code))
}

/// Finds the first product whose name equals `name` exactly.
pub fn find_product_by_name<'a>(products: &'a [Product], name: &str) -> Option<&'a Product> {
    products.iter().find(|product| product.name == name)
}

/// Finds the category with the given id, if it still exists.
pub fn find_category<'a>(categories: &'a [Category], id: &str) -> Option<&'a Category> {
    categories.iter().find(|category| category.id == id)
}

/// Resolves a product's category for display.
///
/// Returns `None` when the product has no category and
/// [`UNKNOWN_CATEGORY`] when the id dangles.
pub fn category_name<'a>(categories: &'a [Category], product: &Product) -> Option<&'a str> {
    let id = product.category_id.as_deref()?;
    Some(
        find_category(categories, id)
            .map(|category| category.name.as_str())
            .unwrap_or(UNKNOWN_CATEGORY),
    )
}

/// Filters users by substring and sorts them at base collation strength.
pub fn filter_users<'a>(users: &'a [String], query: &str) -> Vec<&'a str> {
    let needle = query.to_lowercase();
    let mut keyed = users
        .iter()
        .filter(|user| user.to_lowercase().contains(&needle))
        .map(|user| (collation_key(user), user.as_str()))
        .collect::<Vec<_>>();
    keyed.sort_by(|(left, _), (right, _)| left.cmp(right));
    keyed.into_iter().map(|(_, user)| user).collect()
}

/// Derives a QR code for a product from its name and a millisecond clock.
///
/// Format: first ten characters of the name with whitespace removed,
/// uppercased, then `_` and the last six digits of `epoch_ms`.
pub fn generate_qr_code(product_name: &str, epoch_ms: i64) -> String {
    let compact = WHITESPACE_RE.replace_all(product_name, "");
    let prefix = compact
        .chars()
        .take(QR_PREFIX_CHARS)
        .collect::<String>()
        .to_uppercase();
    let digits = epoch_ms.to_string();
    let suffix_start = digits.len().saturating_sub(QR_SUFFIX_DIGITS);
    format!("{prefix}_{}", &digits[suffix_start..])
}
