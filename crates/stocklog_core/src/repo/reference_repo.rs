//! Reference list repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide list/add/rename/delete for users, locations and purposes.
//! - Provide CRUD for categories and products.
//!
//! # Invariants
//! - Name lists are keyed by display name; renames never touch
//!   registrations that already reference the old name.
//! - Lists are returned in a stable, case-insensitive name order.

use crate::model::reference::{Category, NameList, Product};
use crate::repo::{RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

const PRODUCT_SELECT_SQL: &str = "SELECT
    id,
    name,
    qr_code,
    category_id,
    created_at,
    attachment_url,
    attachment_name
FROM products";

/// Repository interface for administrator-maintained reference lists.
pub trait ReferenceRepository {
    fn list_names(&self, list: NameList) -> RepoResult<Vec<String>>;
    fn add_name(&self, list: NameList, name: &str) -> RepoResult<()>;
    fn rename_name(&self, list: NameList, from: &str, to: &str) -> RepoResult<()>;
    fn delete_name(&self, list: NameList, name: &str) -> RepoResult<()>;

    fn list_categories(&self) -> RepoResult<Vec<Category>>;
    fn create_category(&self, category: &Category) -> RepoResult<()>;
    fn rename_category(&self, id: &str, name: &str) -> RepoResult<()>;
    fn delete_category(&self, id: &str) -> RepoResult<()>;

    fn list_products(&self) -> RepoResult<Vec<Product>>;
    fn create_product(&self, product: &Product) -> RepoResult<()>;
    /// Full replacement of every non-id product field.
    fn update_product(&self, product: &Product) -> RepoResult<()>;
    fn delete_product(&self, id: &str) -> RepoResult<()>;
}

/// SQLite-backed reference repository.
pub struct SqliteReferenceRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteReferenceRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ReferenceRepository for SqliteReferenceRepository<'_> {
    fn list_names(&self, list: NameList) -> RepoResult<Vec<String>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT name FROM {} ORDER BY name COLLATE NOCASE ASC, name ASC;",
            table_of(list)
        ))?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(names)
    }

    fn add_name(&self, list: NameList, name: &str) -> RepoResult<()> {
        self.conn
            .execute(
                &format!("INSERT INTO {} (name) VALUES (?1);", table_of(list)),
                [name],
            )
            .map_err(|err| RepoError::from_write(err, list.label(), name))?;
        Ok(())
    }

    fn rename_name(&self, list: NameList, from: &str, to: &str) -> RepoResult<()> {
        let changed = self
            .conn
            .execute(
                &format!("UPDATE {} SET name = ?1 WHERE name = ?2;", table_of(list)),
                params![to, from],
            )
            .map_err(|err| RepoError::from_write(err, list.label(), to))?;
        if changed == 0 {
            return Err(RepoError::not_found(list.label(), from));
        }
        Ok(())
    }

    fn delete_name(&self, list: NameList, name: &str) -> RepoResult<()> {
        let changed = self.conn.execute(
            &format!("DELETE FROM {} WHERE name = ?1;", table_of(list)),
            [name],
        )?;
        if changed == 0 {
            return Err(RepoError::not_found(list.label(), name));
        }
        Ok(())
    }

    fn list_categories(&self) -> RepoResult<Vec<Category>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name FROM categories ORDER BY name COLLATE NOCASE ASC, id ASC;",
        )?;
        let categories = stmt
            .query_map([], |row| {
                Ok(Category {
                    id: row.get("id")?,
                    name: row.get("name")?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(categories)
    }

    fn create_category(&self, category: &Category) -> RepoResult<()> {
        self.conn
            .execute(
                "INSERT INTO categories (id, name) VALUES (?1, ?2);",
                params![category.id, category.name],
            )
            .map_err(|err| RepoError::from_write(err, "category", &category.id))?;
        Ok(())
    }

    fn rename_category(&self, id: &str, name: &str) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE categories SET name = ?1 WHERE id = ?2;",
            params![name, id],
        )?;
        if changed == 0 {
            return Err(RepoError::not_found("category", id));
        }
        Ok(())
    }

    fn delete_category(&self, id: &str) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM categories WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::not_found("category", id));
        }
        Ok(())
    }

    fn list_products(&self) -> RepoResult<Vec<Product>> {
        let mut stmt = self.conn.prepare(&format!(
            "{PRODUCT_SELECT_SQL} ORDER BY name COLLATE NOCASE ASC, id ASC;"
        ))?;
        let mut rows = stmt.query([])?;
        let mut products = Vec::new();
        while let Some(row) = rows.next()? {
            products.push(parse_product_row(row)?);
        }
        Ok(products)
    }

    fn create_product(&self, product: &Product) -> RepoResult<()> {
        if product.name.trim().is_empty() {
            return Err(RepoError::InvalidData(format!(
                "product `{}` has an empty name",
                product.id
            )));
        }
        self.conn
            .execute(
                "INSERT INTO products (
                    id,
                    name,
                    qr_code,
                    category_id,
                    created_at,
                    attachment_url,
                    attachment_name
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
                params![
                    product.id,
                    product.name,
                    product.qr_code,
                    product.category_id,
                    product.created_at,
                    product.attachment_url,
                    product.attachment_name,
                ],
            )
            .map_err(|err| RepoError::from_write(err, "product", &product.id))?;
        Ok(())
    }

    fn update_product(&self, product: &Product) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE products
             SET
                name = ?1,
                qr_code = ?2,
                category_id = ?3,
                attachment_url = ?4,
                attachment_name = ?5
             WHERE id = ?6;",
            params![
                product.name,
                product.qr_code,
                product.category_id,
                product.attachment_url,
                product.attachment_name,
                product.id,
            ],
        )?;
        if changed == 0 {
            return Err(RepoError::not_found("product", product.id.as_str()));
        }
        Ok(())
    }

    fn delete_product(&self, id: &str) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM products WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::not_found("product", id));
        }
        Ok(())
    }
}

fn table_of(list: NameList) -> &'static str {
    match list {
        NameList::Users => "users",
        NameList::Locations => "locations",
        NameList::Purposes => "purposes",
    }
}

fn parse_product_row(row: &Row<'_>) -> RepoResult<Product> {
    let product = Product {
        id: row.get("id")?,
        name: row.get("name")?,
        qr_code: row.get("qr_code")?,
        category_id: row.get("category_id")?,
        created_at: row.get("created_at")?,
        attachment_url: row.get("attachment_url")?,
        attachment_name: row.get("attachment_name")?,
    };
    if product.name.trim().is_empty() {
        return Err(RepoError::InvalidData(format!(
            "empty name in products.name for id `{}`",
            product.id
        )));
    }
    Ok(product)
}
