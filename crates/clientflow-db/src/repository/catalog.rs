//! # Catalog Repository
//!
//! Database operations for categories and products.
//!
//! ## Deletion Semantics
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  delete_category(id)                                                │
//! │    └── products.category_id ← NULL   (products survive)            │
//! │                                                                     │
//! │  delete_product(id)                                                 │
//! │    └── sale_items.product_id ← NULL  (history survives: the item   │
//! │        keeps its description and unit-price snapshot)              │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both cascades run inside one transaction. Deletes of absent ids are
//! no-ops so an interactive caller can retry without tripping on a row that
//! is already gone; updates of absent ids still fail with NotFound.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{LedgerError, LedgerResult};
use clientflow_core::validation::{validate_name, validate_unit_price};
use clientflow_core::{Category, Money, Product};

/// Repository for catalog database operations.
#[derive(Debug, Clone)]
pub struct CatalogRepository {
    pool: SqlitePool,
}

impl CatalogRepository {
    /// Creates a new CatalogRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CatalogRepository { pool }
    }

    // =========================================================================
    // Categories
    // =========================================================================

    /// Adds a category.
    ///
    /// ## Returns
    /// The id assigned by the store.
    pub async fn add_category(
        &self,
        name: &str,
        description: Option<&str>,
    ) -> LedgerResult<i64> {
        let name = validate_name("name", name)?;

        debug!(name = %name, "Inserting category");

        let result = sqlx::query("INSERT INTO categories (name, description) VALUES (?1, ?2)")
            .bind(&name)
            .bind(description)
            .execute(&self.pool)
            .await?;

        Ok(result.last_insert_rowid())
    }

    /// Updates a category, replacing the full mutable field set.
    pub async fn update_category(
        &self,
        id: i64,
        name: &str,
        description: Option<&str>,
    ) -> LedgerResult<()> {
        let name = validate_name("name", name)?;

        let result =
            sqlx::query("UPDATE categories SET name = ?2, description = ?3 WHERE id = ?1")
                .bind(id)
                .bind(&name)
                .bind(description)
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(LedgerError::not_found("Category", id));
        }

        Ok(())
    }

    /// Deletes a category.
    ///
    /// Nulls `category_id` on referencing products in the same transaction;
    /// no product row is removed. Idempotent.
    pub async fn delete_category(&self, id: i64) -> LedgerResult<()> {
        debug!(id = %id, "Deleting category");

        let mut tx = self.pool.begin().await?;

        sqlx::query("UPDATE products SET category_id = NULL WHERE category_id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM categories WHERE id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Lists all categories ordered by name.
    pub async fn list_categories(&self) -> LedgerResult<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT id, name, description FROM categories ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    /// Gets a category by id.
    pub async fn get_category(&self, id: i64) -> LedgerResult<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(
            "SELECT id, name, description FROM categories WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }

    // =========================================================================
    // Products
    // =========================================================================

    /// Adds a product.
    ///
    /// ## Returns
    /// The id assigned by the store.
    pub async fn add_product(
        &self,
        name: &str,
        unit_price: Money,
        category_id: Option<i64>,
    ) -> LedgerResult<i64> {
        let name = validate_name("name", name)?;
        validate_unit_price(unit_price)?;

        debug!(name = %name, unit_price = %unit_price, "Inserting product");

        let result = sqlx::query(
            "INSERT INTO products (name, unit_price_millimes, category_id) VALUES (?1, ?2, ?3)",
        )
        .bind(&name)
        .bind(unit_price.millimes())
        .bind(category_id)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Updates a product, replacing the full mutable field set.
    ///
    /// Existing sale items keep their price snapshot: a price change here
    /// never alters history.
    pub async fn update_product(
        &self,
        id: i64,
        name: &str,
        unit_price: Money,
        category_id: Option<i64>,
    ) -> LedgerResult<()> {
        let name = validate_name("name", name)?;
        validate_unit_price(unit_price)?;

        let result = sqlx::query(
            "UPDATE products SET name = ?2, unit_price_millimes = ?3, category_id = ?4 \
             WHERE id = ?1",
        )
        .bind(id)
        .bind(&name)
        .bind(unit_price.millimes())
        .bind(category_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(LedgerError::not_found("Product", id));
        }

        Ok(())
    }

    /// Deletes a product.
    ///
    /// Nulls `product_id` on referencing sale items in the same transaction;
    /// item snapshots (description, unit price) are untouched. Idempotent.
    pub async fn delete_product(&self, id: i64) -> LedgerResult<()> {
        debug!(id = %id, "Deleting product");

        let mut tx = self.pool.begin().await?;

        sqlx::query("UPDATE sale_items SET product_id = NULL WHERE product_id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Lists all products ordered by name.
    pub async fn list_products(&self) -> LedgerResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            "SELECT id, name, unit_price_millimes, category_id FROM products ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Gets a product by id.
    pub async fn get_product(&self, id: i64) -> LedgerResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            "SELECT id, name, unit_price_millimes, category_id FROM products WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
