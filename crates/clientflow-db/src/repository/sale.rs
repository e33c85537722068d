//! # Sale Repository
//!
//! Database operations for sales and their line items.
//!
//! ## Two Storage Modes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  Item-backed sale                  Direct-amount sale               │
//! │  ─────────────────                 ──────────────────               │
//! │  sales.total_millimes =            sales.total_millimes supplied    │
//! │    Σ item line totals                by the caller (> 0), no item   │
//! │  (recomputed on every              rows exist                       │
//! │   item-affecting write)                                             │
//! │                                                                     │
//! │  The stored mode is determined solely by whether item rows exist    │
//! │  after the write; updates may switch mode in either direction.      │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! Item rows freeze the referenced product's description and unit price at
//! write time. Later price edits or product deletions never rewrite
//! existing items.
//!
//! Every mutation here runs in one transaction: a concurrent reader never
//! observes item rows alongside a stale total.

use sqlx::{SqliteConnection, SqlitePool};
use tracing::{debug, error};

use crate::error::{LedgerError, LedgerResult};
use clientflow_core::validation::{
    validate_direct_total, validate_items_present, validate_quantity, validate_unit_price,
};
use clientflow_core::{Money, NewSaleItem, Product, Sale, SaleBody, SaleFilter, SaleItem, SaleSummary};
use chrono::NaiveDate;

/// Repository for sale database operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

/// A line item with its snapshot resolved, ready to insert.
struct ResolvedItem {
    product_id: Option<i64>,
    description: String,
    quantity: i64,
    unit_price: Money,
}

impl ResolvedItem {
    fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Creates a sale for a client.
    ///
    /// `SaleBody::Items`: at least one line is required; each line snapshots
    /// the referenced product's current name and price unless overridden, and
    /// the total is the sum of line totals (zero allowed). `SaleBody::Direct`:
    /// the supplied total must be strictly positive and no item rows are
    /// written.
    ///
    /// ## Returns
    /// The id assigned by the store.
    pub async fn create_sale(
        &self,
        client_id: i64,
        date: NaiveDate,
        reference: &str,
        description: Option<&str>,
        body: SaleBody,
    ) -> LedgerResult<i64> {
        debug!(client_id = %client_id, reference = %reference, "Creating sale");

        let mut tx = self.pool.begin().await?;

        let client_exists: Option<i64> =
            sqlx::query_scalar("SELECT id FROM clients WHERE id = ?1")
                .bind(client_id)
                .fetch_optional(&mut *tx)
                .await?;
        if client_exists.is_none() {
            return Err(LedgerError::not_found("Client", client_id));
        }

        let sale_id = match body {
            SaleBody::Direct(total) => {
                validate_direct_total(total)?;

                let result = sqlx::query(
                    "INSERT INTO sales (client_id, date, reference, description, total_millimes) \
                     VALUES (?1, ?2, ?3, ?4, ?5)",
                )
                .bind(client_id)
                .bind(date)
                .bind(reference)
                .bind(description)
                .bind(total.millimes())
                .execute(&mut *tx)
                .await?;

                result.last_insert_rowid()
            }
            SaleBody::Items(items) => {
                let resolved = resolve_items(&mut *tx, &items).await?;
                let total: Money = resolved.iter().map(ResolvedItem::line_total).sum::<Money>();

                let result = sqlx::query(
                    "INSERT INTO sales (client_id, date, reference, description, total_millimes) \
                     VALUES (?1, ?2, ?3, ?4, ?5)",
                )
                .bind(client_id)
                .bind(date)
                .bind(reference)
                .bind(description)
                .bind(total.millimes())
                .execute(&mut *tx)
                .await?;

                let sale_id = result.last_insert_rowid();
                insert_items(&mut *tx, sale_id, &resolved).await?;
                sale_id
            }
        };

        tx.commit().await?;
        Ok(sale_id)
    }

    /// Updates a sale, replacing its full item set.
    ///
    /// Delete-all-then-reinsert semantics: existing item rows are dropped
    /// and the new body is applied, with the total recomputed (or taken
    /// directly), all inside a single transaction.
    pub async fn update_sale(
        &self,
        sale_id: i64,
        reference: &str,
        description: Option<&str>,
        body: SaleBody,
    ) -> LedgerResult<()> {
        debug!(sale_id = %sale_id, reference = %reference, "Updating sale");

        let mut tx = self.pool.begin().await?;

        let exists: Option<i64> = sqlx::query_scalar("SELECT id FROM sales WHERE id = ?1")
            .bind(sale_id)
            .fetch_optional(&mut *tx)
            .await?;
        if exists.is_none() {
            return Err(LedgerError::not_found("Sale", sale_id));
        }

        sqlx::query("DELETE FROM sale_items WHERE sale_id = ?1")
            .bind(sale_id)
            .execute(&mut *tx)
            .await?;

        let total = match body {
            SaleBody::Direct(total) => {
                validate_direct_total(total)?;
                total
            }
            SaleBody::Items(items) => {
                let resolved = resolve_items(&mut *tx, &items).await?;
                let total: Money = resolved.iter().map(ResolvedItem::line_total).sum::<Money>();
                insert_items(&mut *tx, sale_id, &resolved).await?;
                total
            }
        };

        sqlx::query(
            "UPDATE sales SET reference = ?2, description = ?3, total_millimes = ?4 \
             WHERE id = ?1",
        )
        .bind(sale_id)
        .bind(reference)
        .bind(description)
        .bind(total.millimes())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Deletes a sale and its children.
    ///
    /// Items and payments first, then the sale, in one transaction.
    /// Idempotent.
    pub async fn delete_sale(&self, sale_id: i64) -> LedgerResult<()> {
        debug!(sale_id = %sale_id, "Deleting sale with cascade");

        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM sale_items WHERE sale_id = ?1")
            .bind(sale_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM payments WHERE sale_id = ?1")
            .bind(sale_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM sales WHERE id = ?1")
            .bind(sale_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Gets a sale by id.
    pub async fn get_by_id(&self, sale_id: i64) -> LedgerResult<Option<Sale>> {
        let sale = sqlx::query_as::<_, Sale>(
            "SELECT id, client_id, date, reference, description, total_millimes \
             FROM sales WHERE id = ?1",
        )
        .bind(sale_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(sale)
    }

    /// Gets all items for a sale, in insertion order.
    pub async fn get_items(&self, sale_id: i64) -> LedgerResult<Vec<SaleItem>> {
        let items = sqlx::query_as::<_, SaleItem>(
            "SELECT id, sale_id, product_id, description, quantity, \
                    unit_price_millimes, line_total_millimes \
             FROM sale_items WHERE sale_id = ?1 ORDER BY id",
        )
        .bind(sale_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Gets a sale together with its items, verifying total consistency.
    ///
    /// When item rows exist, the stored total must equal the sum of their
    /// line totals; a mismatch means some write bypassed the engine and is
    /// surfaced as a `Consistency` error, never silently corrected.
    pub async fn get_with_items(&self, sale_id: i64) -> LedgerResult<(Sale, Vec<SaleItem>)> {
        let sale = self
            .get_by_id(sale_id)
            .await?
            .ok_or_else(|| LedgerError::not_found("Sale", sale_id))?;
        let items = self.get_items(sale_id).await?;

        if !items.is_empty() {
            let derived: i64 = items.iter().map(|i| i.line_total_millimes).sum();
            if derived != sale.total_millimes {
                error!(
                    sale_id = %sale_id,
                    stored = %sale.total_millimes,
                    derived = %derived,
                    "Sale total inconsistent with item lines"
                );
                return Err(LedgerError::Consistency {
                    sale_id,
                    stored_millimes: sale.total_millimes,
                    derived_millimes: derived,
                });
            }
        }

        Ok((sale, items))
    }

    /// Lists a client's sales with paid sums, most recent first.
    ///
    /// The filter matches case-insensitively on reference/description and
    /// bounds the date range inclusively. Evaluated as a single statement,
    /// so repeated calls without intervening writes return stable results.
    pub async fn list_for_client(
        &self,
        client_id: i64,
        filter: &SaleFilter,
    ) -> LedgerResult<Vec<SaleSummary>> {
        let search = filter.search.as_deref().map(str::trim).filter(|s| !s.is_empty());

        let summaries = sqlx::query_as::<_, SaleSummary>(
            "SELECT v.id, v.client_id, v.date, v.reference, v.description, v.total_millimes, \
                    IFNULL(SUM(p.amount_millimes), 0) AS paid_millimes \
             FROM sales v \
             LEFT JOIN payments p ON p.sale_id = v.id \
             WHERE v.client_id = ?1 \
               AND (?2 IS NULL \
                    OR instr(lower(v.reference), lower(?2)) > 0 \
                    OR instr(lower(IFNULL(v.description, '')), lower(?2)) > 0) \
               AND (?3 IS NULL OR v.date >= ?3) \
               AND (?4 IS NULL OR v.date <= ?4) \
             GROUP BY v.id, v.client_id, v.date, v.reference, v.description, v.total_millimes \
             ORDER BY v.date DESC, v.id DESC",
        )
        .bind(client_id)
        .bind(search)
        .bind(filter.date_from)
        .bind(filter.date_to)
        .fetch_all(&self.pool)
        .await?;

        Ok(summaries)
    }
}

/// Resolves incoming lines against the catalog inside the caller's
/// transaction: product snapshots are taken here, at write time.
async fn resolve_items(
    tx: &mut SqliteConnection,
    items: &[NewSaleItem],
) -> LedgerResult<Vec<ResolvedItem>> {
    // A sale without lines must use a direct total instead.
    validate_items_present(items)?;

    let mut resolved = Vec::with_capacity(items.len());

    for item in items {
        validate_quantity(item.quantity)?;

        let (description, unit_price) = match item.product_id {
            Some(product_id) => {
                let product = sqlx::query_as::<_, Product>(
                    "SELECT id, name, unit_price_millimes, category_id \
                     FROM products WHERE id = ?1",
                )
                .bind(product_id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or_else(|| LedgerError::not_found("Product", product_id))?;

                let description = item
                    .description
                    .clone()
                    .unwrap_or_else(|| product.name.clone());
                let unit_price = item
                    .unit_price_millimes
                    .map(Money::from_millimes)
                    .unwrap_or_else(|| product.unit_price());
                (description, unit_price)
            }
            // Free-form line: no catalog reference, caller supplies the data.
            None => (
                item.description.clone().unwrap_or_default(),
                Money::from_millimes(item.unit_price_millimes.unwrap_or(0)),
            ),
        };

        validate_unit_price(unit_price)?;

        resolved.push(ResolvedItem {
            product_id: item.product_id,
            description,
            quantity: item.quantity,
            unit_price,
        });
    }

    Ok(resolved)
}

/// Inserts resolved item rows for a sale.
async fn insert_items(
    tx: &mut SqliteConnection,
    sale_id: i64,
    items: &[ResolvedItem],
) -> LedgerResult<()> {
    for item in items {
        sqlx::query(
            "INSERT INTO sale_items \
             (sale_id, product_id, description, quantity, unit_price_millimes, line_total_millimes) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )
        .bind(sale_id)
        .bind(item.product_id)
        .bind(&item.description)
        .bind(item.quantity)
        .bind(item.unit_price.millimes())
        .bind(item.line_total().millimes())
        .execute(&mut *tx)
        .await?;
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
    }

    async fn seed_client(db: &Database, name: &str) -> i64 {
        db.clients().add_client(name, None, None, None).await.unwrap()
    }

    #[tokio::test]
    async fn test_item_backed_total_derivation() {
        // Scenario A start: 10 × 5.000 DT = 50.000 DT.
        let db = test_db().await;
        let client_id = seed_client(&db, "Ahmed").await;
        let pipe_id = db
            .catalog()
            .add_product("Tuyau PVC", Money::from_millimes(5_000), None)
            .await
            .unwrap();

        let sale_id = db
            .sales()
            .create_sale(
                client_id,
                day(1),
                "V2603011001",
                None,
                SaleBody::Items(vec![NewSaleItem::of_product(pipe_id, 10)]),
            )
            .await
            .unwrap();

        let (sale, items) = db.sales().get_with_items(sale_id).await.unwrap();
        assert_eq!(sale.total(), Money::from_dinars(50));
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].description, "Tuyau PVC");
        assert_eq!(items[0].unit_price(), Money::from_millimes(5_000));
        assert_eq!(items[0].line_total(), Money::from_dinars(50));
    }

    #[tokio::test]
    async fn test_zero_quantity_item_contributes_nothing() {
        // P1 includes the single zero-quantity line: derived total is zero.
        let db = test_db().await;
        let client_id = seed_client(&db, "Leila").await;
        let prod = db
            .catalog()
            .add_product("Joint silicone", Money::from_millimes(3_500), None)
            .await
            .unwrap();

        let sale_id = db
            .sales()
            .create_sale(
                client_id,
                day(1),
                "V2603011002",
                None,
                SaleBody::Items(vec![NewSaleItem::of_product(prod, 0)]),
            )
            .await
            .unwrap();

        let (sale, items) = db.sales().get_with_items(sale_id).await.unwrap();
        assert_eq!(sale.total(), Money::zero());
        assert_eq!(items[0].quantity, 0);
    }

    #[tokio::test]
    async fn test_direct_sale_requires_positive_total() {
        let db = test_db().await;
        let client_id = seed_client(&db, "Karim").await;

        let err = db
            .sales()
            .create_sale(client_id, day(1), "V0", None, SaleBody::Direct(Money::zero()))
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::Validation(_)));

        let sale_id = db
            .sales()
            .create_sale(
                client_id,
                day(1),
                "V1",
                Some("Vente libre"),
                SaleBody::Direct(Money::from_dinars(100)),
            )
            .await
            .unwrap();
        let (sale, items) = db.sales().get_with_items(sale_id).await.unwrap();
        assert_eq!(sale.total(), Money::from_dinars(100));
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_create_sale_unknown_client_or_product() {
        let db = test_db().await;

        let err = db
            .sales()
            .create_sale(999, day(1), "V1", None, SaleBody::Direct(Money::from_dinars(10)))
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::NotFound { .. }));

        let client_id = seed_client(&db, "Sami").await;
        let err = db
            .sales()
            .create_sale(
                client_id,
                day(1),
                "V2",
                None,
                SaleBody::Items(vec![NewSaleItem::of_product(777, 1)]),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::NotFound { .. }));

        // Failed item resolution rolls back the whole create.
        assert!(db
            .sales()
            .list_for_client(client_id, &SaleFilter::default())
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_price_snapshot_survives_product_edits() {
        let db = test_db().await;
        let client_id = seed_client(&db, "Ahmed").await;
        let prod = db
            .catalog()
            .add_product("Vanne", Money::from_dinars(12), None)
            .await
            .unwrap();

        let sale_id = db
            .sales()
            .create_sale(
                client_id,
                day(1),
                "V1",
                None,
                SaleBody::Items(vec![NewSaleItem::of_product(prod, 3)]),
            )
            .await
            .unwrap();

        // Raising the catalog price must not rewrite history.
        db.catalog()
            .update_product(prod, "Vanne", Money::from_dinars(20), None)
            .await
            .unwrap();

        let (sale, items) = db.sales().get_with_items(sale_id).await.unwrap();
        assert_eq!(items[0].unit_price(), Money::from_dinars(12));
        assert_eq!(sale.total(), Money::from_dinars(36));

        // Deleting the product nulls the reference, snapshot intact (I4).
        db.catalog().delete_product(prod).await.unwrap();
        let (_, items) = db.sales().get_with_items(sale_id).await.unwrap();
        assert!(items[0].product_id.is_none());
        assert_eq!(items[0].description, "Vanne");
        assert_eq!(items[0].unit_price(), Money::from_dinars(12));
    }

    #[tokio::test]
    async fn test_update_replaces_items_and_switches_mode() {
        // Scenario C: direct 100 DT replaced by two items totaling 70 DT.
        let db = test_db().await;
        let client_id = seed_client(&db, "Fatma").await;
        let prod = db
            .catalog()
            .add_product("Flexible douche", Money::from_dinars(20), None)
            .await
            .unwrap();

        let sale_id = db
            .sales()
            .create_sale(client_id, day(1), "V1", None, SaleBody::Direct(Money::from_dinars(100)))
            .await
            .unwrap();

        db.sales()
            .update_sale(
                sale_id,
                "V1",
                None,
                SaleBody::Items(vec![
                    NewSaleItem::of_product(prod, 2),
                    NewSaleItem {
                        product_id: None,
                        description: Some("Main d'oeuvre".to_string()),
                        quantity: 1,
                        unit_price_millimes: Some(30_000),
                    },
                ]),
            )
            .await
            .unwrap();

        let (sale, items) = db.sales().get_with_items(sale_id).await.unwrap();
        assert_eq!(sale.total(), Money::from_dinars(70));
        assert_eq!(items.len(), 2);

        // And back to a direct amount: item rows disappear.
        db.sales()
            .update_sale(sale_id, "V1-bis", None, SaleBody::Direct(Money::from_dinars(80)))
            .await
            .unwrap();
        let (sale, items) = db.sales().get_with_items(sale_id).await.unwrap();
        assert_eq!(sale.reference, "V1-bis");
        assert_eq!(sale.total(), Money::from_dinars(80));
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_empty_item_list_rejected() {
        // A no-item sale must go through the direct-total mode, which
        // enforces a strictly positive amount.
        let db = test_db().await;
        let client_id = seed_client(&db, "Nour").await;

        let err = db
            .sales()
            .create_sale(client_id, day(1), "V1", None, SaleBody::Items(vec![]))
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::Validation(_)));
        assert!(db
            .sales()
            .list_for_client(client_id, &SaleFilter::default())
            .await
            .unwrap()
            .is_empty());

        // Same rule on update, and the rejected write rolls back fully.
        let prod = db
            .catalog()
            .add_product("Bouchon laiton", Money::from_millimes(1_100), None)
            .await
            .unwrap();
        let sale_id = db
            .sales()
            .create_sale(
                client_id,
                day(1),
                "V2",
                None,
                SaleBody::Items(vec![NewSaleItem::of_product(prod, 2)]),
            )
            .await
            .unwrap();

        let err = db
            .sales()
            .update_sale(sale_id, "V2", None, SaleBody::Items(vec![]))
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::Validation(_)));

        let (sale, items) = db.sales().get_with_items(sale_id).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(sale.total(), Money::from_millimes(2_200));
    }

    #[tokio::test]
    async fn test_update_missing_sale_not_found() {
        let db = test_db().await;
        let err = db
            .sales()
            .update_sale(42, "V1", None, SaleBody::Direct(Money::from_dinars(10)))
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_sale_cascades_and_is_idempotent() {
        let db = test_db().await;
        let client_id = seed_client(&db, "Mohamed").await;
        let prod = db
            .catalog()
            .add_product("Collier", Money::from_millimes(800), None)
            .await
            .unwrap();

        let sale_id = db
            .sales()
            .create_sale(
                client_id,
                day(1),
                "V1",
                None,
                SaleBody::Items(vec![NewSaleItem::of_product(prod, 50)]),
            )
            .await
            .unwrap();
        db.payments()
            .add_payment(
                sale_id,
                day(2),
                Money::from_dinars(10),
                clientflow_core::PaymentMethod::Cash,
                None,
            )
            .await
            .unwrap();

        db.sales().delete_sale(sale_id).await.unwrap();

        assert!(db.sales().get_by_id(sale_id).await.unwrap().is_none());
        assert!(db.sales().get_items(sale_id).await.unwrap().is_empty());
        assert!(db.payments().list_for_sale(sale_id).await.unwrap().is_empty());

        db.sales().delete_sale(sale_id).await.unwrap();
    }

    #[tokio::test]
    async fn test_list_for_client_filtering_and_order() {
        let db = test_db().await;
        let client_id = seed_client(&db, "Ahmed").await;
        let sales = db.sales();

        sales
            .create_sale(client_id, day(1), "V2603011111", Some("Tuyaux"), SaleBody::Direct(Money::from_dinars(10)))
            .await
            .unwrap();
        sales
            .create_sale(client_id, day(5), "V2603052222", Some("Robinets"), SaleBody::Direct(Money::from_dinars(20)))
            .await
            .unwrap();
        sales
            .create_sale(client_id, day(9), "V2603093333", None, SaleBody::Direct(Money::from_dinars(30)))
            .await
            .unwrap();

        // Unfiltered: date descending.
        let all = sales.list_for_client(client_id, &SaleFilter::default()).await.unwrap();
        let dates: Vec<NaiveDate> = all.iter().map(|s| s.date).collect();
        assert_eq!(dates, vec![day(9), day(5), day(1)]);

        // Substring on reference, case-insensitive.
        let filter = SaleFilter {
            search: Some("2222".to_string()),
            ..Default::default()
        };
        let hits = sales.list_for_client(client_id, &filter).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].reference, "V2603052222");

        // Substring on description.
        let filter = SaleFilter {
            search: Some("tuyaux".to_string()),
            ..Default::default()
        };
        assert_eq!(sales.list_for_client(client_id, &filter).await.unwrap().len(), 1);

        // Inclusive date bounds.
        let filter = SaleFilter {
            search: None,
            date_from: Some(day(1)),
            date_to: Some(day(5)),
        };
        assert_eq!(sales.list_for_client(client_id, &filter).await.unwrap().len(), 2);

        // Other clients are never included.
        let other = seed_client(&db, "Autre").await;
        assert!(sales
            .list_for_client(other, &SaleFilter::default())
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_consistency_violation_detected() {
        let db = test_db().await;
        let client_id = seed_client(&db, "Ahmed").await;
        let prod = db
            .catalog()
            .add_product("Te PVC", Money::from_millimes(2_000), None)
            .await
            .unwrap();

        let sale_id = db
            .sales()
            .create_sale(
                client_id,
                day(1),
                "V1",
                None,
                SaleBody::Items(vec![NewSaleItem::of_product(prod, 25)]),
            )
            .await
            .unwrap();

        // Corrupt the stored total behind the engine's back.
        sqlx::query("UPDATE sales SET total_millimes = 1 WHERE id = ?1")
            .bind(sale_id)
            .execute(db.pool())
            .await
            .unwrap();

        let err = db.sales().get_with_items(sale_id).await.unwrap_err();
        match err {
            LedgerError::Consistency {
                stored_millimes,
                derived_millimes,
                ..
            } => {
                assert_eq!(stored_millimes, 1);
                assert_eq!(derived_millimes, 50_000);
            }
            other => panic!("expected Consistency error, got {other}"),
        }
    }
}
