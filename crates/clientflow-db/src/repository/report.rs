//! # Report Repository
//!
//! Read-only aggregates over the ledger.
//!
//! Remaining balances are summed per sale with a floor at zero, so one
//! sale edited below its paid amount never offsets the genuine debt of
//! another. Each report is a single SQL statement and therefore reads one
//! consistent snapshot of the store.

use sqlx::SqlitePool;

use crate::error::LedgerResult;
use clientflow_core::{CategoryQuantity, ClientBalance, GlobalTotals};

/// Per-sale paid sums, the building block of every balance report.
const SALE_LEDGER: &str = "SELECT v.id, v.client_id, v.total_millimes, \
                                  IFNULL(SUM(p.amount_millimes), 0) AS paid_millimes \
                           FROM sales v \
                           LEFT JOIN payments p ON p.sale_id = v.id \
                           GROUP BY v.id";

/// Repository for reporting queries.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    pool: SqlitePool,
}

impl ReportRepository {
    /// Creates a new ReportRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ReportRepository { pool }
    }

    /// Per-client credit and outstanding balance, ordered by client name.
    ///
    /// Clients without sales appear with zero figures.
    pub async fn client_balances(&self) -> LedgerResult<Vec<ClientBalance>> {
        let sql = format!(
            "SELECT c.id AS client_id, c.name, \
                    IFNULL(SUM(s.total_millimes), 0) AS total_credit_millimes, \
                    IFNULL(SUM(MAX(s.total_millimes - s.paid_millimes, 0)), 0) \
                        AS total_remaining_millimes \
             FROM clients c \
             LEFT JOIN ({SALE_LEDGER}) s ON s.client_id = c.id \
             GROUP BY c.id, c.name \
             ORDER BY c.name"
        );

        let balances = sqlx::query_as::<_, ClientBalance>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(balances)
    }

    /// Store-wide credit, paid and outstanding totals.
    pub async fn global_totals(&self) -> LedgerResult<GlobalTotals> {
        let sql = format!(
            "SELECT IFNULL(SUM(s.total_millimes), 0) AS total_credit_millimes, \
                    IFNULL(SUM(s.paid_millimes), 0) AS total_paid_millimes, \
                    IFNULL(SUM(MAX(s.total_millimes - s.paid_millimes, 0)), 0) \
                        AS total_remaining_millimes \
             FROM ({SALE_LEDGER}) s"
        );

        let totals = sqlx::query_as::<_, GlobalTotals>(&sql)
            .fetch_one(&self.pool)
            .await?;

        Ok(totals)
    }

    /// Quantities a client bought, grouped by product category.
    ///
    /// Only item lines still linked to a categorized product count; lines
    /// whose product was deleted, and products without a category, are
    /// excluded. Ordered by category name.
    pub async fn category_quantities(
        &self,
        client_id: i64,
    ) -> LedgerResult<Vec<CategoryQuantity>> {
        let quantities = sqlx::query_as::<_, CategoryQuantity>(
            "SELECT cat.id AS category_id, cat.name, \
                    IFNULL(SUM(si.quantity), 0) AS quantity \
             FROM sale_items si \
             JOIN sales v ON v.id = si.sale_id \
             JOIN products p ON p.id = si.product_id \
             JOIN categories cat ON cat.id = p.category_id \
             WHERE v.client_id = ?1 \
             GROUP BY cat.id, cat.name \
             ORDER BY cat.name",
        )
        .bind(client_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(quantities)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use chrono::NaiveDate;
    use clientflow_core::{Money, NewSaleItem, PaymentMethod, SaleBody};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
    }

    #[tokio::test]
    async fn test_client_balances_and_global_totals() {
        let db = test_db().await;

        let ahmed = db.clients().add_client("Ahmed", None, None, None).await.unwrap();
        let fatma = db.clients().add_client("Fatma", None, None, None).await.unwrap();
        // A client with no sales at all.
        db.clients().add_client("Zied", None, None, None).await.unwrap();

        let sale_a = db
            .sales()
            .create_sale(ahmed, day(1), "V1", None, SaleBody::Direct(Money::from_dinars(50)))
            .await
            .unwrap();
        db.sales()
            .create_sale(ahmed, day(2), "V2", None, SaleBody::Direct(Money::from_dinars(30)))
            .await
            .unwrap();
        db.sales()
            .create_sale(fatma, day(3), "V3", None, SaleBody::Direct(Money::from_dinars(100)))
            .await
            .unwrap();

        db.payments()
            .add_payment(sale_a, day(4), Money::from_dinars(20), PaymentMethod::Cash, None)
            .await
            .unwrap();

        let balances = db.reports().client_balances().await.unwrap();
        assert_eq!(balances.len(), 3);
        // Ordered by name: Ahmed, Fatma, Zied.
        assert_eq!(balances[0].name, "Ahmed");
        assert_eq!(balances[0].total_credit(), Money::from_dinars(80));
        assert_eq!(balances[0].total_remaining(), Money::from_dinars(60));
        assert_eq!(balances[1].total_remaining(), Money::from_dinars(100));
        assert_eq!(balances[2].total_credit(), Money::zero());
        assert_eq!(balances[2].total_remaining(), Money::zero());

        let totals = db.reports().global_totals().await.unwrap();
        assert_eq!(totals.total_credit(), Money::from_dinars(180));
        assert_eq!(totals.total_paid(), Money::from_dinars(20));
        assert_eq!(totals.total_remaining(), Money::from_dinars(160));
    }

    #[tokio::test]
    async fn test_overpaid_sale_never_offsets_debt() {
        // One sale edited below its paid sum contributes zero remaining,
        // not a negative amount that would shrink the other sale's debt.
        let db = test_db().await;
        let client = db.clients().add_client("Karim", None, None, None).await.unwrap();

        let paid_sale = db
            .sales()
            .create_sale(client, day(1), "V1", None, SaleBody::Direct(Money::from_dinars(50)))
            .await
            .unwrap();
        db.payments()
            .add_payment(paid_sale, day(2), Money::from_dinars(50), PaymentMethod::Cash, None)
            .await
            .unwrap();
        db.sales()
            .update_sale(paid_sale, "V1", None, SaleBody::Direct(Money::from_dinars(40)))
            .await
            .unwrap();

        db.sales()
            .create_sale(client, day(3), "V2", None, SaleBody::Direct(Money::from_dinars(30)))
            .await
            .unwrap();

        let balances = db.reports().client_balances().await.unwrap();
        assert_eq!(balances[0].total_remaining(), Money::from_dinars(30));

        let totals = db.reports().global_totals().await.unwrap();
        assert_eq!(totals.total_remaining(), Money::from_dinars(30));
    }

    #[tokio::test]
    async fn test_category_quantities() {
        // Scenario B: valve purchases group under "Vannes" with quantity 3;
        // deleting the category removes the row while the product survives.
        let db = test_db().await;
        let client = db.clients().add_client("Ahmed", None, None, None).await.unwrap();

        let vannes = db.catalog().add_category("Vannes", None).await.unwrap();
        let valve = db
            .catalog()
            .add_product("Vanne 1/2", Money::from_dinars(15), Some(vannes))
            .await
            .unwrap();
        let loose = db
            .catalog()
            .add_product("Produit divers", Money::from_dinars(2), None)
            .await
            .unwrap();

        db.sales()
            .create_sale(
                client,
                day(1),
                "V1",
                None,
                SaleBody::Items(vec![NewSaleItem::of_product(valve, 2), NewSaleItem::of_product(loose, 5)]),
            )
            .await
            .unwrap();
        db.sales()
            .create_sale(
                client,
                day(2),
                "V2",
                None,
                SaleBody::Items(vec![NewSaleItem::of_product(valve, 1)]),
            )
            .await
            .unwrap();

        let rows = db.reports().category_quantities(client).await.unwrap();
        // Uncategorized product contributes nothing.
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Vannes");
        assert_eq!(rows[0].quantity, 3);

        // Another client sees an empty report.
        let other = db.clients().add_client("Autre", None, None, None).await.unwrap();
        assert!(db.reports().category_quantities(other).await.unwrap().is_empty());

        db.catalog().delete_category(vannes).await.unwrap();
        assert!(db.reports().category_quantities(client).await.unwrap().is_empty());
        assert!(db.catalog().get_product(valve).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_deleted_product_lines_excluded() {
        let db = test_db().await;
        let client = db.clients().add_client("Sami", None, None, None).await.unwrap();

        let cat = db.catalog().add_category("Tuyaux", None).await.unwrap();
        let pipe = db
            .catalog()
            .add_product("Tuyau cuivre", Money::from_dinars(8), Some(cat))
            .await
            .unwrap();

        db.sales()
            .create_sale(
                client,
                day(1),
                "V1",
                None,
                SaleBody::Items(vec![NewSaleItem::of_product(pipe, 4)]),
            )
            .await
            .unwrap();
        assert_eq!(db.reports().category_quantities(client).await.unwrap()[0].quantity, 4);

        // Deleting the product nulls the item link; the line drops out of
        // the category report even though the snapshot survives.
        db.catalog().delete_product(pipe).await.unwrap();
        assert!(db.reports().category_quantities(client).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_store_reports() {
        let db = test_db().await;

        assert!(db.reports().client_balances().await.unwrap().is_empty());
        let totals = db.reports().global_totals().await.unwrap();
        assert_eq!(totals.total_credit(), Money::zero());
        assert_eq!(totals.total_paid(), Money::zero());
        assert_eq!(totals.total_remaining(), Money::zero());
    }
}
