//! # Client Repository
//!
//! Database operations for clients, including the full deletion cascade.
//!
//! ## Cascade Order
//! ```text
//! delete_client(id)
//!   1. sale_items of the client's sales
//!   2. payments of the client's sales
//!   3. sales
//!   4. the client row
//! ```
//! Children always go before their parent, and the whole sequence is one
//! transaction: either every row is gone or none is.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{LedgerError, LedgerResult};
use clientflow_core::validation::validate_name;
use clientflow_core::Client;

/// Repository for client database operations.
#[derive(Debug, Clone)]
pub struct ClientRepository {
    pool: SqlitePool,
}

impl ClientRepository {
    /// Creates a new ClientRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ClientRepository { pool }
    }

    /// Adds a client.
    ///
    /// ## Returns
    /// The id assigned by the store.
    pub async fn add_client(
        &self,
        name: &str,
        phone: Option<&str>,
        address: Option<&str>,
        email: Option<&str>,
    ) -> LedgerResult<i64> {
        let name = validate_name("name", name)?;

        debug!(name = %name, "Inserting client");

        let result = sqlx::query(
            "INSERT INTO clients (name, phone, address, email) VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(&name)
        .bind(phone)
        .bind(address)
        .bind(email)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Updates a client, replacing the full mutable field set.
    pub async fn update_client(
        &self,
        id: i64,
        name: &str,
        phone: Option<&str>,
        address: Option<&str>,
        email: Option<&str>,
    ) -> LedgerResult<()> {
        let name = validate_name("name", name)?;

        let result = sqlx::query(
            "UPDATE clients SET name = ?2, phone = ?3, address = ?4, email = ?5 WHERE id = ?1",
        )
        .bind(id)
        .bind(&name)
        .bind(phone)
        .bind(address)
        .bind(email)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(LedgerError::not_found("Client", id));
        }

        Ok(())
    }

    /// Deletes a client and everything hanging off it.
    ///
    /// Ordered cascade (items → payments → sales → client) in a single
    /// transaction, so no orphan is ever observable. Idempotent.
    pub async fn delete_client(&self, id: i64) -> LedgerResult<()> {
        debug!(id = %id, "Deleting client with cascade");

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "DELETE FROM sale_items \
             WHERE sale_id IN (SELECT id FROM sales WHERE client_id = ?1)",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            "DELETE FROM payments \
             WHERE sale_id IN (SELECT id FROM sales WHERE client_id = ?1)",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM sales WHERE client_id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM clients WHERE id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Lists all clients ordered by name.
    pub async fn list_clients(&self) -> LedgerResult<Vec<Client>> {
        let clients = sqlx::query_as::<_, Client>(
            "SELECT id, name, phone, address, email FROM clients ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(clients)
    }

    /// Searches clients case-insensitively across name, phone, address and
    /// email. Results are ordered by name.
    pub async fn search_clients(&self, query: &str) -> LedgerResult<Vec<Client>> {
        let query = query.trim();

        if query.is_empty() {
            return self.list_clients().await;
        }

        let clients = sqlx::query_as::<_, Client>(
            "SELECT id, name, phone, address, email FROM clients \
             WHERE instr(lower(name), lower(?1)) > 0 \
                OR instr(lower(IFNULL(phone, '')), lower(?1)) > 0 \
                OR instr(lower(IFNULL(address, '')), lower(?1)) > 0 \
                OR instr(lower(IFNULL(email, '')), lower(?1)) > 0 \
             ORDER BY name",
        )
        .bind(query)
        .fetch_all(&self.pool)
        .await?;

        Ok(clients)
    }

    /// Gets a client by id.
    pub async fn get_by_id(&self, id: i64) -> LedgerResult<Option<Client>> {
        let client = sqlx::query_as::<_, Client>(
            "SELECT id, name, phone, address, email FROM clients WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(client)
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
    async fn test_client_crud() {
        let db = test_db().await;
        let clients = db.clients();

        let id = clients
            .add_client(
                "Ahmed Ben Ali",
                Some("+216 20 123 456"),
                Some("Tunis"),
                Some("ahmed@email.com"),
            )
            .await
            .unwrap();

        let fetched = clients.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "Ahmed Ben Ali");
        assert_eq!(fetched.email.as_deref(), Some("ahmed@email.com"));

        clients
            .update_client(id, "Ahmed B. Ali", None, None, None)
            .await
            .unwrap();
        let fetched = clients.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "Ahmed B. Ali");
        assert!(fetched.phone.is_none());

        let err = clients.add_client("", None, None, None).await.unwrap_err();
        assert!(matches!(err, LedgerError::Validation(_)));
    }

    #[tokio::test]
    async fn test_search_clients_case_insensitive() {
        let db = test_db().await;
        let clients = db.clients();

        clients
            .add_client(
                "Fatma Trabelsi",
                Some("+216 70 987 654"),
                Some("Sousse"),
                Some("fatma@email.com"),
            )
            .await
            .unwrap();
        clients
            .add_client("Karim Jaziri", None, Some("Bizerte"), Some("karim@email.com"))
            .await
            .unwrap();

        let hits = clients.search_clients("FATMA").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Fatma Trabelsi");

        // Matches on address and email too.
        assert_eq!(clients.search_clients("bizerte").await.unwrap().len(), 1);
        assert_eq!(clients.search_clients("@email.com").await.unwrap().len(), 2);
        assert!(clients.search_clients("zzz").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_client_cascades_fully() {
        // P3: nothing referencing the client survives, directly or
        // transitively.
        let db = test_db().await;

        let client_id = db
            .clients()
            .add_client("Mohamed Salah", None, None, None)
            .await
            .unwrap();
        let product_id = db
            .catalog()
            .add_product("Coude PVC 90", Money::from_millimes(1_200), None)
            .await
            .unwrap();

        let sale_id = db
            .sales()
            .create_sale(
                client_id,
                day(1),
                "V2603011001",
                None,
                SaleBody::Items(vec![NewSaleItem::of_product(product_id, 4)]),
            )
            .await
            .unwrap();
        db.payments()
            .add_payment(sale_id, day(2), Money::from_millimes(2_000), PaymentMethod::Cash, None)
            .await
            .unwrap();

        db.clients().delete_client(client_id).await.unwrap();

        assert!(db.clients().get_by_id(client_id).await.unwrap().is_none());
        assert!(db.sales().get_by_id(sale_id).await.unwrap().is_none());
        assert!(db.sales().get_items(sale_id).await.unwrap().is_empty());
        assert!(db.payments().list_for_sale(sale_id).await.unwrap().is_empty());

        // Idempotent: a second delete is a no-op.
        db.clients().delete_client(client_id).await.unwrap();
    }
}
