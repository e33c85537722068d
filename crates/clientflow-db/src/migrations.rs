//! # Database Migrations
//!
//! Embedded SQL migrations for the ClientFlow ledger.
//!
//! ## Adding New Migrations
//!
//! 1. Create a new file in `migrations/sqlite/` with the next sequence number
//! 2. Name format: `NNN_description.sql` (e.g., `004_add_suppliers.sql`)
//! 3. Additive only: `CREATE TABLE IF NOT EXISTS` / `ALTER TABLE ADD COLUMN`
//! 4. **NEVER** modify existing migrations - always add new ones
//!
//! Additive-only evolution is what lets the engine open a store written by a
//! prior schema version: missing optional columns are added with NULL
//! defaults, never an error.

use sqlx::SqlitePool;
use tracing::info;

use crate::error::LedgerResult;

/// Embedded migrations from the `migrations/sqlite` directory.
///
/// The `sqlx::migrate!()` macro embeds all SQL files from the directory into
/// the binary at compile time; no runtime file access needed.
static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations/sqlite");

/// Runs all pending database migrations.
///
/// ## Safety
/// - Idempotent: safe to run multiple times
/// - Transactional: each migration runs in a transaction
/// - Ordered: migrations run in filename order (001, 002, ...)
pub async fn run_migrations(pool: &SqlitePool) -> LedgerResult<()> {
    info!("Checking for pending migrations");

    MIGRATOR.run(pool).await?;

    info!("All migrations applied successfully");
    Ok(())
}

/// Returns information about migrations.
///
/// ## Returns
/// Tuple of (total_migrations, applied_migrations), for diagnostics.
pub async fn migration_status(pool: &SqlitePool) -> LedgerResult<(usize, usize)> {
    let total = MIGRATOR.migrations.len();

    let applied: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
        .fetch_one(pool)
        .await
        .unwrap_or(0);

    Ok((total, applied as usize))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    #[tokio::test]
    async fn test_all_migrations_apply() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let (total, applied) = migration_status(db.pool()).await.unwrap();
        assert_eq!(total, applied);
        assert!(total >= 3);
    }

    #[tokio::test]
    async fn test_additive_columns_present() {
        // The evolved shape must expose the optional columns with NULL
        // defaults for rows inserted under the old schema.
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        sqlx::query("INSERT INTO clients (name, phone) VALUES ('Ancien Client', NULL)")
            .execute(db.pool())
            .await
            .unwrap();

        let (address, email): (Option<String>, Option<String>) =
            sqlx::query_as("SELECT address, email FROM clients WHERE name = 'Ancien Client'")
                .fetch_one(db.pool())
                .await
                .unwrap();

        assert!(address.is_none());
        assert!(email.is_none());
    }
}
