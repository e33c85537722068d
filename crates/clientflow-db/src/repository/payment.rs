//! # Payment Repository
//!
//! Database operations for payments against sales.
//!
//! ## The Overpayment Ceiling
//! ```text
//! remaining = sale.total − Σ payments        (floored at zero on reads)
//!
//! add_payment(amount)      rejected when amount > remaining
//! update_payment(amount)   rejected when amount > total − Σ other payments
//! ```
//! The ceiling check and the insert happen inside the same transaction, so
//! two racing payments cannot both pass the check and jointly overshoot the
//! total. A rejected payment leaves the store exactly as it was.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{LedgerError, LedgerResult};
use clientflow_core::validation::validate_payment_amount;
use clientflow_core::{Money, Payment, PaymentMethod};
use chrono::NaiveDate;

/// Repository for payment database operations.
#[derive(Debug, Clone)]
pub struct PaymentRepository {
    pool: SqlitePool,
}

impl PaymentRepository {
    /// Creates a new PaymentRepository.
    pub fn new(pool: SqlitePool) -> Self {
        PaymentRepository { pool }
    }

    /// Records a payment against a sale.
    ///
    /// The amount must be strictly positive and must not exceed the sale's
    /// remaining balance at the moment of the write.
    ///
    /// ## Returns
    /// The id assigned by the store.
    pub async fn add_payment(
        &self,
        sale_id: i64,
        date: NaiveDate,
        amount: Money,
        method: PaymentMethod,
        note: Option<&str>,
    ) -> LedgerResult<i64> {
        validate_payment_amount(amount)?;

        debug!(sale_id = %sale_id, amount = %amount, "Recording payment");

        let mut tx = self.pool.begin().await?;

        let total: Option<i64> =
            sqlx::query_scalar("SELECT total_millimes FROM sales WHERE id = ?1")
                .bind(sale_id)
                .fetch_optional(&mut *tx)
                .await?;
        let total = total.ok_or_else(|| LedgerError::not_found("Sale", sale_id))?;

        let paid: i64 = sqlx::query_scalar(
            "SELECT IFNULL(SUM(amount_millimes), 0) FROM payments WHERE sale_id = ?1",
        )
        .bind(sale_id)
        .fetch_one(&mut *tx)
        .await?;

        let remaining = (total - paid).max(0);
        if amount.millimes() > remaining {
            return Err(LedgerError::Overpayment {
                sale_id,
                attempted_millimes: amount.millimes(),
                remaining_millimes: remaining,
            });
        }

        let result = sqlx::query(
            "INSERT INTO payments (sale_id, date, amount_millimes, method, note) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(sale_id)
        .bind(date)
        .bind(amount.millimes())
        .bind(method)
        .bind(note)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(result.last_insert_rowid())
    }

    /// Updates a payment's amount and method.
    ///
    /// The ceiling excludes the payment's own current amount: the new value
    /// must fit in `total − Σ other payments`. Date and note are immutable;
    /// delete and re-record to change them.
    pub async fn update_payment(
        &self,
        id: i64,
        amount: Money,
        method: PaymentMethod,
    ) -> LedgerResult<()> {
        validate_payment_amount(amount)?;

        debug!(id = %id, amount = %amount, "Updating payment");

        let mut tx = self.pool.begin().await?;

        let sale_id: Option<i64> =
            sqlx::query_scalar("SELECT sale_id FROM payments WHERE id = ?1")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        let sale_id = sale_id.ok_or_else(|| LedgerError::not_found("Payment", id))?;

        let total: i64 = sqlx::query_scalar("SELECT total_millimes FROM sales WHERE id = ?1")
            .bind(sale_id)
            .fetch_one(&mut *tx)
            .await?;

        let others: i64 = sqlx::query_scalar(
            "SELECT IFNULL(SUM(amount_millimes), 0) FROM payments \
             WHERE sale_id = ?1 AND id <> ?2",
        )
        .bind(sale_id)
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        let ceiling = (total - others).max(0);
        if amount.millimes() > ceiling {
            return Err(LedgerError::Overpayment {
                sale_id,
                attempted_millimes: amount.millimes(),
                remaining_millimes: ceiling,
            });
        }

        sqlx::query("UPDATE payments SET amount_millimes = ?2, method = ?3 WHERE id = ?1")
            .bind(id)
            .bind(amount.millimes())
            .bind(method)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Deletes a payment, restoring the sale's remaining balance.
    ///
    /// Idempotent.
    pub async fn delete_payment(&self, id: i64) -> LedgerResult<()> {
        debug!(id = %id, "Deleting payment");

        sqlx::query("DELETE FROM payments WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Lists payments for a sale, most recent first.
    pub async fn list_for_sale(&self, sale_id: i64) -> LedgerResult<Vec<Payment>> {
        let payments = sqlx::query_as::<_, Payment>(
            "SELECT id, sale_id, date, amount_millimes, method, note \
             FROM payments WHERE sale_id = ?1 ORDER BY date DESC, id DESC",
        )
        .bind(sale_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(payments)
    }

    /// Total paid against a sale.
    pub async fn total_paid(&self, sale_id: i64) -> LedgerResult<Money> {
        let paid: i64 = sqlx::query_scalar(
            "SELECT IFNULL(SUM(amount_millimes), 0) FROM payments WHERE sale_id = ?1",
        )
        .bind(sale_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(Money::from_millimes(paid))
    }

    /// Remaining balance for a sale, floored at zero.
    ///
    /// A sale whose total was edited below the paid sum reports zero here,
    /// never a negative figure.
    pub async fn remaining_for_sale(&self, sale_id: i64) -> LedgerResult<Money> {
        let total: Option<i64> =
            sqlx::query_scalar("SELECT total_millimes FROM sales WHERE id = ?1")
                .bind(sale_id)
                .fetch_optional(&self.pool)
                .await?;
        let total = total.ok_or_else(|| LedgerError::not_found("Sale", sale_id))?;

        let paid = self.total_paid(sale_id).await?;

        Ok(Money::from_millimes(total - paid.millimes()).floor_zero())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
