//! # Ledger Error Types
//!
//! The caller-facing error taxonomy for ledger operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                │
//! │                                                                     │
//! │  SQLite Error (sqlx::Error)                                         │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  LedgerError (this module) ← adds context and categorization        │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  Presentation layer renders a user-facing message                   │
//! │                                                                     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Validation and overpayment errors are expected and recoverable: they
//! carry the offending field and bounds so the caller can present actionable
//! feedback. Consistency errors are defects (an invariant broke outside the
//! engine) and are logged before being surfaced, never silently corrected.

use clientflow_core::ValidationError;
use thiserror::Error;

/// Ledger operation errors.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Malformed or out-of-range input.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Entity not found where absence is not tolerated (e.g. updating a
    /// missing sale). Deletes of absent ids are no-ops, not errors.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: i64 },

    /// A payment would push the paid sum past the sale total (invariant I1).
    ///
    /// Carries the attempted amount and the remaining balance so the caller
    /// can show the allowed ceiling.
    #[error(
        "Payment of {attempted_millimes} millimes exceeds remaining balance \
         of {remaining_millimes} millimes on sale {sale_id}"
    )]
    Overpayment {
        sale_id: i64,
        attempted_millimes: i64,
        remaining_millimes: i64,
    },

    /// A stored sale total disagrees with the sum of its item lines
    /// (invariant I2). Should never occur when all writes go through the
    /// engine; surfaced rather than silently repaired.
    #[error(
        "Sale {sale_id} total is inconsistent: stored {stored_millimes} \
         millimes, items sum to {derived_millimes} millimes"
    )]
    Consistency {
        sale_id: i64,
        stored_millimes: i64,
        derived_millimes: i64,
    },

    /// Database connection failed.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Foreign key constraint violation.
    #[error("Foreign key violation: {message}")]
    ForeignKeyViolation { message: String },

    /// Pool exhausted (all connections in use).
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Internal database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl LedgerError {
    /// Creates a NotFound error for a given entity type and id.
    pub fn not_found(entity: impl Into<String>, id: i64) -> Self {
        LedgerError::NotFound {
            entity: entity.into(),
            id,
        }
    }
}

/// Convert sqlx errors to LedgerError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::RowNotFound    → LedgerError::NotFound (id unknown)
/// sqlx::Error::Database       → analyze message for constraint type
/// sqlx::Error::PoolTimedOut   → LedgerError::PoolExhausted
/// Other                       → LedgerError::Internal
/// ```
impl From<sqlx::Error> for LedgerError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => LedgerError::NotFound {
                entity: "Record".to_string(),
                id: -1,
            },

            sqlx::Error::Database(db_err) => {
                let msg = db_err.message();

                if msg.contains("FOREIGN KEY constraint failed") {
                    LedgerError::ForeignKeyViolation {
                        message: msg.to_string(),
                    }
                } else {
                    LedgerError::QueryFailed(msg.to_string())
                }
            }

            sqlx::Error::PoolTimedOut => LedgerError::PoolExhausted,

            sqlx::Error::PoolClosed => LedgerError::ConnectionFailed("Pool is closed".to_string()),

            _ => LedgerError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for LedgerError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        LedgerError::MigrationFailed(err.to_string())
    }
}

/// Result type for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;
