//! # clientflow-db: Storage Layer for the ClientFlow Ledger
//!
//! This crate provides database access for the ClientFlow credit ledger.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       ClientFlow Data Flow                              │
//! │                                                                         │
//! │  Caller (UI, CLI, service)                                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   clientflow-db (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │  (catalog,    │    │  (embedded)  │  │   │
//! │  │   │               │    │   client,     │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│   sale,       │    │ 001_init.sql │  │   │
//! │  │   │ WAL mode      │    │   payment,    │    │ 002_cols.sql │  │   │
//! │  │   │ FK enforced   │    │   report)     │    │ 003_idx.sql  │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite Database (single file, e.g. ./clientflow.db)                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Storage error types
//! - [`repository`] - Repository implementations (catalog, client, sale, ...)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use clientflow_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/clientflow.db")).await?;
//!
//! let client_id = db.clients().add_client("Ahmed Ben Ali", None, None, None).await?;
//! let balances = db.reports().client_balances().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{LedgerError, LedgerResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::catalog::CatalogRepository;
pub use repository::client::ClientRepository;
pub use repository::payment::PaymentRepository;
pub use repository::report::ReportRepository;
pub use repository::sale::SaleRepository;
