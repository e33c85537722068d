//! # Repository Module
//!
//! Database repository implementations for the ClientFlow ledger.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Caller                                                                 │
//! │       │  db.sales().create_sale(client_id, date, "V2603011001", ...)    │
//! │       ▼                                                                 │
//! │  SaleRepository                                                         │
//! │  ├── create_sale(&self, client_id, date, reference, description, body)  │
//! │  ├── update_sale(&self, sale_id, reference, description, body)          │
//! │  ├── delete_sale(&self, sale_id)                                        │
//! │  └── list_for_client(&self, client_id, filter)                          │
//! │       │  SQL (one transaction per mutation)                             │
//! │       ▼                                                                 │
//! │  SQLite Database                                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`catalog::CatalogRepository`] - Category and product CRUD
//! - [`client::ClientRepository`] - Client CRUD, search, deletion cascade
//! - [`sale::SaleRepository`] - Sales, line items, total derivation
//! - [`payment::PaymentRepository`] - Payments and the overpayment ceiling
//! - [`report::ReportRepository`] - Read-only balance and quantity reports

pub mod catalog;
pub mod client;
pub mod payment;
pub mod report;
pub mod sale;
