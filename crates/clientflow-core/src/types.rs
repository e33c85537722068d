//! # Domain Types
//!
//! Core domain types for the ClientFlow ledger.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                │
//! │                                                                     │
//! │  ┌──────────────┐   ┌──────────────┐   ┌──────────────┐            │
//! │  │   Client     │   │    Sale      │   │   Payment    │            │
//! │  │  ──────────  │   │  ──────────  │   │  ──────────  │            │
//! │  │  id (i64)    │◄──│  client_id   │◄──│  sale_id     │            │
//! │  │  name        │   │  reference   │   │  method      │            │
//! │  │  phone/email │   │  total       │   │  amount      │            │
//! │  └──────────────┘   └──────┬───────┘   └──────────────┘            │
//! │                            │                                        │
//! │  ┌──────────────┐   ┌──────▼───────┐                               │
//! │  │  Category    │   │  SaleItem    │                               │
//! │  │  ──────────  │   │  ──────────  │                               │
//! │  │  id, name    │◄┐ │  product_id? │  (price snapshot, survives    │
//! │  └──────────────┘ │ │  quantity    │   product deletion)           │
//! │  ┌──────────────┐ │ │  unit_price  │                               │
//! │  │  Product     │─┘ └──────────────┘                               │
//! │  │  category_id?│                                                  │
//! │  └──────────────┘                                                  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Identifiers are opaque `i64` surrogate keys assigned monotonically by the
//! store (SQLite rowids). Monetary fields are raw millime counts so the
//! structs map 1:1 onto database rows; use the `Money` accessors for math.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Catalog
// =============================================================================

/// A grouping label on products, used for aggregate quantity reporting only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

/// A product available for sale.
///
/// Deleting a product does not touch historical sale items; their snapshot
/// fields keep the description and price as sold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    pub id: i64,
    pub name: String,
    /// Unit price in millimes.
    pub unit_price_millimes: i64,
    /// Owning category; nulled when the category is deleted.
    pub category_id: Option<i64>,
}

impl Product {
    /// Returns the unit price as a Money type.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_millimes(self.unit_price_millimes)
    }
}

// =============================================================================
// Client
// =============================================================================

/// A customer holding credit with the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Client {
    pub id: i64,
    pub name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub email: Option<String>,
}

// =============================================================================
// Payment Method
// =============================================================================

/// How a payment was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Physical cash payment.
    Cash,
    /// Card payment.
    Card,
    /// Check payment.
    Check,
    /// Bank transfer.
    BankTransfer,
}

// =============================================================================
// Sale
// =============================================================================

/// A billable transaction for one client.
///
/// `total_millimes` is either supplied directly (legacy free-form sale) or
/// derived from the sale's items. When item rows exist the stored total must
/// equal the sum of their line totals; item-affecting writes recompute it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Sale {
    pub id: i64,
    pub client_id: i64,
    pub date: NaiveDate,
    /// Human-readable label; uniqueness is advisory (see `reference` module).
    pub reference: String,
    pub description: Option<String>,
    pub total_millimes: i64,
}

impl Sale {
    /// Returns the total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_millimes(self.total_millimes)
    }
}

// =============================================================================
// Sale Item
// =============================================================================

/// A line item in a sale.
///
/// Uses the snapshot pattern: description and unit price are frozen at time
/// of sale so later product edits or deletions never rewrite history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SaleItem {
    pub id: i64,
    pub sale_id: i64,
    /// Referenced product; nulled when the product is deleted.
    pub product_id: Option<i64>,
    /// Description at time of sale (frozen).
    pub description: String,
    /// Quantity sold. Zero is allowed (a struck line contributes nothing).
    pub quantity: i64,
    /// Unit price in millimes at time of sale (frozen).
    pub unit_price_millimes: i64,
    /// Line total (unit_price × quantity).
    pub line_total_millimes: i64,
}

impl SaleItem {
    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_millimes(self.unit_price_millimes)
    }

    /// Returns the line total as Money.
    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_millimes(self.line_total_millimes)
    }
}

// =============================================================================
// Payment
// =============================================================================

/// A monetary credit applied against a sale's outstanding balance.
///
/// The note is immutable after creation; only amount and method can change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Payment {
    pub id: i64,
    pub sale_id: i64,
    pub date: NaiveDate,
    /// Amount paid in millimes (always positive).
    pub amount_millimes: i64,
    pub method: PaymentMethod,
    pub note: Option<String>,
}

impl Payment {
    /// Returns the payment amount as Money.
    #[inline]
    pub fn amount(&self) -> Money {
        Money::from_millimes(self.amount_millimes)
    }
}

// =============================================================================
// Write Shapes
// =============================================================================

/// One line of a sale being created or replaced.
///
/// Unit price and description default to the referenced product's current
/// values, snapshotted at write time. A caller may override either, and may
/// omit `product_id` entirely for a free-form line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSaleItem {
    pub product_id: Option<i64>,
    pub description: Option<String>,
    pub quantity: i64,
    /// Override for the snapshot price, in millimes.
    pub unit_price_millimes: Option<i64>,
}

impl NewSaleItem {
    /// A line for a catalog product at its current price.
    pub fn of_product(product_id: i64, quantity: i64) -> Self {
        NewSaleItem {
            product_id: Some(product_id),
            description: None,
            quantity,
            unit_price_millimes: None,
        }
    }
}

/// The content of a sale: item-backed or a direct amount.
///
/// The stored mode is determined solely by whether item rows exist after the
/// write completes, so updating with the other variant switches mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SaleBody {
    /// Item rows; the total is derived as the sum of line totals.
    Items(Vec<NewSaleItem>),
    /// Explicit total with no item rows (must be strictly positive).
    Direct(Money),
}

/// Filter for per-client sale listings.
///
/// `search` matches case-insensitively against reference and description;
/// date bounds are inclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleFilter {
    pub search: Option<String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

// =============================================================================
// Read Models
// =============================================================================

/// A sale row joined with its paid amount, for listings and reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SaleSummary {
    pub id: i64,
    pub client_id: i64,
    pub date: NaiveDate,
    pub reference: String,
    pub description: Option<String>,
    pub total_millimes: i64,
    pub paid_millimes: i64,
}

impl SaleSummary {
    /// Outstanding balance, clamped non-negative.
    #[inline]
    pub fn remaining(&self) -> Money {
        (Money::from_millimes(self.total_millimes) - Money::from_millimes(self.paid_millimes))
            .floor_zero()
    }
}

/// Per-client credit rollup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ClientBalance {
    pub client_id: i64,
    pub name: String,
    /// Sum of the client's sale totals.
    pub total_credit_millimes: i64,
    /// Sum of per-sale outstanding balances (each clamped non-negative).
    pub total_remaining_millimes: i64,
}

impl ClientBalance {
    /// Total credit extended as Money.
    #[inline]
    pub fn total_credit(&self) -> Money {
        Money::from_millimes(self.total_credit_millimes)
    }

    /// Total outstanding as Money.
    #[inline]
    pub fn total_remaining(&self) -> Money {
        Money::from_millimes(self.total_remaining_millimes)
    }
}

/// Store-wide credit totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct GlobalTotals {
    pub total_credit_millimes: i64,
    pub total_paid_millimes: i64,
    pub total_remaining_millimes: i64,
}

impl GlobalTotals {
    /// Total credit extended as Money.
    #[inline]
    pub fn total_credit(&self) -> Money {
        Money::from_millimes(self.total_credit_millimes)
    }

    /// Total paid as Money.
    #[inline]
    pub fn total_paid(&self) -> Money {
        Money::from_millimes(self.total_paid_millimes)
    }

    /// Total outstanding as Money.
    #[inline]
    pub fn total_remaining(&self) -> Money {
        Money::from_millimes(self.total_remaining_millimes)
    }
}

/// Quantity sold per category for one client.
///
/// Items whose product was deleted carry no category and are not counted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct CategoryQuantity {
    pub category_id: i64,
    pub name: String,
    pub quantity: i64,
}

// =============================================================================
// Unit Tests
// =============================================================================
