//! # clientflow-core: Pure Business Logic for the ClientFlow Ledger
//!
//! The heart of the credit ledger: entity types, money arithmetic, input
//! validation and reference generation, all as pure code with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                   ClientFlow Architecture                           │
//! │                                                                     │
//! │  ┌─────────────────────────────────────────────────────────────┐   │
//! │  │        Presentation & report rendering (excluded)           │   │
//! │  └────────────────────────────┬────────────────────────────────┘   │
//! │                               │                                     │
//! │  ┌────────────────────────────▼────────────────────────────────┐   │
//! │  │            ★ clientflow-core (THIS CRATE) ★                 │   │
//! │  │                                                             │   │
//! │  │  ┌─────────┐ ┌─────────┐ ┌────────────┐ ┌────────────┐    │   │
//! │  │  │  types  │ │  money  │ │ validation │ │ reference  │    │   │
//! │  │  └─────────┘ └─────────┘ └────────────┘ └────────────┘    │   │
//! │  │                                                             │   │
//! │  │  NO I/O • NO DATABASE • PURE FUNCTIONS                      │   │
//! │  └────────────────────────────┬────────────────────────────────┘   │
//! │                               │                                     │
//! │  ┌────────────────────────────▼────────────────────────────────┐   │
//! │  │              clientflow-db (Database Layer)                 │   │
//! │  │        SQLite queries, migrations, repositories             │   │
//! │  └─────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//!
//! 1. **Pure functions**: deterministic, no side effects
//! 2. **Integer money**: all monetary values are i64 millimes, never floats
//! 3. **Explicit errors**: typed errors, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod reference;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::ValidationError;
pub use money::Money;
pub use types::*;
