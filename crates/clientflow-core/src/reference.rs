//! # Sale Reference Generation
//!
//! Produces the human-readable label attached to each sale.
//!
//! ## Format
//! `V` + `yymmdd` + 4-digit suffix, e.g. `V2603011234`.
//!
//! Uniqueness is advisory only: the suffix is derived from the millisecond
//! clock, and the store enforces no unique constraint on references. Two
//! sales generated in the same millisecond would collide, which the ledger
//! tolerates (references are labels, not keys).

use chrono::{DateTime, Utc};

/// Generates a sale reference from the given instant.
///
/// ## Example
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use clientflow_core::reference::generate_reference;
///
/// let now = Utc.with_ymd_and_hms(2026, 3, 1, 10, 30, 0).unwrap();
/// let reference = generate_reference(now);
/// assert!(reference.starts_with("V260301"));
/// assert_eq!(reference.len(), 11);
/// ```
pub fn generate_reference(now: DateTime<Utc>) -> String {
    let date_part = now.format("%y%m%d");

    // 4-digit suffix in 1000..=9999 from the millisecond clock
    let suffix = 1000 + now.timestamp_millis().rem_euclid(9000);

    format!("V{}{}", date_part, suffix)
}
