//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                         │
//! │                                                                     │
//! │  In floating point:                                                 │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                       │
//! │                                                                     │
//! │  OUR SOLUTION: Integer Millimes                                     │
//! │    Amounts are i64 counts of the smallest unit (1/1000 DT), so     │
//! │    payment-ceiling and total-derivation checks are exact equality  │
//! │    with no rounding tolerance to tune.                             │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use clientflow_core::money::Money;
//!
//! // Create from millimes (preferred)
//! let price = Money::from_millimes(12_500); // 12.500 DT
//!
//! // Arithmetic operations
//! let total = price * 3;                    // 37.500 DT
//! let rest = total - Money::from_millimes(30_000); // 7.500 DT
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in millimes (1/1000 of a dinar), the smallest currency
/// unit used by the ledger.
///
/// ## Design Decisions
/// - **i64 (signed)**: intermediate results of `total - paid` may go
///   negative before the read-side clamp is applied
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Derives**: full serde support for serialization by outer layers
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from millimes (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use clientflow_core::money::Money;
    ///
    /// let price = Money::from_millimes(12_500); // 12.500 DT
    /// assert_eq!(price.millimes(), 12_500);
    /// ```
    #[inline]
    pub const fn from_millimes(millimes: i64) -> Self {
        Money(millimes)
    }

    /// Creates a Money value from whole dinars.
    ///
    /// ## Example
    /// ```rust
    /// use clientflow_core::money::Money;
    ///
    /// assert_eq!(Money::from_dinars(50).millimes(), 50_000);
    /// ```
    #[inline]
    pub const fn from_dinars(dinars: i64) -> Self {
        Money(dinars * 1000)
    }

    /// Returns the value in millimes.
    #[inline]
    pub const fn millimes(&self) -> i64 {
        self.0
    }

    /// Returns the whole-dinar portion.
    #[inline]
    pub const fn dinars(&self) -> i64 {
        self.0 / 1000
    }

    /// Returns the millime portion (always 0-999).
    #[inline]
    pub const fn millimes_part(&self) -> i64 {
        (self.0 % 1000).abs()
    }

    /// Zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Clamps the value at zero.
    ///
    /// Derived remainders (`total - paid`) must never be reported negative,
    /// even if a sale's total was later edited below the amount already paid.
    ///
    /// ## Example
    /// ```rust
    /// use clientflow_core::money::Money;
    ///
    /// assert_eq!(Money::from_millimes(-500).floor_zero(), Money::zero());
    /// assert_eq!(Money::from_millimes(500).floor_zero().millimes(), 500);
    /// ```
    #[inline]
    pub const fn floor_zero(&self) -> Self {
        if self.0 < 0 {
            Money(0)
        } else {
            *self
        }
    }

    /// Multiplies money by a quantity.
    ///
    /// Line totals are `unit_price × quantity`; quantities are integers so
    /// the result is exact.
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows the amount with three decimals and the DT suffix, matching
/// how the presentation layer renders balances.
///
/// This is for debugging and logs; the UI applies its own localization.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}{}.{:03} DT",
            sign,
            self.dinars().abs(),
            self.millimes_part()
        )
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by integer quantity.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

/// Summation, for deriving sale totals from line totals.
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
