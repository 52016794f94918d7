// crates/kantine-core/src/core/money.rs
// ============================================================================
// Module: Kantine Money Model
// Description: Exact euro-cent amounts with fractional-euro wire form.
// Purpose: Keep ledger arithmetic exact while serializing as JSON numbers.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! All balances and prices are integer euro cents internally. On the wire,
//! amounts appear as fractional euros (`8.5` means 8 euros 50 cents), matching
//! the observed API contract. Deserialization rounds to whole cents and
//! rejects non-finite or out-of-range values, so every amount that enters the
//! ledger is exact.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use std::ops::AddAssign;
use std::ops::Neg;
use std::ops::Sub;
use std::ops::SubAssign;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use serde::de::Error as DeError;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Largest absolute amount accepted from the wire, in cents (ten million euros).
const MAX_ABS_CENTS: i64 = 1_000_000_000;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors produced when converting wire amounts into cents.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    /// The amount was NaN or infinite.
    #[error("amount is not a finite number")]
    NotFinite,
    /// The amount exceeds the supported range.
    #[error("amount exceeds supported range")]
    OutOfRange,
}

// ============================================================================
// SECTION: Cents
// ============================================================================

/// Exact monetary amount in euro cents.
///
/// # Invariants
/// - Positive values are credit, negative values are debt.
/// - Wire form is fractional euros with two-decimal semantics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cents(i64);

impl Cents {
    /// Zero amount.
    pub const ZERO: Self = Self(0);

    /// Creates an amount from whole cents.
    #[must_use]
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Creates an amount from fractional euros, rounding to whole cents.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError`] when the value is not finite or out of range.
    pub fn from_euros(euros: f64) -> Result<Self, MoneyError> {
        if !euros.is_finite() {
            return Err(MoneyError::NotFinite);
        }
        let scaled = (euros * 100.0).round();
        #[expect(clippy::cast_precision_loss, reason = "bound comparison only")]
        let limit = MAX_ABS_CENTS as f64;
        if scaled.abs() > limit {
            return Err(MoneyError::OutOfRange);
        }
        #[expect(clippy::cast_possible_truncation, reason = "range checked above")]
        let cents = scaled as i64;
        Ok(Self(cents))
    }

    /// Returns the amount in whole cents.
    #[must_use]
    pub const fn as_cents(self) -> i64 {
        self.0
    }

    /// Returns the amount as fractional euros.
    #[must_use]
    #[expect(clippy::cast_precision_loss, reason = "amounts are far below 2^53 cents")]
    pub fn as_euros(self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Returns the amount multiplied by a non-negative count.
    #[must_use]
    pub const fn times(self, count: u32) -> Self {
        Self(self.0 * count as i64)
    }

    /// Returns true when the amount is exactly zero.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl Add for Cents {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Cents {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Cents {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for Cents {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Neg for Cents {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl Sum for Cents {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for Cents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

impl Serialize for Cents {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_euros())
    }
}

impl<'de> Deserialize<'de> for Cents {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let euros = f64::deserialize(deserializer)?;
        Self::from_euros(euros).map_err(DeError::custom)
    }
}
