//! Monetary types for the market simulation.
//!
//! Prices in this market are whole currency units (every update rounds to the
//! nearest integer and clamps at the floor of 1), so [`Price`] wraps an `i64`.
//! Cash balances and holdings are fractional (buying half your cash worth of
//! an asset at 240 leaves you with 20.8333... units), so [`Cash`] and
//! [`Quantity`] wrap `f64`.

use derive_more::{Add, AddAssign, From, Into, Neg, Sub, SubAssign, Sum};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Div, Mul};

// =============================================================================
// Price Type (whole currency units)
// =============================================================================

/// An asset price in whole currency units.
///
/// # Examples
/// - `Price(240)` = $240
/// - `Price(1)` = the price floor
#[derive(
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Default,
    Add,
    Sub,
    AddAssign,
    SubAssign,
    From,
    Into,
)]
pub struct Price(pub i64);

impl Price {
    pub const ZERO: Price = Price(0);

    /// Lowest price any asset can reach.
    pub const FLOOR: Price = Price(1);

    /// Create a Price from a floating-point value, rounding to the nearest unit.
    #[inline]
    pub fn from_float(v: f64) -> Self {
        Self(v.round() as i64)
    }

    /// Convert to floating-point for percentage/valuation math.
    #[inline]
    pub fn to_float(self) -> f64 {
        self.0 as f64
    }

    /// Raw internal value.
    #[inline]
    pub fn raw(self) -> i64 {
        self.0
    }

    /// Check if price is positive.
    #[inline]
    pub fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Clamp to the market price floor.
    #[inline]
    pub fn clamp_floor(self) -> Self {
        Self(self.0.max(Self::FLOOR.0))
    }
}

impl fmt::Debug for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Price(${})", self.0)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.0)
    }
}

// Allow `price == 240` comparisons in call sites and tests
impl PartialEq<i64> for Price {
    fn eq(&self, other: &i64) -> bool {
        self.0 == *other
    }
}

// =============================================================================
// Cash Type (fractional balances)
// =============================================================================

/// A cash amount or balance. Fractional; signed so realized losses and
/// mark-to-market values can be expressed, though the ledger keeps the
/// account balance itself non-negative.
#[derive(
    Clone,
    Copy,
    PartialEq,
    PartialOrd,
    Serialize,
    Deserialize,
    Default,
    Add,
    Sub,
    Neg,
    AddAssign,
    SubAssign,
    Sum,
    From,
    Into,
)]
pub struct Cash(pub f64);

impl Cash {
    pub const ZERO: Cash = Cash(0.0);

    /// Raw internal value.
    #[inline]
    pub fn raw(self) -> f64 {
        self.0
    }

    /// Check if the amount is strictly positive.
    #[inline]
    pub fn is_positive(self) -> bool {
        self.0 > 0.0
    }

    /// Check if the amount is negative.
    #[inline]
    pub fn is_negative(self) -> bool {
        self.0 < 0.0
    }

    /// Absolute value.
    #[inline]
    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }

    /// Larger of two amounts.
    #[inline]
    pub fn max(self, other: Self) -> Self {
        Self(self.0.max(other.0))
    }
}

impl fmt::Debug for Cash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cash(${:.2})", self.0)
    }
}

impl fmt::Display for Cash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

impl PartialEq<f64> for Cash {
    fn eq(&self, other: &f64) -> bool {
        self.0 == *other
    }
}

// =============================================================================
// Quantity Type (fractional holdings)
// =============================================================================

/// Units of an asset held. Fractional holdings are allowed.
#[derive(
    Clone,
    Copy,
    PartialEq,
    PartialOrd,
    Serialize,
    Deserialize,
    Default,
    Add,
    Sub,
    AddAssign,
    SubAssign,
    Sum,
    From,
    Into,
)]
pub struct Quantity(pub f64);

impl Quantity {
    pub const ZERO: Quantity = Quantity(0.0);

    /// Raw internal value.
    #[inline]
    pub fn raw(self) -> f64 {
        self.0
    }

    /// Check if no units are held.
    #[inline]
    pub fn is_zero(self) -> bool {
        self.0 <= 0.0
    }

    /// Smaller of two quantities.
    #[inline]
    pub fn min(self, other: Self) -> Self {
        Self(self.0.min(other.0))
    }
}

impl fmt::Debug for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Qty({:.4})", self.0)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}", self.0)
    }
}

impl PartialEq<f64> for Quantity {
    fn eq(&self, other: &f64) -> bool {
        self.0 == *other
    }
}

// =============================================================================
// Cross-Type Operations
// =============================================================================

impl Mul<f64> for Cash {
    type Output = Cash;

    /// Scale a cash amount by a fraction.
    fn mul(self, fraction: f64) -> Cash {
        Cash(self.0 * fraction)
    }
}

impl Mul<f64> for Quantity {
    type Output = Quantity;

    fn mul(self, fraction: f64) -> Quantity {
        Quantity(self.0 * fraction)
    }
}

impl Div<Price> for Cash {
    type Output = Quantity;

    /// Units purchasable for this amount at the given price.
    fn div(self, price: Price) -> Quantity {
        Quantity(self.0 / price.to_float())
    }
}

impl Mul<Price> for Quantity {
    type Output = Cash;

    /// Market value of this many units at the given price.
    fn mul(self, price: Price) -> Cash {
        Cash(self.0 * price.to_float())
    }
}

impl Mul<Quantity> for Price {
    type Output = Cash;

    fn mul(self, qty: Quantity) -> Cash {
        Cash(self.to_float() * qty.0)
    }
}

impl Div<Quantity> for Quantity {
    type Output = f64;

    /// Fraction this quantity represents of another.
    fn div(self, other: Quantity) -> f64 {
        self.0 / other.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_rounding_and_floor() {
        assert_eq!(Price::from_float(239.6), 240);
        assert_eq!(Price::from_float(0.2), 0);
        assert_eq!(Price::from_float(0.2).clamp_floor(), Price::FLOOR);
        assert_eq!(Price(500).clamp_floor(), 500);
    }

    #[test]
    fn test_cash_price_quantity_arithmetic() {
        let cost = Cash(10_000.0) * 0.5;
        assert_eq!(cost, 5_000.0);

        let qty = cost / Price(240);
        assert!((qty.raw() - 20.833_333_333).abs() < 1e-6);

        let back = qty * Price(240);
        assert!((back.raw() - 5_000.0).abs() < 1e-9);
        assert_eq!(Price(240) * qty, back);
    }

    #[test]
    fn test_quantity_fraction() {
        let frac = Quantity(5.0) / Quantity(20.0);
        assert!((frac - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_display() {
        assert_eq!(Price(240).to_string(), "$240");
        assert_eq!(Cash(5000.0).to_string(), "$5000.00");
        assert_eq!(Quantity(20.8333).to_string(), "20.8333");
    }
}
