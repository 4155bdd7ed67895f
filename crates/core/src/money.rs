//! Fixed-point money representation.
//!
//! All monetary values are held as `rust_decimal::Decimal` at a fixed scale
//! of 2 fractional digits. Amounts are constructed from decimal strings or
//! integer cents, never from binary floating-point literals, so arithmetic
//! never loses precision to float representation. Rounding happens only at
//! explicitly documented points (percentage computation, scalar products).

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Sub};
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::MONEY_SCALE;

/// Errors from money construction and arithmetic.
#[derive(Error, Debug)]
pub enum MoneyError {
    #[error("Division by zero")]
    DivisionByZero,

    #[error("Amount {0} has more than {MONEY_SCALE} decimal places")]
    InvalidScale(Decimal),

    #[error("Failed to parse amount: {0}")]
    Parse(#[from] rust_decimal::Error),
}

/// A currency amount with a fixed scale of 2 fractional digits.
///
/// Serializes as the underlying decimal, which renders with exactly
/// 2 decimal places (e.g. `"2300.00"`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct MoneyAmount(Decimal);

impl MoneyAmount {
    /// Zero at the canonical scale.
    pub fn zero() -> Self {
        MoneyAmount(Decimal::new(0, MONEY_SCALE))
    }

    /// Builds an amount from integer cents (e.g. `230000` -> `2300.00`).
    pub fn from_cents(cents: i64) -> Self {
        MoneyAmount(Decimal::new(cents, MONEY_SCALE))
    }

    /// Validates that `value` fits in the canonical scale and normalizes it.
    pub fn try_new(value: Decimal) -> Result<Self, MoneyError> {
        if value.scale() > MONEY_SCALE {
            return Err(MoneyError::InvalidScale(value));
        }
        let mut normalized = value;
        normalized.rescale(MONEY_SCALE);
        Ok(MoneyAmount(normalized))
    }

    /// The underlying decimal value.
    pub fn amount(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Multiplies by a scalar, rounding half-up back to the canonical scale.
    pub fn mul_scalar(&self, factor: Decimal) -> Self {
        let mut product = (self.0 * factor)
            .round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero);
        product.rescale(MONEY_SCALE);
        MoneyAmount(product)
    }

    /// Divides by a scalar, rounding half-up at the canonical scale.
    pub fn div_scalar(&self, divisor: Decimal) -> Result<Self, MoneyError> {
        if divisor.is_zero() {
            return Err(MoneyError::DivisionByZero);
        }
        let mut quotient = (self.0 / divisor)
            .round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero);
        quotient.rescale(MONEY_SCALE);
        Ok(MoneyAmount(quotient))
    }

    /// Divides by another amount, rounding half-up at `scale` decimal digits.
    ///
    /// Returns the raw ratio as a `Decimal` (not an amount); callers must
    /// guard against a zero divisor or handle `DivisionByZero`.
    pub fn div_with_rounding(&self, divisor: MoneyAmount, scale: u32) -> Result<Decimal, MoneyError> {
        if divisor.is_zero() {
            return Err(MoneyError::DivisionByZero);
        }
        Ok((self.0 / divisor.0).round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero))
    }
}

impl TryFrom<Decimal> for MoneyAmount {
    type Error = MoneyError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        MoneyAmount::try_new(value)
    }
}

impl From<MoneyAmount> for Decimal {
    fn from(value: MoneyAmount) -> Self {
        value.0
    }
}

impl FromStr for MoneyAmount {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = Decimal::from_str(s)?;
        MoneyAmount::try_new(value)
    }
}

impl Add for MoneyAmount {
    type Output = MoneyAmount;

    // Exact: both operands carry the canonical scale.
    fn add(self, rhs: MoneyAmount) -> MoneyAmount {
        MoneyAmount(self.0 + rhs.0)
    }
}

impl Sub for MoneyAmount {
    type Output = MoneyAmount;

    fn sub(self, rhs: MoneyAmount) -> MoneyAmount {
        MoneyAmount(self.0 - rhs.0)
    }
}

impl Sum for MoneyAmount {
    fn sum<I: Iterator<Item = MoneyAmount>>(iter: I) -> MoneyAmount {
        iter.fold(MoneyAmount::zero(), Add::add)
    }
}

impl fmt::Display for MoneyAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
