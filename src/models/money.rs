//! Money type for transaction amounts
//!
//! Amounts are whole cents in an `i64`, so totals are exact: summing in any
//! order gives the same result and `income - expense == balance` holds
//! without a tolerance. The type carries no currency; a symbol is applied
//! only when formatting.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub};

/// An amount in minor units (cents)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Largest magnitude accepted from documents or user input, in cents
    /// (ten trillion currency units). Arithmetic saturates at the `i64` bounds.
    pub const LIMIT_CENTS: i64 = 1_000_000_000_000_000;

    /// Create an amount from cents
    ///
    /// # Examples
    /// ```
    /// use expense_tracker::models::Money;
    /// let coffee = Money::from_cents(349);
    /// assert_eq!(coffee.to_string(), "3.49");
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Convert a stored decimal amount, rounding to the nearest cent
    ///
    /// `None` for NaN, infinities and magnitudes above [`Money::LIMIT_CENTS`].
    pub fn from_decimal(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        let cents = (value * 100.0).round();
        (cents.abs() <= Self::LIMIT_CENTS as f64).then(|| Self(cents as i64))
    }

    pub const fn zero() -> Self {
        Self(0)
    }

    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Decimal form written into stored documents
    pub fn to_decimal(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    pub const fn abs(&self) -> Self {
        Self(self.0.saturating_abs())
    }

    /// Share of `total` in percent, 0.0 when the total is zero
    pub fn percentage_of(&self, total: Money) -> f64 {
        if total.is_zero() {
            return 0.0;
        }
        self.0 as f64 * 100.0 / total.0 as f64
    }

    /// Parse user or document text such as `"250"`, `"49.99"`, `"₹1,250.5"`
    /// or `"-12"`
    ///
    /// A leading currency symbol and digit-group commas are ignored; the sign
    /// may come before or after the symbol (`-₹12`, `₹-12`). Digits past the
    /// second decimal place are truncated.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let invalid = || MoneyParseError::InvalidFormat(s.trim().to_string());

        let text = s.trim();
        let (mut negative, text) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text),
        };
        let mut text = text.trim_start_matches(|c: char| !c.is_ascii_digit() && c != '.' && c != '-');
        if let Some(rest) = text.strip_prefix('-') {
            if negative {
                return Err(invalid());
            }
            negative = true;
            text = rest;
        }
        let text: String = text
            .chars()
            .filter(|c| *c != ',')
            .collect();

        let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), ""));
        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid());
        }
        if !whole.chars().all(|c| c.is_ascii_digit()) || !fraction.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }

        let units: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid())?
        };
        let cents = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => fraction[..2].parse::<i64>().map_err(|_| invalid())?,
        };

        let total = units
            .checked_mul(100)
            .and_then(|c| c.checked_add(cents))
            .filter(|c| *c <= Self::LIMIT_CENTS)
            .ok_or_else(invalid)?;
        Ok(Self(if negative { -total } else { total }))
    }

    /// Format with a currency symbol, sign first: `-₹12.00`
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let mut out = String::new();
        if self.is_negative() {
            out.push('-');
        }
        out.push_str(symbol);
        out.push_str(&self.abs().to_string());
        out
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_negative() { "-" } else { "" };
        let cents = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, cents / 100, cents % 100)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(self.0.saturating_neg())
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid amount: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stored_decimals_round_to_cents() {
        assert_eq!(Money::from_decimal(100.0).unwrap().cents(), 10000);
        assert_eq!(Money::from_decimal(0.1 + 0.2).unwrap().cents(), 30);
        assert_eq!(Money::from_decimal(49.999).unwrap().cents(), 5000);
        assert!(Money::from_decimal(f64::NAN).is_none());
        assert!(Money::from_decimal(f64::NEG_INFINITY).is_none());
        assert!(Money::from_decimal(1e30).is_none());
        assert!(Money::from_decimal(5e16).is_none());
        assert_eq!(Money::from_decimal(1e13).unwrap().cents(), Money::LIMIT_CENTS);
    }

    #[test]
    fn test_display_and_symbol() {
        assert_eq!(Money::from_cents(4000).to_string(), "40.00");
        assert_eq!(Money::from_cents(7).to_string(), "0.07");
        assert_eq!(Money::from_cents(-2500).to_string(), "-25.00");
        assert_eq!(Money::from_cents(-5).to_string(), "-0.05");
        assert_eq!(Money::from_cents(12550).format_with_symbol("₹"), "₹125.50");
        assert_eq!(Money::from_cents(-2500).format_with_symbol("₹"), "-₹25.00");
    }

    #[test]
    fn test_parse_user_input() {
        assert_eq!(Money::parse("250").unwrap().cents(), 25000);
        assert_eq!(Money::parse(" 49.99 ").unwrap().cents(), 4999);
        assert_eq!(Money::parse("₹1,250.5").unwrap().cents(), 125050);
        assert_eq!(Money::parse("$.75").unwrap().cents(), 75);
        assert_eq!(Money::parse("3.999").unwrap().cents(), 399);
        assert_eq!(Money::parse("-12").unwrap().cents(), -1200);
        assert_eq!(Money::parse("-₹12").unwrap().cents(), -1200);
        assert_eq!(Money::parse("₹-12").unwrap().cents(), -1200);
        assert_eq!(Money::parse("$ -0.50").unwrap().cents(), -50);

        for bad in ["", "₹", "lots", "1.2.3", "12a", "--12", "-₹-12", "1-2", "50000000000000000"] {
            assert!(Money::parse(bad).is_err(), "{bad:?} should not parse");
        }
    }

    #[test]
    fn test_balance_arithmetic() {
        let income = Money::from_cents(10000);
        let expense = Money::from_cents(12500);
        let balance = income - expense;

        assert_eq!(balance.cents(), -2500);
        assert_eq!(balance + expense, income);
        assert_eq!((-balance).abs(), balance.abs());
    }

    #[test]
    fn test_arithmetic_saturates_instead_of_overflowing() {
        let huge = Money::from_cents(i64::MAX - 1);
        assert_eq!((huge + huge).cents(), i64::MAX);
        assert_eq!((-huge - huge).cents(), i64::MIN);
        assert_eq!((-Money::from_cents(i64::MIN)).cents(), i64::MAX);

        let mut total = huge;
        total += Money::from_cents(10);
        assert_eq!(total.cents(), i64::MAX);
        let summed: Money = [huge, huge, huge].iter().sum();
        assert_eq!(summed.cents(), i64::MAX);
    }

    #[test]
    fn test_totals_are_order_independent() {
        let amounts = [Money::from_cents(10), Money::from_cents(20), Money::from_cents(30)];
        let forward: Money = amounts.iter().sum();
        let backward: Money = amounts.iter().rev().copied().sum();
        assert_eq!(forward, backward);
        assert_eq!(forward.cents(), 60);
    }

    #[test]
    fn test_percentage_of() {
        let food = Money::from_cents(4000);
        assert!((food.percentage_of(Money::from_cents(12500)) - 32.0).abs() < 1e-9);
        assert_eq!(food.percentage_of(Money::zero()), 0.0);
    }

    #[test]
    fn test_serializes_as_cents() {
        let amount = Money::from_cents(4999);
        assert_eq!(serde_json::to_string(&amount).unwrap(), "4999");
        let back: Money = serde_json::from_str("4999").unwrap();
        assert_eq!(back, amount);
    }
}
