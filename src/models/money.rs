//! Money type for prices and earnings
//!
//! Amounts are stored as whole cents (i64) so rates, estimates and revenue
//! totals never accumulate floating-point error.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub};

/// A currency amount in cents
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Whole currency units, e.g. `Money::from_units(45)` is 45.00
    pub const fn from_units(units: i64) -> Self {
        Self(units * 100)
    }

    pub const fn zero() -> Self {
        Self(0)
    }

    pub const fn cents(&self) -> i64 {
        self.0
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiply an hourly rate by a number of hours
    pub const fn times(&self, hours: u32) -> Self {
        Self(self.0 * hours as i64)
    }

    /// Parse an amount such as "45", "45.5", "$45.50"
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let raw = s.trim();
        let (negative, rest) = match raw.strip_prefix('-') {
            Some(stripped) => (true, stripped),
            None => (false, raw),
        };
        let rest = rest.strip_prefix('$').unwrap_or(rest);
        let invalid = || MoneyParseError::InvalidFormat(raw.to_string());

        let (whole, frac) = match rest.split_once('.') {
            Some((whole, frac)) => (whole, frac),
            None => (rest, ""),
        };
        if whole.is_empty() && frac.is_empty() {
            return Err(invalid());
        }

        let units: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid())?
        };
        let cents: i64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => frac[..2].parse().map_err(|_| invalid())?,
        };

        let total = units * 100 + cents;
        Ok(Self(if negative { -total } else { total }))
    }

    /// Format with a configurable currency symbol
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        let abs = self.0.abs();
        format!("{}{}{}.{:02}", sign, symbol, abs / 100, abs % 100)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_with_symbol("$"))
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
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

impl std::str::FromStr for Money {
    type Err = MoneyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Money::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(4550).to_string(), "$45.50");
        assert_eq!(Money::from_cents(5).to_string(), "$0.05");
        assert_eq!(Money::from_cents(-1200).to_string(), "-$12.00");
        assert_eq!(Money::from_units(80).format_with_symbol("€"), "€80.00");
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("45").unwrap().cents(), 4500);
        assert_eq!(Money::parse("$45.5").unwrap().cents(), 4550);
        assert_eq!(Money::parse("0.05").unwrap().cents(), 5);
        assert_eq!(Money::parse("-3.25").unwrap().cents(), -325);
        assert!(Money::parse("abc").is_err());
        assert!(Money::parse("").is_err());
    }

    #[test]
    fn test_times_and_sum() {
        let rate = Money::from_units(60);
        assert_eq!(rate.times(3), Money::from_units(180));

        let total: Money = vec![Money::from_units(10), Money::from_cents(250)]
            .into_iter()
            .sum();
        assert_eq!(total.cents(), 1250);
    }
}
