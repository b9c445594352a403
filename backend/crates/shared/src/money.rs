//! Money - integer minor units
//!
//! Balances are stored as whole cents so ledger arithmetic is exact.
//! The JSON surface speaks major units (`10.5` dollars), converted at the
//! boundary with [`Money::from_major`] / [`Money::to_major`].

use std::fmt;
use std::ops::Neg;

use serde::{Serialize, Serializer};
use thiserror::Error;

const MINOR_PER_MAJOR: i64 = 100;

/// Largest major amount accepted from clients. Keeps `f64` exact.
const MAX_MAJOR: f64 = 1_000_000_000_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoneyError {
    #[error("Amount must be a finite number")]
    NotFinite,
    #[error("Amount must not be negative")]
    Negative,
    #[error("Amount is too large")]
    OutOfRange,
    #[error("Amount cannot have more than two decimal places")]
    SubCent,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_minor(minor: i64) -> Self {
        Self(minor)
    }

    pub const fn minor(&self) -> i64 {
        self.0
    }

    /// Client-supplied amount in major units. Fractions of a cent are
    /// rejected, never rounded, so `9.999` cannot become `10.00`.
    pub fn from_major(major: f64) -> Result<Self, MoneyError> {
        if !major.is_finite() {
            return Err(MoneyError::NotFinite);
        }
        if major < 0.0 {
            return Err(MoneyError::Negative);
        }
        if major > MAX_MAJOR {
            return Err(MoneyError::OutOfRange);
        }
        let minor = major * MINOR_PER_MAJOR as f64;
        let whole = minor.round();
        // Room for the binary representation error of a two-decimal input
        let tolerance = minor.abs().max(1.0) * f64::EPSILON * 4.0;
        if (minor - whole).abs() > tolerance {
            return Err(MoneyError::SubCent);
        }
        Ok(Self(whole as i64))
    }

    pub fn to_major(&self) -> f64 {
        self.0 as f64 / MINOR_PER_MAJOR as f64
    }

    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Money {
        Money(-self.0)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let per = MINOR_PER_MAJOR as u64;
        write!(f, "{}{}.{:02}", sign, abs / per, abs % per)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_major())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_major_converts_to_cents() {
        assert_eq!(Money::from_major(10.0).unwrap().minor(), 1000);
        assert_eq!(Money::from_major(0.5).unwrap().minor(), 50);
        assert_eq!(Money::from_major(10.07).unwrap().minor(), 1007);
        assert_eq!(Money::from_major(0.1 + 0.2).unwrap().minor(), 30);
        assert_eq!(
            Money::from_major(999_999_999_999.99).unwrap().minor(),
            99_999_999_999_999
        );
    }

    #[test]
    fn test_from_major_rejects_fractions_of_a_cent() {
        assert_eq!(Money::from_major(9.999), Err(MoneyError::SubCent));
        assert_eq!(Money::from_major(9.995), Err(MoneyError::SubCent));
        assert_eq!(Money::from_major(10.004), Err(MoneyError::SubCent));
        assert_eq!(Money::from_major(0.001), Err(MoneyError::SubCent));
    }

    #[test]
    fn test_from_major_rejects_bad_input() {
        assert_eq!(Money::from_major(f64::NAN), Err(MoneyError::NotFinite));
        assert_eq!(Money::from_major(f64::INFINITY), Err(MoneyError::NotFinite));
        assert_eq!(Money::from_major(-1.0), Err(MoneyError::Negative));
        assert_eq!(Money::from_major(1e15), Err(MoneyError::OutOfRange));
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_minor(1000).to_string(), "10.00");
        assert_eq!(Money::from_minor(5).to_string(), "0.05");
        assert_eq!((-Money::from_minor(1250)).to_string(), "-12.50");
    }

    #[test]
    fn test_serializes_as_major_units() {
        let json = serde_json::to_string(&Money::from_minor(550)).unwrap();
        assert_eq!(json, "5.5");
    }
}
