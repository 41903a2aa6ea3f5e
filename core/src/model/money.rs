// stockcart/src/model/money.rs

//! Decimal amounts kept as integer cents.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul};

/// A price or total in minor units (cents).
///
/// On the wire it is a JSON number with up to two decimals (`10`, `19.99`);
/// some backends send the same value as a string, which is accepted too.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
  pub const ZERO: Money = Money(0);

  pub fn from_cents(cents: i64) -> Self {
    Money(cents)
  }

  /// Rounds to the nearest cent.
  pub fn from_decimal(amount: f64) -> Self {
    Money((amount * 100.0).round() as i64)
  }

  pub fn cents(self) -> i64 {
    self.0
  }

  pub fn as_decimal(self) -> f64 {
    self.0 as f64 / 100.0
  }
}

impl Add for Money {
  type Output = Money;

  fn add(self, rhs: Money) -> Money {
    Money(self.0.saturating_add(rhs.0))
  }
}

impl Mul<u32> for Money {
  type Output = Money;

  fn mul(self, quantity: u32) -> Money {
    Money(self.0.saturating_mul(i64::from(quantity)))
  }
}

impl Sum for Money {
  fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
    iter.fold(Money::ZERO, |acc, m| acc + m)
  }
}

impl fmt::Display for Money {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let sign = if self.0 < 0 { "-" } else { "" };
    let abs = self.0.unsigned_abs();
    f.pad(&format!("{}{}.{:02}", sign, abs / 100, abs % 100))
  }
}

impl Serialize for Money {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(self.as_decimal())
  }
}

impl<'de> Deserialize<'de> for Money {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum WireAmount {
      Number(f64),
      Text(String),
    }

    match WireAmount::deserialize(deserializer)? {
      WireAmount::Number(n) if n.is_finite() => Ok(Money::from_decimal(n)),
      WireAmount::Number(n) => Err(de::Error::custom(format!("non-finite amount: {}", n))),
      WireAmount::Text(s) => s
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .map(Money::from_decimal)
        .ok_or_else(|| de::Error::custom(format!("invalid amount: '{}'", s))),
    }
  }
}
