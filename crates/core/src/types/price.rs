//! Minor-unit price representation.
//!
//! Catalog and cart prices are whole Argentine pesos stored as `i64`.
//! Remote catalog sources quote fractional amounts in their own currency;
//! [`Price::from_source`] converts those at a fixed exchange rate.

use core::fmt;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A price in minor currency units.
///
/// Serializes transparently as a plain integer, which is the wire format of
/// both the persisted cart and the default catalog.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price(i64);

impl Price {
    /// The zero price.
    pub const ZERO: Self = Self(0);

    /// Create a price from an amount in minor units.
    #[must_use]
    pub const fn new(amount: i64) -> Self {
        Self(amount)
    }

    /// Get the amount in minor units.
    #[must_use]
    pub const fn amount(&self) -> i64 {
        self.0
    }

    /// Convert a fractional source-currency amount at a fixed exchange rate.
    ///
    /// Rounds to the nearest whole unit, halves away from zero. Amounts that
    /// would overflow `i64` saturate rather than wrap.
    #[must_use]
    pub fn from_source(amount: Decimal, rate: Decimal) -> Self {
        let converted = (amount * rate)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        Self(converted.to_i64().unwrap_or(i64::MAX))
    }

    /// The cost of `quantity` units at this price.
    #[must_use]
    pub const fn times(&self, quantity: i64) -> Self {
        Self(self.0.saturating_mul(quantity))
    }
}

impl fmt::Display for Price {
    /// Formats the amount with `.` as the thousands separator (es-AR
    /// convention), without a currency symbol.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 < 0 {
            write!(f, "-")?;
        }
        let digits = self.0.unsigned_abs().to_string();
        let len = digits.len();
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (len - i) % 3 == 0 {
                write!(f, ".")?;
            }
            write!(f, "{c}")?;
        }
        Ok(())
    }
}
