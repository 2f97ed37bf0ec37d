use std::{
    fmt::Display,
    iter::Sum,
    ops::{Add, AddAssign, Sub, SubAssign},
    str::FromStr,
};

use serde::{Deserialize, Serialize};
use sqlx::Type;
use thiserror::Error;

use crate::op;

/// The number of decimal places every crypto amount is rounded to.
pub const CRYPTO_DECIMALS: i32 = 8;
const CRYPTO_SCALE: f64 = 100_000_000.0;

/// Round `value` half-away-from-zero to [`CRYPTO_DECIMALS`] decimal places.
pub fn round_to_crypto_precision(value: f64) -> f64 {
    (value * CRYPTO_SCALE).round() / CRYPTO_SCALE
}

//--------------------------------------     CryptoAmount     ---------------------------------------------------------
/// An amount of some cryptocurrency, always held at 8 decimal places.
///
/// Every constructor rounds, so two amounts derived from the same inputs compare equal bit-for-bit.
#[derive(Debug, Clone, Copy, Default, Type, PartialEq, PartialOrd, Serialize, Deserialize)]
#[sqlx(transparent)]
#[serde(transparent)]
pub struct CryptoAmount(f64);

op!(binary CryptoAmount, Add, add);
op!(binary CryptoAmount, Sub, sub);
op!(inplace CryptoAmount, AddAssign, add_assign, add);
op!(inplace CryptoAmount, SubAssign, sub_assign, sub);

impl Sum for CryptoAmount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

#[derive(Debug, Clone, Error)]
pub enum CryptoAmountError {
    #[error("Crypto amounts must be finite and non-negative: {0}")]
    InvalidValue(f64),
    #[error("Could not parse crypto amount: {0}")]
    ParseError(String),
}

impl From<f64> for CryptoAmount {
    fn from(value: f64) -> Self {
        Self(round_to_crypto_precision(value))
    }
}

impl FromStr for CryptoAmount {
    type Err = CryptoAmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim().parse::<f64>().map_err(|e| CryptoAmountError::ParseError(format!("{s}: {e}")))?;
        if !value.is_finite() || value < 0.0 {
            return Err(CryptoAmountError::InvalidValue(value));
        }
        Ok(Self::from(value))
    }
}

impl Display for CryptoAmount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.8}", self.0)
    }
}

impl CryptoAmount {
    /// The amount of a cryptocurrency priced at `usd_price` needed to pay `base_price_usd`.
    ///
    /// Returns `None` when the result would be meaningless: a non-finite or non-positive crypto price, or a non-finite
    /// or negative base price.
    pub fn from_usd(base_price_usd: f64, usd_price: f64) -> Option<Self> {
        if !usd_price.is_finite() || usd_price <= 0.0 {
            return None;
        }
        if !base_price_usd.is_finite() || base_price_usd < 0.0 {
            return None;
        }
        Some(Self::from(base_price_usd / usd_price))
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// The USD value of this amount at the given price. Not rounded.
    pub fn to_usd(&self, usd_price: f64) -> f64 {
        self.0 * usd_price
    }

    /// True if the two amounts agree once rounded to crypto precision.
    pub fn matches(&self, other: f64) -> bool {
        *self == Self::from(other)
    }
}
