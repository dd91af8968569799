//! Integer amounts and the fixed exchange rate
//!
//! All balances are integers in the smallest unit of their asset. The rate is
//! a positive integer count of token units issued per unit of currency.
//! Conversions in both directions truncate toward zero, so converting
//! currency to tokens and back never yields more than the starting amount.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU128;
use std::str::FromStr;

use crate::errors::NumericError;

/// Amount of an asset in its smallest indivisible unit.
///
/// JSON text (`serde_json::to_string`) carries the full range;
/// `serde_json::Value` only holds amounts up to `u64::MAX`.
pub type Amount = u128;

/// Fractional digits of the native settlement currency (wei per ether).
pub const ETHER_DECIMALS: u32 = 18;

/// Fixed conversion ratio: token units issued per unit of currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u128", into = "u128")]
pub struct ExchangeRate(NonZeroU128);

impl ExchangeRate {
    /// Create a rate, rejecting zero.
    pub fn new(tokens_per_unit: Amount) -> Result<Self, NumericError> {
        NonZeroU128::new(tokens_per_unit)
            .map(Self)
            .ok_or(NumericError::ZeroRate)
    }

    pub const fn from_nonzero(tokens_per_unit: NonZeroU128) -> Self {
        Self(tokens_per_unit)
    }

    /// Tokens issued per unit of currency.
    pub fn tokens_per_unit(&self) -> Amount {
        self.0.get()
    }

    /// Tokens owed for `currency`, or `None` if the product overflows.
    pub fn tokens_for(&self, currency: Amount) -> Option<Amount> {
        currency.checked_mul(self.0.get())
    }

    /// Currency owed for `tokens`, truncated toward zero.
    pub fn currency_for(&self, tokens: Amount) -> Amount {
        tokens / self.0.get()
    }

    /// Tokens left over by the truncation in [`Self::currency_for`].
    pub fn dust(&self, tokens: Amount) -> Amount {
        tokens % self.0.get()
    }
}

impl TryFrom<u128> for ExchangeRate {
    type Error = NumericError;

    fn try_from(value: u128) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ExchangeRate> for u128 {
    fn from(rate: ExchangeRate) -> Self {
        rate.tokens_per_unit()
    }
}

impl fmt::Display for ExchangeRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} tokens/unit", self.0)
    }
}

/// Parse a human-readable amount (e.g. `"1.5"`) into base units.
///
/// `decimals` is the number of fractional digits of the asset, so
/// `parse_units("1", ETHER_DECIMALS)` yields `10^18`.
pub fn parse_units(value: &str, decimals: u32) -> Result<Amount, NumericError> {
    let parsed = Decimal::from_str(value.trim()).map_err(|_| NumericError::Malformed {
        value: value.to_string(),
    })?;

    if parsed.is_sign_negative() && !parsed.is_zero() {
        return Err(NumericError::Negative {
            value: value.to_string(),
        });
    }

    let parsed = parsed.normalize();
    let scale = parsed.scale();
    if scale > decimals {
        return Err(NumericError::TooPrecise {
            value: value.to_string(),
            decimals,
        });
    }

    let mantissa = parsed.mantissa().unsigned_abs();
    let factor = 10u128
        .checked_pow(decimals - scale)
        .ok_or(NumericError::Overflow)?;
    mantissa.checked_mul(factor).ok_or(NumericError::Overflow)
}

/// Render base units as a decimal amount with `decimals` fractional digits.
///
/// Fails with `Overflow` when the value exceeds the 96-bit decimal mantissa
/// or `decimals` exceeds the supported scale.
pub fn format_units(amount: Amount, decimals: u32) -> Result<Decimal, NumericError> {
    let mantissa = i128::try_from(amount).map_err(|_| NumericError::Overflow)?;
    Decimal::try_from_i128_with_scale(mantissa, decimals)
        .map(|d| d.normalize())
        .map_err(|_| NumericError::Overflow)
}
