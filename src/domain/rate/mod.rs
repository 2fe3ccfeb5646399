//! Native → display-currency conversion.
//!
//! The rate is held as a `rust_decimal::Decimal` and lifted into an exact
//! [`NumericValue`] before multiplying, so a native amount with up to 18
//! fractional digits is never squeezed through binary floating point.

pub mod formatter;

pub use formatter::{currency_format, CurrencyFormat, CurrencyFormatter, StandardCurrencyFormatter};

use std::str::FromStr;

use rust_decimal::prelude::*;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::DisplayError;
use crate::shared::{Denomination, DenominationTable, NumericValue};

/// Default fractional digits for currency-converted display.
pub const DEFAULT_CURRENCY_DECIMALS: u32 = 2;

/// Conversion rate from the native currency to a display currency.
///
/// Always finite and strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConversionRate(Decimal);

impl ConversionRate {
    pub fn new(rate: Decimal) -> Result<Self, DisplayError> {
        if rate <= Decimal::ZERO {
            return Err(DisplayError::InvalidRate(format!(
                "rate must be positive, got {}",
                rate
            )));
        }
        Ok(Self(rate))
    }

    /// Accept a host-supplied `f64`. This is the only place a binary float
    /// enters; it is converted to `Decimal` once.
    pub fn from_f64(rate: f64) -> Result<Self, DisplayError> {
        if !rate.is_finite() {
            return Err(DisplayError::InvalidRate(format!(
                "rate must be finite, got {}",
                rate
            )));
        }
        let decimal = Decimal::from_f64(rate)
            .ok_or_else(|| DisplayError::InvalidRate(format!("{} is out of range", rate)))?;
        Self::new(decimal)
    }

    pub fn as_decimal(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for ConversionRate {
    type Error = DisplayError;

    fn try_from(rate: Decimal) -> Result<Self, Self::Error> {
        Self::new(rate)
    }
}

impl FromStr for ConversionRate {
    type Err = DisplayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let decimal = Decimal::from_str(s.trim())
            .map_err(|e| DisplayError::InvalidRate(format!("'{}': {}", s, e)))?;
        Self::new(decimal)
    }
}

impl std::fmt::Display for ConversionRate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for ConversionRate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        Serialize::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for ConversionRate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let decimal = crate::shared::serde_util::decimal_or_number::deserialize(deserializer)?;
        Self::new(decimal).map_err(serde::de::Error::custom)
    }
}

/// `native_amount * rate`, rounded half-up to `decimals`, in base 10.
pub fn convert_with_rate(
    native_amount: &NumericValue,
    rate: &ConversionRate,
    decimals: u32,
) -> Result<NumericValue, DisplayError> {
    let rate = NumericValue::from_decimal(&rate.as_decimal(), native_amount.unit())?;
    native_amount.mul(&rate)?.round(decimals).to_base(10)
}

/// Display-currency value of a smallest-unit hex amount.
///
/// The amount is rescaled to `denomination` exactly, multiplied by `rate`
/// and only then rounded, so no precision is lost between the two steps.
pub fn value_from_smallest_unit_hex(
    table: &DenominationTable,
    hex_amount: &str,
    denomination: Denomination,
    rate: &ConversionRate,
    decimals: u32,
) -> Result<NumericValue, DisplayError> {
    let native = table
        .parse_hex(hex_amount, Denomination::Wei)?
        .to_denomination(table.exponent(denomination))?;
    convert_with_rate(&native, rate, decimals)
}
