//! Shared value types and utilities used across all domain modules.
//!
//! Nothing in here holds state between calls: amounts, denominations and
//! currency codes are plain values created and dropped within one
//! formatting call.

pub mod denomination;
pub mod fmt;
pub mod numeric;
pub mod serde_util;

pub use denomination::{
    Denomination, DenominationTable, DEFAULT_NATIVE_DECIMALS, NEAR_ZERO_MARKER,
};
pub use numeric::{NumericValue, RoundingMode};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

// ─── CurrencyCode ────────────────────────────────────────────────────────────

/// Newtype for currency codes and tickers (e.g. `"usd"`, `"ETH"`, `"SepoliaETH"`).
///
/// Comparison is case-sensitive; the stored text is kept exactly as given.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Upper-cased form used for display suffixes and ISO lookups.
    pub fn to_uppercase(&self) -> String {
        self.0.to_uppercase()
    }
}

impl std::fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CurrencyCode {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for CurrencyCode {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl FromStr for CurrencyCode {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(CurrencyCode(s.to_string()))
    }
}

impl Serialize for CurrencyCode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for CurrencyCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(CurrencyCode(s))
    }
}
