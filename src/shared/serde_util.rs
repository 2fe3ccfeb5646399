//! Custom serde helpers for settings snapshots.

/// Deserializes a `Decimal` from either a JSON string (`"2000.5"`) or a
/// JSON number (`2000.5`).
///
/// Host stores usually hold rates as plain numbers. Strings are parsed
/// exactly; numbers go through `f64` once, at this boundary only.
pub mod decimal_or_number {
    use rust_decimal::prelude::*;
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(f64),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Raw::deserialize(deserializer)? {
            Raw::Text(text) => Decimal::from_str(text.trim())
                .map_err(|e| serde::de::Error::custom(format!("Invalid decimal '{}': {}", text, e))),
            Raw::Number(number) => Decimal::from_f64(number)
                .ok_or_else(|| serde::de::Error::custom(format!("Invalid decimal: {}", number))),
        }
    }
}
