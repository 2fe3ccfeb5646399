//! Denomination table and smallest-unit → display-unit conversion.
//!
//! The native asset is expressed in three denominations whose sizes are
//! fixed powers of ten relative to the smallest unit:
//!
//! | Denomination | Exponent (Ether table) |
//! |--------------|------------------------|
//! | `Wei`        | 0                      |
//! | `Gwei`       | 9                      |
//! | `Ether`      | 18                     |

use serde::{Deserialize, Serialize};

use super::numeric::NumericValue;
use crate::error::DisplayError;

/// Default number of fractional digits for native-denomination display.
pub const DEFAULT_NATIVE_DECIMALS: u32 = 6;

/// Shown instead of `"0"` when a non-zero amount rounds away entirely at
/// [`DEFAULT_NATIVE_DECIMALS`].
pub const NEAR_ZERO_MARKER: &str = "<0.000001";

/// Denomination selector: smallest, intermediate, or major unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Denomination {
    #[serde(rename = "WEI")]
    Wei,
    #[serde(rename = "GWEI")]
    Gwei,
    #[default]
    #[serde(rename = "ETH")]
    Ether,
}

impl Denomination {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Wei => "WEI",
            Self::Gwei => "GWEI",
            Self::Ether => "ETH",
        }
    }
}

impl std::fmt::Display for Denomination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Exponent of each denomination relative to the smallest unit.
///
/// The smallest unit is always exponent 0; the intermediate and major units
/// must be strictly increasing above it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DenominationTable {
    intermediate: u32,
    major: u32,
}

impl DenominationTable {
    /// Table for an 18-decimal asset: wei = 0, gwei = 9, ether = 18.
    pub const ETHER: Self = Self {
        intermediate: 9,
        major: 18,
    };

    pub fn new(intermediate: u32, major: u32) -> Result<Self, DisplayError> {
        if intermediate == 0 || intermediate >= major {
            return Err(DisplayError::InvalidDenominationTable(format!(
                "exponents must satisfy 0 < intermediate < major, got {} and {}",
                intermediate, major
            )));
        }
        Ok(Self {
            intermediate,
            major,
        })
    }

    pub fn exponent(&self, denomination: Denomination) -> u32 {
        match denomination {
            Denomination::Wei => 0,
            Denomination::Gwei => self.intermediate,
            Denomination::Ether => self.major,
        }
    }

    /// Decimal precision of the asset (exponent of the major unit).
    pub fn decimals(&self) -> u32 {
        self.major
    }

    /// Parse a hex amount expressed in `from`.
    pub fn parse_hex(&self, hex_amount: &str, from: Denomination) -> Result<NumericValue, DisplayError> {
        NumericValue::parse(hex_amount, 16, self.exponent(from))
    }

    /// Convert a hex amount from one denomination to another and round it to
    /// `decimals` fractional digits, rendered in base 10.
    pub fn convert(
        &self,
        hex_amount: &str,
        from: Denomination,
        to: Denomination,
        decimals: u32,
    ) -> Result<String, DisplayError> {
        let amount = self.parse_hex(hex_amount, from)?;
        Ok(self.rescale(&amount, to, decimals)?.to_string())
    }

    /// Like [`convert`](Self::convert), but a non-zero amount that rounds to
    /// `"0"` at [`DEFAULT_NATIVE_DECIMALS`] becomes [`NEAR_ZERO_MARKER`].
    pub fn convert_for_display(
        &self,
        hex_amount: &str,
        from: Denomination,
        to: Denomination,
        decimals: u32,
    ) -> Result<String, DisplayError> {
        let amount = self.parse_hex(hex_amount, from)?;
        let rounded = self.rescale(&amount, to, decimals)?;

        if rounded.is_zero() && !amount.is_zero() && decimals == DEFAULT_NATIVE_DECIMALS {
            tracing::debug!(
                "Amount {} rounds to zero at {} decimals, showing marker",
                hex_amount,
                decimals
            );
            return Ok(NEAR_ZERO_MARKER.to_string());
        }

        Ok(rounded.to_string())
    }

    fn rescale(
        &self,
        amount: &NumericValue,
        to: Denomination,
        decimals: u32,
    ) -> Result<NumericValue, DisplayError> {
        amount
            .to_denomination(self.exponent(to))?
            .round(decimals)
            .to_base(10)
    }
}

impl Default for DenominationTable {
    fn default() -> Self {
        Self::ETHER
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONE_ETH: &str = "0xde0b6b3a7640000";

    fn table() -> DenominationTable {
        DenominationTable::ETHER
    }

    #[test]
    fn test_ether_table_exponents() {
        let t = table();
        assert_eq!(t.exponent(Denomination::Wei), 0);
        assert_eq!(t.exponent(Denomination::Gwei), 9);
        assert_eq!(t.exponent(Denomination::Ether), 18);
        assert_eq!(t.decimals(), 18);
        assert_eq!(DenominationTable::default(), t);
    }

    #[test]
    fn test_table_rejects_non_increasing_exponents() {
        assert!(DenominationTable::new(6, 12).is_ok());
        assert!(matches!(
            DenominationTable::new(9, 9),
            Err(DisplayError::InvalidDenominationTable(_))
        ));
        assert!(DenominationTable::new(0, 18).is_err());
        assert!(DenominationTable::new(12, 6).is_err());
    }

    #[test]
    fn test_convert_one_ether() {
        let t = table();
        assert_eq!(t.convert(ONE_ETH, Denomination::Wei, Denomination::Ether, 6).unwrap(), "1");
        assert_eq!(
            t.convert(ONE_ETH, Denomination::Wei, Denomination::Gwei, 6).unwrap(),
            "1000000000"
        );
        assert_eq!(
            t.convert("0x3782dace9d90000", Denomination::Wei, Denomination::Ether, 6).unwrap(),
            "0.25"
        );
    }

    #[test]
    fn test_convert_zero_is_exact() {
        let t = table();
        assert_eq!(t.convert("0x0", Denomination::Ether, Denomination::Ether, 6).unwrap(), "0");
        assert_eq!(
            t.convert_for_display("0x0", Denomination::Wei, Denomination::Ether, 6).unwrap(),
            "0"
        );
    }

    #[test]
    fn test_convert_up_scales_from_major_unit() {
        let t = table();
        assert_eq!(t.convert("0x2", Denomination::Ether, Denomination::Gwei, 0).unwrap(), "2000000000");
    }

    #[test]
    fn test_near_zero_marker_at_default_precision() {
        let t = table();
        // 499_999_999_999 wei = 0.000000499999999999 ETH
        assert_eq!(
            t.convert_for_display("0x746a5287ff", Denomination::Wei, Denomination::Ether, 6).unwrap(),
            NEAR_ZERO_MARKER
        );
        assert_eq!(
            t.convert_for_display("0x1", Denomination::Wei, Denomination::Ether, 6).unwrap(),
            NEAR_ZERO_MARKER
        );
        // 500_000_000_000 wei rounds half-up to the smallest visible step
        assert_eq!(
            t.convert_for_display("0x746a528800", Denomination::Wei, Denomination::Ether, 6).unwrap(),
            "0.000001"
        );
    }

    #[test]
    fn test_near_zero_marker_only_at_default_precision() {
        let t = table();
        assert_eq!(
            t.convert_for_display("0x1", Denomination::Wei, Denomination::Ether, 4).unwrap(),
            "0"
        );
        assert_eq!(t.convert("0x1", Denomination::Wei, Denomination::Ether, 6).unwrap(), "0");
    }

    #[test]
    fn test_convert_rejects_bad_hex() {
        let t = table();
        assert!(matches!(
            t.convert("", Denomination::Wei, Denomination::Ether, 6),
            Err(DisplayError::InvalidNumericInput { .. })
        ));
        assert!(t.convert_for_display("0xg", Denomination::Wei, Denomination::Ether, 6).is_err());
    }

    #[test]
    fn test_denomination_serde() {
        let d: Denomination = serde_json::from_str("\"GWEI\"").unwrap();
        assert_eq!(d, Denomination::Gwei);
        assert_eq!(serde_json::to_string(&Denomination::Ether).unwrap(), "\"ETH\"");
        assert_eq!(Denomination::default(), Denomination::Ether);
    }
}
