//! Currency formatting collaborator.
//!
//! Locale conventions (symbol, placement, grouping, decimal separator)
//! live behind the [`CurrencyFormatter`] trait so hosts can plug in their
//! own. [`StandardCurrencyFormatter`] covers a fixed set of ISO codes and
//! returns anything else unchanged.

use std::collections::HashMap;
use std::fmt::Debug;

use crate::shared::fmt::group_digits;
use crate::shared::{CurrencyCode, NumericValue};

/// Renders an already-converted amount in a display currency.
pub trait CurrencyFormatter: Debug + Send + Sync {
    /// Format `value` (already rounded to `decimals`) for `currency`.
    fn format(&self, value: &NumericValue, currency: &CurrencyCode, decimals: u32) -> String;

    /// Minor-unit digits conventionally shown for `currency`, if known.
    fn default_decimals(&self, _currency: &CurrencyCode) -> Option<u32> {
        None
    }
}

/// Formatting conventions of one currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrencyFormat {
    pub symbol: &'static str,
    pub symbol_on_left: bool,
    pub space_between: bool,
    pub thousands_separator: &'static str,
    pub decimal_separator: &'static str,
    pub decimal_digits: u32,
}

const fn convention(
    symbol: &'static str,
    symbol_on_left: bool,
    space_between: bool,
    thousands_separator: &'static str,
    decimal_separator: &'static str,
    decimal_digits: u32,
) -> CurrencyFormat {
    CurrencyFormat {
        symbol,
        symbol_on_left,
        space_between,
        thousands_separator,
        decimal_separator,
        decimal_digits,
    }
}

lazy_static::lazy_static! {
    static ref CURRENCY_FORMATS: HashMap<&'static str, CurrencyFormat> = HashMap::from([
        ("USD", convention("$", true, false, ",", ".", 2)),
        ("EUR", convention("€", false, true, ".", ",", 2)),
        ("GBP", convention("£", true, false, ",", ".", 2)),
        ("JPY", convention("¥", true, false, ",", ".", 0)),
        ("CNY", convention("¥", true, false, ",", ".", 2)),
        ("INR", convention("₹", true, false, ",", ".", 2)),
        ("KRW", convention("₩", true, false, ",", ".", 0)),
        ("CHF", convention("CHF", true, true, "'", ".", 2)),
        ("CAD", convention("CA$", true, false, ",", ".", 2)),
        ("AUD", convention("A$", true, false, ",", ".", 2)),
        ("BRL", convention("R$", true, true, ".", ",", 2)),
        ("RUB", convention("₽", false, true, " ", ",", 2)),
    ]);
}

/// Conventions for `code`, matched case-insensitively.
pub fn currency_format(code: &str) -> Option<&'static CurrencyFormat> {
    CURRENCY_FORMATS.get(code.to_uppercase().as_str())
}

/// Table-driven formatter for common ISO currency codes.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardCurrencyFormatter;

impl CurrencyFormatter for StandardCurrencyFormatter {
    fn format(&self, value: &NumericValue, currency: &CurrencyCode, decimals: u32) -> String {
        let Some(format) = currency_format(currency.as_str()) else {
            return value.to_string();
        };

        let number = group_digits(
            &value.to_fixed(decimals),
            format.thousands_separator,
            format.decimal_separator,
        );
        let space = if format.space_between { " " } else { "" };

        if format.symbol_on_left {
            format!("{}{}{}", format.symbol, space, number)
        } else {
            format!("{}{}{}", number, space, format.symbol)
        }
    }

    fn default_decimals(&self, currency: &CurrencyCode) -> Option<u32> {
        currency_format(currency.as_str()).map(|f| f.decimal_digits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value(s: &str) -> NumericValue {
        NumericValue::parse(s, 10, 18).unwrap()
    }

    fn format(s: &str, code: &str, decimals: u32) -> String {
        StandardCurrencyFormatter.format(&value(s), &CurrencyCode::from(code), decimals)
    }

    #[test]
    fn test_usd() {
        assert_eq!(format("2000", "usd", 2), "$2,000.00");
        assert_eq!(format("2000", "USD", 2), "$2,000.00");
        assert_eq!(format("0.5", "usd", 2), "$0.50");
        assert_eq!(format("1234567.89", "usd", 2), "$1,234,567.89");
    }

    #[test]
    fn test_symbol_on_right_with_local_separators() {
        assert_eq!(format("1234.5", "eur", 2), "1.234,50 €");
        assert_eq!(format("1234.5", "rub", 2), "1 234,50 ₽");
    }

    #[test]
    fn test_symbol_with_space() {
        assert_eq!(format("2000", "chf", 2), "CHF 2'000.00");
        assert_eq!(format("2000", "brl", 2), "R$ 2.000,00");
    }

    #[test]
    fn test_zero_decimal_currency() {
        assert_eq!(format("2000", "jpy", 0), "¥2,000");
        assert_eq!(
            StandardCurrencyFormatter.default_decimals(&CurrencyCode::from("jpy")),
            Some(0)
        );
    }

    #[test]
    fn test_unknown_currency_is_unchanged() {
        assert_eq!(format("2000", "xyz", 2), "2000");
        assert_eq!(format("1234.5", "xyz", 2), "1234.5");
        assert_eq!(
            StandardCurrencyFormatter.default_decimals(&CurrencyCode::from("xyz")),
            None
        );
    }
}
