//! Unified error types.

use thiserror::Error;

/// Errors raised while converting or formatting an amount.
///
/// An unavailable conversion rate and an amount too small to show at the
/// requested precision are not errors: the first yields no display value,
/// the second yields the `<0.000001` marker.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DisplayError {
    #[error("Invalid numeric input '{input}': {reason}")]
    InvalidNumericInput { input: String, reason: String },

    #[error("Unsupported radix {0} (expected 2..=36)")]
    UnsupportedRadix(u32),

    #[error("Invalid denomination table: {0}")]
    InvalidDenominationTable(String),

    #[error("Invalid conversion rate: {0}")]
    InvalidRate(String),

    #[error("Decimal scale overflow: {0}")]
    ScaleOverflow(String),
}
