//! # Currency Display
//!
//! Exact conversion and display formatting of on-chain amounts for wallet
//! interfaces.
//!
//! ## Architecture
//!
//! The crate is organized in layers:
//!
//! 1. **Numeric** — `NumericValue`: `BigUint` magnitude with decimal-point
//!    bookkeeping, denomination rescaling and explicit rounding
//! 2. **Denominations** — `DenominationTable`: wei / gwei / ether exponents
//!    and the hex → decimal converter with the near-zero marker
//! 3. **Rates** — `ConversionRate` (`rust_decimal`) and the currency
//!    formatting collaborator
//! 4. **Display** — `CurrencyDisplay`: ordered branch rules, suffix casing,
//!    final `prefix + value + suffix` assembly
//!
//! No floating point is used in any arithmetic, and no state is kept
//! between calls: the host passes a `CurrencySettings` snapshot each time.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use currency_display::prelude::*;
//!
//! let display = CurrencyDisplay::default();
//! let settings = CurrencySettings::new("usd")
//!     .with_native_currency("ETH")
//!     .with_conversion_rate("2000".parse()?);
//!
//! let request = ConversionRequest::new("0xde0b6b3a7640000").with_currency("usd");
//! let (text, parts) = display.format(&request, &settings)?;
//! assert_eq!(text, "$2,000.00 USD");
//! ```

// ── Layer 1-2: Core ──────────────────────────────────────────────────────────

/// Shared value types: numeric values, denominations, currency codes.
pub mod shared;

/// Unified error types.
pub mod error;

/// Network constants (test-network tickers).
pub mod network;

// ── Layer 3-4: Domain ────────────────────────────────────────────────────────

/// Domain modules: rate conversion, display formatting.
pub mod domain;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared types
    pub use crate::shared::{
        CurrencyCode, Denomination, DenominationTable, NumericValue, RoundingMode,
        DEFAULT_NATIVE_DECIMALS, NEAR_ZERO_MARKER,
    };

    // Rates
    pub use crate::domain::rate::{
        convert_with_rate, value_from_smallest_unit_hex, ConversionRate, CurrencyFormatter,
        StandardCurrencyFormatter, DEFAULT_CURRENCY_DECIMALS,
    };

    // Display
    pub use crate::domain::display::{
        ConversionRequest, CurrencyDisplay, CurrencyDisplayBuilder, CurrencySettings,
        DisplayBranch, FormattedResult,
    };

    // Errors
    pub use crate::error::DisplayError;

    // Network
    pub use crate::network::{is_test_network_ticker, TEST_NETWORK_TICKERS};
}
