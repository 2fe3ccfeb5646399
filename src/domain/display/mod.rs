//! Currency display formatter.
//!
//! Given a smallest-unit hex amount, a [`ConversionRequest`] and a
//! [`CurrencySettings`] snapshot, [`CurrencyDisplay::format`] produces the
//! full display string together with its `prefix`/`value`/`suffix` parts.
//!
//! Settings are passed in on every call and never cached, so each call is a
//! pure function of its arguments.

pub mod branch;

pub use branch::DisplayBranch;

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::rate::{ConversionRate, CurrencyFormatter, StandardCurrencyFormatter};
use crate::error::DisplayError;
use crate::network::TEST_NETWORK_TICKERS;
use crate::shared::{CurrencyCode, Denomination, DenominationTable};

use branch::BranchContext;

// ─── Settings snapshot ───────────────────────────────────────────────────────

/// Read-only snapshot of the host's currency settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencySettings {
    /// The user's preferred display currency (e.g. `"usd"`).
    pub current_currency: CurrencyCode,
    /// Ticker of the active network's native asset, if known.
    #[serde(default)]
    pub native_currency: Option<CurrencyCode>,
    /// Native → preferred currency rate, if one has been fetched.
    #[serde(default)]
    pub conversion_rate: Option<ConversionRate>,
}

impl CurrencySettings {
    pub fn new(current_currency: impl Into<CurrencyCode>) -> Self {
        Self {
            current_currency: current_currency.into(),
            native_currency: None,
            conversion_rate: None,
        }
    }

    pub fn with_native_currency(mut self, native_currency: impl Into<CurrencyCode>) -> Self {
        self.native_currency = Some(native_currency.into());
        self
    }

    pub fn with_conversion_rate(mut self, rate: ConversionRate) -> Self {
        self.conversion_rate = Some(rate);
        self
    }
}

// ─── Request ─────────────────────────────────────────────────────────────────

/// Per-call formatting options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConversionRequest {
    /// Amount in the smallest unit, hex encoded (`0x` prefix optional).
    pub input_value: String,
    /// Pre-formatted value used in lieu of any conversion.
    pub display_value: Option<String>,
    /// Literal prepended to the value.
    pub prefix: Option<String>,
    /// Fractional digits to keep. Defaults to 6 for native display and to
    /// the currency's minor digits (else 2) for converted display.
    pub number_of_decimals: Option<u32>,
    /// Target denomination. Defaults to the major unit.
    pub denomination: Option<Denomination>,
    /// Target currency code.
    pub currency: Option<CurrencyCode>,
    /// Suppress the suffix entirely.
    pub hide_label: bool,
    /// Literal suffix replacing the currency ticker.
    pub suffix: Option<String>,
}

impl ConversionRequest {
    pub fn new(input_value: impl Into<String>) -> Self {
        Self {
            input_value: input_value.into(),
            ..Default::default()
        }
    }

    pub fn with_display_value(mut self, display_value: impl Into<String>) -> Self {
        self.display_value = Some(display_value.into());
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn with_decimals(mut self, number_of_decimals: u32) -> Self {
        self.number_of_decimals = Some(number_of_decimals);
        self
    }

    pub fn with_denomination(mut self, denomination: Denomination) -> Self {
        self.denomination = Some(denomination);
        self
    }

    pub fn with_currency(mut self, currency: impl Into<CurrencyCode>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = Some(suffix.into());
        self
    }

    pub fn hide_label(mut self) -> Self {
        self.hide_label = true;
        self
    }
}

// ─── Result ──────────────────────────────────────────────────────────────────

/// The parts of a formatted amount, for callers that style them separately.
///
/// `value` is `None` when no branch could produce a value (e.g. the
/// preferred currency was requested but no rate is available).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormattedResult {
    pub prefix: Option<String>,
    pub value: Option<String>,
    pub suffix: Option<String>,
}

impl FormattedResult {
    /// `prefix + value + " " + suffix`, with missing parts left out.
    pub fn text(&self) -> String {
        let mut text = String::new();
        text.push_str(self.prefix.as_deref().unwrap_or_default());
        text.push_str(self.value.as_deref().unwrap_or_default());
        if let Some(suffix) = self.suffix.as_deref().filter(|s| !s.is_empty()) {
            text.push(' ');
            text.push_str(suffix);
        }
        text
    }
}

impl std::fmt::Display for FormattedResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text())
    }
}

// ─── Formatter ───────────────────────────────────────────────────────────────

/// Converts and formats amounts for display.
///
/// Holds only immutable configuration; share one instance freely.
#[derive(Debug, Clone)]
pub struct CurrencyDisplay {
    denominations: DenominationTable,
    test_network_tickers: HashSet<String>,
    currency_formatter: Arc<dyn CurrencyFormatter>,
}

impl Default for CurrencyDisplay {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl CurrencyDisplay {
    pub fn builder() -> CurrencyDisplayBuilder {
        CurrencyDisplayBuilder::default()
    }

    pub fn denominations(&self) -> &DenominationTable {
        &self.denominations
    }

    pub fn currency_formatter(&self) -> &dyn CurrencyFormatter {
        self.currency_formatter.as_ref()
    }

    /// Whether `ticker` keeps its original case as a suffix.
    pub fn is_test_network_ticker(&self, ticker: &str) -> bool {
        self.test_network_tickers.contains(ticker)
    }

    /// Which branch would render `request` under `settings`.
    pub fn resolve_branch(
        &self,
        request: &ConversionRequest,
        settings: &CurrencySettings,
    ) -> DisplayBranch {
        branch::select(&self.context(request, settings)).branch
    }

    /// Only the value part; `None` when unresolved.
    pub fn format_value(
        &self,
        request: &ConversionRequest,
        settings: &CurrencySettings,
    ) -> Result<Option<String>, DisplayError> {
        let ctx = self.context(request, settings);
        let rule = branch::select(&ctx);
        tracing::debug!("Formatting {:?} via {} branch", request.input_value, rule.branch);

        (rule.render)(&ctx).inspect_err(|e| {
            tracing::warn!("Failed to format amount {:?}: {}", request.input_value, e);
        })
    }

    /// Suffix for `request`: none when hidden, else the literal override,
    /// else the currency ticker (upper-cased unless a test-network ticker).
    pub fn suffix(&self, request: &ConversionRequest) -> Option<String> {
        if request.hide_label {
            return None;
        }
        if let Some(suffix) = request.suffix.as_ref().filter(|s| !s.is_empty()) {
            return Some(suffix.clone());
        }

        let currency = request.currency.as_ref()?;
        if self.is_test_network_ticker(currency.as_str()) {
            Some(currency.to_string())
        } else {
            Some(currency.to_uppercase())
        }
    }

    /// Full display string plus its parts.
    pub fn format(
        &self,
        request: &ConversionRequest,
        settings: &CurrencySettings,
    ) -> Result<(String, FormattedResult), DisplayError> {
        let parts = FormattedResult {
            prefix: request.prefix.clone(),
            value: self.format_value(request, settings)?,
            suffix: self.suffix(request),
        };
        Ok((parts.text(), parts))
    }

    fn context<'a>(
        &'a self,
        request: &'a ConversionRequest,
        settings: &'a CurrencySettings,
    ) -> BranchContext<'a> {
        BranchContext {
            formatter: self,
            request,
            settings,
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct CurrencyDisplayBuilder {
    denominations: DenominationTable,
    test_network_tickers: HashSet<String>,
    currency_formatter: Arc<dyn CurrencyFormatter>,
}

impl Default for CurrencyDisplayBuilder {
    fn default() -> Self {
        Self {
            denominations: DenominationTable::ETHER,
            test_network_tickers: TEST_NETWORK_TICKERS.iter().map(|t| t.to_string()).collect(),
            currency_formatter: Arc::new(StandardCurrencyFormatter),
        }
    }
}

impl CurrencyDisplayBuilder {
    pub fn denominations(mut self, table: DenominationTable) -> Self {
        self.denominations = table;
        self
    }

    /// Replace the set of case-preserving test-network tickers.
    pub fn test_network_tickers<I, S>(mut self, tickers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.test_network_tickers = tickers.into_iter().map(Into::into).collect();
        self
    }

    pub fn add_test_network_ticker(mut self, ticker: impl Into<String>) -> Self {
        self.test_network_tickers.insert(ticker.into());
        self
    }

    pub fn currency_formatter(mut self, formatter: impl CurrencyFormatter + 'static) -> Self {
        self.currency_formatter = Arc::new(formatter);
        self
    }

    pub fn build(self) -> CurrencyDisplay {
        CurrencyDisplay {
            denominations: self.denominations,
            test_network_tickers: self.test_network_tickers,
            currency_formatter: self.currency_formatter,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::NumericValue;
    use crate::shared::NEAR_ZERO_MARKER;
    use std::str::FromStr;

    const ONE_ETH: &str = "0xde0b6b3a7640000";

    fn usd_settings(rate: Option<&str>) -> CurrencySettings {
        let settings = CurrencySettings::new("usd").with_native_currency("ETH");
        match rate {
            Some(r) => settings.with_conversion_rate(ConversionRate::from_str(r).unwrap()),
            None => settings,
        }
    }

    #[test]
    fn test_native_one_ether() {
        let display = CurrencyDisplay::default();
        let request = ConversionRequest::new(ONE_ETH).with_currency("ETH");
        let (text, parts) = display.format(&request, &usd_settings(Some("2000"))).unwrap();
        assert_eq!(text, "1 ETH");
        assert_eq!(parts.value.as_deref(), Some("1"));
        assert_eq!(parts.suffix.as_deref(), Some("ETH"));
        assert_eq!(parts.prefix, None);
    }

    #[test]
    fn test_converted_usd() {
        let display = CurrencyDisplay::default();
        let request = ConversionRequest::new(ONE_ETH).with_currency("usd");
        let (text, parts) = display.format(&request, &usd_settings(Some("2000"))).unwrap();
        assert_eq!(parts.value.as_deref(), Some("$2,000.00"));
        assert_eq!(parts.suffix.as_deref(), Some("USD"));
        assert_eq!(text, "$2,000.00 USD");
    }

    #[test]
    fn test_unresolved_has_empty_value() {
        let display = CurrencyDisplay::default();
        let request = ConversionRequest::new(ONE_ETH).with_currency("usd");
        let (text, parts) = display.format(&request, &usd_settings(None)).unwrap();
        assert_eq!(parts.value, None);
        assert_eq!(text, " USD");

        let hidden = request.clone().hide_label();
        let (text, _) = display.format(&hidden, &usd_settings(None)).unwrap();
        assert_eq!(text, "");
    }

    #[test]
    fn test_literal_value_bypasses_conversion() {
        let display = CurrencyDisplay::default();
        // invalid amount is never parsed when a literal is supplied
        let request = ConversionRequest::new("")
            .with_display_value("0.5")
            .with_currency("ETH");
        let (text, _) = display.format(&request, &usd_settings(None)).unwrap();
        assert_eq!(text, "0.5 ETH");
    }

    #[test]
    fn test_literal_value_skips_near_zero_marker() {
        let display = CurrencyDisplay::default();
        let request = ConversionRequest::new("0x1")
            .with_display_value("0")
            .with_currency("ETH");
        let value = display.format_value(&request, &usd_settings(None)).unwrap();
        assert_eq!(value.as_deref(), Some("0"));
    }

    #[test]
    fn test_near_zero_marker_in_native_branch() {
        let display = CurrencyDisplay::default();
        let request = ConversionRequest::new("0x1").with_currency("ETH");
        let value = display.format_value(&request, &usd_settings(None)).unwrap();
        assert_eq!(value.as_deref(), Some(NEAR_ZERO_MARKER));
    }

    #[test]
    fn test_prefix_and_denomination() {
        let display = CurrencyDisplay::default();
        let request = ConversionRequest::new("0x3b9aca00")
            .with_currency("ETH")
            .with_denomination(Denomination::Gwei)
            .with_prefix("-")
            .with_suffix("GWEI");
        let (text, parts) = display.format(&request, &usd_settings(None)).unwrap();
        assert_eq!(text, "-1 GWEI");
        assert_eq!(parts.prefix.as_deref(), Some("-"));
    }

    #[test]
    fn test_suffix_casing() {
        let display = CurrencyDisplay::default();
        let suffix = |c: &str| display.suffix(&ConversionRequest::new("0x1").with_currency(c));
        assert_eq!(suffix("SepoliaETH").as_deref(), Some("SepoliaETH"));
        assert_eq!(suffix("usd").as_deref(), Some("USD"));
        assert_eq!(suffix("sepoliaeth").as_deref(), Some("SEPOLIAETH"));
        assert_eq!(display.suffix(&ConversionRequest::new("0x1")), None);
    }

    #[test]
    fn test_suffix_override_and_hide() {
        let display = CurrencyDisplay::default();
        let request = ConversionRequest::new("0x1").with_currency("usd").with_suffix("dollars");
        assert_eq!(display.suffix(&request).as_deref(), Some("dollars"));
        assert_eq!(display.suffix(&request.clone().hide_label()), None);
        let empty = ConversionRequest::new("0x1").with_currency("usd").with_suffix("");
        assert_eq!(display.suffix(&empty).as_deref(), Some("USD"));
    }

    #[test]
    fn test_builder_custom_tickers() {
        let display = CurrencyDisplay::builder()
            .test_network_tickers(["HoleskyETH"])
            .build();
        assert!(display.is_test_network_ticker("HoleskyETH"));
        assert!(!display.is_test_network_ticker("SepoliaETH"));

        let display = CurrencyDisplay::builder().add_test_network_ticker("tBNB").build();
        assert!(display.is_test_network_ticker("tBNB"));
        assert!(display.is_test_network_ticker("SepoliaETH"));
    }

    #[derive(Debug)]
    struct PlainFormatter;

    impl CurrencyFormatter for PlainFormatter {
        fn format(&self, value: &NumericValue, currency: &CurrencyCode, decimals: u32) -> String {
            format!("{}:{}", currency, value.to_fixed(decimals))
        }
    }

    #[test]
    fn test_builder_custom_formatter_and_table() {
        let display = CurrencyDisplay::builder()
            .currency_formatter(PlainFormatter)
            .denominations(DenominationTable::new(3, 6).unwrap())
            .build();
        // 1_000_000 smallest units of a 6-decimal asset
        let request = ConversionRequest::new("0xf4240").with_currency("usd");
        let value = display.format_value(&request, &usd_settings(Some("3.5"))).unwrap();
        assert_eq!(value.as_deref(), Some("usd:3.50"));
    }

    #[test]
    fn test_invalid_amount_is_an_error() {
        let display = CurrencyDisplay::default();
        let request = ConversionRequest::new("").with_currency("ETH");
        let err = display.format(&request, &usd_settings(None)).unwrap_err();
        assert!(matches!(err, DisplayError::InvalidNumericInput { .. }));
    }

    #[test]
    fn test_formatted_result_text() {
        let parts = FormattedResult {
            prefix: Some("~".into()),
            value: Some("1.5".into()),
            suffix: Some(String::new()),
        };
        assert_eq!(parts.text(), "~1.5");
        assert_eq!(parts.to_string(), "~1.5");
    }
}
