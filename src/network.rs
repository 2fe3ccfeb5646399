//! Network constants.

/// Native-currency tickers of the preloaded test networks.
///
/// These are stylized, so suffixes matching one of them keep their case.
/// Matching is case-sensitive.
pub const TEST_NETWORK_TICKERS: &[&str] = &["GoerliETH", "SepoliaETH", "LineaETH"];

/// Whether `ticker` is one of [`TEST_NETWORK_TICKERS`].
pub fn is_test_network_ticker(ticker: &str) -> bool {
    TEST_NETWORK_TICKERS.contains(&ticker)
}
