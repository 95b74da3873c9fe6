//! Ticker normalization
//!
//! Rewrites a TradingView symbol (`BINANCE:XLMUSDT.P`) into MEXC pair
//! notation (`XLM_USDT`).


/// Quote asset detection rules, checked in order.
///
/// Matching is plain substring containment. A base asset that itself contains
/// a quote needle (`USDTCOIN`) is split naively.
pub const QUOTE_RULES: &[QuoteRule] = &[
    QuoteRule { needle: "USDT", quote: "USDT" },
    QuoteRule { needle: "BUSD", quote: "BUSD" },
    // USD-quoted symbols trade against USDT on MEXC
    QuoteRule { needle: "USD", quote: "USDT" },
];

/// Derivative contract suffixes (perpetual, perpetual spot)
const CONTRACT_SUFFIXES: &[&str] = &[".PS", ".P"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuoteRule {
    /// Substring that identifies the quote asset
    pub needle: &'static str,
    /// Quote asset written after the pair separator
    pub quote: &'static str,
}

/// Normalize a charting-platform ticker into `BASE_QUOTE` form.
///
/// Total over any input: text that names no known quote asset comes back
/// with only its exchange prefix and contract suffix removed.
pub fn normalize(ticker: &str) -> String {
    let symbol = strip_contract_suffix(strip_exchange(ticker));

    let Some(rule) = QUOTE_RULES.iter().find(|r| symbol.contains(r.needle)) else {
        return symbol.to_string();
    };

    // Already in pair notation
    if symbol.ends_with(&format!("_{}", rule.quote)) {
        return symbol.to_string();
    }

    let base = symbol.replace(rule.needle, "");
    format!("{}_{}", base, rule.quote)
}

fn strip_exchange(ticker: &str) -> &str {
    match ticker.rsplit_once(':') {
        Some((_, symbol)) => symbol,
        None => ticker,
    }
}

fn strip_contract_suffix(symbol: &str) -> &str {
    CONTRACT_SUFFIXES
        .iter()
        .find_map(|suffix| symbol.strip_suffix(suffix))
        .unwrap_or(symbol)
}
