// Ticker symbol helpers shared by the engine and any rendering client.
use std::collections::HashSet;

/// Trims surrounding whitespace and upper-cases a ticker symbol.
pub fn normalize_ticker(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// True for a non-empty normalized symbol made only of `A-Z`, `0-9` and `. ^ = -`
/// (covers `BRK.B`, `^GSPC`, `EURUSD=X`, `BTC-USD`). Symbols name files on disk,
/// so path separators are never accepted.
pub fn is_valid_ticker(ticker: &str) -> bool {
    !ticker.is_empty()
        && ticker
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || matches!(c, '.' | '^' | '=' | '-'))
}

/// Normalizes every symbol, drops blanks and removes duplicates.
/// First occurrence wins, so the input order is preserved.
pub fn normalize_tickers<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    raw.into_iter()
        .map(|s| normalize_ticker(s.as_ref()))
        .filter(|t| !t.is_empty())
        .filter(|t| seen.insert(t.clone()))
        .collect()
}

/// Parses comma-separated user input such as `"AAPL, tsla,,msft"`.
pub fn parse_ticker_list(input: &str) -> Vec<String> {
    normalize_tickers(input.split(','))
}
