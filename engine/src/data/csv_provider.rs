use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord};
use shared::models::Bar;
use shared::utils::{is_valid_ticker, normalize_ticker};
use std::fs::File;
use std::io::{BufReader, ErrorKind};
use std::path::{Path, PathBuf};

use super::provider::PriceProvider;
use crate::error::EngineError;

// Field parsing for daily-bar downloads: ISO dates, plain decimals, integral volume.
pub mod daily_format {
    use anyhow::{anyhow, Result};
    use chrono::NaiveDate;

    // Accepts "2024-01-02" as well as a timestamped "2024-01-02 00:00:00-05:00"
    pub fn parse_date(s: &str) -> Result<NaiveDate> {
        let date_part = s.trim().split([' ', 'T']).next().unwrap_or_default();
        NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
            .map_err(|e| anyhow!("Failed to parse date '{}': {}", s, e))
    }

    pub fn parse_price(s: &str) -> Result<f64> {
        let value: f64 = s.trim().parse().map_err(|e| anyhow!("Failed to parse decimal '{}': {}", s, e))?;
        if !value.is_finite() || value <= 0.0 {
            return Err(anyhow!("Price must be a positive number, got '{}'", s));
        }
        Ok(value)
    }

    // Some exports write volume as "1200.0"; only integral, non-negative values are accepted.
    pub fn parse_volume(s: &str) -> Result<u64> {
        let trimmed = s.trim();
        if let Ok(volume) = trimmed.parse::<u64>() {
            return Ok(volume);
        }
        let value: f64 = trimmed.parse().map_err(|e| anyhow!("Failed to parse volume '{}': {}", s, e))?;
        if value.is_finite() && value >= 0.0 && value.fract() == 0.0 {
            Ok(value as u64)
        } else {
            Err(anyhow!("Volume must be a non-negative integer, got '{}'", s))
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use chrono::Datelike;

        #[test]
        fn test_parse_date_plain() {
            let date = parse_date("2024-12-30").unwrap();
            assert_eq!((date.year(), date.month(), date.day()), (2024, 12, 30));
        }

        #[test]
        fn test_parse_date_with_time() {
            assert_eq!(parse_date("2024-12-30 00:00:00-05:00").unwrap(), parse_date("2024-12-30").unwrap());
        }

        #[test]
        fn test_parse_date_invalid() {
            assert!(parse_date("30/12/2024").is_err());
            assert!(parse_date("2024-13-01").is_err());
        }

        #[test]
        fn test_parse_price() {
            assert_eq!(parse_price(" 189.25 ").unwrap(), 189.25);
            assert!(parse_price("abc").is_err());
            assert!(parse_price("-1.0").is_err());
            assert!(parse_price("NaN").is_err());
        }

        #[test]
        fn test_parse_volume() {
            assert_eq!(parse_volume("52164500").unwrap(), 52164500);
            assert_eq!(parse_volume("1200.0").unwrap(), 1200);
            assert!(parse_volume("12.5").is_err());
            assert!(parse_volume("-3").is_err());
        }
    }
}

/// Reads daily bars from `<data_dir>/<TICKER>.csv`.
///
/// Expected header: `Date,Open,High,Low,Close,Volume` (extra columns such as
/// `Adj Close` are ignored; columns are matched by name, case-insensitively).
pub struct CsvPriceProvider {
    data_dir: PathBuf,
}

impl CsvPriceProvider {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self { data_dir: data_dir.into() }
    }

    // Symbols that could name anything outside data_dir are refused.
    pub fn path_for(&self, ticker: &str) -> Result<PathBuf, EngineError> {
        let ticker = normalize_ticker(ticker);
        if !is_valid_ticker(&ticker) {
            return Err(EngineError::InvalidParameter(format!("Invalid ticker symbol '{}'", ticker)));
        }
        Ok(self.data_dir.join(format!("{}.csv", ticker)))
    }

    pub fn load_bars_from_csv(file_path: &Path) -> Result<Vec<Bar>, EngineError> {
        let file = File::open(file_path)?;
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(BufReader::new(file));

        let headers = rdr.headers()?.clone();
        let mut bars = Vec::new();

        for (idx, result) in rdr.records().enumerate() {
            let line = idx + 2;
            let record = result?;

            let date = daily_format::parse_date(Self::get_field(&record, &headers, "Date", line)?)
                .map_err(|e| EngineError::CsvDataFormatError(format!("Error parsing 'Date' at line {}: {}", line, e)))?;
            let open = Self::price_field(&record, &headers, "Open", line)?;
            let high = Self::price_field(&record, &headers, "High", line)?;
            let low = Self::price_field(&record, &headers, "Low", line)?;
            let close = Self::price_field(&record, &headers, "Close", line)?;
            let volume = daily_format::parse_volume(Self::get_field(&record, &headers, "Volume", line)?)
                .map_err(|e| EngineError::CsvDataFormatError(format!("Error parsing 'Volume' at line {}: {}", line, e)))?;

            bars.push(Bar { date, open, high, low, close, volume });
        }
        Ok(bars)
    }

    fn price_field(record: &StringRecord, headers: &StringRecord, name: &str, line: usize) -> Result<f64, EngineError> {
        daily_format::parse_price(Self::get_field(record, headers, name, line)?)
            .map_err(|e| EngineError::CsvDataFormatError(format!("Error parsing '{}' at line {}: {}", name, line, e)))
    }

    // Looks a field up by header name so column order does not matter.
    fn get_field<'a>(record: &'a StringRecord, headers: &StringRecord, name: &str, line: usize) -> Result<&'a str, EngineError> {
        headers
            .iter()
            .position(|header| header.eq_ignore_ascii_case(name))
            .and_then(|pos| record.get(pos))
            .ok_or_else(|| EngineError::CsvDataFormatError(format!("Missing '{}' field in CSV record at line {}", name, line)))
    }
}

impl PriceProvider for CsvPriceProvider {
    fn fetch_bars(&self, ticker: &str, start: NaiveDate, end: NaiveDate) -> Result<Vec<Bar>, EngineError> {
        let path = self.path_for(ticker)?;
        let bars = match Self::load_bars_from_csv(&path) {
            Ok(bars) => bars,
            Err(EngineError::IoError { source }) if source.kind() == ErrorKind::NotFound => {
                tracing::debug!(symbol = %ticker, path = %path.display(), "No CSV file for ticker");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e),
        };
        let total = bars.len();
        let in_range: Vec<Bar> = bars.into_iter().filter(|b| b.date >= start && b.date <= end).collect();
        tracing::debug!(symbol = %ticker, total, in_range = in_range.len(), "Read bars from CSV");
        Ok(in_range)
    }
}
