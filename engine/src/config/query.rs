// Parameters of one dashboard request and their validation
use chrono::{Days, Local, NaiveDate};
use shared::utils::{is_valid_ticker, normalize_ticker, parse_ticker_list};
use std::ops::RangeInclusive;

use crate::error::EngineError;

pub const DEFAULT_TICKERS: [&str; 6] = ["AAPL", "TSLA", "GOOGL", "MSFT", "AMZN", "META"];
pub const DEFAULT_LOOKBACK_DAYS: u64 = 180;
pub const DEFAULT_MA_WINDOW: usize = 20;
pub const DEFAULT_RSI_PERIOD: usize = 14;
pub const DEFAULT_COMPARE_TICKERS: &str = "AAPL,TSLA";

pub const MA_WINDOW_RANGE: RangeInclusive<usize> = 5..=60;
pub const RSI_PERIOD_RANGE: RangeInclusive<usize> = 5..=30;

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardQuery {
    pub ticker: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub ma_window: usize,
    pub rsi_period: usize,
    pub compare_tickers: Vec<String>,
}

impl DashboardQuery {
    /// Defaults relative to `today`: the last 180 days of the first default ticker.
    pub fn for_today(today: NaiveDate) -> Self {
        DashboardQuery {
            ticker: DEFAULT_TICKERS[0].to_string(),
            start: today.checked_sub_days(Days::new(DEFAULT_LOOKBACK_DAYS)).unwrap_or(today),
            end: today,
            ma_window: DEFAULT_MA_WINDOW,
            rsi_period: DEFAULT_RSI_PERIOD,
            compare_tickers: parse_ticker_list(DEFAULT_COMPARE_TICKERS),
        }
    }

    pub fn with_compare_input(mut self, input: &str) -> Self {
        self.compare_tickers = parse_ticker_list(input);
        self
    }

    // The indicator core accepts any positive window; the ranges here are product limits.
    pub fn validate(&self) -> Result<(), EngineError> {
        let ticker = normalize_ticker(&self.ticker);
        if !is_valid_ticker(&ticker) {
            return Err(EngineError::InvalidParameter(format!("Invalid ticker symbol '{}'", ticker)));
        }
        if self.start > self.end {
            return Err(EngineError::InvalidParameter(format!("Start date {} is after end date {}", self.start, self.end)));
        }
        if !MA_WINDOW_RANGE.contains(&self.ma_window) {
            return Err(EngineError::InvalidParameter(format!(
                "Moving average window {} is outside {}..={}",
                self.ma_window,
                MA_WINDOW_RANGE.start(),
                MA_WINDOW_RANGE.end()
            )));
        }
        if !RSI_PERIOD_RANGE.contains(&self.rsi_period) {
            return Err(EngineError::InvalidParameter(format!(
                "RSI period {} is outside {}..={}",
                self.rsi_period,
                RSI_PERIOD_RANGE.start(),
                RSI_PERIOD_RANGE.end()
            )));
        }
        Ok(())
    }
}

impl Default for DashboardQuery {
    fn default() -> Self {
        Self::for_today(Local::now().date_naive())
    }
}
