//! Seam for the upstream price-data collaborator.
//!
//! A provider answers `(ticker, start, end)` with the daily bars it has. Zero rows
//! is a normal answer meaning "no data"; `Err` is reserved for fetch-level failures
//! (unreadable source, malformed rows).

use std::collections::HashMap;

use chrono::NaiveDate;
use shared::models::Bar;
use shared::utils::normalize_ticker;

use crate::error::EngineError;

pub trait PriceProvider: Send + Sync {
    /// Returns the bars for `ticker` dated within `[start, end]`.
    fn fetch_bars(&self, ticker: &str, start: NaiveDate, end: NaiveDate) -> Result<Vec<Bar>, EngineError>;
}

/// Serves bars held in memory. Useful for embedding the engine and for tests.
#[derive(Debug, Default, Clone)]
pub struct InMemoryPriceProvider {
    bars: HashMap<String, Vec<Bar>>,
}

impl InMemoryPriceProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bars(mut self, ticker: &str, bars: Vec<Bar>) -> Self {
        self.insert(ticker, bars);
        self
    }

    pub fn insert(&mut self, ticker: &str, bars: Vec<Bar>) {
        self.bars.entry(normalize_ticker(ticker)).or_default().extend(bars);
    }
}

impl PriceProvider for InMemoryPriceProvider {
    fn fetch_bars(&self, ticker: &str, start: NaiveDate, end: NaiveDate) -> Result<Vec<Bar>, EngineError> {
        Ok(self
            .bars
            .get(&normalize_ticker(ticker))
            .map(|bars| bars.iter().filter(|b| b.date >= start && b.date <= end).copied().collect())
            .unwrap_or_default())
    }
}
