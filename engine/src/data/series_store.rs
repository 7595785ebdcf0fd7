// Loads price series through a provider and memoizes them per query
use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use shared::models::Series;
use shared::utils::{is_valid_ticker, normalize_ticker};

use super::provider::PriceProvider;
use crate::error::EngineError;

type SeriesKey = (String, NaiveDate, NaiveDate);

/// Fetches daily series and keeps every result for the life of the store.
///
/// Entries are keyed by the exact `(ticker, start, end)` query and never change
/// once inserted. Empty results are cached as well; provider errors are not.
pub struct SeriesStore {
    provider: Box<dyn PriceProvider>,
    cache: HashMap<SeriesKey, Arc<Series>>,
}

impl SeriesStore {
    pub fn new(provider: impl PriceProvider + 'static) -> Self {
        SeriesStore {
            provider: Box::new(provider),
            cache: HashMap::new(),
        }
    }

    /// Like [`SeriesStore::load`], but an empty series is returned as-is.
    pub fn fetch(&mut self, ticker: &str, start: NaiveDate, end: NaiveDate) -> Result<Arc<Series>, EngineError> {
        let ticker = normalize_ticker(ticker);
        if !is_valid_ticker(&ticker) {
            return Err(EngineError::InvalidParameter(format!("Invalid ticker symbol '{}'", ticker)));
        }
        if start > end {
            return Err(EngineError::InvalidParameter(format!("Start date {} is after end date {}", start, end)));
        }

        let key = (ticker, start, end);
        if let Some(series) = self.cache.get(&key) {
            tracing::debug!(symbol = %key.0, %start, %end, "Series cache hit");
            return Ok(series.clone());
        }

        let mut bars = self.provider.fetch_bars(&key.0, start, end)?;
        bars.sort_by_key(|b| b.date);
        bars.dedup_by_key(|b| b.date);

        let series = Arc::new(Series::new(key.0.clone(), start, end, bars)?);
        tracing::debug!(symbol = %key.0, %start, %end, count = series.len(), "Series cache miss, fetched from provider");
        self.cache.insert(key, series.clone());
        Ok(series)
    }

    /// Returns the series for the query, or `DataUnavailable` when the provider has no rows.
    pub fn load(&mut self, ticker: &str, start: NaiveDate, end: NaiveDate) -> Result<Arc<Series>, EngineError> {
        let series = self.fetch(ticker, start, end)?;
        if series.is_empty() {
            tracing::warn!(symbol = %series.ticker(), %start, %end, "No data found for ticker and date range");
            return Err(EngineError::DataUnavailable {
                ticker: series.ticker().to_string(),
                start,
                end,
            });
        }
        Ok(series)
    }

    pub fn cached_entries(&self) -> usize {
        self.cache.len()
    }
}
