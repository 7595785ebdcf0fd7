// Dashboard computations: one augmented series per query, plus comparisons
pub mod compare;

pub use compare::compare_close;

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;
use shared::models::{AugmentedSeries, Series};

use crate::config::DashboardQuery;
use crate::data::series_store::SeriesStore;
use crate::error::EngineError;
use crate::indicators::{moving_average, rsi};

/// Rows shown in the raw-data preview.
pub const PREVIEW_ROWS: usize = 5;

pub struct Dashboard {
    store: SeriesStore,
}

impl Dashboard {
    pub fn new(store: SeriesStore) -> Self {
        Dashboard { store }
    }

    pub fn store(&self) -> &SeriesStore {
        &self.store
    }

    /// Loads the query's series and attaches the moving-average and RSI columns.
    pub fn analyze(&mut self, query: &DashboardQuery) -> Result<AugmentedSeries, EngineError> {
        query.validate()?;
        let series = self.store.load(&query.ticker, query.start, query.end)?;

        let ma = moving_average(&series, query.ma_window)?;
        let rsi = rsi(&series, query.rsi_period)?;
        tracing::debug!(
            symbol = %series.ticker(),
            bars = series.len(),
            ma_defined = ma.defined_count(),
            rsi_defined = rsi.defined_count(),
            ma_last = ?ma.last_defined(),
            rsi_last = ?rsi.last_defined(),
            "Computed indicators"
        );

        Ok(AugmentedSeries::new(series).with_indicator(ma)?.with_indicator(rsi)?)
    }

    pub fn compare_close<I, S>(&mut self, tickers: I, start: NaiveDate, end: NaiveDate) -> Result<BTreeMap<String, Arc<Series>>, EngineError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        compare_close(&mut self.store, tickers, start, end)
    }

    /// Comparison over the query's own ticker list and date range.
    pub fn compare_for(&mut self, query: &DashboardQuery) -> Result<BTreeMap<String, Arc<Series>>, EngineError> {
        self.compare_close(&query.compare_tickers, query.start, query.end)
    }
}
