// Fixtures shared by the unit tests
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::{Days, NaiveDate};
use shared::models::{Bar, Series};

use crate::data::provider::PriceProvider;
use crate::error::EngineError;

pub(crate) fn day(offset: u64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + Days::new(offset)
}

pub(crate) fn bar_on(date: NaiveDate, close: f64) -> Bar {
    Bar { date, open: close, high: close, low: close, close, volume: 1_000 }
}

// One bar per consecutive day starting at day(0)
pub(crate) fn bars_from_closes(closes: &[f64]) -> Vec<Bar> {
    closes.iter().enumerate().map(|(i, &close)| bar_on(day(i as u64), close)).collect()
}

pub(crate) fn series_from_closes(ticker: &str, closes: &[f64]) -> Series {
    let end = day(closes.len() as u64);
    Series::new(ticker, day(0), end, bars_from_closes(closes)).unwrap()
}

/// Wraps a provider and counts how often it is asked for data.
pub(crate) struct CountingProvider<P> {
    inner: P,
    calls: Arc<AtomicUsize>,
}

impl<P> CountingProvider<P> {
    pub(crate) fn new(inner: P) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (Self { inner, calls: calls.clone() }, calls)
    }
}

impl<P: PriceProvider> PriceProvider for CountingProvider<P> {
    fn fetch_bars(&self, ticker: &str, start: NaiveDate, end: NaiveDate) -> Result<Vec<Bar>, EngineError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.fetch_bars(ticker, start, end)
    }
}

/// Fails for one ticker, standing in for an unreachable upstream, and delegates the rest.
pub(crate) struct FailingFor<P> {
    pub(crate) ticker: &'static str,
    pub(crate) inner: P,
}

impl<P: PriceProvider> PriceProvider for FailingFor<P> {
    fn fetch_bars(&self, ticker: &str, start: NaiveDate, end: NaiveDate) -> Result<Vec<Bar>, EngineError> {
        if ticker == self.ticker {
            return Err(EngineError::ProviderError(format!("upstream unreachable for {}", ticker)));
        }
        self.inner.fetch_bars(ticker, start, end)
    }
}
