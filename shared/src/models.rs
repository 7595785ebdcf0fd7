use std::sync::Arc;

use anyhow::{bail, ensure, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One trading day's OHLCV observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

/// Date-ordered daily bars for one ticker over `[start, end]`.
///
/// Fields are private: once built, a series is read-only. A series may be
/// empty when the provider had no rows for the query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    ticker: String,
    start: NaiveDate,
    end: NaiveDate,
    bars: Vec<Bar>,
}

impl Series {
    /// Builds a series, rejecting bars whose dates are not strictly increasing.
    pub fn new(ticker: impl Into<String>, start: NaiveDate, end: NaiveDate, bars: Vec<Bar>) -> Result<Self> {
        let ticker = ticker.into();
        if let Some(pair) = bars.windows(2).find(|pair| pair[0].date >= pair[1].date) {
            bail!(
                "Bars for '{}' are not strictly increasing by date: {} followed by {}",
                ticker,
                pair[0].date,
                pair[1].date
            );
        }
        Ok(Self { ticker, start, end, bars })
    }

    pub fn empty(ticker: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Self {
        Self { ticker: ticker.into(), start, end, bars: Vec::new() }
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }
}

/// A derived column aligned index-for-index with the series it was computed from.
/// `None` marks an undefined entry (warm-up or an indeterminate ratio).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorColumn {
    pub name: String,
    pub parameters: serde_json::Value,
    pub values: Vec<Option<f64>>,
}

impl IndicatorColumn {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied().flatten()
    }

    /// (index, value) pairs of the defined entries only.
    pub fn defined(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.values.iter().enumerate().filter_map(|(i, v)| v.map(|v| (i, v)))
    }

    pub fn defined_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    pub fn last_defined(&self) -> Option<f64> {
        self.values.iter().rev().find_map(|v| *v)
    }
}

/// A series together with the indicator columns computed from it.
#[derive(Debug, Clone)]
pub struct AugmentedSeries {
    series: Arc<Series>,
    indicators: Vec<IndicatorColumn>,
}

/// One date of an augmented series: the bar plus each indicator's value, in column order.
#[derive(Debug, Clone, PartialEq)]
pub struct AugmentedRow<'a> {
    pub bar: &'a Bar,
    pub values: Vec<Option<f64>>,
}

impl AugmentedSeries {
    pub fn new(series: Arc<Series>) -> Self {
        Self { series, indicators: Vec::new() }
    }

    pub fn with_indicator(mut self, column: IndicatorColumn) -> Result<Self> {
        ensure!(
            column.len() == self.series.len(),
            "Indicator '{}' has {} values but series '{}' has {} bars",
            column.name,
            column.len(),
            self.series.ticker(),
            self.series.len()
        );
        self.indicators.push(column);
        Ok(self)
    }

    pub fn series(&self) -> &Arc<Series> {
        &self.series
    }

    pub fn ticker(&self) -> &str {
        self.series.ticker()
    }

    pub fn indicators(&self) -> &[IndicatorColumn] {
        &self.indicators
    }

    pub fn indicator(&self, name: &str) -> Option<&IndicatorColumn> {
        self.indicators.iter().find(|c| c.name == name)
    }

    pub fn rows(&self) -> impl Iterator<Item = AugmentedRow<'_>> + '_ {
        self.series.bars().iter().enumerate().map(move |(i, bar)| AugmentedRow {
            bar,
            values: self.indicators.iter().map(|c| c.values[i]).collect(),
        })
    }

    /// The last `n` rows (fewer if the series is shorter), oldest first.
    pub fn tail(&self, n: usize) -> Vec<AugmentedRow<'_>> {
        let skip = self.series.len().saturating_sub(n);
        self.rows().skip(skip).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn bar(d: u32, close: f64) -> Bar {
        Bar { date: day(d), open: close, high: close, low: close, close, volume: 100 }
    }

    #[test]
    fn test_series_rejects_unordered_dates() {
        let result = Series::new("AAPL", day(1), day(10), vec![bar(2, 1.0), bar(1, 2.0)]);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("not strictly increasing"));
    }

    #[test]
    fn test_series_rejects_duplicate_dates() {
        assert!(Series::new("AAPL", day(1), day(10), vec![bar(2, 1.0), bar(2, 2.0)]).is_err());
    }

    #[test]
    fn test_empty_series() {
        let series = Series::empty("TSLA", day(1), day(10));
        assert!(series.is_empty());
        assert_eq!(series.len(), 0);
        assert_eq!(series.ticker(), "TSLA");
    }

    #[test]
    fn test_indicator_column_helpers() {
        let column = IndicatorColumn {
            name: "MA(2)".to_string(),
            parameters: serde_json::json!({ "window": 2 }),
            values: vec![None, Some(1.5), None, Some(3.0), None],
        };
        assert_eq!(column.get(1), Some(1.5));
        assert_eq!(column.get(2), None);
        assert_eq!(column.get(99), None);
        assert_eq!(column.defined_count(), 2);
        assert_eq!(column.last_defined(), Some(3.0));
        assert_eq!(column.defined().collect::<Vec<_>>(), vec![(1, 1.5), (3, 3.0)]);
    }

    #[test]
    fn test_augmented_series_rejects_misaligned_column() {
        let series = Arc::new(Series::new("AAPL", day(1), day(10), vec![bar(1, 1.0), bar(2, 2.0)]).unwrap());
        let column = IndicatorColumn { name: "X".to_string(), parameters: serde_json::json!({}), values: vec![None] };
        assert!(AugmentedSeries::new(series).with_indicator(column).is_err());
    }

    #[test]
    fn test_augmented_series_tail() {
        let bars = (1..=7).map(|d| bar(d, d as f64)).collect();
        let series = Arc::new(Series::new("AAPL", day(1), day(10), bars).unwrap());
        let column = IndicatorColumn {
            name: "X".to_string(),
            parameters: serde_json::json!({}),
            values: (1..=7).map(|d| if d > 3 { Some(d as f64) } else { None }).collect(),
        };
        let augmented = AugmentedSeries::new(series).with_indicator(column).unwrap();

        let tail = augmented.tail(5);
        assert_eq!(tail.len(), 5);
        assert_eq!(tail[0].bar.date, day(3));
        assert_eq!(tail[0].values, vec![None]);
        assert_eq!(tail[4].values, vec![Some(7.0)]);
        assert_eq!(augmented.tail(50).len(), 7);
        assert!(augmented.indicator("X").is_some());
        assert!(augmented.indicator("Y").is_none());
    }
}
