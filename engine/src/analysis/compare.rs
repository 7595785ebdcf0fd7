// Closing-price series for several tickers, for overlay on a shared time axis
use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;
use shared::models::Series;
use shared::utils::normalize_tickers;

use crate::data::series_store::SeriesStore;
use crate::error::EngineError;

/// Fetches each normalized ticker in turn and keeps the ones that have data.
///
/// Tickers with no rows, or whose fetch fails, are left out; the batch only
/// fails for an invalid date range. Series are not re-indexed against each other.
pub fn compare_close<I, S>(
    store: &mut SeriesStore,
    tickers: I,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<BTreeMap<String, Arc<Series>>, EngineError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    if start > end {
        return Err(EngineError::InvalidParameter(format!("Start date {} is after end date {}", start, end)));
    }

    let mut result = BTreeMap::new();
    for ticker in normalize_tickers(tickers) {
        match store.fetch(&ticker, start, end) {
            Ok(series) if series.is_empty() => {
                tracing::warn!(symbol = %ticker, "No data for comparison ticker, omitting it");
            }
            Ok(series) => {
                result.insert(ticker, series);
            }
            Err(e) => {
                tracing::warn!(symbol = %ticker, error_detail = %e, "Fetch failed for comparison ticker, omitting it");
            }
        }
    }
    tracing::debug!(count = result.len(), "Comparison series collected");
    Ok(result)
}
