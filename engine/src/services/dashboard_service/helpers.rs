// Conversions between domain models and gRPC messages
use chrono::NaiveDate;
use shared::models::{AugmentedSeries, Bar, IndicatorColumn, Series};
use std::sync::Arc;
use tokio::sync::Mutex;
use tonic::Status;

use crate::analysis::Dashboard;
use crate::config::DashboardQuery;
use crate::error::EngineError;
use crate::services::{AnalyzeRequest, AnalyzeResponse, ClosePoint, IndicatorPoint, ProtoBar, ProtoIndicatorColumn, TickerCloseSeries};

const WIRE_DATE_FORMAT: &str = "%Y-%m-%d";

pub fn to_wire_date(date: NaiveDate) -> String {
    date.format(WIRE_DATE_FORMAT).to_string()
}

pub fn from_wire_date(field: &str, value: &str) -> Result<NaiveDate, EngineError> {
    NaiveDate::parse_from_str(value.trim(), WIRE_DATE_FORMAT)
        .map_err(|e| EngineError::InvalidParameter(format!("Invalid {} '{}': {}", field, value, e)))
}

// Dashboard work reads CSV files synchronously, so it runs on the blocking pool
// with the lock taken there rather than on a runtime worker.
pub async fn run_on_dashboard<T, F>(dashboard: Arc<Mutex<Dashboard>>, work: F) -> Result<T, Status>
where
    T: Send + 'static,
    F: FnOnce(&mut Dashboard) -> Result<T, EngineError> + Send + 'static,
{
    let result = tokio::task::spawn_blocking(move || {
        let mut dashboard = dashboard.blocking_lock();
        work(&mut dashboard)
    })
    .await
    .map_err(|e| Status::internal(format!("Dashboard task failed: {}", e)))?;
    Ok(result?)
}

pub fn query_from_request(req: &AnalyzeRequest) -> Result<DashboardQuery, EngineError> {
    Ok(DashboardQuery {
        ticker: req.ticker.clone(),
        start: from_wire_date("start_date", &req.start_date)?,
        end: from_wire_date("end_date", &req.end_date)?,
        ma_window: req.ma_window as usize,
        rsi_period: req.rsi_period as usize,
        compare_tickers: Vec::new(),
    })
}

pub fn to_proto_bar(bar: &Bar) -> ProtoBar {
    ProtoBar {
        date: to_wire_date(bar.date),
        open: bar.open,
        high: bar.high,
        low: bar.low,
        close: bar.close,
        volume: bar.volume,
    }
}

pub fn to_proto_indicator(series: &Series, column: &IndicatorColumn) -> ProtoIndicatorColumn {
    ProtoIndicatorColumn {
        name: column.name.clone(),
        parameters: column.parameters.to_string(),
        points: series
            .bars()
            .iter()
            .zip(&column.values)
            .map(|(bar, value)| IndicatorPoint { date: to_wire_date(bar.date), value: *value })
            .collect(),
    }
}

pub fn to_analyze_response(augmented: &AugmentedSeries) -> AnalyzeResponse {
    let series = augmented.series();
    AnalyzeResponse {
        ticker: augmented.ticker().to_string(),
        bars: series.bars().iter().map(to_proto_bar).collect(),
        indicators: augmented.indicators().iter().map(|c| to_proto_indicator(series, c)).collect(),
    }
}

pub fn to_close_series(ticker: &str, series: &Series) -> TickerCloseSeries {
    TickerCloseSeries {
        ticker: ticker.to_string(),
        points: series
            .bars()
            .iter()
            .map(|b| ClosePoint { date: to_wire_date(b.date), close: b.close })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_dates() {
        let date = from_wire_date("start_date", " 2024-02-29 ").unwrap();
        assert_eq!(to_wire_date(date), "2024-02-29");
        let err = from_wire_date("start_date", "29/02/2024").unwrap_err();
        assert!(matches!(err, EngineError::InvalidParameter(_)));
        assert!(err.to_string().contains("start_date"));
    }

    #[tokio::test]
    async fn test_run_on_dashboard_maps_engine_errors() {
        use crate::data::provider::InMemoryPriceProvider;
        use crate::data::series_store::SeriesStore;

        let dashboard = Arc::new(Mutex::new(Dashboard::new(SeriesStore::new(InMemoryPriceProvider::new()))));
        let cached = run_on_dashboard(Arc::clone(&dashboard), |d| Ok(d.store().cached_entries())).await.unwrap();
        assert_eq!(cached, 0);

        let status = run_on_dashboard(dashboard, |_| -> Result<(), EngineError> {
            Err(EngineError::InvalidParameter("window".to_string()))
        })
        .await
        .unwrap_err();
        assert_eq!(status.code(), tonic::Code::InvalidArgument);
    }

    #[test]
    fn test_query_from_request() {
        let req = AnalyzeRequest {
            ticker: "msft".to_string(),
            start_date: "2024-01-01".to_string(),
            end_date: "2024-06-30".to_string(),
            ma_window: 20,
            rsi_period: 14,
        };
        let query = query_from_request(&req).unwrap();
        assert_eq!(query.ticker, "msft");
        assert_eq!(query.ma_window, 20);
        assert_eq!(query.rsi_period, 14);
        assert!(query.validate().is_ok());
    }
}
