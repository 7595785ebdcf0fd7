// Handler for the CompareClose RPC
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tokio_stream::wrappers::ReceiverStream;
use tonic::{Response, Status};

use super::helpers::{from_wire_date, run_on_dashboard, to_close_series};
use crate::analysis::Dashboard;
use crate::config::DashboardQuery;
use crate::services::{CompareRequest, TickerCloseSeries};

pub async fn handle_compare_close(
    req_payload: CompareRequest,
    dashboard: Arc<Mutex<Dashboard>>,
) -> Result<Response<ReceiverStream<Result<TickerCloseSeries, Status>>>, Status> {
    let start = from_wire_date("start_date", &req_payload.start_date)?;
    let end = from_wire_date("end_date", &req_payload.end_date)?;
    let query = DashboardQuery { start, end, ..DashboardQuery::for_today(end) }.with_compare_input(&req_payload.tickers);
    let requested = query.compare_tickers.clone();

    let series_by_ticker = run_on_dashboard(dashboard, move |dashboard| dashboard.compare_for(&query)).await?;

    if series_by_ticker.is_empty() {
        tracing::warn!(?requested, "No comparison ticker returned data (handler).");
    }
    let messages: Vec<TickerCloseSeries> = series_by_ticker
        .iter()
        .map(|(ticker, series)| to_close_series(ticker, series))
        .collect();

    let (tx, rx) = mpsc::channel(4);
    tokio::spawn(async move {
        for message in messages {
            let ticker = message.ticker.clone();
            if let Err(e) = tx.send(Ok(message)).await {
                tracing::error!(error = ?e, symbol = %ticker, "Failed to send comparison series to stream (handler)");
                return;
            }
        }
    });

    Ok(Response::new(ReceiverStream::new(rx)))
}
