// Handler for the Analyze RPC
use std::sync::Arc;
use tokio::sync::Mutex;
use tonic::{Response, Status};

use super::helpers::{query_from_request, run_on_dashboard, to_analyze_response};
use crate::analysis::{Dashboard, PREVIEW_ROWS};
use crate::services::{AnalyzeRequest, AnalyzeResponse};

pub async fn handle_analyze(
    req_payload: AnalyzeRequest,
    dashboard: Arc<Mutex<Dashboard>>,
) -> Result<Response<AnalyzeResponse>, Status> {
    tracing::debug!(symbol = %req_payload.ticker, "Handling AnalyzeRequest in dedicated handler");

    let query = query_from_request(&req_payload)?;
    let augmented = run_on_dashboard(dashboard, move |dashboard| dashboard.analyze(&query)).await?;

    tracing::debug!(
        symbol = %augmented.ticker(),
        bars = augmented.series().len(),
        preview = ?augmented.tail(PREVIEW_ROWS),
        "Analysis ready (handler)"
    );
    Ok(Response::new(to_analyze_response(&augmented)))
}
