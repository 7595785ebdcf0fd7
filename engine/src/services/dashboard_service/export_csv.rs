// Handler for the ExportCsv RPC
use std::sync::Arc;
use tokio::sync::Mutex;
use tonic::{Response, Status};

use super::helpers::{query_from_request, run_on_dashboard};
use crate::analysis::Dashboard;
use crate::export::{export_file_name, to_csv_bytes};
use crate::services::{AnalyzeRequest, ExportResponse};

pub async fn handle_export_csv(
    req_payload: AnalyzeRequest,
    dashboard: Arc<Mutex<Dashboard>>,
) -> Result<Response<ExportResponse>, Status> {
    let query = query_from_request(&req_payload)?;
    let augmented = run_on_dashboard(dashboard, move |dashboard| dashboard.analyze(&query)).await?;

    let content = to_csv_bytes(&augmented)?;
    tracing::debug!(symbol = %augmented.ticker(), size = content.len(), "CSV export ready (handler)");

    Ok(Response::new(ExportResponse {
        file_name: export_file_name(augmented.ticker()),
        content,
    }))
}
