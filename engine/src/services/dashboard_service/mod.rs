// engine/src/services/dashboard_service/mod.rs
// The DashboardEngine gRPC service: the struct, its trait impl, and one
// submodule per RPC handler.

use super::{AnalyzeRequest, AnalyzeResponse, CompareRequest, DashboardEngine, ExportResponse, TickerCloseSeries};
use crate::analysis::Dashboard;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio_stream::wrappers::ReceiverStream;
use tonic::{Request, Response, Status};

pub mod analyze;
pub mod compare_close;
pub mod export_csv;
pub mod helpers;

// One dashboard (and its series cache) serves every request; the mutex keeps access serial.
pub struct MyDashboardEngine {
    dashboard: Arc<Mutex<Dashboard>>,
}

impl MyDashboardEngine {
    pub fn new(dashboard: Arc<Mutex<Dashboard>>) -> Self {
        MyDashboardEngine { dashboard }
    }
}

#[tonic::async_trait]
impl DashboardEngine for MyDashboardEngine {
    async fn analyze(&self, request: Request<AnalyzeRequest>) -> Result<Response<AnalyzeResponse>, Status> {
        let req_payload = request.into_inner();
        tracing::info!(
            symbol = %req_payload.ticker,
            start = %req_payload.start_date,
            end = %req_payload.end_date,
            ma_window = req_payload.ma_window,
            rsi_period = req_payload.rsi_period,
            "Received AnalyzeRequest, dispatching to handler."
        );
        analyze::handle_analyze(req_payload, self.dashboard.clone()).await
    }

    type CompareCloseStream = ReceiverStream<Result<TickerCloseSeries, Status>>;
    async fn compare_close(&self, request: Request<CompareRequest>) -> Result<Response<Self::CompareCloseStream>, Status> {
        let req_payload = request.into_inner();
        tracing::info!(
            tickers = %req_payload.tickers,
            start = %req_payload.start_date,
            end = %req_payload.end_date,
            "Received CompareRequest, dispatching to handler."
        );
        compare_close::handle_compare_close(req_payload, self.dashboard.clone()).await
    }

    async fn export_csv(&self, request: Request<AnalyzeRequest>) -> Result<Response<ExportResponse>, Status> {
        let req_payload = request.into_inner();
        tracing::info!(symbol = %req_payload.ticker, "Received ExportCsv request, dispatching to handler.");
        export_csv::handle_export_csv(req_payload, self.dashboard.clone()).await
    }
}
