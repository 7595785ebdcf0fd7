// gRPC surface consumed by the rendering layer
pub mod generated {
    tonic::include_proto!("dashboard");
}

pub mod dashboard_service;

pub use generated::dashboard_engine_server::{DashboardEngine, DashboardEngineServer};
pub use generated::{
    AnalyzeRequest, AnalyzeResponse, Bar as ProtoBar, ClosePoint, CompareRequest, ExportResponse,
    IndicatorColumn as ProtoIndicatorColumn, IndicatorPoint, TickerCloseSeries,
};
