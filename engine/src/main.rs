// Engine main entry point
use engine::analysis::Dashboard;
use engine::config::EngineSettings;
use engine::data::csv_provider::CsvPriceProvider;
use engine::data::series_store::SeriesStore;
use engine::services::dashboard_service::MyDashboardEngine;
use engine::services::DashboardEngineServer;
use std::sync::Arc;
use tokio::sync::Mutex;
use tonic::transport::Server;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    info!("Starting stock dashboard engine...");

    let settings = EngineSettings::from_env()?;
    let addr = settings.socket_addr()?;
    info!(data_dir = %settings.data_dir.display(), "Engine will listen on {}", addr);

    // The series cache lives as long as the process
    let store = SeriesStore::new(CsvPriceProvider::new(&settings.data_dir));
    let dashboard = Arc::new(Mutex::new(Dashboard::new(store)));

    let dashboard_service = MyDashboardEngine::new(dashboard);

    Server::builder()
        .add_service(DashboardEngineServer::new(dashboard_service))
        .serve(addr)
        .await?;

    Ok(())
}
