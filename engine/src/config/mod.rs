pub mod query;
pub mod settings;

pub use query::DashboardQuery;
pub use settings::EngineSettings;
