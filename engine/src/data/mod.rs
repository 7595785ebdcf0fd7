pub mod csv_provider;
pub mod provider;
pub mod series_store;
