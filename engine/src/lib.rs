// Engine library root
// Price series loading, indicator computation, export, and the gRPC service.

pub mod analysis;
pub mod config;
pub mod data;
pub mod error;
pub mod export;
pub mod indicators;
pub mod services;

#[cfg(test)]
pub(crate) mod test_support;
