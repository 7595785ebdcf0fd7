// Technical indicators module
pub mod rsi;
pub mod sma;

pub use rsi::Rsi;
pub use sma::Sma;

use crate::error::EngineError;
use serde_json::Value;
use shared::models::{Bar, IndicatorColumn, Series};

// Common trait for all indicators
pub trait IndicatorCalculator: Send + Sync {
    fn name(&self) -> &str;
    fn parameters(&self) -> Value; // Parameters used for this indicator instance
    fn calculate(&self, data: &[Bar]) -> Vec<Option<f64>>; // None where the value is undefined

    fn column(&self, series: &Series) -> IndicatorColumn {
        IndicatorColumn {
            name: self.name().to_string(),
            parameters: self.parameters(),
            values: self.calculate(series.bars()),
        }
    }
}

/// Trailing simple moving average of the close price over `window` bars.
pub fn moving_average(series: &Series, window: usize) -> Result<IndicatorColumn, EngineError> {
    Ok(Sma::new(window)?.column(series))
}

/// Relative Strength Index over `period` bars, using simple averages of gains and losses.
pub fn rsi(series: &Series, period: usize) -> Result<IndicatorColumn, EngineError> {
    Ok(Rsi::new(period)?.column(series))
}

// Trailing mean over `window` entries. A window holding any undefined entry is undefined.
pub(crate) fn rolling_mean(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    if window == 0 {
        return vec![None; values.len()];
    }
    (0..values.len())
        .map(|i| {
            if i + 1 < window {
                return None;
            }
            values[i + 1 - window..=i]
                .iter()
                .copied()
                .sum::<Option<f64>>()
                .map(|sum| sum / window as f64)
        })
        .collect()
}

pub(crate) fn validate_period(kind: &str, period: usize) -> Result<(), EngineError> {
    if period == 0 {
        return Err(EngineError::InvalidParameter(format!("{} period must be greater than 0", kind)));
    }
    Ok(())
}
