// Simple Moving Average (SMA) indicator implementation
use super::{rolling_mean, validate_period, IndicatorCalculator};
use crate::error::EngineError;
use serde_json::Value;
use shared::models::Bar;

pub struct Sma {
    name: String,
    window: usize,
}

impl Sma {
    pub fn new(window: usize) -> Result<Self, EngineError> {
        validate_period("Moving average", window)?;
        Ok(Self {
            name: format!("MA({})", window),
            window,
        })
    }
}

impl IndicatorCalculator for Sma {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "window": self.window })
    }

    fn calculate(&self, data: &[Bar]) -> Vec<Option<f64>> {
        let closes: Vec<Option<f64>> = data.iter().map(|b| Some(b.close)).collect();
        rolling_mean(&closes, self.window)
    }
}
