// Relative Strength Index (RSI) indicator implementation
use super::{rolling_mean, validate_period, IndicatorCalculator};
use crate::error::EngineError;
use serde_json::Value;
use shared::models::Bar;
use std::iter;

pub struct Rsi {
    name: String,
    period: usize,
}

impl Rsi {
    pub fn new(period: usize) -> Result<Self, EngineError> {
        validate_period("RSI", period)?;
        Ok(Self {
            name: format!("RSI({})", period),
            period,
        })
    }
}

// avg_loss == 0 gives 100 when there were gains and nothing at all when the window was flat.
fn index_from_averages(avg_gain: f64, avg_loss: f64) -> Option<f64> {
    if avg_loss == 0.0 {
        if avg_gain == 0.0 {
            None
        } else {
            Some(100.0)
        }
    } else {
        let rs = avg_gain / avg_loss;
        Some(100.0 - (100.0 / (1.0 + rs)))
    }
}

impl IndicatorCalculator for Rsi {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "period": self.period })
    }

    fn calculate(&self, data: &[Bar]) -> Vec<Option<f64>> {
        // The first bar has no prior close, so its change is undefined.
        let deltas: Vec<Option<f64>> = iter::once(None)
            .chain(data.windows(2).map(|pair| Some(pair[1].close - pair[0].close)))
            .take(data.len())
            .collect();

        let gains: Vec<Option<f64>> = deltas.iter().map(|d| d.map(|d| d.max(0.0))).collect();
        let losses: Vec<Option<f64>> = deltas.iter().map(|d| d.map(|d| (-d).max(0.0))).collect();

        let avg_gains = rolling_mean(&gains, self.period);
        let avg_losses = rolling_mean(&losses, self.period);

        avg_gains
            .into_iter()
            .zip(avg_losses)
            .map(|(gain, loss)| match (gain, loss) {
                (Some(gain), Some(loss)) => index_from_averages(gain, loss),
                _ => None,
            })
            .collect()
    }
}
