use std::sync::Arc;

use model::Regressor;
use ndarray::Array2;

use crate::{
    error::{AppErr, Result},
    format,
    input::FeatureValues,
    schema::Feature,
};

/// A successful prediction, ready for display.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionResult {
    pub value: f64,
    pub formatted: String,
}

/// Lifecycle of a single prediction request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Submitted,
    Succeeded,
    Failed,
}

impl Phase {
    /// Returns the phase that follows `self`. Terminal phases fall back to `Idle` and
    /// `Submitted` resolves depending on `ok`.
    pub fn next(self, ok: bool) -> Self {
        match self {
            Phase::Idle => Phase::Submitted,
            Phase::Submitted if ok => Phase::Succeeded,
            Phase::Submitted => Phase::Failed,
            Phase::Succeeded | Phase::Failed => Phase::Idle,
        }
    }
}

/// Turns feature values into a model call and the model output into a displayable result.
#[derive(Clone)]
pub struct Predictor {
    regressor: Arc<dyn Regressor>,
}

impl Predictor {
    pub fn new(regressor: Arc<dyn Regressor>) -> Self {
        Self { regressor }
    }

    /// Lays `values` out as a batch of one row in feature vector order.
    pub fn assemble(values: &FeatureValues) -> Array2<f64> {
        let row = Feature::ALL.map(|f| values.get(f) as f64);
        Array2::from_shape_fn((1, row.len()), |(_, j)| row[j])
    }

    /// Runs the model over `values`.
    ///
    /// # Arguments
    /// * `values` - The constrained feature values.
    ///
    /// # Returns
    /// The formatted prediction, or a `PredictionFailure` if the model errors or returns
    /// something other than one finite number.
    pub fn predict(&self, values: &FeatureValues) -> Result<PredictionResult> {
        let mut phase = Phase::Idle.next(true);
        log::debug!("{phase:?}: {values:?}");

        let outcome = self.run(values);
        phase = phase.next(outcome.is_ok());

        match &outcome {
            Ok(result) => log::info!("{phase:?}: predicted {}", result.formatted),
            Err(e) => log::warn!("{phase:?}: {e}"),
        }

        outcome
    }

    fn run(&self, values: &FeatureValues) -> Result<PredictionResult> {
        let x = Self::assemble(values);
        let y = self
            .regressor
            .predict(x.view())
            .map_err(|e| AppErr::PredictionFailure(e.to_string()))?;

        let value = match y.as_slice() {
            Some(&[value]) => value,
            _ => {
                return Err(AppErr::PredictionFailure(format!(
                    "expected a single prediction, got {}",
                    y.len()
                )));
            }
        };

        if !value.is_finite() {
            return Err(AppErr::PredictionFailure(format!(
                "the model returned a non finite value ({value})"
            )));
        }

        Ok(PredictionResult {
            value,
            formatted: format::currency(value),
        })
    }
}
