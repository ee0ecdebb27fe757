use ndarray::{Array1, ArrayView2};

use crate::Result;

/// The capability every estimator exposes to the rest of the system: map a batch of feature
/// rows to one scalar per row.
pub trait Regressor: Send + Sync {
    /// Returns the amount of features each input row must have.
    fn n_features(&self) -> usize;

    /// Predicts the target for every row of `x`.
    ///
    /// # Arguments
    /// * `x` - A `(n_samples, n_features)` batch.
    ///
    /// # Returns
    /// One prediction per row or an error if the batch has the wrong width.
    fn predict(&self, x: ArrayView2<f64>) -> Result<Array1<f64>>;
}

/// Fails with a `ShapeMismatch` unless `x` has exactly `n_features` columns.
pub(crate) fn check_width(x: &ArrayView2<f64>, n_features: usize) -> Result<()> {
    if x.ncols() != n_features {
        return Err(crate::ModelErr::ShapeMismatch {
            what: "input columns",
            got: x.ncols(),
            expected: n_features,
        });
    }

    Ok(())
}
