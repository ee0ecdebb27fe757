use ndarray::{Array1, ArrayView2};

use crate::{ModelErr, Regressor, Result, regressor::check_width};

/// An ordinary linear model: `y = x · coefficients + intercept`.
#[derive(Debug, Clone)]
pub struct LinearRegression {
    coefficients: Array1<f64>,
    intercept: f64,
}

impl LinearRegression {
    /// Creates a new `LinearRegression`.
    ///
    /// # Arguments
    /// * `coefficients` - One weight per feature.
    /// * `intercept` - The bias term.
    ///
    /// # Returns
    /// A new `LinearRegression` or an error if any parameter is not finite.
    pub fn new(coefficients: Vec<f64>, intercept: f64) -> Result<Self> {
        if coefficients.is_empty() {
            return Err(ModelErr::InvalidArtifact(
                "linear model must have at least one coefficient".into(),
            ));
        }

        if !intercept.is_finite() || coefficients.iter().any(|c| !c.is_finite()) {
            return Err(ModelErr::InvalidArtifact(
                "linear model parameters must be finite".into(),
            ));
        }

        Ok(Self {
            coefficients: Array1::from_vec(coefficients),
            intercept,
        })
    }
}

impl Regressor for LinearRegression {
    fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    fn predict(&self, x: ArrayView2<f64>) -> Result<Array1<f64>> {
        check_width(&x, self.n_features())?;
        Ok(x.dot(&self.coefficients) + self.intercept)
    }
}
