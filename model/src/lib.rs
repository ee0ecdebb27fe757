pub mod artifact;
pub mod error;
mod forest;
mod linear;
mod regressor;

pub use artifact::{EstimatorSpec, LoadedModel, ModelArtifact, ModelInfo, load};
pub use error::{ModelErr, Result};
pub use forest::{LEAF, RandomForest, RegressionTree};
pub use linear::LinearRegression;
pub use regressor::Regressor;
