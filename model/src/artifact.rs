use std::{fs, path::Path, sync::Arc};

use serde::{Deserialize, Serialize};

use crate::{LinearRegression, ModelErr, RandomForest, Regressor, RegressionTree, Result};

/// Descriptive data exported next to the estimator. Only used for display.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelInfo {
    #[serde(default)]
    pub algorithm: String,
    #[serde(default)]
    pub r2: Option<f64>,
    #[serde(default)]
    pub training_samples: Option<u64>,
}

/// The serialized estimator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EstimatorSpec {
    Linear {
        coefficients: Vec<f64>,
        intercept: f64,
    },
    RandomForest {
        trees: Vec<RegressionTree>,
    },
}

/// The on-disk model artifact produced by the offline training pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    /// The training columns, in the order the estimator expects them.
    pub feature_names: Vec<String>,
    #[serde(default)]
    pub metadata: ModelInfo,
    pub estimator: EstimatorSpec,
}

/// A validated, ready to use model.
#[derive(Clone)]
pub struct LoadedModel {
    pub feature_names: Vec<String>,
    pub info: ModelInfo,
    pub regressor: Arc<dyn Regressor>,
}

impl std::fmt::Debug for LoadedModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedModel")
            .field("feature_names", &self.feature_names)
            .field("info", &self.info)
            .field("n_features", &self.regressor.n_features())
            .finish()
    }
}

impl ModelArtifact {
    /// Parses an artifact from its JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses the artifact at `path`.
    pub fn read(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Builds the estimator described by this artifact.
    ///
    /// # Arguments
    /// * `expected` - The feature names, in order, the caller will assemble its vectors with.
    ///
    /// # Returns
    /// The loaded model, or an error if the artifact is malformed or was trained on a different
    /// feature order than `expected`.
    pub fn build(self, expected: &[&str]) -> Result<LoadedModel> {
        if self.feature_names.iter().map(String::as_str).ne(expected.iter().copied()) {
            return Err(ModelErr::FeatureMismatch {
                got: self.feature_names,
                expected: expected.iter().map(|s| s.to_string()).collect(),
            });
        }

        let n_features = self.feature_names.len();
        let regressor: Arc<dyn Regressor> = match self.estimator {
            EstimatorSpec::Linear {
                coefficients,
                intercept,
            } => {
                if coefficients.len() != n_features {
                    return Err(ModelErr::ShapeMismatch {
                        what: "coefficients",
                        got: coefficients.len(),
                        expected: n_features,
                    });
                }
                Arc::new(LinearRegression::new(coefficients, intercept)?)
            }
            EstimatorSpec::RandomForest { trees } => {
                let forest = RandomForest::new(trees, n_features)?;
                log::debug!("built random forest with {} trees", forest.n_trees());
                Arc::new(forest)
            }
        };

        Ok(LoadedModel {
            feature_names: self.feature_names,
            info: self.metadata,
            regressor,
        })
    }
}

/// Reads, parses and builds the artifact at `path` in one go.
pub fn load(path: &Path, expected: &[&str]) -> Result<LoadedModel> {
    ModelArtifact::read(path)?.build(expected)
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    const FEATURES: [&str; 2] = ["a", "b"];

    #[test]
    fn builds_linear_artifact() {
        let json = r#"{
            "feature_names": ["a", "b"],
            "metadata": {"algorithm": "Linear Regression", "r2": 0.7},
            "estimator": {"type": "linear", "coefficients": [1.0, 2.0], "intercept": 3.0}
        }"#;

        let model = ModelArtifact::from_json(json).unwrap().build(&FEATURES).unwrap();
        assert_eq!(model.info.algorithm, "Linear Regression");
        assert_eq!(model.info.r2, Some(0.7));
        assert_eq!(model.info.training_samples, None);

        let y = model.regressor.predict(array![[1.0, 1.0]].view()).unwrap();
        assert_eq!(y[0], 6.0);
    }

    #[test]
    fn builds_forest_artifact_without_metadata() {
        let json = r#"{
            "feature_names": ["a", "b"],
            "estimator": {"type": "random_forest", "trees": [
                {"children_left": [-1], "children_right": [-1], "feature": [-2],
                 "threshold": [-2.0], "value": [42.0]}
            ]}
        }"#;

        let model = ModelArtifact::from_json(json).unwrap().build(&FEATURES).unwrap();
        assert_eq!(model.info, ModelInfo::default());

        let y = model.regressor.predict(array![[0.0, 0.0]].view()).unwrap();
        assert_eq!(y[0], 42.0);
    }

    #[test]
    fn rejects_reordered_features() {
        let json = r#"{
            "feature_names": ["b", "a"],
            "estimator": {"type": "linear", "coefficients": [1.0, 2.0], "intercept": 0.0}
        }"#;

        let err = ModelArtifact::from_json(json).unwrap().build(&FEATURES).unwrap_err();
        assert!(matches!(err, ModelErr::FeatureMismatch { .. }));
        assert!(err.to_string().contains("b, a"));
    }

    #[test]
    fn rejects_coefficient_count_mismatch() {
        let json = r#"{
            "feature_names": ["a", "b"],
            "estimator": {"type": "linear", "coefficients": [1.0], "intercept": 0.0}
        }"#;

        let err = ModelArtifact::from_json(json).unwrap().build(&FEATURES).unwrap_err();
        assert!(matches!(err, ModelErr::ShapeMismatch { what: "coefficients", .. }));
    }

    #[test]
    fn rejects_unknown_estimator() {
        let json = r#"{"feature_names": ["a", "b"], "estimator": {"type": "svm"}}"#;
        assert!(matches!(
            ModelArtifact::from_json(json),
            Err(ModelErr::Parse(_))
        ));
    }

    #[test]
    fn load_reports_missing_file() {
        let path = std::env::temp_dir().join("model-crate-missing-artifact.json");
        let err = load(&path, &FEATURES).unwrap_err();
        assert!(matches!(err, ModelErr::Io(_)));
    }
}
