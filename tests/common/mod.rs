#![allow(dead_code)]

use std::{fs, path::PathBuf, sync::Arc};

use house_price::{
    App,
    provider::{FsSource, ModelProvider, ModelSource},
    schema::Schema,
};
use model::{LoadedModel, ModelErr, ModelInfo, Regressor};
use ndarray::{Array1, ArrayView2};
use serde_json::json;

/// A two tree forest over the six house features.
///
/// Defaults and maxima land on 290k/260k leaves (mean 275k), minima on 120k/130k (mean 125k).
pub fn forest_artifact() -> serde_json::Value {
    json!({
        "feature_names": ["OverallQual", "GrLivArea", "TotalBsmtSF", "GarageCars", "YearBuilt", "FullBath"],
        "metadata": {
            "algorithm": "Random Forest Regressor",
            "r2": 0.85,
            "training_samples": 1460
        },
        "estimator": {
            "type": "random_forest",
            "trees": [
                {
                    "children_left": [1, 2, -1, -1, 5, -1, -1],
                    "children_right": [4, 3, -1, -1, 6, -1, -1],
                    "feature": [0, 1, -2, -2, 4, -2, -2],
                    "threshold": [6.5, 1500.0, -2.0, -2.0, 1990.0, -2.0, -2.0],
                    "value": [200000.0, 140000.0, 120000.0, 160000.0, 250000.0, 210000.0, 290000.0]
                },
                {
                    "children_left": [1, -1, 3, -1, 5, -1, -1],
                    "children_right": [2, -1, 4, -1, 6, -1, -1],
                    "feature": [2, -2, 3, -2, 5, -2, -2],
                    "threshold": [800.0, -2.0, 1.5, -2.0, 1.5, -2.0, -2.0],
                    "value": [190000.0, 130000.0, 210000.0, 170000.0, 230000.0, 200000.0, 260000.0]
                }
            ]
        }
    })
}

/// Creates an empty scratch directory unique to `name`.
pub fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("house-price-it-{name}"));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(dir.join("model")).unwrap();
    dir
}

/// Writes `artifact` at the primary location inside `dir`.
pub fn write_primary(dir: &PathBuf, artifact: &serde_json::Value) {
    fs::write(
        dir.join("model").join("house_price_model.json"),
        serde_json::to_string_pretty(artifact).unwrap(),
    )
    .unwrap();
}

/// Builds an app that looks for its model under `dir`.
pub fn app_in(dir: &PathBuf) -> App {
    let source = FsSource::new(
        dir.join("model").join("house_price_model.json"),
        dir.join("house_price_model.json"),
    );
    App::new(Schema::load().unwrap(), ModelProvider::new(source))
}

/// An app backed by [`forest_artifact`].
pub fn forest_app(name: &str) -> App {
    let dir = scratch_dir(name);
    write_primary(&dir, &forest_artifact());
    app_in(&dir)
}

/// A model that loads fine but errors on every prediction.
struct Broken;

impl Regressor for Broken {
    fn n_features(&self) -> usize {
        6
    }

    fn predict(&self, x: ArrayView2<f64>) -> model::Result<Array1<f64>> {
        Err(ModelErr::ShapeMismatch {
            what: "input columns",
            got: x.ncols(),
            expected: 7,
        })
    }
}

struct BrokenSource;

impl ModelSource for BrokenSource {
    fn load(&self, expected: &[&str]) -> model::Result<LoadedModel> {
        Ok(LoadedModel {
            feature_names: expected.iter().map(|s| s.to_string()).collect(),
            info: ModelInfo::default(),
            regressor: Arc::new(Broken),
        })
    }
}

/// An app whose model is available but fails every prediction.
pub fn broken_model_app() -> App {
    App::new(Schema::load().unwrap(), ModelProvider::new(BrokenSource))
}
