use std::{
    io,
    path::{Path, PathBuf},
    sync::OnceLock,
};

use model::{LoadedModel, ModelErr};

use crate::schema::Feature;

/// Where the model artifact is looked for first.
pub const PRIMARY_MODEL_PATH: &str = "model/house_price_model.json";
/// Where the model artifact is looked for when the primary path does not exist.
pub const FALLBACK_MODEL_PATH: &str = "house_price_model.json";

/// Something able to produce the model, typically by reading it from disk.
pub trait ModelSource: Send + Sync {
    /// Loads the model, checking it was trained on `expected` features in that order.
    fn load(&self, expected: &[&str]) -> model::Result<LoadedModel>;
}

/// Reads the artifact from the filesystem, trying a primary and then a fallback path.
#[derive(Debug, Clone)]
pub struct FsSource {
    primary: PathBuf,
    fallback: PathBuf,
}

impl FsSource {
    pub fn new(primary: impl Into<PathBuf>, fallback: impl Into<PathBuf>) -> Self {
        Self {
            primary: primary.into(),
            fallback: fallback.into(),
        }
    }

    /// Returns the first existing candidate path.
    pub fn locate(&self) -> Option<&Path> {
        [self.primary.as_path(), self.fallback.as_path()]
            .into_iter()
            .find(|path| path.exists())
    }
}

impl Default for FsSource {
    fn default() -> Self {
        Self::new(PRIMARY_MODEL_PATH, FALLBACK_MODEL_PATH)
    }
}

impl ModelSource for FsSource {
    fn load(&self, expected: &[&str]) -> model::Result<LoadedModel> {
        let Some(path) = self.locate() else {
            return Err(ModelErr::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!(
                    "model file not found at '{}' or '{}'",
                    self.primary.display(),
                    self.fallback.display()
                ),
            )));
        };

        log::info!("loading model from {}", path.display());
        model::load(path, expected)
    }
}

/// The outcome of the one load attempt.
#[derive(Debug, Clone)]
pub enum Availability {
    Ready(LoadedModel),
    Unavailable(String),
}

impl Availability {
    pub fn is_available(&self) -> bool {
        matches!(self, Availability::Ready(_))
    }

    pub fn model(&self) -> Option<&LoadedModel> {
        match self {
            Availability::Ready(model) => Some(model),
            Availability::Unavailable(_) => None,
        }
    }
}

/// Loads the model once and hands out the cached outcome for the rest of the process.
///
/// Failures are cached too: a missing artifact is reported on every call but the filesystem
/// is only touched by the first one.
pub struct ModelProvider {
    source: Box<dyn ModelSource>,
    outcome: OnceLock<Availability>,
}

impl ModelProvider {
    pub fn new(source: impl ModelSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            outcome: OnceLock::new(),
        }
    }

    /// Returns the cached load outcome, loading on the first call.
    pub fn availability(&self) -> &Availability {
        self.outcome.get_or_init(|| {
            match self.source.load(&Feature::names()) {
                Ok(model) => {
                    log::info!(
                        "model loaded: {} over [{}]",
                        display_algorithm(&model),
                        model.feature_names.join(", ")
                    );
                    Availability::Ready(model)
                }
                Err(e) => {
                    log::error!("error loading model: {e}");
                    Availability::Unavailable(e.to_string())
                }
            }
        })
    }

    /// Returns the model if it could be loaded along with the availability flag.
    pub fn get_model(&self) -> (Option<&LoadedModel>, bool) {
        let availability = self.availability();
        (availability.model(), availability.is_available())
    }
}

fn display_algorithm(model: &LoadedModel) -> &str {
    if model.info.algorithm.is_empty() {
        "unnamed estimator"
    } else {
        &model.info.algorithm
    }
}
