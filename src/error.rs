use std::{error::Error, fmt, io};

/// Result type used across the application.
pub type Result<T> = std::result::Result<T, AppErr>;

/// Errors that can surface while serving the predictor.
#[derive(Debug)]
pub enum AppErr {
    /// The model artifact is missing or could not be deserialized.
    ModelUnavailable(String),
    /// The loaded model failed while computing a prediction.
    PredictionFailure(String),
    /// The feature table broke one of its invariants.
    InvalidSchema(String),
    /// A configuration value could not be parsed.
    Config(String),
    Io(io::Error),
}

impl fmt::Display for AppErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppErr::ModelUnavailable(msg) => write!(f, "model unavailable: {msg}"),
            AppErr::PredictionFailure(msg) => write!(f, "error making prediction: {msg}"),
            AppErr::InvalidSchema(msg) => write!(f, "invalid feature schema: {msg}"),
            AppErr::Config(msg) => write!(f, "invalid configuration: {msg}"),
            AppErr::Io(e) => write!(f, "io error: {e}"),
        }
    }
}

impl Error for AppErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            AppErr::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for AppErr {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}
