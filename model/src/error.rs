use std::{
    error::Error,
    fmt::{self, Display},
    io,
};

/// The result type used in the entire model crate.
pub type Result<T> = std::result::Result<T, ModelErr>;

/// The model crate's error type.
#[derive(Debug)]
pub enum ModelErr {
    Io(io::Error),
    Parse(serde_json::Error),
    InvalidArtifact(String),
    ShapeMismatch {
        what: &'static str,
        got: usize,
        expected: usize,
    },
    FeatureMismatch {
        got: Vec<String>,
        expected: Vec<String>,
    },
}

impl Display for ModelErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelErr::Io(e) => write!(f, "io error: {e}"),
            ModelErr::Parse(e) => write!(f, "malformed model artifact: {e}"),
            ModelErr::InvalidArtifact(msg) => write!(f, "invalid model artifact: {msg}"),
            ModelErr::ShapeMismatch {
                what,
                got,
                expected,
            } => write!(
                f,
                "shape mismatch in {what}: got {got}, expected {expected}"
            ),
            ModelErr::FeatureMismatch { got, expected } => write!(
                f,
                "the model was trained on features [{}] but [{}] were expected",
                got.join(", "),
                expected.join(", ")
            ),
        }
    }
}

impl Error for ModelErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ModelErr::Io(e) => Some(e),
            ModelErr::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ModelErr {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for ModelErr {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}
