use std::path::PathBuf;

use thiserror::Error;

/// Failure of one stage of a baseline run.
#[derive(Debug, Error)]
pub enum BaselineError {
    #[error("failed to load data from {path}: {message}")]
    DataLoad { path: PathBuf, message: String },

    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),

    #[error("model {model} failed: {message}")]
    Fit { model: String, message: String },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl BaselineError {
    pub fn data_load(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        BaselineError::DataLoad {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn fit(model: impl Into<String>, message: impl Into<String>) -> Self {
        BaselineError::Fit {
            model: model.into(),
            message: message.into(),
        }
    }

    /// Process exit status for this failure kind.
    pub fn exit_code(&self) -> i32 {
        match self {
            BaselineError::Config(_) => 1,
            BaselineError::DataLoad { .. } => 3,
            BaselineError::ShapeMismatch(_) => 4,
            BaselineError::Fit { .. } => 5,
            BaselineError::Write { .. } => 6,
        }
    }
}

pub type Result<T> = std::result::Result<T, BaselineError>;
