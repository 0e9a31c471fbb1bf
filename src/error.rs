//! Crate-level error type and `Result` alias for structured error handling.
//! Covers argument validation, model file lookup, and wraps I/O, JSON and
//! model-format errors raised while loading or evaluating the classifier.
use std::path::PathBuf;

use thiserror::Error;

use crate::model::ModelError;
use crate::types::FEATURE_COUNT;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error(
        "Requires exactly {expected} numeric arguments (Pregnancies, Glucose, etc.), got {got}"
    )]
    ArgumentCount { expected: usize, got: usize },

    #[error(
        "All arguments must be numbers: could not convert argument {position} ('{value}') to float"
    )]
    InvalidNumber { position: usize, value: String },

    #[error("Model file not found at {}", .path.display())]
    ModelNotFound { path: PathBuf },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Model JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    #[error("Prediction error: {0}")]
    Prediction(String),
}

impl Error {
    pub fn argument_count(got: usize) -> Self {
        Error::ArgumentCount {
            expected: FEATURE_COUNT,
            got,
        }
    }
}
