use thiserror::Error;

/// Fixed tag the calling front-end looks for on stderr.
pub const ERROR_TAG: &str = "PYTHON_ERROR";

/// Application-specific errors for the CLI
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid arguments: {0}")]
    Usage(String),

    #[error(transparent)]
    Predict(#[from] diabetes_predict::Error),

    #[error("Failed to write prediction: {0}")]
    Output(#[from] std::io::Error),
}

impl AppError {
    /// Keep only clap's headline so the diagnostic stays on one line.
    pub fn usage(err: &clap::Error) -> Self {
        let rendered = err.to_string();
        let headline = rendered.lines().next().unwrap_or_default();
        AppError::Usage(headline.trim_start_matches("error: ").to_string())
    }

    /// `PYTHON_ERROR: <message>`, flattened to a single line.
    pub fn tagged(&self) -> String {
        let message = self.to_string().replace(['\r', '\n'], " ");
        format!("{ERROR_TAG}: {message}")
    }
}
