use std::env;
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;

/// File name of the model artifact shipped alongside the executable.
pub const MODEL_FILE_NAME: &str = "diabetes_xgboost.json";

/// Environment variable holding an explicit model path.
pub const MODEL_PATH_ENV: &str = "DIABETES_PREDICT_MODEL";

/// Where the classifier is loaded from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictConfig {
    /// Model file name looked up in `model_dir`
    pub model_file_name: String,
    /// Directory holding the model; None means the executable's directory
    pub model_dir: Option<PathBuf>,
    /// Full path that takes precedence over `model_dir`/`model_file_name`
    pub model_path: Option<PathBuf>,
}

impl Default for PredictConfig {
    fn default() -> Self {
        Self {
            model_file_name: MODEL_FILE_NAME.to_string(),
            model_dir: None,
            model_path: None,
        }
    }
}

impl PredictConfig {
    /// Defaults plus the `DIABETES_PREDICT_MODEL` override, if set and non-empty.
    pub fn from_env() -> Self {
        Self::default().with_override(env::var_os(MODEL_PATH_ENV))
    }

    fn with_override(mut self, value: Option<OsString>) -> Self {
        if let Some(path) = value.filter(|v| !v.is_empty()) {
            self.model_path = Some(PathBuf::from(path));
        }
        self
    }

    /// Look for the model in `dir` instead of next to the executable.
    pub fn with_model_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.model_dir = Some(dir.into());
        self
    }

    /// Path of the model file to load. Existence is not checked here.
    pub fn resolve_model_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.model_path {
            debug!("Model path taken from {}: {}", MODEL_PATH_ENV, path.display());
            return Ok(path.clone());
        }
        let dir = match &self.model_dir {
            Some(dir) => dir.clone(),
            None => executable_dir()?,
        };
        Ok(dir.join(&self.model_file_name))
    }
}

/// Directory containing the running executable, with symlinks resolved so an
/// installed link still finds the model next to the real binary.
pub fn executable_dir() -> Result<PathBuf> {
    let exe = env::current_exe()?;
    let exe = exe.canonicalize().unwrap_or(exe);
    parent_dir(&exe)
}

/// The lookup never falls back to the working directory.
fn parent_dir(exe: &Path) -> Result<PathBuf> {
    match exe.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => Ok(dir.to_path_buf()),
        _ => Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("executable path {} has no parent directory", exe.display()),
        )
        .into()),
    }
}
