//! Classifier layer: the narrow `ModelLoader` / `Classifier` seam the CLI and
//! API are written against, plus the native XGBoost JSON reader backing it.
pub mod objective;
pub mod tree;
pub mod xgboost;

use std::path::Path;

use ndarray::ArrayView2;
use thiserror::Error;

pub use objective::Objective;
pub use tree::RegTree;
pub use xgboost::{XgbClassifier, XgbLoader};

/// Errors raised while interpreting or evaluating a model artifact
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Unsupported objective: {0}")]
    UnsupportedObjective(String),
    #[error("Unsupported booster: {0}")]
    UnsupportedBooster(String),
    #[error("Invalid model parameter `{name}`: {value}")]
    InvalidParam { name: &'static str, value: String },
    #[error("Invalid tree {tree}: {reason}")]
    InvalidTree { tree: usize, reason: String },
    #[error("Categorical split in tree {tree} is not supported")]
    CategoricalSplit { tree: usize },
    #[error("Feature count mismatch: model expects {expected}, got {got}")]
    FeatureCountMismatch { expected: usize, got: usize },
    #[error("Model contains no trees")]
    Empty,
}

/// Something that can assign class labels to rows of features.
pub trait Classifier {
    /// Number of input columns the classifier expects.
    fn num_features(&self) -> usize;

    /// Predict one class label per row of `batch`.
    fn predict(&self, batch: ArrayView2<'_, f32>) -> crate::Result<Vec<u32>>;
}

/// Builds a classifier from a model file on disk.
pub trait ModelLoader {
    type Output: Classifier;

    fn load(&self, path: &Path) -> crate::Result<Self::Output>;
}
