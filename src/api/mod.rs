//! High-level library API: parse features, locate and load the model, and
//! produce a single prediction. The CLI is a thin layer over `predict_from_args`;
//! prefer these entry points when embedding the classifier elsewhere.
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::core::params::PredictConfig;
use crate::error::{Error, Result};
use crate::model::{Classifier, ModelError, ModelLoader, XgbClassifier, XgbLoader};
use crate::types::{FeatureVector, Prediction};

/// Parse exactly eight textual values into a feature vector.
pub fn parse_features<S: AsRef<str>>(args: &[S]) -> Result<FeatureVector> {
    FeatureVector::parse_args(args)
}

/// Resolve the model path from `config` and make sure the file exists.
pub fn locate_model(config: &PredictConfig) -> Result<PathBuf> {
    let path = config.resolve_model_path()?;
    if !path.is_file() {
        return Err(Error::ModelNotFound { path });
    }
    Ok(path)
}

/// Load the XGBoost classifier stored at `path`.
pub fn load_classifier(path: &Path) -> Result<XgbClassifier> {
    XgbLoader.load(path)
}

/// Run the classifier on a one-row batch and return its only label.
pub fn predict_label<C: Classifier>(
    classifier: &C,
    features: &FeatureVector,
) -> Result<Prediction> {
    let batch = features.to_batch();
    if classifier.num_features() != batch.ncols() {
        return Err(ModelError::FeatureCountMismatch {
            expected: classifier.num_features(),
            got: batch.ncols(),
        }
        .into());
    }
    let labels = classifier.predict(batch.view())?;
    let label = labels
        .first()
        .copied()
        .ok_or_else(|| Error::Prediction("classifier returned no label".to_string()))?;
    Ok(Prediction { label })
}

/// Full request: validate and parse `args`, find the model, load it with
/// `loader`, and predict.
pub fn predict_from_args<S, L>(
    args: &[S],
    config: &PredictConfig,
    loader: &L,
) -> Result<Prediction>
where
    S: AsRef<str>,
    L: ModelLoader,
{
    let features = parse_features(args)?;
    debug!("Features: {}", features);

    let model_path = locate_model(config)?;
    info!("Loading model from {}", model_path.display());
    let classifier = loader.load(&model_path)?;

    let prediction = predict_label(&classifier, &features)?;
    info!("Predicted class {}", prediction);
    Ok(prediction)
}
