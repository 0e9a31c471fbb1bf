#![doc = r#"
diabetes-predict — single-shot diabetes risk classification from eight clinical
measurements, backed by a pretrained XGBoost model.

The crate powers the `predict-diabetes` command-line tool and exposes the same
steps as a small typed API: parse the feature vector, locate the model file,
load the classifier and run one prediction.

Feature order
-------------
Eight positional values, in the order the model was trained on:
pregnancies, glucose, blood pressure, skin thickness, insulin, BMI,
diabetes pedigree function, age. No range or unit checks are applied.

Quick start
-----------
```rust,no_run
use diabetes_predict::{PredictConfig, XgbLoader, predict_from_args};

fn main() -> diabetes_predict::Result<()> {
    let args = ["6", "148", "72", "35", "0", "33.6", "0.627", "50"];
    let config = PredictConfig::default().with_model_dir("/opt/diabetes-predict");
    let prediction = predict_from_args(&args, &config, &XgbLoader)?;
    println!("{}", prediction.label);
    Ok(())
}
```

Step by step
------------
```rust,no_run
use std::path::Path;
use diabetes_predict::{FeatureVector, load_classifier, predict_label};

fn main() -> diabetes_predict::Result<()> {
    let features = FeatureVector::new([1.0, 85.0, 66.0, 29.0, 0.0, 26.6, 0.351, 31.0]);
    let classifier = load_classifier(Path::new("diabetes_xgboost.json"))?;
    let prediction = predict_label(&classifier, &features)?;
    assert!(prediction.label <= 1);
    Ok(())
}
```

Error handling
--------------
All public functions return `diabetes_predict::Result<T>`; match on
`diabetes_predict::Error` to tell argument problems from model problems.

```rust
use diabetes_predict::{Error, parse_features};

match parse_features(&["1", "2", "3"]) {
    Err(Error::ArgumentCount { expected, got }) => assert_eq!((expected, got), (8, 3)),
    other => panic!("unexpected: {other:?}"),
}
```

Useful modules
--------------
- [`api`] — high-level entry points.
- [`model`] — `Classifier` / `ModelLoader` traits and the XGBoost JSON evaluator.
- [`types`] — `FeatureVector`, `Prediction` and feature constants.
- [`core`] — `PredictConfig` and model path resolution.
- [`error`] — crate-level `Error` and `Result`.
"#]

pub mod api;
pub mod core;
pub mod error;
pub mod model;
pub mod types;

// Curated public API surface
pub use crate::core::params::{MODEL_FILE_NAME, MODEL_PATH_ENV, PredictConfig};
pub use error::{Error, Result};
pub use types::{FEATURE_COUNT, FEATURE_NAMES, FeatureVector, Prediction};

pub use model::{Classifier, ModelError, ModelLoader, Objective, XgbClassifier, XgbLoader};

pub use api::{load_classifier, locate_model, parse_features, predict_from_args, predict_label};
