//! Reader and evaluator for XGBoost's native JSON model format
//! (`Booster.save_model("model.json")`, 1.x and 2.x layouts).
//!
//! Only the pieces needed for tree-ensemble inference are read: learner
//! parameters, the objective name, `gbtree`/`dart` boosters and their trees.
//! Everything else in the document (training parameters, node statistics,
//! feature types) is ignored.
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::str::FromStr;

use ndarray::{Array2, ArrayView2};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use super::tree::{RegTree, TreeArrays};
use super::{Classifier, ModelError, ModelLoader, Objective};
use crate::error::{Error, Result};

#[derive(Debug, Deserialize)]
struct ModelDocument {
    learner: LearnerDocument,
    #[serde(default)]
    version: Vec<u32>,
}

#[derive(Debug, Deserialize)]
struct LearnerDocument {
    #[serde(default)]
    attributes: HashMap<String, Value>,
    #[serde(default)]
    feature_names: Vec<String>,
    gradient_booster: BoosterDocument,
    learner_model_param: LearnerModelParam,
    objective: ObjectiveDocument,
}

#[derive(Debug, Deserialize)]
struct LearnerModelParam {
    base_score: String,
    #[serde(default)]
    num_class: Option<String>,
    num_feature: String,
}

#[derive(Debug, Deserialize)]
struct ObjectiveDocument {
    name: String,
}

#[derive(Debug, Deserialize)]
struct BoosterDocument {
    name: String,
    /// Present on `gbtree` and `gblinear`; only the tree layout is understood.
    #[serde(default)]
    model: Option<Value>,
    /// Present on `dart`: the wrapped `gbtree` booster.
    #[serde(default)]
    gbtree: Option<Box<BoosterDocument>>,
    /// Present on `dart`: one weight per tree.
    #[serde(default)]
    weight_drop: Vec<f32>,
}

#[derive(Debug, Deserialize)]
struct GbTreeDocument {
    gbtree_model_param: GbTreeModelParam,
    trees: Vec<TreeDocument>,
    #[serde(default)]
    tree_info: Vec<i64>,
}

#[derive(Debug, Deserialize)]
struct GbTreeModelParam {
    #[serde(default)]
    num_parallel_tree: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TreeDocument {
    left_children: Vec<i32>,
    right_children: Vec<i32>,
    split_indices: Vec<i64>,
    split_conditions: Vec<f32>,
    default_left: Vec<Flag>,
    #[serde(default)]
    split_type: Vec<u8>,
}

/// `default_left` is written as 0/1 integers by most releases and as booleans by some.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
enum Flag {
    Bool(bool),
    Int(u8),
}

impl Flag {
    fn as_bool(self) -> bool {
        match self {
            Flag::Bool(b) => b,
            Flag::Int(i) => i != 0,
        }
    }
}

fn parse_param<T: FromStr>(name: &'static str, raw: &str) -> std::result::Result<T, ModelError> {
    raw.trim().parse::<T>().map_err(|_| ModelError::InvalidParam {
        name,
        value: raw.to_string(),
    })
}

/// `base_score` is a plain number in 1.x and a bracketed vector (`"[5E-1]"`) in newer releases.
fn parse_base_score(raw: &str) -> std::result::Result<f32, ModelError> {
    let inner = raw.trim().trim_start_matches('[').trim_end_matches(']');
    let first = inner.split(',').next().unwrap_or_default();
    parse_param("base_score", first)
}

fn best_iteration(
    attributes: &HashMap<String, Value>,
) -> std::result::Result<Option<usize>, ModelError> {
    match attributes.get("best_iteration") {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => parse_param("best_iteration", s).map(Some),
        Some(Value::Number(n)) => n
            .as_u64()
            .map(|v| Some(v as usize))
            .ok_or_else(|| ModelError::InvalidParam {
                name: "best_iteration",
                value: n.to_string(),
            }),
        Some(other) => Err(ModelError::InvalidParam {
            name: "best_iteration",
            value: other.to_string(),
        }),
    }
}

/// Tree-ensemble classifier evaluated in-process.
#[derive(Debug, Clone)]
pub struct XgbClassifier {
    trees: Vec<RegTree>,
    tree_group: Vec<usize>,
    tree_weight: Vec<f32>,
    base_margin: f32,
    num_groups: usize,
    num_feature: usize,
    objective: Objective,
    feature_names: Vec<String>,
}

impl XgbClassifier {
    /// Read a model from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let doc: ModelDocument = serde_json::from_reader(reader)?;
        Self::from_document(doc)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let doc: ModelDocument = serde_json::from_str(json)?;
        Self::from_document(doc)
    }

    fn from_document(doc: ModelDocument) -> Result<Self> {
        let learner = doc.learner;
        if !doc.version.is_empty() {
            debug!("Model written by XGBoost {:?}", doc.version);
        }

        let objective: Objective = learner.objective.name.parse()?;
        let params = &learner.learner_model_param;
        let num_feature: usize = parse_param("num_feature", &params.num_feature)?;
        let num_class: usize = match params.num_class.as_deref() {
            Some(raw) => parse_param("num_class", raw)?,
            None => 0,
        };
        if objective.is_multiclass() != (num_class > 1) {
            return Err(ModelError::InvalidParam {
                name: "num_class",
                value: format!("{num_class} (objective is {objective})"),
            }
            .into());
        }
        let num_groups = num_class.max(1);
        let base_margin = objective.base_margin(parse_base_score(&params.base_score)?)?;

        let booster = learner.gradient_booster;
        let (model, weights) = match booster.name.as_str() {
            "gbtree" => (booster.model, None),
            "dart" => {
                let inner = booster
                    .gbtree
                    .ok_or_else(|| ModelError::UnsupportedBooster("dart without gbtree".into()))?;
                (inner.model, Some(booster.weight_drop))
            }
            other => return Err(ModelError::UnsupportedBooster(other.to_string()).into()),
        };
        let model: GbTreeDocument = match model {
            Some(value) => serde_json::from_value(value)?,
            None => return Err(ModelError::UnsupportedBooster(booster.name.clone()).into()),
        };

        let num_parallel_tree: usize = match model.gbtree_model_param.num_parallel_tree.as_deref() {
            Some(raw) => parse_param("num_parallel_tree", raw)?,
            None => 1,
        };
        if num_parallel_tree == 0 {
            return Err(ModelError::InvalidParam {
                name: "num_parallel_tree",
                value: "0".to_string(),
            }
            .into());
        }

        let mut trees = Vec::with_capacity(model.trees.len());
        for (i, t) in model.trees.iter().enumerate() {
            if t.split_type.iter().any(|&s| s != 0) {
                return Err(ModelError::CategoricalSplit { tree: i }.into());
            }
            let default_left: Vec<bool> = t.default_left.iter().map(|f| f.as_bool()).collect();
            trees.push(RegTree::from_arrays(
                i,
                TreeArrays {
                    left_children: &t.left_children,
                    right_children: &t.right_children,
                    split_indices: &t.split_indices,
                    split_conditions: &t.split_conditions,
                    default_left: &default_left,
                },
                num_feature,
            )?);
        }
        if trees.is_empty() {
            return Err(ModelError::Empty.into());
        }

        let tree_group: Vec<usize> = if model.tree_info.is_empty() {
            vec![0; trees.len()]
        } else {
            if model.tree_info.len() != trees.len() {
                return Err(ModelError::InvalidParam {
                    name: "tree_info",
                    value: format!("{} entries for {} trees", model.tree_info.len(), trees.len()),
                }
                .into());
            }
            model
                .tree_info
                .iter()
                .map(|&g| {
                    if g < 0 || g as usize >= num_groups {
                        Err(ModelError::InvalidParam {
                            name: "tree_info",
                            value: format!("group {g} with {num_groups} output group(s)"),
                        })
                    } else {
                        Ok(g as usize)
                    }
                })
                .collect::<std::result::Result<_, _>>()?
        };

        let tree_weight = match weights {
            None => vec![1.0; trees.len()],
            Some(w) if w.len() == trees.len() => w,
            Some(w) => {
                return Err(ModelError::InvalidParam {
                    name: "weight_drop",
                    value: format!("{} entries for {} trees", w.len(), trees.len()),
                }
                .into());
            }
        };

        let mut classifier = Self {
            trees,
            tree_group,
            tree_weight,
            base_margin,
            num_groups,
            num_feature,
            objective,
            feature_names: learner.feature_names,
        };

        if let Some(best) = best_iteration(&learner.attributes)? {
            let per_round = num_parallel_tree * num_groups;
            classifier.truncate((best + 1).saturating_mul(per_round));
        }

        info!(
            "Loaded {} tree(s), objective {}, {} feature(s)",
            classifier.trees.len(),
            classifier.objective,
            classifier.num_feature
        );
        if !classifier.feature_names.is_empty() {
            debug!("Feature names: {}", classifier.feature_names.join(", "));
        }
        Ok(classifier)
    }

    fn truncate(&mut self, len: usize) {
        if len < self.trees.len() {
            debug!("Using first {} of {} trees (best_iteration)", len, self.trees.len());
            self.trees.truncate(len);
            self.tree_group.truncate(len);
            self.tree_weight.truncate(len);
        }
    }

    pub fn objective(&self) -> Objective {
        self.objective
    }

    pub fn num_trees(&self) -> usize {
        self.trees.len()
    }

    pub fn num_groups(&self) -> usize {
        self.num_groups
    }

    /// Feature names recorded at training time, if any.
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// Raw ensemble scores, shape `(rows, num_groups)`.
    pub fn predict_margin(&self, batch: ArrayView2<'_, f32>) -> Result<Array2<f32>> {
        let (rows, cols) = batch.dim();
        if cols != self.num_feature {
            return Err(ModelError::FeatureCountMismatch {
                expected: self.num_feature,
                got: cols,
            }
            .into());
        }

        let mut margins = Array2::from_elem((rows, self.num_groups), self.base_margin);
        for (r, row) in batch.outer_iter().enumerate() {
            for ((tree, &group), &weight) in self
                .trees
                .iter()
                .zip(&self.tree_group)
                .zip(&self.tree_weight)
            {
                margins[[r, group]] += weight * tree.predict(row);
            }
        }
        Ok(margins)
    }
}

impl Classifier for XgbClassifier {
    fn num_features(&self) -> usize {
        self.num_feature
    }

    fn predict(&self, batch: ArrayView2<'_, f32>) -> Result<Vec<u32>> {
        let margins = self.predict_margin(batch)?;
        let labels = margins
            .outer_iter()
            .map(|row| {
                let row = row.to_vec();
                if row.iter().any(|m| m.is_nan()) {
                    return Err(Error::Prediction("model produced a NaN score".to_string()));
                }
                self.objective
                    .label(&row)
                    .ok_or_else(|| Error::Prediction("model produced no scores".to_string()))
            })
            .collect::<Result<Vec<u32>>>()?;
        debug!("Margins {:?} -> labels {:?}", margins.as_slice(), labels);
        Ok(labels)
    }
}

/// Loads `XgbClassifier`s from native JSON model files.
#[derive(Debug, Clone, Copy, Default)]
pub struct XgbLoader;

impl ModelLoader for XgbLoader {
    type Output = XgbClassifier;

    fn load(&self, path: &Path) -> Result<XgbClassifier> {
        debug!("Reading model from {}", path.display());
        XgbClassifier::load(path)
    }
}
