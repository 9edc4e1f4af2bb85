//! Model files on disk.
//!
//! A model file is a JSON document tagged by `kind`:
//!
//! ```json
//! {
//!   "kind": "linear",
//!   "classes": ["Normal_Weight", "Obesity_Type_I"],
//!   "features": ["Weight", "Gender_Male"],
//!   "coefficients": [[-0.2, 0.0], [0.2, 0.0]],
//!   "intercepts": [16.0, -16.0]
//! }
//! ```
//!
//! `kind` is either `linear` ([`LinearModelSpec`]) or `gradient_boosting`
//! ([`GradientBoostingSpec`]).

use std::fs;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::classifier::boosting::{GradientBoostingClassifier, GradientBoostingSpec};
use crate::classifier::classifier::ObesityClassifier;
use crate::classifier::linear::{LinearClassifier, LinearModelSpec};
use crate::classifier::types::{ClassProbability, Prediction};
use crate::error::{PredictorError, Result};

/// Parameters of a trained model, as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelSpec {
    Linear(LinearModelSpec),
    GradientBoosting(GradientBoostingSpec),
}

impl ModelSpec {
    /// Read a model file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            PredictorError::model(format!("cannot read model '{}': {e}", path.display()))
        })?;
        Self::from_json(&content)
    }

    /// Parse a model from JSON text.
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content)
            .map_err(|e| PredictorError::model(format!("invalid model file: {e}")))
    }

    /// Build the classifier described by these parameters.
    pub fn build(self) -> Result<Box<dyn ObesityClassifier>> {
        let classifier: Box<dyn ObesityClassifier> = match self {
            ModelSpec::Linear(spec) => Box::new(LinearClassifier::new(spec)?),
            ModelSpec::GradientBoosting(spec) => Box::new(GradientBoostingClassifier::new(spec)?),
        };
        info!("Built {} classifier", classifier.name());
        Ok(classifier)
    }
}

/// Class labels must be present and unique.
pub(crate) fn check_classes(classes: &[String]) -> Result<()> {
    if classes.len() < 2 {
        return Err(PredictorError::model("a model needs at least two classes"));
    }
    for (i, class) in classes.iter().enumerate() {
        if classes[..i].contains(class) {
            return Err(PredictorError::model(format!("duplicate class '{class}'")));
        }
    }
    Ok(())
}

/// Turn raw scores into a prediction.
///
/// One score for two classes is a logit for the second class; otherwise the
/// scores go through softmax. Ties resolve to the first class.
pub(crate) fn probabilities_from_scores(classes: &[String], scores: &[f64]) -> Result<Prediction> {
    let probabilities: Vec<f64> = if classes.len() == 2 && scores.len() == 1 {
        let positive = 1.0 / (1.0 + (-scores[0]).exp());
        vec![1.0 - positive, positive]
    } else if scores.len() == classes.len() {
        softmax(scores)
    } else {
        return Err(PredictorError::model(format!(
            "{} scores for {} classes",
            scores.len(),
            classes.len()
        )));
    };

    if probabilities.iter().any(|p| !p.is_finite()) {
        return Err(PredictorError::model("model produced non-finite scores"));
    }

    let mut best = 0;
    for (i, p) in probabilities.iter().enumerate() {
        if *p > probabilities[best] {
            best = i;
        }
    }

    let per_class = classes
        .iter()
        .zip(&probabilities)
        .map(|(label, probability)| ClassProbability {
            label: label.clone(),
            probability: *probability,
        })
        .collect();

    Ok(Prediction::new(classes[best].clone()).with_probabilities(per_class))
}

fn softmax(scores: &[f64]) -> Vec<f64> {
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
    let total: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / total).collect()
}
