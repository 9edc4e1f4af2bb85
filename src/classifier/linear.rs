//! Multinomial logistic regression loaded from a model file.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::classifier::classifier::ObesityClassifier;
use crate::classifier::model::{check_classes, probabilities_from_scores};
use crate::classifier::types::Prediction;
use crate::classifier::vectorizer::FeatureVectorizer;
use crate::error::{PredictorError, Result};
use crate::record::PatientRecord;
use crate::schema::Schema;

/// Standardization applied before the linear layer: `(x - mean) / scale`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

/// Serialized parameters of a linear model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModelSpec {
    /// Class labels, in coefficient row order.
    pub classes: Vec<String>,
    /// Expanded column names.
    pub features: Vec<String>,
    #[serde(default)]
    pub scaler: Option<StandardScaler>,
    /// One row per class, or a single row for a two-class model.
    pub coefficients: Vec<Vec<f64>>,
    pub intercepts: Vec<f64>,
}

/// Linear classifier with softmax (or sigmoid for two classes) output.
#[derive(Debug, Clone)]
pub struct LinearClassifier {
    spec: LinearModelSpec,
    vectorizer: FeatureVectorizer,
}

impl LinearClassifier {
    /// Validate the parameters and resolve the feature columns.
    pub fn new(spec: LinearModelSpec) -> Result<Self> {
        check_classes(&spec.classes)?;
        let vectorizer = FeatureVectorizer::new(&spec.features)?;
        let width = vectorizer.len();

        let rows = spec.coefficients.len();
        let binary = spec.classes.len() == 2 && rows == 1;
        if rows != spec.classes.len() && !binary {
            return Err(PredictorError::model(format!(
                "expected {} coefficient rows, found {rows}",
                spec.classes.len()
            )));
        }
        if spec.intercepts.len() != rows {
            return Err(PredictorError::model(format!(
                "expected {rows} intercepts, found {}",
                spec.intercepts.len()
            )));
        }
        if let Some(row) = spec.coefficients.iter().find(|row| row.len() != width) {
            return Err(PredictorError::model(format!(
                "coefficient row has {} values for {width} features",
                row.len()
            )));
        }
        if let Some(scaler) = &spec.scaler {
            if scaler.mean.len() != width || scaler.scale.len() != width {
                return Err(PredictorError::model(format!(
                    "scaler does not match {width} features"
                )));
            }
            if scaler.scale.iter().any(|s| *s == 0.0 || !s.is_finite()) {
                return Err(PredictorError::model("scaler has a zero or non-finite scale"));
            }
        }

        Ok(LinearClassifier { spec, vectorizer })
    }

    fn scores(&self, x: &[f64]) -> Vec<f64> {
        let x: Vec<f64> = match &self.spec.scaler {
            Some(scaler) => x
                .iter()
                .zip(scaler.mean.iter().zip(&scaler.scale))
                .map(|(v, (mean, scale))| (v - mean) / scale)
                .collect(),
            None => x.to_vec(),
        };

        self.spec
            .coefficients
            .iter()
            .zip(&self.spec.intercepts)
            .map(|(row, intercept)| {
                intercept + row.iter().zip(&x).map(|(w, v)| w * v).sum::<f64>()
            })
            .collect()
    }
}

impl ObesityClassifier for LinearClassifier {
    fn predict(&self, record: &PatientRecord) -> Result<Prediction> {
        Schema::standard().validate(record)?;
        let x = self.vectorizer.transform(record)?;
        let scores = self.scores(&x);
        debug!("Linear scores: {scores:?}");
        probabilities_from_scores(&self.spec.classes, &scores)
    }

    fn name(&self) -> &str {
        "linear"
    }
}
