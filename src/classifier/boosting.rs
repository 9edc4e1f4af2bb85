//! Gradient-boosted regression trees loaded from a model file.
//!
//! The layout follows the usual multiclass boosting scheme: every stage
//! holds one regression tree per class, the raw score of a class is its
//! initial value plus the learning-rate-scaled sum of its trees, and the
//! scores go through softmax. Two-class models keep a single tree per stage
//! and use a sigmoid.

use anyhow::{Context, bail};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::classifier::classifier::ObesityClassifier;
use crate::classifier::model::{check_classes, probabilities_from_scores};
use crate::classifier::types::Prediction;
use crate::classifier::vectorizer::FeatureVectorizer;
use crate::error::{PredictorError, Result};
use crate::record::PatientRecord;
use crate::schema::Schema;

/// One node of a regression tree.
///
/// A negative `feature` marks a leaf. Internal nodes send `x <= threshold`
/// to `left`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    pub feature: i64,
    #[serde(default)]
    pub threshold: f64,
    #[serde(default)]
    pub left: usize,
    #[serde(default)]
    pub right: usize,
    #[serde(default)]
    pub value: f64,
}

/// A regression tree stored as a flat node array, root first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionTree {
    pub nodes: Vec<TreeNode>,
}

impl RegressionTree {
    /// Check structure against the feature width.
    ///
    /// Children must come after their parent, which rules out cycles and
    /// guarantees evaluation terminates.
    fn validate(&self, width: usize) -> anyhow::Result<()> {
        if self.nodes.is_empty() {
            bail!("tree has no nodes");
        }
        for (i, node) in self.nodes.iter().enumerate() {
            if node.feature < 0 {
                continue;
            }
            if node.feature as usize >= width {
                bail!("node {i} splits on column {} of {width}", node.feature);
            }
            for child in [node.left, node.right] {
                if child <= i || child >= self.nodes.len() {
                    bail!("node {i} has invalid child {child}");
                }
            }
        }
        Ok(())
    }

    fn evaluate(&self, x: &[f64]) -> f64 {
        let mut index = 0;
        loop {
            let node = &self.nodes[index];
            if node.feature < 0 {
                return node.value;
            }
            index = if x[node.feature as usize] <= node.threshold {
                node.left
            } else {
                node.right
            };
        }
    }
}

/// Serialized parameters of a gradient boosting model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientBoostingSpec {
    pub classes: Vec<String>,
    pub features: Vec<String>,
    pub learning_rate: f64,
    /// Initial raw score per output.
    pub init: Vec<f64>,
    /// `trees[stage][output]`.
    pub trees: Vec<Vec<RegressionTree>>,
}

/// Gradient boosting classifier.
#[derive(Debug, Clone)]
pub struct GradientBoostingClassifier {
    spec: GradientBoostingSpec,
    vectorizer: FeatureVectorizer,
}

impl GradientBoostingClassifier {
    /// Validate the ensemble and resolve the feature columns.
    pub fn new(spec: GradientBoostingSpec) -> Result<Self> {
        check_classes(&spec.classes)?;
        let vectorizer = FeatureVectorizer::new(&spec.features)?;

        let outputs = if spec.classes.len() == 2 {
            1
        } else {
            spec.classes.len()
        };
        if spec.init.len() != outputs {
            return Err(PredictorError::model(format!(
                "expected {outputs} initial scores, found {}",
                spec.init.len()
            )));
        }
        if !spec.learning_rate.is_finite() || spec.learning_rate <= 0.0 {
            return Err(PredictorError::model(format!(
                "invalid learning rate {}",
                spec.learning_rate
            )));
        }
        for (stage, trees) in spec.trees.iter().enumerate() {
            if trees.len() != outputs {
                return Err(PredictorError::model(format!(
                    "stage {stage} has {} trees, expected {outputs}",
                    trees.len()
                )));
            }
            for (output, tree) in trees.iter().enumerate() {
                tree.validate(vectorizer.len())
                    .with_context(|| format!("invalid tree {output} in stage {stage}"))?;
            }
        }

        debug!(
            "Loaded gradient boosting model: {} stages, {} outputs",
            spec.trees.len(),
            outputs
        );
        Ok(GradientBoostingClassifier { spec, vectorizer })
    }

    fn scores(&self, x: &[f64]) -> Vec<f64> {
        let mut scores = self.spec.init.clone();
        for stage in &self.spec.trees {
            for (score, tree) in scores.iter_mut().zip(stage) {
                *score += self.spec.learning_rate * tree.evaluate(x);
            }
        }
        scores
    }
}

impl ObesityClassifier for GradientBoostingClassifier {
    fn predict(&self, record: &PatientRecord) -> Result<Prediction> {
        Schema::standard().validate(record)?;
        let x = self.vectorizer.transform(record)?;
        let scores = self.scores(&x);
        debug!("Boosting scores: {scores:?}");
        probabilities_from_scores(&self.spec.classes, &scores)
    }

    fn name(&self) -> &str {
        "gradient_boosting"
    }
}
