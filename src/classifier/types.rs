//! Common types for obesity classification.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The obesity levels of the reference dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObesityLevel {
    #[serde(rename = "Insufficient_Weight")]
    InsufficientWeight,
    #[serde(rename = "Normal_Weight")]
    NormalWeight,
    #[serde(rename = "Overweight_Level_I")]
    OverweightLevelI,
    #[serde(rename = "Overweight_Level_II")]
    OverweightLevelII,
    #[serde(rename = "Obesity_Type_I")]
    ObesityTypeI,
    #[serde(rename = "Obesity_Type_II")]
    ObesityTypeII,
    #[serde(rename = "Obesity_Type_III")]
    ObesityTypeIII,
}

impl ObesityLevel {
    /// All levels, from lightest to heaviest.
    pub const ALL: [ObesityLevel; 7] = [
        ObesityLevel::InsufficientWeight,
        ObesityLevel::NormalWeight,
        ObesityLevel::OverweightLevelI,
        ObesityLevel::OverweightLevelII,
        ObesityLevel::ObesityTypeI,
        ObesityLevel::ObesityTypeII,
        ObesityLevel::ObesityTypeIII,
    ];

    /// The class label used by the dataset and the trained models.
    pub fn label(&self) -> &'static str {
        match self {
            ObesityLevel::InsufficientWeight => "Insufficient_Weight",
            ObesityLevel::NormalWeight => "Normal_Weight",
            ObesityLevel::OverweightLevelI => "Overweight_Level_I",
            ObesityLevel::OverweightLevelII => "Overweight_Level_II",
            ObesityLevel::ObesityTypeI => "Obesity_Type_I",
            ObesityLevel::ObesityTypeII => "Obesity_Type_II",
            ObesityLevel::ObesityTypeIII => "Obesity_Type_III",
        }
    }

    /// Parse a class label.
    pub fn from_label(label: &str) -> Option<ObesityLevel> {
        ObesityLevel::ALL.iter().copied().find(|l| l.label() == label)
    }

    /// Portuguese name shown to the care team.
    pub fn display_name(&self) -> &'static str {
        match self {
            ObesityLevel::InsufficientWeight => "Peso Insuficiente",
            ObesityLevel::NormalWeight => "Peso Normal",
            ObesityLevel::OverweightLevelI => "Sobrepeso Nível I",
            ObesityLevel::OverweightLevelII => "Sobrepeso Nível II",
            ObesityLevel::ObesityTypeI => "Obesidade Tipo I",
            ObesityLevel::ObesityTypeII => "Obesidade Tipo II",
            ObesityLevel::ObesityTypeIII => "Obesidade Tipo III",
        }
    }
}

impl fmt::Display for ObesityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Probability assigned to one class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassProbability {
    pub label: String,
    pub probability: f64,
}

/// Result of classifying one record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Class label as the model names it.
    pub label: String,
    /// The label as a known obesity level, if it is one.
    pub level: Option<ObesityLevel>,
    /// Per-class probabilities, highest first. Empty for rule-based
    /// classifiers.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub probabilities: Vec<ClassProbability>,
}

impl Prediction {
    /// Create a prediction for a label.
    pub fn new<S: Into<String>>(label: S) -> Self {
        let label = label.into();
        let level = ObesityLevel::from_label(&label);
        Prediction {
            label,
            level,
            probabilities: Vec::new(),
        }
    }

    /// Attach class probabilities; they are sorted highest first.
    pub fn with_probabilities(mut self, mut probabilities: Vec<ClassProbability>) -> Self {
        probabilities.sort_by(|a, b| b.probability.total_cmp(&a.probability));
        self.probabilities = probabilities;
        self
    }

    /// Probability of the predicted label, when the model reports one.
    pub fn confidence(&self) -> Option<f64> {
        self.probabilities
            .iter()
            .find(|p| p.label == self.label)
            .map(|p| p.probability)
    }

    /// Human-readable name: the Portuguese level name when known, the raw
    /// label otherwise.
    pub fn display_name(&self) -> &str {
        match self.level {
            Some(level) => level.display_name(),
            None => &self.label,
        }
    }
}
