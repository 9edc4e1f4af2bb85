//! Obesity-level classification of encoded records.
//!
//! # Architecture
//!
//! - `ObesityClassifier` trait: common interface for all classifiers
//! - `LinearClassifier`: multinomial logistic regression from a model file
//! - `GradientBoostingClassifier`: boosted regression trees from a model file
//! - `BmiClassifier`: rule-based fallback on body-mass index
//! - `FeatureVectorizer`: maps records onto a model's one-hot column layout
//!
//! # Example
//!
//! ```rust,no_run
//! use obesity_predictor::classifier;
//! use obesity_predictor::encoder::{FeatureEncoder, RawSelections};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let classifier = classifier::load_model("modelo_obesidade.json")?;
//! let raw: RawSelections = serde_json::from_str(&std::fs::read_to_string("patient.json")?)?;
//! let record = FeatureEncoder::new().encode(&raw)?;
//!
//! let prediction = classifier.predict(&record)?;
//! println!("{}", prediction.display_name());
//! # Ok(())
//! # }
//! ```

mod bmi;
mod boosting;
#[allow(clippy::module_inception)]
mod classifier;
mod core;
mod linear;
mod model;
mod types;
mod vectorizer;

// Public exports
pub use bmi::BmiClassifier;
pub use boosting::{GradientBoostingClassifier, GradientBoostingSpec, RegressionTree, TreeNode};
pub use classifier::ObesityClassifier;
pub use core::{load_model, new_bmi_based};
pub use linear::{LinearClassifier, LinearModelSpec, StandardScaler};
pub use model::ModelSpec;
pub use types::{ClassProbability, ObesityLevel, Prediction};
pub use vectorizer::FeatureVectorizer;
