//! Helper functions for creating obesity classifiers.

use std::path::Path;

use log::info;

use crate::classifier::bmi::BmiClassifier;
use crate::classifier::classifier::ObesityClassifier;
use crate::classifier::model::ModelSpec;
use crate::error::Result;

/// Load a trained model from a JSON model file.
pub fn load_model<P: AsRef<Path>>(path: P) -> Result<Box<dyn ObesityClassifier>> {
    let path = path.as_ref();
    info!("Loading model from {}", path.display());
    ModelSpec::from_file(path)?.build()
}

/// Create the rule-based BMI classifier.
pub fn new_bmi_based() -> Box<dyn ObesityClassifier> {
    Box::new(BmiClassifier::new())
}
