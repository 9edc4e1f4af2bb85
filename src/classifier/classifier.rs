//! Obesity classifier trait definition.

use crate::classifier::types::Prediction;
use crate::error::Result;
use crate::record::PatientRecord;

/// Obesity classifier trait.
///
/// Implementations receive a fully encoded record and return the predicted
/// class. Every implementation validates the record against the standard
/// schema before inference, so a malformed record surfaces as
/// [`crate::error::PredictorError::SchemaMismatch`] instead of a silently
/// wrong prediction.
pub trait ObesityClassifier: Send + Sync + std::fmt::Debug {
    /// Predict the obesity level for an encoded record.
    ///
    /// # Arguments
    /// * `record` - The encoded patient record
    ///
    /// # Returns
    /// The predicted class, with probabilities when the model provides them
    fn predict(&self, record: &PatientRecord) -> Result<Prediction>;

    /// Get the name of this classifier for debugging and logging.
    fn name(&self) -> &str;
}
