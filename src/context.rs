//! Process-wide application context.
//!
//! The encoder, the classifier and the optional dataset are built once at
//! start-up from an [`AppConfig`] and passed by reference to every request
//! handler. Nothing is mutated after construction, so a single context can
//! serve concurrent submissions.

use log::{info, warn};
use rayon::prelude::*;

use crate::classifier::{self, ObesityClassifier, Prediction};
use crate::config::AppConfig;
use crate::dataset::{Dataset, ExploratoryReport};
use crate::encoder::{FeatureEncoder, RawSelections};
use crate::error::{PredictorError, Result};
use crate::record::PatientRecord;

/// Collaborators shared by all submissions.
#[derive(Debug)]
pub struct AppContext {
    encoder: FeatureEncoder,
    classifier: Box<dyn ObesityClassifier>,
    dataset: Option<Dataset>,
}

impl AppContext {
    /// Create a context from explicit collaborators.
    pub fn new(encoder: FeatureEncoder, classifier: Box<dyn ObesityClassifier>) -> Self {
        AppContext {
            encoder,
            classifier,
            dataset: None,
        }
    }

    /// Build every collaborator named by `config`.
    ///
    /// Without a model path the BMI classifier is used.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let encoder = FeatureEncoder::from_config(&config.encoder)?;

        let classifier = match &config.model_path {
            Some(path) => classifier::load_model(path)?,
            None => {
                warn!("No model configured; falling back to BMI classification");
                classifier::new_bmi_based()
            }
        };

        let dataset = match &config.dataset_path {
            Some(path) => Some(Dataset::load(path)?),
            None => None,
        };

        info!("Using {} classifier", classifier.name());
        Ok(AppContext {
            encoder,
            classifier,
            dataset,
        })
    }

    /// Attach a dataset for the exploratory report.
    pub fn with_dataset(mut self, dataset: Dataset) -> Self {
        self.dataset = Some(dataset);
        self
    }

    /// The encoder in use.
    pub fn encoder(&self) -> &FeatureEncoder {
        &self.encoder
    }

    /// The classifier in use.
    pub fn classifier(&self) -> &dyn ObesityClassifier {
        self.classifier.as_ref()
    }

    /// The loaded dataset, if any.
    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    /// Encode a submission.
    pub fn encode(&self, raw: &RawSelections) -> Result<PatientRecord> {
        self.encoder.encode(raw)
    }

    /// Encode and classify one submission.
    pub fn predict(&self, raw: &RawSelections) -> Result<Prediction> {
        let record = self.encoder.encode(raw)?;
        self.classifier.predict(&record)
    }

    /// Classify an already encoded record.
    pub fn predict_record(&self, record: &PatientRecord) -> Result<Prediction> {
        self.classifier.predict(record)
    }

    /// Classify many submissions in parallel.
    ///
    /// Results are in input order; one failing submission does not affect
    /// the others.
    pub fn predict_batch(&self, batch: &[RawSelections]) -> Vec<Result<Prediction>> {
        batch.par_iter().map(|raw| self.predict(raw)).collect()
    }

    /// Exploratory report of the loaded dataset.
    pub fn report(&self) -> Result<ExploratoryReport> {
        self.dataset
            .as_ref()
            .ok_or_else(|| PredictorError::invalid_operation("no dataset loaded"))?
            .report()
    }
}
