//! Application configuration.
//!
//! A JSON file names the collaborators a deployment uses:
//!
//! ```json
//! {
//!   "dataset_path": "data/Obesity.csv",
//!   "model_path": "models/modelo_obesidade.json",
//!   "encoder": { "buckets": {}, "labels": {} }
//! }
//! ```
//!
//! Every key is optional. Command-line flags and environment variables
//! override the file.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::encoder::EncoderConfig;
use crate::error::{PredictorError, Result};

/// Deployment configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Historical dataset for the exploratory report.
    pub dataset_path: Option<PathBuf>,
    /// Trained model file. Without one, predictions use the BMI fallback.
    pub model_path: Option<PathBuf>,
    /// Encoder table overrides.
    pub encoder: EncoderConfig,
}

impl AppConfig {
    /// Load configuration from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            PredictorError::config(format!("cannot read '{}': {e}", path.display()))
        })?;
        let config = Self::from_json(&content)?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parse configuration from a JSON string.
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content)
            .map_err(|e| PredictorError::config(format!("invalid configuration: {e}")))
    }

    /// Override the model path.
    pub fn with_model_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.model_path = Some(path.into());
        self
    }

    /// Override the dataset path.
    pub fn with_dataset_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.dataset_path = Some(path.into());
        self
    }
}
