//! Per-deployment overrides for the encoder tables.
//!
//! The wording of form options drifts between deployments while the
//! integer and token contract of the model stays fixed. An
//! [`EncoderConfig`] replaces whole tables for the features it names and
//! leaves the defaults in place for the rest.
//!
//! ```
//! use obesity_predictor::encoder::EncoderConfig;
//!
//! let config: EncoderConfig = serde_json::from_str(r#"{
//!     "buckets": {
//!         "CH2O": [
//!             {"label": "Menos de 1 copo", "value": 1},
//!             {"label": "1-2 copos", "value": 2},
//!             {"label": "Mais de 2 copos", "value": 3}
//!         ]
//!     }
//! }"#).unwrap();
//! assert_eq!(config.buckets["CH2O"].len(), 3);
//! assert!(config.labels.is_empty());
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One bucket of an ordinal feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketEntry {
    /// Label shown on the form.
    pub label: String,
    /// Ordinal value the model expects.
    pub value: i64,
}

/// One localized label of a categorical feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelEntry {
    /// Label shown on the form.
    pub label: String,
    /// Canonical token the model expects.
    pub token: String,
}

/// Table overrides keyed by column name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EncoderConfig {
    /// Bucket tables for FCVC, NCP, CH2O, FAF and TUE.
    #[serde(default)]
    pub buckets: BTreeMap<String, Vec<BucketEntry>>,
    /// Label tables for the categorical features.
    #[serde(default)]
    pub labels: BTreeMap<String, Vec<LabelEntry>>,
}

impl EncoderConfig {
    /// Whether this configuration changes nothing.
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty() && self.labels.is_empty()
    }
}
