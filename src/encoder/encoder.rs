//! The feature encoder.

use ahash::AHashMap;
use log::debug;

use crate::encoder::buckets::BucketTable;
use crate::encoder::config::EncoderConfig;
use crate::encoder::labels::LabelTable;
use crate::encoder::raw::RawSelections;
use crate::error::{PredictorError, Result};
use crate::record::{FeatureValue, PatientRecord};
use crate::schema::{Feature, Schema};

/// Turns raw form selections into the record the classifier was trained on.
///
/// The encoder holds only immutable lookup tables. Encoding is a pure
/// function of its input: the same selections always produce the same
/// record, and an invalid selection fails without producing anything.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureEncoder {
    buckets: AHashMap<Feature, BucketTable>,
    labels: AHashMap<Feature, LabelTable>,
}

impl Default for FeatureEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl FeatureEncoder {
    /// Create an encoder with the default tables.
    pub fn new() -> Self {
        let buckets = Feature::BUCKETED
            .iter()
            .filter_map(|f| BucketTable::default_for(*f).ok().map(|t| (*f, t)))
            .collect();
        let labels = Feature::LABELED
            .iter()
            .filter_map(|f| LabelTable::default_for(*f).ok().map(|t| (*f, t)))
            .collect();
        FeatureEncoder { buckets, labels }
    }

    /// Create an encoder with the default tables replaced by the overrides in
    /// `config`.
    pub fn from_config(config: &EncoderConfig) -> Result<Self> {
        let mut encoder = Self::new();

        for (name, entries) in &config.buckets {
            let feature: Feature = name
                .parse()
                .map_err(|_| PredictorError::config(format!("unknown feature '{name}'")))?;
            if !Feature::BUCKETED.contains(&feature) {
                return Err(PredictorError::config(format!(
                    "'{name}' does not take bucket labels"
                )));
            }
            let table = BucketTable::from_pairs(
                feature,
                entries.iter().map(|e| (e.label.clone(), e.value)),
            )?;
            debug!("Overriding bucket table for {feature} ({} buckets)", entries.len());
            encoder.buckets.insert(feature, table);
        }

        for (name, entries) in &config.labels {
            let feature: Feature = name
                .parse()
                .map_err(|_| PredictorError::config(format!("unknown feature '{name}'")))?;
            if !Feature::LABELED.contains(&feature) {
                return Err(PredictorError::config(format!(
                    "'{name}' does not take category labels"
                )));
            }
            let table = LabelTable::from_pairs(
                feature,
                entries.iter().map(|e| (e.label.clone(), e.token.as_str())),
            )?;
            debug!("Overriding label table for {feature} ({} labels)", entries.len());
            encoder.labels.insert(feature, table);
        }

        Ok(encoder)
    }

    /// Encode one submission.
    ///
    /// Fails with [`PredictorError::UnmappedCategory`] for a label outside
    /// its table and [`PredictorError::ValueOutOfRange`] for a number outside
    /// its declared range. Numbers inside the range pass through untouched.
    pub fn encode(&self, raw: &RawSelections) -> Result<PatientRecord> {
        let mut record = PatientRecord::new();

        for feature in Feature::ALL {
            let value = match feature {
                Feature::Age => self.check_range(feature, FeatureValue::Integer(raw.age))?,
                Feature::Height => self.check_range(feature, FeatureValue::Float(raw.height))?,
                Feature::Weight => self.check_range(feature, FeatureValue::Float(raw.weight))?,
                _ => {
                    let label = raw.label(feature).unwrap_or_default();
                    if let Some(table) = self.buckets.get(&feature) {
                        FeatureValue::Integer(table.lookup(label)?)
                    } else {
                        FeatureValue::from(self.label_table(feature)?.normalize(label)?)
                    }
                }
            };
            record.push(feature, value);
        }

        debug!("Encoded record: {record:?}");
        Ok(record)
    }

    /// Labels a form should offer for a feature, in display order.
    ///
    /// Empty for the numeric features.
    pub fn options(&self, feature: Feature) -> Vec<&str> {
        if let Some(table) = self.buckets.get(&feature) {
            table.labels()
        } else if let Some(table) = self.labels.get(&feature) {
            table.labels()
        } else {
            Vec::new()
        }
    }

    /// The bucket table of an ordinal feature.
    pub fn bucket_table(&self, feature: Feature) -> Option<&BucketTable> {
        self.buckets.get(&feature)
    }

    /// The label table of a categorical feature.
    pub fn label_table(&self, feature: Feature) -> Result<&LabelTable> {
        self.labels
            .get(&feature)
            .ok_or_else(|| PredictorError::schema(format!("no label table for '{feature}'")))
    }

    fn check_range(&self, feature: Feature, value: FeatureValue) -> Result<FeatureValue> {
        if Schema::standard().domain(feature).contains(&value) {
            Ok(value)
        } else {
            Err(PredictorError::out_of_range(feature.name(), &value))
        }
    }
}
