//! The encoded patient record handed to a classifier.

use serde::de::{self, Deserializer};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{PredictorError, Result};
use crate::record::feature_value::FeatureValue;
use crate::schema::{Feature, FieldDomain, Schema};

/// An ordered mapping from feature to encoded value.
///
/// Records are built fresh for every submission, consumed by a classifier
/// and dropped. Entries keep insertion order; a record produced by the
/// encoder is always in training order and complete.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatientRecord {
    entries: Vec<(Feature, FeatureValue)>,
}

impl PatientRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        PatientRecord {
            entries: Vec::with_capacity(Feature::ALL.len()),
        }
    }

    /// Append a feature value.
    pub fn push(&mut self, feature: Feature, value: FeatureValue) {
        self.entries.push((feature, value));
    }

    /// Get the value of a feature.
    pub fn get(&self, feature: Feature) -> Option<&FeatureValue> {
        self.entries
            .iter()
            .find(|(f, _)| *f == feature)
            .map(|(_, value)| value)
    }

    /// Get a categorical token.
    pub fn text(&self, feature: Feature) -> Option<&str> {
        self.get(feature).and_then(FeatureValue::as_text)
    }

    /// Get a numeric value as f64.
    pub fn number(&self, feature: Feature) -> Option<f64> {
        self.get(feature).and_then(FeatureValue::as_f64)
    }

    /// Iterate over entries in record order.
    pub fn iter(&self) -> impl Iterator<Item = (Feature, &FeatureValue)> {
        self.entries.iter().map(|(feature, value)| (*feature, value))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the record has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Build a record from a JSON object keyed by column name.
    ///
    /// Used for records that were encoded elsewhere. Every column must be
    /// present, no unknown column is allowed, and the result is validated
    /// against the standard schema.
    pub fn from_json(value: &Value) -> Result<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| PredictorError::schema("record must be a JSON object"))?;

        if let Some(unknown) = object.keys().find(|key| Feature::from_name(key).is_none()) {
            return Err(PredictorError::schema(format!("unknown field '{unknown}'")));
        }

        let schema = Schema::standard();
        let mut record = PatientRecord::new();
        for def in schema.fields() {
            let raw = object
                .get(def.name())
                .ok_or_else(|| PredictorError::schema(format!("missing field '{}'", def.name())))?;
            record.push(def.feature(), json_to_value(def.name(), def.domain(), raw)?);
        }

        schema.validate(&record)?;
        Ok(record)
    }
}

fn json_to_value(name: &str, domain: &FieldDomain, raw: &Value) -> Result<FeatureValue> {
    let converted = match domain {
        FieldDomain::Categorical { .. } => raw.as_str().map(FeatureValue::from),
        FieldDomain::Ordinal { .. } | FieldDomain::IntegerRange { .. } => {
            raw.as_i64().or_else(|| whole_number(raw)).map(FeatureValue::Integer)
        }
        FieldDomain::FloatRange { .. } => raw.as_f64().map(FeatureValue::Float),
    };

    converted.ok_or_else(|| {
        PredictorError::schema(format!("field '{name}' has incompatible value {raw}"))
    })
}

/// Accept `2.0` where an integer is expected.
fn whole_number(raw: &Value) -> Option<i64> {
    raw.as_f64()
        .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
        .map(|f| f as i64)
}

impl Serialize for PatientRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (feature, value) in &self.entries {
            map.serialize_entry(feature.name(), value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for PatientRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        PatientRecord::from_json(&value).map_err(de::Error::custom)
    }
}
