//! Numeric feature vectors for model inference.
//!
//! Models address their inputs by expanded column names in the usual
//! one-hot convention:
//!
//! - numeric features by their own name: `Age`, `Weight`, `FCVC`
//! - categorical features as `<feature>_<token>`: `Gender_Male`,
//!   `family_history_yes`, `MTRANS_Public_Transportation`
//!
//! Column names are resolved once, when the model is loaded. A column that
//! names an unknown feature or token is a schema mismatch right there rather
//! than a column that is always zero at inference time.

use crate::error::{PredictorError, Result};
use crate::record::PatientRecord;
use crate::schema::{Feature, Schema};

#[derive(Debug, Clone, PartialEq)]
enum Column {
    Numeric(Feature),
    OneHot(Feature, &'static str),
}

/// Converts records into the column layout a model was trained on.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVectorizer {
    columns: Vec<Column>,
}

impl FeatureVectorizer {
    /// Resolve a list of expanded column names.
    pub fn new<S: AsRef<str>>(names: &[S]) -> Result<Self> {
        if names.is_empty() {
            return Err(PredictorError::schema("model declares no feature columns"));
        }

        let mut columns = Vec::with_capacity(names.len());
        for name in names {
            let column = Self::resolve(name.as_ref())?;
            if columns.contains(&column) {
                return Err(PredictorError::schema(format!(
                    "duplicate model column '{}'",
                    name.as_ref()
                )));
            }
            columns.push(column);
        }

        Ok(FeatureVectorizer { columns })
    }

    fn resolve(name: &str) -> Result<Column> {
        let schema = Schema::standard();

        if let Some(feature) = Feature::from_name(name) {
            return if schema.domain(feature).is_numeric() {
                Ok(Column::Numeric(feature))
            } else {
                Err(PredictorError::schema(format!(
                    "categorical feature '{name}' must be one-hot encoded"
                )))
            };
        }

        // Longest prefix wins, so `family_history_yes` never resolves
        // against a shorter feature name.
        let (feature, token) = Feature::ALL
            .iter()
            .filter_map(|f| {
                name.strip_prefix(f.name())
                    .and_then(|rest| rest.strip_prefix('_'))
                    .map(|token| (*f, token))
            })
            .max_by_key(|(f, _)| f.name().len())
            .ok_or_else(|| PredictorError::schema(format!("unknown model column '{name}'")))?;

        let domain = schema.domain(feature);
        if !domain.is_categorical() {
            return Err(PredictorError::schema(format!(
                "numeric feature '{feature}' cannot be one-hot encoded ('{name}')"
            )));
        }
        let token = domain
            .tokens()
            .iter()
            .copied()
            .find(|t| *t == token)
            .ok_or_else(|| {
                PredictorError::schema(format!(
                    "model column '{name}' refers to unknown token '{token}' of '{feature}'"
                ))
            })?;

        Ok(Column::OneHot(feature, token))
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether there are no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Build the feature vector of a record.
    pub fn transform(&self, record: &PatientRecord) -> Result<Vec<f64>> {
        self.columns
            .iter()
            .map(|column| match column {
                Column::Numeric(feature) => record.number(*feature).ok_or_else(|| {
                    PredictorError::schema(format!("record has no numeric '{feature}'"))
                }),
                Column::OneHot(feature, token) => record
                    .text(*feature)
                    .map(|value| if value == *token { 1.0 } else { 0.0 })
                    .ok_or_else(|| {
                        PredictorError::schema(format!("record has no token for '{feature}'"))
                    }),
            })
            .collect()
    }
}
