//! Rule-based classifier on body-mass index.
//!
//! Used when no trained model is configured. The thresholds follow the
//! WHO adult BMI bands that the reference dataset labels were derived from,
//! with the overweight band split at 27.5.

use log::debug;

use crate::classifier::classifier::ObesityClassifier;
use crate::classifier::types::{ObesityLevel, Prediction};
use crate::error::{PredictorError, Result};
use crate::record::PatientRecord;
use crate::schema::{Feature, Schema};

/// Upper BMI bound (exclusive) of each level below Obesity_Type_III.
const BMI_BANDS: [(f64, ObesityLevel); 6] = [
    (18.5, ObesityLevel::InsufficientWeight),
    (25.0, ObesityLevel::NormalWeight),
    (27.5, ObesityLevel::OverweightLevelI),
    (30.0, ObesityLevel::OverweightLevelII),
    (35.0, ObesityLevel::ObesityTypeI),
    (40.0, ObesityLevel::ObesityTypeII),
];

/// Classifies by `weight / height²`.
#[derive(Debug, Clone, Default)]
pub struct BmiClassifier;

impl BmiClassifier {
    /// Create a new BMI classifier.
    pub fn new() -> Self {
        BmiClassifier
    }

    /// Body-mass index of a record.
    pub fn bmi(record: &PatientRecord) -> Result<f64> {
        let height = record
            .number(Feature::Height)
            .ok_or_else(|| PredictorError::schema("record has no Height"))?;
        let weight = record
            .number(Feature::Weight)
            .ok_or_else(|| PredictorError::schema("record has no Weight"))?;
        Ok(weight / (height * height))
    }

    /// Level of a BMI value.
    pub fn level_for(bmi: f64) -> ObesityLevel {
        BMI_BANDS
            .iter()
            .find(|(upper, _)| bmi < *upper)
            .map(|(_, level)| *level)
            .unwrap_or(ObesityLevel::ObesityTypeIII)
    }
}

impl ObesityClassifier for BmiClassifier {
    fn predict(&self, record: &PatientRecord) -> Result<Prediction> {
        Schema::standard().validate(record)?;
        let bmi = Self::bmi(record)?;
        let level = Self::level_for(bmi);
        debug!("BMI {bmi:.2} -> {level}");
        Ok(Prediction::new(level.label()))
    }

    fn name(&self) -> &str {
        "bmi"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::FeatureValue;

    fn record(height: f64, weight: f64) -> PatientRecord {
        let json = serde_json::json!({
            "Gender": "Female", "Age": 30, "Height": height, "Weight": weight,
            "family_history": "no", "FAVC": "no", "FCVC": 2, "NCP": 2, "CH2O": 2,
            "FAF": 0, "TUE": 0, "CALC": "no", "CAEC": "Sometimes", "SMOKE": "no",
            "SCC": "no", "MTRANS": "Walking"
        });
        PatientRecord::from_json(&json).unwrap()
    }

    #[test]
    fn test_band_boundaries() {
        assert_eq!(BmiClassifier::level_for(18.4), ObesityLevel::InsufficientWeight);
        assert_eq!(BmiClassifier::level_for(18.5), ObesityLevel::NormalWeight);
        assert_eq!(BmiClassifier::level_for(24.9), ObesityLevel::NormalWeight);
        assert_eq!(BmiClassifier::level_for(25.0), ObesityLevel::OverweightLevelI);
        assert_eq!(BmiClassifier::level_for(27.5), ObesityLevel::OverweightLevelII);
        assert_eq!(BmiClassifier::level_for(30.0), ObesityLevel::ObesityTypeI);
        assert_eq!(BmiClassifier::level_for(35.0), ObesityLevel::ObesityTypeII);
        assert_eq!(BmiClassifier::level_for(40.0), ObesityLevel::ObesityTypeIII);
        assert_eq!(BmiClassifier::level_for(55.0), ObesityLevel::ObesityTypeIII);
    }

    #[test]
    fn test_predict() {
        let classifier = BmiClassifier::new();
        // 70 / 1.70² ≈ 24.2
        let prediction = classifier.predict(&record(1.70, 70.0)).unwrap();
        assert_eq!(prediction.label, "Normal_Weight");
        assert_eq!(prediction.level, Some(ObesityLevel::NormalWeight));
        assert!(prediction.probabilities.is_empty());

        // 130 / 1.70² ≈ 45.0
        let prediction = classifier.predict(&record(1.70, 130.0)).unwrap();
        assert_eq!(prediction.level, Some(ObesityLevel::ObesityTypeIII));
    }

    #[test]
    fn test_rejects_invalid_record() {
        let mut partial = PatientRecord::new();
        partial.push(Feature::Height, FeatureValue::Float(1.7));
        partial.push(Feature::Weight, FeatureValue::Float(70.0));
        assert!(BmiClassifier::new().predict(&partial).is_err());
    }
}
