//! The sixteen features of a patient record.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PredictorError, Result};

/// A feature column the classifier was trained on.
///
/// Variants are declared in training order; [`Feature::ALL`] preserves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Feature {
    #[serde(rename = "Gender")]
    Gender,
    #[serde(rename = "Age")]
    Age,
    #[serde(rename = "Height")]
    Height,
    #[serde(rename = "Weight")]
    Weight,
    #[serde(rename = "family_history")]
    FamilyHistory,
    /// Frequent consumption of high-caloric food.
    #[serde(rename = "FAVC")]
    Favc,
    /// Frequency of vegetable consumption.
    #[serde(rename = "FCVC")]
    Fcvc,
    /// Number of main meals per day.
    #[serde(rename = "NCP")]
    Ncp,
    /// Daily water intake.
    #[serde(rename = "CH2O")]
    Ch2o,
    /// Physical activity frequency.
    #[serde(rename = "FAF")]
    Faf,
    /// Time using technology devices.
    #[serde(rename = "TUE")]
    Tue,
    /// Alcohol consumption.
    #[serde(rename = "CALC")]
    Calc,
    /// Eating between meals.
    #[serde(rename = "CAEC")]
    Caec,
    #[serde(rename = "SMOKE")]
    Smoke,
    /// Calorie consumption monitoring.
    #[serde(rename = "SCC")]
    Scc,
    /// Usual transportation mode.
    #[serde(rename = "MTRANS")]
    Mtrans,
}

impl Feature {
    /// Every feature, in training order.
    pub const ALL: [Feature; 16] = [
        Feature::Gender,
        Feature::Age,
        Feature::Height,
        Feature::Weight,
        Feature::FamilyHistory,
        Feature::Favc,
        Feature::Fcvc,
        Feature::Ncp,
        Feature::Ch2o,
        Feature::Faf,
        Feature::Tue,
        Feature::Calc,
        Feature::Caec,
        Feature::Smoke,
        Feature::Scc,
        Feature::Mtrans,
    ];

    /// The five features whose form input is a bucket label.
    pub const BUCKETED: [Feature; 5] = [
        Feature::Fcvc,
        Feature::Ncp,
        Feature::Ch2o,
        Feature::Faf,
        Feature::Tue,
    ];

    /// The eight features whose form input is a localized category label.
    pub const LABELED: [Feature; 8] = [
        Feature::Gender,
        Feature::FamilyHistory,
        Feature::Favc,
        Feature::Calc,
        Feature::Caec,
        Feature::Smoke,
        Feature::Scc,
        Feature::Mtrans,
    ];

    /// The exact column name expected by the classifier.
    pub fn name(&self) -> &'static str {
        match self {
            Feature::Gender => "Gender",
            Feature::Age => "Age",
            Feature::Height => "Height",
            Feature::Weight => "Weight",
            Feature::FamilyHistory => "family_history",
            Feature::Favc => "FAVC",
            Feature::Fcvc => "FCVC",
            Feature::Ncp => "NCP",
            Feature::Ch2o => "CH2O",
            Feature::Faf => "FAF",
            Feature::Tue => "TUE",
            Feature::Calc => "CALC",
            Feature::Caec => "CAEC",
            Feature::Smoke => "SMOKE",
            Feature::Scc => "SCC",
            Feature::Mtrans => "MTRANS",
        }
    }

    /// Look a feature up by its column name.
    pub fn from_name(name: &str) -> Option<Feature> {
        Feature::ALL.iter().copied().find(|f| f.name() == name)
    }

    /// Position of this feature in training order.
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Feature {
    type Err = PredictorError;

    fn from_str(s: &str) -> Result<Self> {
        Feature::from_name(s).ok_or_else(|| PredictorError::schema(format!("unknown feature '{s}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_training_order() {
        let names: Vec<&str> = Feature::ALL.iter().map(|f| f.name()).collect();
        assert_eq!(
            names,
            vec![
                "Gender",
                "Age",
                "Height",
                "Weight",
                "family_history",
                "FAVC",
                "FCVC",
                "NCP",
                "CH2O",
                "FAF",
                "TUE",
                "CALC",
                "CAEC",
                "SMOKE",
                "SCC",
                "MTRANS"
            ]
        );
        for (i, feature) in Feature::ALL.iter().enumerate() {
            assert_eq!(feature.index(), i);
        }
    }

    #[test]
    fn test_name_round_trip() {
        for feature in Feature::ALL {
            assert_eq!(Feature::from_name(feature.name()), Some(feature));
            assert_eq!(feature.name().parse::<Feature>().unwrap(), feature);
        }
        assert_eq!(Feature::from_name("BMI"), None);
        assert!("fcvc".parse::<Feature>().is_err());
    }

    #[test]
    fn test_serde_uses_column_names() {
        let json = serde_json::to_string(&Feature::FamilyHistory).unwrap();
        assert_eq!(json, "\"family_history\"");
        let back: Feature = serde_json::from_str("\"CH2O\"").unwrap();
        assert_eq!(back, Feature::Ch2o);
    }

    #[test]
    fn test_feature_groups_are_disjoint() {
        for feature in Feature::BUCKETED {
            assert!(!Feature::LABELED.contains(&feature));
        }
    }
}
