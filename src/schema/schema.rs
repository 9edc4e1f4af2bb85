//! The feature schema a patient record must satisfy.

use lazy_static::lazy_static;
use serde::Serialize;

use crate::error::{PredictorError, Result};
use crate::record::PatientRecord;
use crate::schema::feature::Feature;
use crate::schema::field::{
    FREQUENCIES, FieldDefinition, FieldDomain, GENDERS, TRANSPORT_MODES, YES_NO,
};

lazy_static! {
    static ref STANDARD_SCHEMA: Schema = Schema::build_standard();
}

/// A schema defines which features a record carries, in which order, and
/// which values each may take.
///
/// The standard schema mirrors the columns and encodings the classifier was
/// trained on. A mismatch between what the encoder produces and what the
/// model expects would not raise anywhere downstream; it would just yield a
/// meaningless prediction. [`Schema::validate`] is the check that prevents it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Schema {
    /// Field definitions in training order.
    fields: Vec<FieldDefinition>,
}

impl Schema {
    /// The standard sixteen-feature schema.
    pub fn standard() -> &'static Schema {
        &STANDARD_SCHEMA
    }

    fn build_standard() -> Schema {
        use FieldDomain::*;

        let fields = vec![
            FieldDefinition::new(
                Feature::Gender,
                Categorical { tokens: GENDERS },
                "Biological sex",
            ),
            FieldDefinition::new(
                Feature::Age,
                IntegerRange { min: 10, max: 80 },
                "Age in years",
            ),
            FieldDefinition::new(
                Feature::Height,
                FloatRange {
                    min: 1.40,
                    max: 2.10,
                },
                "Height in meters",
            ),
            FieldDefinition::new(
                Feature::Weight,
                FloatRange {
                    min: 40.0,
                    max: 173.0,
                },
                "Weight in kilograms",
            ),
            FieldDefinition::new(
                Feature::FamilyHistory,
                Categorical { tokens: YES_NO },
                "Family history of overweight",
            ),
            FieldDefinition::new(
                Feature::Favc,
                Categorical { tokens: YES_NO },
                "Frequent consumption of high-caloric food",
            ),
            FieldDefinition::new(
                Feature::Fcvc,
                Ordinal { values: &[1, 2, 3] },
                "Frequency of vegetable consumption",
            ),
            FieldDefinition::new(
                Feature::Ncp,
                Ordinal {
                    values: &[1, 2, 3, 4],
                },
                "Number of main meals per day",
            ),
            FieldDefinition::new(
                Feature::Ch2o,
                Ordinal { values: &[1, 2, 3] },
                "Daily water intake",
            ),
            FieldDefinition::new(
                Feature::Faf,
                Ordinal {
                    values: &[0, 1, 2, 3],
                },
                "Physical activity frequency",
            ),
            FieldDefinition::new(
                Feature::Tue,
                Ordinal { values: &[0, 1, 2] },
                "Time using technology devices",
            ),
            FieldDefinition::new(
                Feature::Calc,
                Categorical {
                    tokens: FREQUENCIES,
                },
                "Alcohol consumption",
            ),
            FieldDefinition::new(
                Feature::Caec,
                Categorical {
                    tokens: FREQUENCIES,
                },
                "Eating between meals",
            ),
            FieldDefinition::new(
                Feature::Smoke,
                Categorical { tokens: YES_NO },
                "Smoker",
            ),
            FieldDefinition::new(
                Feature::Scc,
                Categorical { tokens: YES_NO },
                "Monitors calorie intake",
            ),
            FieldDefinition::new(
                Feature::Mtrans,
                Categorical {
                    tokens: TRANSPORT_MODES,
                },
                "Usual transportation mode",
            ),
        ];

        Schema { fields }
    }

    /// Get all field definitions in training order.
    pub fn fields(&self) -> &[FieldDefinition] {
        &self.fields
    }

    /// Get the definition of a feature.
    pub fn field(&self, feature: Feature) -> &FieldDefinition {
        // The standard schema defines every feature at its own index.
        &self.fields[feature.index()]
    }

    /// Get the domain of a feature.
    pub fn domain(&self, feature: Feature) -> &FieldDomain {
        self.field(feature).domain()
    }

    /// Get the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the schema is empty.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Validate that a record carries every feature exactly once, in training
    /// order, with a value inside the feature's domain.
    pub fn validate(&self, record: &PatientRecord) -> Result<()> {
        if record.len() != self.fields.len() {
            let missing: Vec<&str> = self
                .fields
                .iter()
                .filter(|def| record.get(def.feature()).is_none())
                .map(|def| def.name())
                .collect();
            return Err(PredictorError::schema(format!(
                "expected {} fields, found {} (missing: {})",
                self.fields.len(),
                record.len(),
                if missing.is_empty() {
                    "none".to_string()
                } else {
                    missing.join(", ")
                }
            )));
        }

        for (position, (def, (feature, value))) in self.fields.iter().zip(record.iter()).enumerate()
        {
            if def.feature() != feature {
                return Err(PredictorError::schema(format!(
                    "field {position} should be '{}', found '{}'",
                    def.name(),
                    feature
                )));
            }
            if !def.domain().contains(value) {
                return Err(PredictorError::schema(format!(
                    "field '{}' has value {} outside {}",
                    def.name(),
                    value,
                    def.domain().describe()
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::FeatureValue;

    fn valid_record() -> PatientRecord {
        let mut record = PatientRecord::new();
        for (feature, value) in [
            (Feature::Gender, FeatureValue::from("Female")),
            (Feature::Age, FeatureValue::Integer(30)),
            (Feature::Height, FeatureValue::Float(1.70)),
            (Feature::Weight, FeatureValue::Float(70.0)),
            (Feature::FamilyHistory, FeatureValue::from("no")),
            (Feature::Favc, FeatureValue::from("no")),
            (Feature::Fcvc, FeatureValue::Integer(2)),
            (Feature::Ncp, FeatureValue::Integer(2)),
            (Feature::Ch2o, FeatureValue::Integer(2)),
            (Feature::Faf, FeatureValue::Integer(0)),
            (Feature::Tue, FeatureValue::Integer(0)),
            (Feature::Calc, FeatureValue::from("no")),
            (Feature::Caec, FeatureValue::from("Sometimes")),
            (Feature::Smoke, FeatureValue::from("no")),
            (Feature::Scc, FeatureValue::from("no")),
            (Feature::Mtrans, FeatureValue::from("Walking")),
        ] {
            record.push(feature, value);
        }
        record
    }

    #[test]
    fn test_standard_schema_order() {
        let schema = Schema::standard();
        assert_eq!(schema.len(), 16);
        assert!(!schema.is_empty());
        for (def, feature) in schema.fields().iter().zip(Feature::ALL) {
            assert_eq!(def.feature(), feature);
            assert_eq!(schema.field(feature).feature(), feature);
        }
    }

    #[test]
    fn test_domains() {
        let schema = Schema::standard();
        assert_eq!(schema.domain(Feature::Gender).tokens(), GENDERS);
        assert_eq!(
            schema.domain(Feature::Age),
            &FieldDomain::IntegerRange { min: 10, max: 80 }
        );
        assert_eq!(
            schema.domain(Feature::Faf),
            &FieldDomain::Ordinal {
                values: &[0, 1, 2, 3]
            }
        );
    }

    #[test]
    fn test_validate_accepts_complete_record() {
        Schema::standard().validate(&valid_record()).unwrap();
    }

    #[test]
    fn test_validate_rejects_missing_field() {
        let mut record = PatientRecord::new();
        for (feature, value) in valid_record().iter() {
            if feature != Feature::Smoke {
                record.push(feature, value.clone());
            }
        }

        let err = Schema::standard().validate(&record).unwrap_err();
        assert!(matches!(err, PredictorError::SchemaMismatch(_)));
        assert!(err.to_string().contains("SMOKE"));
    }

    #[test]
    fn test_validate_rejects_out_of_domain_value() {
        let mut record = PatientRecord::new();
        for (feature, value) in valid_record().iter() {
            let value = if feature == Feature::Fcvc {
                FeatureValue::Integer(7)
            } else {
                value.clone()
            };
            record.push(feature, value);
        }

        let err = Schema::standard().validate(&record).unwrap_err();
        assert!(err.to_string().contains("FCVC"));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_validate_rejects_wrong_order() {
        let original = valid_record();
        let mut entries: Vec<(Feature, FeatureValue)> = original
            .iter()
            .map(|(feature, value)| (feature, value.clone()))
            .collect();
        entries.swap(0, 1);

        let mut record = PatientRecord::new();
        for (feature, value) in entries {
            record.push(feature, value);
        }

        let err = Schema::standard().validate(&record).unwrap_err();
        assert!(err.to_string().contains("should be 'Gender'"));
    }
}
