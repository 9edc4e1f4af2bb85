//! Encoded patient records.

pub mod feature_value;
pub mod patient_record;

pub use feature_value::FeatureValue;
pub use patient_record::PatientRecord;
