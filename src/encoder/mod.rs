//! Feature encoding.
//!
//! The encoder maps what a user picks on the patient form onto the exact
//! record the classifier was fit on:
//!
//! - [`BucketTable`]: bucket label → ordinal integer (FCVC, NCP, CH2O, FAF, TUE)
//! - [`LabelTable`]: localized label → canonical token (Gender, CALC, MTRANS, ...)
//! - [`FeatureEncoder`]: applies both plus range checks to a [`RawSelections`]
//!
//! # Example
//!
//! ```
//! use obesity_predictor::encoder::{FeatureEncoder, RawSelections};
//! use obesity_predictor::schema::Feature;
//!
//! let encoder = FeatureEncoder::new();
//! let raw = RawSelections {
//!     gender: "Masculino".to_string(),
//!     age: 25,
//!     height: 1.80,
//!     weight: 82.5,
//!     family_history: "sim".to_string(),
//!     favc: "sim".to_string(),
//!     fcvc: "Muito (3 vezes/dia)".to_string(),
//!     ncp: "Moderado (2-3 refeições)".to_string(),
//!     ch2o: "Pouco (0,5 L/dia)".to_string(),
//!     faf: "Moderado (2x/semana)".to_string(),
//!     tue: "Muito (3h+/dia)".to_string(),
//!     calc: "Às vezes".to_string(),
//!     caec: "Frequentemente".to_string(),
//!     smoke: "não".to_string(),
//!     scc: "não".to_string(),
//!     mtrans: "Automóvel".to_string(),
//! };
//!
//! let record = encoder.encode(&raw).unwrap();
//! assert_eq!(record.text(Feature::Gender), Some("Male"));
//! assert_eq!(record.number(Feature::Fcvc), Some(3.0));
//! ```

pub mod buckets;
pub mod config;
#[allow(clippy::module_inception)]
pub mod encoder;
pub mod labels;
pub mod raw;

pub use buckets::BucketTable;
pub use config::{BucketEntry, EncoderConfig, LabelEntry};
pub use encoder::FeatureEncoder;
pub use labels::LabelTable;
pub use raw::RawSelections;
