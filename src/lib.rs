//! # obesity-predictor
//!
//! Turns patient questionnaire answers into the feature record a trained
//! obesity-level classifier expects, and classifies it.
//!
//! ## Features
//!
//! - Exhaustive mapping of localized form labels to canonical tokens
//! - Ordinal bucket tables for the frequency questions
//! - Schema validation before any record reaches a classifier
//! - Linear and gradient-boosting models loaded from JSON, with a BMI fallback
//! - Parallel batch prediction
//! - Descriptive statistics of the historical dataset
//!
//! ## Example
//!
//! ```
//! use obesity_predictor::config::AppConfig;
//! use obesity_predictor::context::AppContext;
//! use obesity_predictor::encoder::RawSelections;
//!
//! let context = AppContext::from_config(&AppConfig::default()).unwrap();
//! let raw: RawSelections = serde_json::from_str(r#"{
//!     "Gender": "Feminino", "Age": 28, "Height": 1.63, "Weight": 58,
//!     "family_history": "não", "FAVC": "sim", "FCVC": "Moderado (2 vezes/dia)",
//!     "NCP": "Moderado (2-3 refeições)", "CH2O": "Moderado (1,0 L/dia)",
//!     "FAF": "Moderado (2x/semana)", "TUE": "Moderado (1-2h/dia)",
//!     "CALC": "Às vezes", "CAEC": "Às vezes", "SMOKE": "não", "SCC": "não",
//!     "MTRANS": "Transporte Público"
//! }"#).unwrap();
//!
//! let prediction = context.predict(&raw).unwrap();
//! assert_eq!(prediction.label, "Normal_Weight");
//! ```

pub mod classifier;
pub mod cli;
pub mod config;
pub mod context;
pub mod dataset;
pub mod encoder;
pub mod error;
pub mod record;
pub mod schema;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
