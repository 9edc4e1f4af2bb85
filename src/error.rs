//! Error types for the obesity predictor.
//!
//! Every fallible operation in this crate returns [`PredictorError`]. The
//! variants split into two groups:
//!
//! - **Recoverable input errors** ([`PredictorError::UnmappedCategory`] and
//!   [`PredictorError::ValueOutOfRange`]): the submission is rejected and the
//!   user is asked to correct the named field.
//! - **Everything else**: configuration, loading or programmer errors such as
//!   [`PredictorError::SchemaMismatch`], which never go away by resubmitting.
//!
//! # Examples
//!
//! ```
//! use obesity_predictor::error::{PredictorError, Result};
//!
//! fn lookup(label: &str) -> Result<i64> {
//!     Err(PredictorError::unmapped("FCVC", label))
//! }
//!
//! let err = lookup("Extremo").unwrap_err();
//! assert!(err.is_recoverable());
//! assert_eq!(err.field(), Some("FCVC"));
//! ```

use std::io;

use thiserror::Error;

/// The main error type for encoding and prediction.
#[derive(Error, Debug)]
pub enum PredictorError {
    /// A raw label has no mapping to a canonical token or ordinal value.
    #[error("Unmapped category for field '{field}': '{value}'")]
    UnmappedCategory { field: String, value: String },

    /// A numeric input lies outside the field's declared range.
    #[error("Value out of range for field '{field}': {value}")]
    ValueOutOfRange { field: String, value: String },

    /// An input error annotated with the values the field accepts.
    #[error("{source}\n{hint}")]
    Hinted {
        source: Box<PredictorError>,
        hint: String,
    },

    /// A record does not conform to the feature schema.
    #[error("Schema mismatch: {0}")]
    SchemaMismatch(String),

    /// Model loading or inference errors
    #[error("Model error: {0}")]
    Model(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Dataset errors
    #[error("Dataset error: {0}")]
    Dataset(String),

    /// Invalid operation
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV parsing errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Generic anyhow error, rendered with its context chain
    #[error("{0:#}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with PredictorError.
pub type Result<T> = std::result::Result<T, PredictorError>;

impl PredictorError {
    /// Create a new unmapped category error.
    pub fn unmapped<F: Into<String>, V: Into<String>>(field: F, value: V) -> Self {
        PredictorError::UnmappedCategory {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Create a new out-of-range error.
    pub fn out_of_range<F: Into<String>, V: ToString>(field: F, value: V) -> Self {
        PredictorError::ValueOutOfRange {
            field: field.into(),
            value: value.to_string(),
        }
    }

    /// Create a new schema mismatch error.
    pub fn schema<S: Into<String>>(msg: S) -> Self {
        PredictorError::SchemaMismatch(msg.into())
    }

    /// Create a new model error.
    pub fn model<S: Into<String>>(msg: S) -> Self {
        PredictorError::Model(msg.into())
    }

    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        PredictorError::Config(msg.into())
    }

    /// Create a new dataset error.
    pub fn dataset<S: Into<String>>(msg: S) -> Self {
        PredictorError::Dataset(msg.into())
    }

    /// Create a new invalid operation error.
    pub fn invalid_operation<S: Into<String>>(msg: S) -> Self {
        PredictorError::InvalidOperation(msg.into())
    }

    /// Attach a hint to an input error, keeping its kind and field.
    ///
    /// Errors that are not recoverable are returned unchanged.
    pub fn with_hint<S: Into<String>>(self, hint: S) -> Self {
        if !self.is_recoverable() {
            return self;
        }
        match self {
            PredictorError::Hinted { source, .. } => PredictorError::Hinted {
                source,
                hint: hint.into(),
            },
            other => PredictorError::Hinted {
                source: Box::new(other),
                hint: hint.into(),
            },
        }
    }

    /// Whether the user can fix this error by changing the submitted input.
    pub fn is_recoverable(&self) -> bool {
        match self {
            PredictorError::UnmappedCategory { .. } | PredictorError::ValueOutOfRange { .. } => {
                true
            }
            PredictorError::Hinted { source, .. } => source.is_recoverable(),
            _ => false,
        }
    }

    /// The field an input error refers to.
    pub fn field(&self) -> Option<&str> {
        match self {
            PredictorError::UnmappedCategory { field, .. }
            | PredictorError::ValueOutOfRange { field, .. } => Some(field),
            PredictorError::Hinted { source, .. } => source.field(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = PredictorError::unmapped("FCVC", "Extremo");
        assert_eq!(
            error.to_string(),
            "Unmapped category for field 'FCVC': 'Extremo'"
        );

        let error = PredictorError::out_of_range("Age", 95);
        assert_eq!(error.to_string(), "Value out of range for field 'Age': 95");

        let error = PredictorError::schema("missing field 'SMOKE'");
        assert_eq!(error.to_string(), "Schema mismatch: missing field 'SMOKE'");
    }

    #[test]
    fn test_recoverability() {
        assert!(PredictorError::unmapped("MTRANS", "Avião").is_recoverable());
        assert!(PredictorError::out_of_range("Height", 2.5).is_recoverable());
        assert!(!PredictorError::schema("bad").is_recoverable());
        assert!(!PredictorError::model("bad").is_recoverable());
    }

    #[test]
    fn test_field_accessor() {
        assert_eq!(
            PredictorError::unmapped("CALC", "talvez").field(),
            Some("CALC")
        );
        assert_eq!(PredictorError::config("x").field(), None);
    }

    #[test]
    fn test_hint_keeps_kind() {
        let error =
            PredictorError::out_of_range("Age", 5).with_hint("Accepted range for Age: [10, 80]");
        assert!(error.is_recoverable());
        assert_eq!(error.field(), Some("Age"));
        assert_eq!(
            error.to_string(),
            "Value out of range for field 'Age': 5\nAccepted range for Age: [10, 80]"
        );

        let error = error.with_hint("Age must be a whole number");
        assert!(error.to_string().ends_with(": 5\nAge must be a whole number"));

        let error = PredictorError::model("bad").with_hint("ignored");
        assert!(matches!(error, PredictorError::Model(_)));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = PredictorError::from(io_error);

        match error {
            PredictorError::Io(_) => {} // Expected
            _ => panic!("Expected IO error variant"),
        }
    }
}
