//! Encoded feature values.
//!
//! A [`FeatureValue`] is what the classifier actually sees for one column:
//! a canonical token for categorical features, an integer for ordinal
//! features and Age, or a float for Height and Weight.
//!
//! ```
//! use obesity_predictor::record::FeatureValue;
//!
//! let gender = FeatureValue::from("Female");
//! assert_eq!(gender.as_text(), Some("Female"));
//!
//! let fcvc = FeatureValue::Integer(2);
//! assert_eq!(fcvc.as_f64(), Some(2.0));
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Represents the encoded value of one feature.
///
/// Serializes untagged, so a record renders as plain JSON scalars:
/// `"Female"`, `30`, `1.7`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureValue {
    /// Canonical categorical token
    Text(String),
    /// Integer value (Age and ordinal features)
    Integer(i64),
    /// Floating point value (Height and Weight)
    Float(f64),
}

impl FeatureValue {
    /// Get the token if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FeatureValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get the integer if this is an integer value.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FeatureValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Get a numeric value as f64.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FeatureValue::Integer(i) => Some(*i as f64),
            FeatureValue::Float(f) => Some(*f),
            FeatureValue::Text(_) => None,
        }
    }

    /// Name of the value type, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            FeatureValue::Text(_) => "text",
            FeatureValue::Integer(_) => "integer",
            FeatureValue::Float(_) => "float",
        }
    }
}

impl fmt::Display for FeatureValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureValue::Text(s) => write!(f, "'{s}'"),
            FeatureValue::Integer(i) => write!(f, "{i}"),
            FeatureValue::Float(v) => write!(f, "{v}"),
        }
    }
}

impl From<&str> for FeatureValue {
    fn from(s: &str) -> Self {
        FeatureValue::Text(s.to_string())
    }
}

impl From<String> for FeatureValue {
    fn from(s: String) -> Self {
        FeatureValue::Text(s)
    }
}

impl From<i64> for FeatureValue {
    fn from(i: i64) -> Self {
        FeatureValue::Integer(i)
    }
}

impl From<f64> for FeatureValue {
    fn from(f: f64) -> Self {
        FeatureValue::Float(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let text = FeatureValue::from("Walking");
        assert_eq!(text.as_text(), Some("Walking"));
        assert_eq!(text.as_f64(), None);
        assert_eq!(text.type_name(), "text");

        let int = FeatureValue::from(3_i64);
        assert_eq!(int.as_integer(), Some(3));
        assert_eq!(int.as_f64(), Some(3.0));

        let float = FeatureValue::from(1.7_f64);
        assert_eq!(float.as_integer(), None);
        assert_eq!(float.as_f64(), Some(1.7));
    }

    #[test]
    fn test_untagged_serialization() {
        assert_eq!(
            serde_json::to_string(&FeatureValue::from("yes")).unwrap(),
            "\"yes\""
        );
        assert_eq!(
            serde_json::to_string(&FeatureValue::Integer(2)).unwrap(),
            "2"
        );
        assert_eq!(
            serde_json::to_string(&FeatureValue::Float(70.0)).unwrap(),
            "70.0"
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(FeatureValue::from("no").to_string(), "'no'");
        assert_eq!(FeatureValue::Integer(30).to_string(), "30");
        assert_eq!(FeatureValue::Float(1.75).to_string(), "1.75");
    }
}
