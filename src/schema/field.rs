//! Field domains for schema definition.

use serde::Serialize;

use crate::record::FeatureValue;
use crate::schema::feature::Feature;

/// Canonical tokens for yes/no features.
pub const YES_NO: &[&str] = &["yes", "no"];

/// Canonical tokens for Gender.
pub const GENDERS: &[&str] = &["Male", "Female"];

/// Canonical tokens for CALC and CAEC.
pub const FREQUENCIES: &[&str] = &["no", "Sometimes", "Frequently", "Always"];

/// Canonical tokens for MTRANS.
pub const TRANSPORT_MODES: &[&str] = &[
    "Public_Transportation",
    "Walking",
    "Automobile",
    "Motorbike",
    "Bike",
];

/// The set of values a feature may take.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldDomain {
    /// A closed set of canonical string tokens.
    Categorical { tokens: &'static [&'static str] },
    /// A closed set of ordinal integers.
    Ordinal { values: &'static [i64] },
    /// An inclusive integer range.
    IntegerRange { min: i64, max: i64 },
    /// An inclusive float range.
    FloatRange { min: f64, max: f64 },
}

impl FieldDomain {
    /// Check whether a value belongs to this domain.
    ///
    /// The value type must match as well: an integer never satisfies a
    /// categorical domain and a float never satisfies an ordinal one.
    pub fn contains(&self, value: &FeatureValue) -> bool {
        match (self, value) {
            (FieldDomain::Categorical { tokens }, FeatureValue::Text(text)) => {
                tokens.contains(&text.as_str())
            }
            (FieldDomain::Ordinal { values }, FeatureValue::Integer(v)) => values.contains(v),
            (FieldDomain::IntegerRange { min, max }, FeatureValue::Integer(v)) => {
                min <= v && v <= max
            }
            (FieldDomain::FloatRange { min, max }, FeatureValue::Float(v)) => {
                // NaN fails both comparisons.
                *min <= *v && *v <= *max
            }
            _ => false,
        }
    }

    /// Whether this domain holds string tokens.
    pub fn is_categorical(&self) -> bool {
        matches!(self, FieldDomain::Categorical { .. })
    }

    /// Whether values of this domain are numbers.
    pub fn is_numeric(&self) -> bool {
        !self.is_categorical()
    }

    /// Canonical tokens of a categorical domain.
    pub fn tokens(&self) -> &'static [&'static str] {
        match self {
            FieldDomain::Categorical { tokens } => tokens,
            _ => &[],
        }
    }

    /// Short human-readable form, e.g. `{1, 2, 3}` or `[10, 80]`.
    pub fn describe(&self) -> String {
        match self {
            FieldDomain::Categorical { tokens } => format!("{{{}}}", tokens.join(", ")),
            FieldDomain::Ordinal { values } => {
                let values: Vec<String> = values.iter().map(|v| v.to_string()).collect();
                format!("{{{}}}", values.join(", "))
            }
            FieldDomain::IntegerRange { min, max } => format!("[{min}, {max}]"),
            FieldDomain::FloatRange { min, max } => format!("[{min:.2}, {max:.2}]"),
        }
    }
}

/// Definition of a single feature in the schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDefinition {
    /// The feature this definition describes.
    feature: Feature,
    /// Allowed values.
    domain: FieldDomain,
    /// What the feature means.
    description: &'static str,
}

impl FieldDefinition {
    /// Create a new field definition.
    pub fn new(feature: Feature, domain: FieldDomain, description: &'static str) -> Self {
        FieldDefinition {
            feature,
            domain,
            description,
        }
    }

    /// Get the feature.
    pub fn feature(&self) -> Feature {
        self.feature
    }

    /// Get the column name.
    pub fn name(&self) -> &'static str {
        self.feature.name()
    }

    /// Get the domain.
    pub fn domain(&self) -> &FieldDomain {
        &self.domain
    }

    /// Get the description.
    pub fn description(&self) -> &'static str {
        self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categorical_domain() {
        let domain = FieldDomain::Categorical { tokens: YES_NO };
        assert!(domain.contains(&FeatureValue::Text("yes".to_string())));
        assert!(!domain.contains(&FeatureValue::Text("sim".to_string())));
        assert!(!domain.contains(&FeatureValue::Integer(1)));
        assert!(domain.is_categorical());
        assert_eq!(domain.tokens(), YES_NO);
    }

    #[test]
    fn test_ordinal_domain() {
        let domain = FieldDomain::Ordinal { values: &[0, 1, 2] };
        assert!(domain.contains(&FeatureValue::Integer(0)));
        assert!(!domain.contains(&FeatureValue::Integer(3)));
        assert!(!domain.contains(&FeatureValue::Float(1.0)));
        assert_eq!(domain.describe(), "{0, 1, 2}");
    }

    #[test]
    fn test_range_domains_are_inclusive() {
        let ages = FieldDomain::IntegerRange { min: 10, max: 80 };
        assert!(ages.contains(&FeatureValue::Integer(10)));
        assert!(ages.contains(&FeatureValue::Integer(80)));
        assert!(!ages.contains(&FeatureValue::Integer(81)));

        let heights = FieldDomain::FloatRange {
            min: 1.40,
            max: 2.10,
        };
        assert!(heights.contains(&FeatureValue::Float(1.40)));
        assert!(heights.contains(&FeatureValue::Float(2.10)));
        assert!(!heights.contains(&FeatureValue::Float(2.11)));
        assert!(!heights.contains(&FeatureValue::Float(f64::NAN)));
        assert_eq!(heights.describe(), "[1.40, 2.10]");
    }
}
