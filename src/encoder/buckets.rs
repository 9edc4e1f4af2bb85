//! Bucket tables for ordinal features.
//!
//! FCVC, NCP, CH2O, FAF and TUE are shown on the form as a handful of
//! descriptive buckets ("Pouco", "Moderado", "Muito"). Each bucket maps to a
//! fixed integer by direct lookup. The integer contract belongs to the
//! trained model, so the mapping lives in an explicit table rather than
//! being derived from the label wording.

use ahash::AHashMap;
use lazy_static::lazy_static;

use crate::error::{PredictorError, Result};
use crate::record::FeatureValue;
use crate::schema::{Feature, FieldDomain, Schema};

const FCVC_BUCKETS: &[(&str, i64)] = &[
    ("Pouco (1 vez/dia)", 1),
    ("Moderado (2 vezes/dia)", 2),
    ("Muito (3 vezes/dia)", 3),
];

const NCP_BUCKETS: &[(&str, i64)] = &[
    ("Pouco (1 refeição)", 1),
    ("Moderado (2-3 refeições)", 2),
    ("Muito (4 refeições)", 3),
];

const CH2O_BUCKETS: &[(&str, i64)] = &[
    ("Pouco (0,5 L/dia)", 1),
    ("Moderado (1,0 L/dia)", 2),
    ("Muito (1,5 L/dia)", 3),
];

const FAF_BUCKETS: &[(&str, i64)] = &[
    ("Pouco (0-1x/semana)", 0),
    ("Moderado (2x/semana)", 1),
    ("Muito (3x+/semana)", 2),
];

const TUE_BUCKETS: &[(&str, i64)] = &[
    ("Pouco (0-1h/dia)", 0),
    ("Moderado (1-2h/dia)", 1),
    ("Muito (3h+/dia)", 2),
];

lazy_static! {
    static ref DEFAULT_BUCKET_TABLES: AHashMap<Feature, BucketTable> = {
        let mut tables = AHashMap::new();
        for feature in Feature::BUCKETED {
            let buckets = match feature {
                Feature::Fcvc => FCVC_BUCKETS,
                Feature::Ncp => NCP_BUCKETS,
                Feature::Ch2o => CH2O_BUCKETS,
                Feature::Faf => FAF_BUCKETS,
                _ => TUE_BUCKETS,
            };
            let table = BucketTable::from_pairs(feature, buckets.iter().copied())
                .unwrap_or_else(|e| panic!("default bucket table for {feature} is invalid: {e}"));
            tables.insert(feature, table);
        }
        tables
    };
}

/// Maps the bucket labels of one ordinal feature to integers.
#[derive(Debug, Clone, PartialEq)]
pub struct BucketTable {
    feature: Feature,
    /// Buckets in the order a form should offer them.
    entries: Vec<(String, i64)>,
    lookup: AHashMap<String, i64>,
}

impl BucketTable {
    /// Create an empty table for an ordinal feature.
    pub fn new(feature: Feature) -> Result<Self> {
        if !matches!(
            Schema::standard().domain(feature),
            FieldDomain::Ordinal { .. }
        ) {
            return Err(PredictorError::config(format!(
                "'{feature}' is not an ordinal feature"
            )));
        }
        Ok(BucketTable {
            feature,
            entries: Vec::new(),
            lookup: AHashMap::new(),
        })
    }

    /// Build a table from `(label, value)` pairs.
    pub fn from_pairs<L, I>(feature: Feature, pairs: I) -> Result<Self>
    where
        L: Into<String>,
        I: IntoIterator<Item = (L, i64)>,
    {
        let mut table = BucketTable::new(feature)?;
        for (label, value) in pairs {
            table.add(label, value)?;
        }
        if table.entries.is_empty() {
            return Err(PredictorError::config(format!(
                "bucket table for '{feature}' is empty"
            )));
        }
        Ok(table)
    }

    /// The default (Brazilian Portuguese) table of a feature.
    pub fn default_for(feature: Feature) -> Result<Self> {
        DEFAULT_BUCKET_TABLES
            .get(&feature)
            .cloned()
            .ok_or_else(|| PredictorError::config(format!("'{feature}' has no bucket table")))
    }

    /// Add a bucket. The value must lie in the feature's ordinal domain.
    pub fn add<L: Into<String>>(&mut self, label: L, value: i64) -> Result<()> {
        let label = label.into();
        let domain = Schema::standard().domain(self.feature);
        if !domain.contains(&FeatureValue::Integer(value)) {
            return Err(PredictorError::config(format!(
                "bucket '{label}' maps '{}' to {value}, outside {}",
                self.feature,
                domain.describe()
            )));
        }

        let key = label.trim().to_string();
        if key.is_empty() {
            return Err(PredictorError::config(format!(
                "empty bucket label for '{}'",
                self.feature
            )));
        }
        if self.lookup.contains_key(&key) {
            return Err(PredictorError::config(format!(
                "duplicate bucket '{key}' for '{}'",
                self.feature
            )));
        }

        self.lookup.insert(key, value);
        self.entries.push((label, value));
        Ok(())
    }

    /// The feature this table belongs to.
    pub fn feature(&self) -> Feature {
        self.feature
    }

    /// Look up the ordinal value of a bucket label.
    pub fn lookup(&self, raw: &str) -> Result<i64> {
        self.lookup
            .get(raw.trim())
            .copied()
            .ok_or_else(|| PredictorError::unmapped(self.feature.name(), raw))
    }

    /// Bucket labels in form order.
    pub fn labels(&self) -> Vec<&str> {
        self.entries.iter().map(|(label, _)| label.as_str()).collect()
    }

    /// `(label, value)` pairs in form order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, i64)> {
        self.entries.iter().map(|(label, value)| (label.as_str(), *value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tables() {
        let expected: [(Feature, &[(&str, i64)]); 5] = [
            (Feature::Fcvc, FCVC_BUCKETS),
            (Feature::Ncp, NCP_BUCKETS),
            (Feature::Ch2o, CH2O_BUCKETS),
            (Feature::Faf, FAF_BUCKETS),
            (Feature::Tue, TUE_BUCKETS),
        ];
        for (feature, buckets) in expected {
            let table = BucketTable::default_for(feature).unwrap();
            for (label, value) in buckets {
                assert_eq!(table.lookup(label).unwrap(), *value, "{feature} {label}");
            }
            assert_eq!(table.labels().len(), buckets.len());
        }
    }

    #[test]
    fn test_reference_buckets() {
        let fcvc = BucketTable::default_for(Feature::Fcvc).unwrap();
        assert_eq!(fcvc.lookup("Pouco (1 vez/dia)").unwrap(), 1);

        let faf = BucketTable::default_for(Feature::Faf).unwrap();
        assert_eq!(faf.lookup("Pouco (0-1x/semana)").unwrap(), 0);
        assert_eq!(faf.lookup("Muito (3x+/semana)").unwrap(), 2);

        let ch2o = BucketTable::default_for(Feature::Ch2o).unwrap();
        assert_eq!(ch2o.lookup("Moderado (1,0 L/dia)").unwrap(), 2);
    }

    #[test]
    fn test_unknown_bucket_names_field() {
        for feature in Feature::BUCKETED {
            let table = BucketTable::default_for(feature).unwrap();
            let err = table.lookup("Extremo").unwrap_err();
            assert!(err.is_recoverable());
            assert_eq!(err.field(), Some(feature.name()));
        }
    }

    #[test]
    fn test_label_text_is_not_interpreted() {
        let table = BucketTable::default_for(Feature::Fcvc).unwrap();
        assert!(table.lookup("2").is_err());
        assert!(table.lookup("Moderado").is_err());
    }

    #[test]
    fn test_custom_table_validation() {
        let table = BucketTable::from_pairs(
            Feature::Faf,
            [("Nunca", 0), ("1-2x", 1), ("3-4x", 2), ("5x+", 3)],
        )
        .unwrap();
        assert_eq!(table.lookup("5x+").unwrap(), 3);

        assert!(BucketTable::from_pairs(Feature::Tue, [("Muito", 3)]).is_err());
        assert!(BucketTable::from_pairs(Feature::Fcvc, [("Pouco", 1), ("Pouco", 2)]).is_err());
        assert!(BucketTable::from_pairs(Feature::Fcvc, Vec::<(String, i64)>::new()).is_err());
        assert!(BucketTable::new(Feature::Age).is_err());
    }
}
