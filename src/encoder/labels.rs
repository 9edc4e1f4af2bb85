//! Localization tables for categorical features.
//!
//! A form may show "sim"/"não" or "yes"/"no" depending on the deployment;
//! the classifier only knows the canonical tokens. A [`LabelTable`] maps
//! every label a form can show to the token it stands for. The canonical
//! tokens themselves are always accepted.

use ahash::AHashMap;
use lazy_static::lazy_static;

use crate::error::{PredictorError, Result};
use crate::schema::{Feature, Schema};

const GENDER_LABELS: &[(&str, &str)] = &[("Masculino", "Male"), ("Feminino", "Female")];

const YES_NO_LABELS: &[(&str, &str)] = &[("sim", "yes"), ("não", "no")];

const FREQUENCY_LABELS: &[(&str, &str)] = &[
    ("não", "no"),
    ("Às vezes", "Sometimes"),
    ("Frequentemente", "Frequently"),
    ("Sempre", "Always"),
];

const TRANSPORT_LABELS: &[(&str, &str)] = &[
    ("Transporte Público", "Public_Transportation"),
    ("Caminhada", "Walking"),
    ("Automóvel", "Automobile"),
    ("Moto", "Motorbike"),
    ("Bicicleta", "Bike"),
];

lazy_static! {
    static ref DEFAULT_LABEL_TABLES: AHashMap<Feature, LabelTable> = {
        let mut tables = AHashMap::new();
        for feature in Feature::LABELED {
            let pairs = match feature {
                Feature::Gender => GENDER_LABELS,
                Feature::Calc | Feature::Caec => FREQUENCY_LABELS,
                Feature::Mtrans => TRANSPORT_LABELS,
                _ => YES_NO_LABELS,
            };
            let table = LabelTable::from_pairs(feature, pairs.iter().copied())
                .unwrap_or_else(|e| panic!("default label table for {feature} is invalid: {e}"));
            tables.insert(feature, table);
        }
        tables
    };
}

/// Maps localized labels of one categorical feature to canonical tokens.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelTable {
    feature: Feature,
    /// Labels in the order a form should offer them.
    entries: Vec<(String, &'static str)>,
    lookup: AHashMap<String, &'static str>,
}

impl LabelTable {
    /// Create an empty table. Canonical tokens are still accepted.
    pub fn new(feature: Feature) -> Result<Self> {
        if !Schema::standard().domain(feature).is_categorical() {
            return Err(PredictorError::config(format!(
                "'{feature}' is not a categorical feature"
            )));
        }
        Ok(LabelTable {
            feature,
            entries: Vec::new(),
            lookup: AHashMap::new(),
        })
    }

    /// Build a table from `(label, token)` pairs.
    pub fn from_pairs<L, T, I>(feature: Feature, pairs: I) -> Result<Self>
    where
        L: Into<String>,
        T: AsRef<str>,
        I: IntoIterator<Item = (L, T)>,
    {
        let mut table = LabelTable::new(feature)?;
        for (label, token) in pairs {
            table.add(label, token.as_ref())?;
        }
        Ok(table)
    }

    /// The default (Brazilian Portuguese) table of a feature.
    pub fn default_for(feature: Feature) -> Result<Self> {
        DEFAULT_LABEL_TABLES
            .get(&feature)
            .cloned()
            .ok_or_else(|| PredictorError::config(format!("'{feature}' has no label table")))
    }

    /// Add a label for a canonical token.
    pub fn add<L: Into<String>>(&mut self, label: L, token: &str) -> Result<()> {
        let label = label.into();
        let canonical = Schema::standard()
            .domain(self.feature)
            .tokens()
            .iter()
            .copied()
            .find(|t| *t == token)
            .ok_or_else(|| {
                PredictorError::config(format!(
                    "'{token}' is not a valid token for '{}'",
                    self.feature
                ))
            })?;

        let key = label.trim().to_string();
        if key.is_empty() {
            return Err(PredictorError::config(format!(
                "empty label for '{}'",
                self.feature
            )));
        }
        if self.lookup.contains_key(&key) {
            return Err(PredictorError::config(format!(
                "duplicate label '{key}' for '{}'",
                self.feature
            )));
        }

        self.lookup.insert(key, canonical);
        self.entries.push((label, canonical));
        Ok(())
    }

    /// The feature this table belongs to.
    pub fn feature(&self) -> Feature {
        self.feature
    }

    /// Normalize a raw label to its canonical token.
    ///
    /// Surrounding whitespace is ignored; matching is otherwise exact.
    pub fn normalize(&self, raw: &str) -> Result<&'static str> {
        let key = raw.trim();
        if let Some(token) = self.lookup.get(key) {
            return Ok(*token);
        }
        Schema::standard()
            .domain(self.feature)
            .tokens()
            .iter()
            .copied()
            .find(|t| *t == key)
            .ok_or_else(|| PredictorError::unmapped(self.feature.name(), raw))
    }

    /// Labels to offer on a form, falling back to the canonical tokens when
    /// the table is empty.
    pub fn labels(&self) -> Vec<&str> {
        if self.entries.is_empty() {
            Schema::standard().domain(self.feature).tokens().to_vec()
        } else {
            self.entries.iter().map(|(label, _)| label.as_str()).collect()
        }
    }

    /// `(label, token)` pairs in form order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &'static str)> {
        self.entries.iter().map(|(label, token)| (label.as_str(), *token))
    }
}
