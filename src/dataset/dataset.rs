//! Historical patient records loaded from CSV.
//!
//! The file has a header row with the sixteen feature columns plus the
//! class label column:
//! ```csv
//! Gender,Age,Height,Weight,family_history,FAVC,FCVC,NCP,CH2O,FAF,TUE,CALC,CAEC,SMOKE,SCC,MTRANS,Obesity
//! Female,21,1.62,64,yes,no,2,3,2,0,1,no,Sometimes,no,no,Public_Transportation,Normal_Weight
//! ```
//!
//! Ordinal columns may hold fractional values (the public dataset contains
//! synthetic rows), so they are read as floats. The rows are only used for
//! descriptive statistics and never reach a classifier.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use log::info;
use serde::{Deserialize, Serialize};

use crate::error::{PredictorError, Result};
use crate::schema::Feature;

/// One row of the historical dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetRow {
    #[serde(rename = "Gender")]
    pub gender: String,
    #[serde(rename = "Age")]
    pub age: f64,
    #[serde(rename = "Height")]
    pub height: f64,
    #[serde(rename = "Weight")]
    pub weight: f64,
    pub family_history: String,
    #[serde(rename = "FAVC")]
    pub favc: String,
    #[serde(rename = "FCVC")]
    pub fcvc: f64,
    #[serde(rename = "NCP")]
    pub ncp: f64,
    #[serde(rename = "CH2O")]
    pub ch2o: f64,
    #[serde(rename = "FAF")]
    pub faf: f64,
    #[serde(rename = "TUE")]
    pub tue: f64,
    #[serde(rename = "CALC")]
    pub calc: String,
    #[serde(rename = "CAEC")]
    pub caec: String,
    #[serde(rename = "SMOKE")]
    pub smoke: String,
    #[serde(rename = "SCC")]
    pub scc: String,
    #[serde(rename = "MTRANS")]
    pub mtrans: String,
    /// Obesity level label.
    #[serde(rename = "Obesity", alias = "NObeyesdad")]
    pub obesity: String,
}

impl DatasetRow {
    /// Value of a numeric column.
    pub fn numeric(&self, feature: Feature) -> Option<f64> {
        match feature {
            Feature::Age => Some(self.age),
            Feature::Height => Some(self.height),
            Feature::Weight => Some(self.weight),
            Feature::Fcvc => Some(self.fcvc),
            Feature::Ncp => Some(self.ncp),
            Feature::Ch2o => Some(self.ch2o),
            Feature::Faf => Some(self.faf),
            Feature::Tue => Some(self.tue),
            _ => None,
        }
    }
}

/// The loaded dataset. Read-only after loading.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    rows: Vec<DatasetRow>,
}

impl Dataset {
    /// Create a dataset from rows.
    pub fn new(rows: Vec<DatasetRow>) -> Self {
        Dataset { rows }
    }

    /// Load a dataset from a CSV file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            PredictorError::dataset(format!("cannot open '{}': {e}", path.display()))
        })?;
        let dataset = Self::from_reader(file)?;
        info!(
            "Loaded {} rows from {}",
            dataset.rows.len(),
            path.display()
        );
        Ok(dataset)
    }

    /// Load a dataset from any CSV source.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut rows = Vec::new();
        for (line, result) in reader.deserialize::<DatasetRow>().enumerate() {
            let row = result.map_err(|e| {
                // Line 1 is the header.
                PredictorError::dataset(format!("row {}: {e}", line + 2))
            })?;
            rows.push(row);
        }

        Ok(Dataset { rows })
    }

    /// All rows in file order.
    pub fn rows(&self) -> &[DatasetRow] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
