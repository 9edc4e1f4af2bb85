//! Command line argument parsing using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::encoder::RawSelections;
use crate::error::{PredictorError, Result};

/// Obesity level prediction from patient questionnaires
#[derive(Parser, Debug, Clone)]
#[command(name = "obesity-predictor")]
#[command(about = "Encode patient questionnaires and predict their obesity level")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct PredictorArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Configuration file (JSON)
    #[arg(
        short,
        long,
        value_name = "CONFIG_FILE",
        env = "OBESITY_PREDICTOR_CONFIG",
        global = true
    )]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl PredictorArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1,
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Predict the obesity level of one or more patients
    Predict(PredictArgs),

    /// Show the encoded record without classifying it
    Encode(EncodeArgs),

    /// Print descriptive statistics of the historical dataset
    Explore(ExploreArgs),

    /// List every field, its domain and the accepted form labels
    Schema,

    /// Show the business context and the model conclusions
    About,
}

/// One submission given as command line flags.
#[derive(Args, Debug, Clone, Default)]
pub struct SelectionArgs {
    /// Gender ("Masculino", "Feminino", "Male", "Female")
    #[arg(long)]
    pub gender: Option<String>,

    /// Age in years
    #[arg(long)]
    pub age: Option<i64>,

    /// Height in meters
    #[arg(long)]
    pub height: Option<f64>,

    /// Weight in kilograms
    #[arg(long)]
    pub weight: Option<f64>,

    /// Family history of overweight ("sim", "não")
    #[arg(long)]
    pub family_history: Option<String>,

    /// Frequent consumption of high-calorie food
    #[arg(long)]
    pub favc: Option<String>,

    /// Vegetable consumption, e.g. "Moderado (2 vezes/dia)"
    #[arg(long)]
    pub fcvc: Option<String>,

    /// Number of main meals, e.g. "Moderado (2-3 refeições)"
    #[arg(long)]
    pub ncp: Option<String>,

    /// Daily water intake, e.g. "Moderado (1,0 L/dia)"
    #[arg(long)]
    pub ch2o: Option<String>,

    /// Physical activity frequency, e.g. "Moderado (2x/semana)"
    #[arg(long)]
    pub faf: Option<String>,

    /// Time using technology devices, e.g. "Moderado (1-2h/dia)"
    #[arg(long)]
    pub tue: Option<String>,

    /// Alcohol consumption ("não", "Às vezes", "Frequentemente", "Sempre")
    #[arg(long)]
    pub calc: Option<String>,

    /// Eating between meals ("não", "Às vezes", "Frequentemente", "Sempre")
    #[arg(long)]
    pub caec: Option<String>,

    /// Smoker ("sim", "não")
    #[arg(long)]
    pub smoke: Option<String>,

    /// Monitors calorie intake ("sim", "não")
    #[arg(long)]
    pub scc: Option<String>,

    /// Usual transportation, e.g. "Transporte Público"
    #[arg(long)]
    pub mtrans: Option<String>,
}

impl SelectionArgs {
    /// Whether no selection flag was given.
    pub fn is_empty(&self) -> bool {
        self.missing().len() == 16
    }

    /// Flags that were not given.
    pub fn missing(&self) -> Vec<&'static str> {
        let present = [
            ("--gender", self.gender.is_some()),
            ("--age", self.age.is_some()),
            ("--height", self.height.is_some()),
            ("--weight", self.weight.is_some()),
            ("--family-history", self.family_history.is_some()),
            ("--favc", self.favc.is_some()),
            ("--fcvc", self.fcvc.is_some()),
            ("--ncp", self.ncp.is_some()),
            ("--ch2o", self.ch2o.is_some()),
            ("--faf", self.faf.is_some()),
            ("--tue", self.tue.is_some()),
            ("--calc", self.calc.is_some()),
            ("--caec", self.caec.is_some()),
            ("--smoke", self.smoke.is_some()),
            ("--scc", self.scc.is_some()),
            ("--mtrans", self.mtrans.is_some()),
        ];
        present
            .into_iter()
            .filter(|(_, given)| !given)
            .map(|(flag, _)| flag)
            .collect()
    }

    /// Build the submission. Every flag is required.
    pub fn to_selections(&self) -> Result<RawSelections> {
        let missing = self.missing();
        if !missing.is_empty() {
            return Err(PredictorError::invalid_operation(format!(
                "missing selections: {}",
                missing.join(", ")
            )));
        }

        let text = |value: &Option<String>| value.clone().unwrap_or_default();
        Ok(RawSelections {
            gender: text(&self.gender),
            age: self.age.unwrap_or_default(),
            height: self.height.unwrap_or_default(),
            weight: self.weight.unwrap_or_default(),
            family_history: text(&self.family_history),
            favc: text(&self.favc),
            fcvc: text(&self.fcvc),
            ncp: text(&self.ncp),
            ch2o: text(&self.ch2o),
            faf: text(&self.faf),
            tue: text(&self.tue),
            calc: text(&self.calc),
            caec: text(&self.caec),
            smoke: text(&self.smoke),
            scc: text(&self.scc),
            mtrans: text(&self.mtrans),
        })
    }
}

/// Arguments for prediction
#[derive(Parser, Debug, Clone)]
pub struct PredictArgs {
    /// Submissions file: a JSON object, a JSON array or JSONL
    #[arg(short, long, value_name = "INPUT_FILE")]
    pub input: Option<PathBuf>,

    /// Trained model file (JSON); the BMI rule is used without one
    #[arg(short, long, value_name = "MODEL_FILE", env = "OBESITY_PREDICTOR_MODEL")]
    pub model: Option<PathBuf>,

    #[command(flatten)]
    pub selections: SelectionArgs,
}

/// Arguments for encoding
#[derive(Parser, Debug, Clone)]
pub struct EncodeArgs {
    /// Submissions file: a JSON object, a JSON array or JSONL
    #[arg(short, long, value_name = "INPUT_FILE")]
    pub input: Option<PathBuf>,

    #[command(flatten)]
    pub selections: SelectionArgs,
}

/// Arguments for the exploratory report
#[derive(Parser, Debug, Clone)]
pub struct ExploreArgs {
    /// Historical dataset (CSV)
    #[arg(short, long, value_name = "DATASET_FILE", env = "OBESITY_PREDICTOR_DATASET")]
    pub dataset: Option<PathBuf>,
}

/// Output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
