//! Command implementations for the CLI.

use std::fs;
use std::path::Path;

use log::{debug, info};
use serde_json::Value;

use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::dataset::Dataset;
use crate::encoder::{FeatureEncoder, RawSelections};
use crate::error::{PredictorError, Result};
use crate::schema::{Feature, Schema};

/// Submissions read from flags or an input file.
#[derive(Debug)]
pub enum Submissions {
    /// One submission from flags or a JSON object.
    Single(RawSelections),
    /// Many submissions from a JSON array or JSONL, each parsed on its own.
    Batch(Vec<Result<RawSelections>>),
}

/// Execute a CLI command.
pub fn execute_command(args: PredictorArgs) -> Result<()> {
    match &args.command {
        Command::Predict(predict_args) => predict(predict_args.clone(), &args),
        Command::Encode(encode_args) => encode(encode_args.clone(), &args),
        Command::Explore(explore_args) => explore(explore_args.clone(), &args),
        Command::Schema => show_schema(&args),
        Command::About => output_result("About", &AboutOutput::default(), &args),
    }
}

/// Load the configuration file named on the command line, if any.
fn load_config(cli_args: &PredictorArgs) -> Result<AppConfig> {
    match &cli_args.config {
        Some(path) => AppConfig::from_file(path),
        None => Ok(AppConfig::default()),
    }
}

/// Predict the obesity level of one or more submissions.
fn predict(args: PredictArgs, cli_args: &PredictorArgs) -> Result<()> {
    let mut config = load_config(cli_args)?;
    if let Some(model) = args.model {
        config = config.with_model_path(model);
    }
    // The report is not needed here.
    config.dataset_path = None;

    let context = AppContext::from_config(&config)?;
    let classifier = context.classifier().name().to_string();

    match read_submissions(args.input.as_deref(), &args.selections)? {
        Submissions::Single(raw) => {
            let prediction = context
                .predict(&raw)
                .map_err(|e| with_input_hint(e, context.encoder()))?;
            output_result(
                "Prediction",
                &PredictionOutput::new(&classifier, &prediction),
                cli_args,
            )
        }
        Submissions::Batch(batch) => {
            info!("Predicting {} submissions", batch.len());
            let entries = run_batch(batch, |valid| context.predict_batch(valid))
                .into_iter()
                .enumerate()
                .map(|(index, result)| match result {
                    Ok(prediction) => BatchEntry {
                        index,
                        result: Some(PredictionOutput::new(&classifier, &prediction)),
                        error: None,
                    },
                    Err(e) => BatchEntry {
                        index,
                        result: None,
                        error: Some(with_input_hint(e, context.encoder()).to_string()),
                    },
                })
                .collect();
            finish_batch("Batch prediction", BatchOutput::new(entries), cli_args)
        }
    }
}

/// Show the encoded record of one or more submissions.
fn encode(args: EncodeArgs, cli_args: &PredictorArgs) -> Result<()> {
    let config = load_config(cli_args)?;
    let encoder = FeatureEncoder::from_config(&config.encoder)?;

    match read_submissions(args.input.as_deref(), &args.selections)? {
        Submissions::Single(raw) => {
            let record = encoder
                .encode(&raw)
                .map_err(|e| with_input_hint(e, &encoder))?;
            output_result("Encoded record", &record, cli_args)
        }
        Submissions::Batch(batch) => {
            let entries = run_batch(batch, |valid| {
                valid.iter().map(|raw| encoder.encode(raw)).collect()
            })
            .into_iter()
            .enumerate()
            .map(|(index, result)| match result {
                Ok(record) => BatchEntry {
                    index,
                    result: Some(record),
                    error: None,
                },
                Err(e) => BatchEntry {
                    index,
                    result: None,
                    error: Some(with_input_hint(e, &encoder).to_string()),
                },
            })
            .collect();
            finish_batch("Encoded records", BatchOutput::new(entries), cli_args)
        }
    }
}

/// Print the exploratory report of the historical dataset.
fn explore(args: ExploreArgs, cli_args: &PredictorArgs) -> Result<()> {
    let config = load_config(cli_args)?;
    let path = args.dataset.or(config.dataset_path).ok_or_else(|| {
        PredictorError::config("no dataset given; use --dataset or OBESITY_PREDICTOR_DATASET")
    })?;

    let report = Dataset::load(&path)?.report()?;
    output_result("Exploratory report", &report, cli_args)
}

/// List every field with its domain and form labels.
fn show_schema(cli_args: &PredictorArgs) -> Result<()> {
    let config = load_config(cli_args)?;
    let encoder = FeatureEncoder::from_config(&config.encoder)?;

    let fields = Schema::standard()
        .fields()
        .iter()
        .map(|field| FieldSummary {
            name: field.name().to_string(),
            domain: field.domain().describe(),
            description: field.description().to_string(),
            options: encoder
                .options(field.feature())
                .into_iter()
                .map(String::from)
                .collect(),
        })
        .collect();

    output_result("Schema", &SchemaOutput { fields }, cli_args)
}

/// Run `process` over the entries that parsed and put every result back in
/// submission order, parse failures included.
fn run_batch<T, F>(batch: Vec<Result<RawSelections>>, process: F) -> Vec<Result<T>>
where
    F: FnOnce(&[RawSelections]) -> Vec<Result<T>>,
{
    let mut valid = Vec::with_capacity(batch.len());
    let mut failures = Vec::with_capacity(batch.len());
    for entry in batch {
        match entry {
            Ok(raw) => {
                valid.push(raw);
                failures.push(None);
            }
            Err(e) => failures.push(Some(e)),
        }
    }

    let mut processed = process(&valid).into_iter();
    failures
        .into_iter()
        .map(|failure| match failure {
            Some(e) => Err(e),
            None => processed.next().unwrap_or_else(|| {
                Err(PredictorError::invalid_operation("batch result missing"))
            }),
        })
        .collect()
}

/// Print a batch result and fail if any entry failed.
fn finish_batch<T>(message: &str, output: BatchOutput<T>, cli_args: &PredictorArgs) -> Result<()>
where
    T: serde::Serialize,
    BatchOutput<T>: HumanOutput,
{
    output_result(message, &output, cli_args)?;
    if output.failed > 0 {
        return Err(PredictorError::invalid_operation(format!(
            "{} of {} submissions failed",
            output.failed, output.total
        )));
    }
    Ok(())
}

/// Read submissions from `input`, or from the selection flags without one.
pub fn read_submissions(input: Option<&Path>, selections: &SelectionArgs) -> Result<Submissions> {
    match input {
        Some(path) => {
            if !selections.is_empty() {
                return Err(PredictorError::invalid_operation(
                    "--input cannot be combined with selection flags",
                ));
            }
            debug!("Reading submissions from {}", path.display());
            parse_submissions(&fs::read_to_string(path)?)
        }
        None => Ok(Submissions::Single(selections.to_selections()?)),
    }
}

/// Parse a JSON object, a JSON array or JSONL into submissions.
///
/// A malformed array element or JSONL line becomes a failed entry of the
/// batch instead of failing the whole input.
pub fn parse_submissions(content: &str) -> Result<Submissions> {
    match serde_json::from_str::<Value>(content) {
        Ok(Value::Array(items)) => {
            let batch = items
                .into_iter()
                .enumerate()
                .map(|(i, item)| {
                    serde_json::from_value(item).map_err(|e| {
                        PredictorError::invalid_operation(format!("submission {}: {e}", i + 1))
                    })
                })
                .collect();
            Ok(Submissions::Batch(batch))
        }
        Ok(value @ Value::Object(_)) => Ok(Submissions::Single(serde_json::from_value(value)?)),
        Ok(_) => Err(PredictorError::invalid_operation(
            "expected a JSON object, a JSON array or JSONL",
        )),
        Err(_) => {
            let batch = content
                .lines()
                .enumerate()
                .filter(|(_, line)| !line.trim().is_empty())
                .map(|(line_num, line)| {
                    serde_json::from_str(line).map_err(|e| {
                        PredictorError::invalid_operation(format!("line {}: {e}", line_num + 1))
                    })
                })
                .collect();
            Ok(Submissions::Batch(batch))
        }
    }
}

/// Attach the accepted values of the offending field to an input error.
///
/// The error keeps its kind and field. Other errors are returned unchanged.
pub fn with_input_hint(err: PredictorError, encoder: &FeatureEncoder) -> PredictorError {
    let Some(feature) = err.field().and_then(Feature::from_name) else {
        return err;
    };

    let options = encoder.options(feature);
    let hint = if options.is_empty() {
        format!(
            "Accepted range for {feature}: {}",
            Schema::standard().domain(feature).describe()
        )
    } else {
        let quoted: Vec<String> = options.iter().map(|o| format!("\"{o}\"")).collect();
        format!("Accepted options for {feature}: {}", quoted.join(", "))
    };

    err.with_hint(hint)
}
