//! Output formatting for CLI commands.

use std::fmt::Write;

use serde::Serialize;

use crate::classifier::{ClassProbability, Prediction};
use crate::cli::args::{OutputFormat, PredictorArgs};
use crate::dataset::ExploratoryReport;
use crate::error::Result;
use crate::record::PatientRecord;

/// Plain-text rendering of a command result.
pub trait HumanOutput {
    fn to_human(&self) -> String;
}

/// Result structure for a single prediction.
#[derive(Debug, Serialize)]
pub struct PredictionOutput {
    pub classifier: String,
    pub label: String,
    pub display_name: String,
    pub confidence: Option<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub probabilities: Vec<ClassProbability>,
}

impl PredictionOutput {
    pub fn new(classifier: &str, prediction: &Prediction) -> Self {
        PredictionOutput {
            classifier: classifier.to_string(),
            label: prediction.label.clone(),
            display_name: prediction.display_name().to_string(),
            confidence: prediction.confidence(),
            probabilities: prediction.probabilities.clone(),
        }
    }
}

/// One entry of a batch result. Exactly one of `result` and `error` is set.
#[derive(Debug, Serialize)]
pub struct BatchEntry<T> {
    pub index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Result structure for batch prediction or encoding.
#[derive(Debug, Serialize)]
pub struct BatchOutput<T> {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub entries: Vec<BatchEntry<T>>,
}

impl<T> BatchOutput<T> {
    pub fn new(entries: Vec<BatchEntry<T>>) -> Self {
        let failed = entries.iter().filter(|e| e.error.is_some()).count();
        BatchOutput {
            total: entries.len(),
            succeeded: entries.len() - failed,
            failed,
            entries,
        }
    }
}

/// One field of the schema listing.
#[derive(Debug, Serialize)]
pub struct FieldSummary {
    pub name: String,
    pub domain: String,
    pub description: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

/// Result structure for the schema listing.
#[derive(Debug, Serialize)]
pub struct SchemaOutput {
    pub fields: Vec<FieldSummary>,
}

/// Business context and model conclusions.
#[derive(Debug, Serialize)]
pub struct AboutOutput {
    pub title: String,
    pub context: Vec<String>,
    pub conclusions: Vec<String>,
}

impl Default for AboutOutput {
    fn default() -> Self {
        AboutOutput {
            title: "Sistema Preditivo de Obesidade".to_string(),
            context: [
                "A obesidade é uma condição multifatorial associada a diabetes, \
                 hipertensão e doenças cardiovasculares. Identificar cedo o nível \
                 de obesidade de um paciente permite à equipe médica recomendar \
                 intervenções antes que o quadro se agrave.",
                "O sistema classifica pacientes em sete níveis, de Peso Insuficiente \
                 a Obesidade Tipo III, a partir de dados demográficos, físicos e \
                 comportamentais coletados em um questionário.",
                "Os dados de referência vêm do conjunto Obesity.csv: idade, gênero, \
                 altura, peso, hábitos alimentares, atividade física, histórico \
                 familiar e meio de transporte.",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            conclusions: [
                "O modelo adotado é um Gradient Boosting Classifier, o de melhor \
                 desempenho na classificação multiclasse.",
                "A acurácia do modelo supera 75%.",
                "As variáveis mais relevantes são o peso, a atividade física (FAF), \
                 os hábitos alimentares (FAVC, FCVC, CAEC, CALC) e o histórico \
                 familiar.",
                "A ferramenta apoia a triagem clínica e não substitui o diagnóstico \
                 médico.",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        }
    }
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize + HumanOutput>(
    message: &str,
    result: &T,
    args: &PredictorArgs,
) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in human-readable format.
fn output_human<T: HumanOutput>(message: &str, result: &T, args: &PredictorArgs) -> Result<()> {
    if args.verbosity() > 1 {
        println!("{message}");
        println!();
    }
    print!("{}", result.to_human());
    Ok(())
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &PredictorArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

impl HumanOutput for PredictionOutput {
    fn to_human(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Predicted level: {} ({})", self.display_name, self.label);
        if let Some(confidence) = self.confidence {
            let _ = writeln!(out, "Confidence: {}", format_percent(confidence));
        }
        let _ = writeln!(out, "Classifier: {}", self.classifier);

        if !self.probabilities.is_empty() {
            let _ = writeln!(out);
            let _ = writeln!(out, "Class probabilities:");
            for p in &self.probabilities {
                let _ = writeln!(out, "  {:<22} {:>7}", p.label, format_percent(p.probability));
            }
        }
        out
    }
}

impl HumanOutput for PatientRecord {
    fn to_human(&self) -> String {
        let mut out = String::new();
        for (feature, value) in self.iter() {
            let value = serde_json::to_value(value).unwrap_or_default();
            let _ = writeln!(out, "{:<15} {}", feature.name(), format_value(&value));
        }
        out
    }
}

impl<T: HumanOutput> HumanOutput for BatchOutput<T> {
    fn to_human(&self) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            let _ = writeln!(out, "Submission {}:", entry.index + 1);
            let _ = writeln!(out, "─────────────");
            if let Some(result) = &entry.result {
                out.push_str(&result.to_human());
            }
            if let Some(error) = &entry.error {
                let _ = writeln!(out, "Error: {error}");
            }
            let _ = writeln!(out);
        }
        let _ = writeln!(
            out,
            "Total: {}, succeeded: {}, failed: {}",
            self.total, self.succeeded, self.failed
        );
        out
    }
}

impl HumanOutput for SchemaOutput {
    fn to_human(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Patient Record Fields:");
        let _ = writeln!(out, "══════════════════════");
        for field in &self.fields {
            let _ = writeln!(out);
            let _ = writeln!(out, "{} {}", field.name, field.domain);
            let _ = writeln!(out, "  {}", field.description);
            for option in &field.options {
                let _ = writeln!(out, "  - {option}");
            }
        }
        out
    }
}

impl HumanOutput for AboutOutput {
    fn to_human(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.title);
        let _ = writeln!(out, "{}", "═".repeat(self.title.chars().count()));
        for paragraph in &self.context {
            let _ = writeln!(out);
            let _ = writeln!(out, "{paragraph}");
        }
        let _ = writeln!(out);
        let _ = writeln!(out, "Conclusões:");
        let _ = writeln!(out, "───────────");
        for conclusion in &self.conclusions {
            let _ = writeln!(out, "- {conclusion}");
        }
        out
    }
}

impl HumanOutput for ExploratoryReport {
    fn to_human(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Exploratory Report:");
        let _ = writeln!(out, "═══════════════════");
        let _ = writeln!(out, "Total rows: {}", self.total_rows);

        let _ = writeln!(out);
        let _ = writeln!(out, "Patients per class:");
        let _ = writeln!(out, "───────────────────");
        for class in &self.class_distribution {
            let share = class.count as f64 / self.total_rows as f64;
            let _ = writeln!(
                out,
                "  {:<22} {:>5} {:>7}",
                class.label,
                class.count,
                format_percent(share)
            );
        }

        if let (Some(age), Some(weight)) = (
            min_max(self.age_weight.iter().map(|p| p.age)),
            min_max(self.age_weight.iter().map(|p| p.weight)),
        ) {
            let _ = writeln!(out);
            let _ = writeln!(out, "Age vs weight:");
            let _ = writeln!(out, "──────────────");
            let _ = writeln!(out, "  {} points", self.age_weight.len());
            let _ = writeln!(out, "  Age: {:.0} to {:.0} years", age.0, age.1);
            let _ = writeln!(out, "  Weight: {:.1} to {:.1} kg", weight.0, weight.1);
        }

        let _ = writeln!(out);
        let _ = writeln!(out, "Physical activity (FAF) by class:");
        let _ = writeln!(out, "─────────────────────────────────");
        let _ = writeln!(
            out,
            "  {:<22} {:>6} {:>6} {:>6} {:>6} {:>6} {:>8}",
            "class", "min", "q1", "median", "q3", "max", "outliers"
        );
        for summary in &self.activity_by_class {
            let _ = writeln!(
                out,
                "  {:<22} {:>6.2} {:>6.2} {:>6.2} {:>6.2} {:>6.2} {:>8}",
                summary.label,
                summary.min,
                summary.q1,
                summary.median,
                summary.q3,
                summary.max,
                summary.outliers
            );
        }

        let _ = writeln!(out);
        let _ = writeln!(out, "Correlation:");
        let _ = writeln!(out, "────────────");
        let _ = write!(out, "  {:<8}", "");
        for name in &self.correlation.variables {
            let _ = write!(out, " {name:>6}");
        }
        let _ = writeln!(out);
        for (name, row) in self.correlation.variables.iter().zip(&self.correlation.values) {
            let _ = write!(out, "  {name:<8}");
            for value in row {
                match value {
                    Some(v) => {
                        let _ = write!(out, " {v:>6.2}");
                    }
                    None => {
                        let _ = write!(out, " {:>6}", "n/a");
                    }
                }
            }
            let _ = writeln!(out);
        }
        out
    }
}

/// Format a JSON value for display.
fn format_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Array(arr) => {
            let formatted_values = arr.iter().map(format_value).collect::<Vec<_>>().join(", ");
            format!("[{formatted_values}]")
        }
        serde_json::Value::Object(_) => "[object]".to_string(),
        serde_json::Value::Null => "null".to_string(),
    }
}

/// Format a probability as a percentage.
fn format_percent(value: f64) -> String {
    format!("{:.1}%", value * 100.0)
}

fn min_max<I: Iterator<Item = f64>>(values: I) -> Option<(f64, f64)> {
    values.fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;

    #[test]
    fn test_format_value() {
        assert_eq!(
            format_value(&serde_json::Value::String("yes".to_string())),
            "yes"
        );
        assert_eq!(
            format_value(&serde_json::Value::Number(serde_json::Number::from(3))),
            "3"
        );
        assert_eq!(format_value(&serde_json::Value::Null), "null");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(0.873), "87.3%");
        assert_eq!(format_percent(1.0), "100.0%");
    }

    #[test]
    fn test_min_max() {
        assert_eq!(min_max([3.0, 1.0, 2.0].into_iter()), Some((1.0, 3.0)));
        assert_eq!(min_max(std::iter::empty()), None);
    }

    #[test]
    fn test_prediction_human() {
        let prediction = Prediction::new("Normal_Weight").with_probabilities(vec![
            ClassProbability {
                label: "Normal_Weight".to_string(),
                probability: 0.9,
            },
            ClassProbability {
                label: "Overweight_Level_I".to_string(),
                probability: 0.1,
            },
        ]);
        let output = PredictionOutput::new("linear", &prediction);
        let text = output.to_human();
        assert!(text.contains("Predicted level: Peso Normal (Normal_Weight)"));
        assert!(text.contains("Confidence: 90.0%"));
        assert!(text.contains("Overweight_Level_I"));

        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["display_name"], "Peso Normal");
        assert_eq!(json["classifier"], "linear");
    }

    #[test]
    fn test_batch_counts() {
        let batch = BatchOutput::new(vec![
            BatchEntry {
                index: 0,
                result: Some(PredictionOutput::new("bmi", &Prediction::new("Obesity_Type_I"))),
                error: None,
            },
            BatchEntry {
                index: 1,
                result: None,
                error: Some("Unmapped category".to_string()),
            },
        ]);
        assert_eq!(batch.total, 2);
        assert_eq!(batch.succeeded, 1);
        assert_eq!(batch.failed, 1);

        let text = batch.to_human();
        assert!(text.contains("Submission 2:"));
        assert!(text.contains("Error: Unmapped category"));
        assert!(text.contains("Obesidade Tipo I"));
    }

    #[test]
    fn test_batch_output_serializes() {
        let batch = BatchOutput::new(vec![
            BatchEntry {
                index: 0,
                result: Some(PredictionOutput::new("bmi", &Prediction::new("Normal_Weight"))),
                error: None,
            },
            BatchEntry::<PredictionOutput> {
                index: 1,
                result: None,
                error: Some("line 2: expected value".to_string()),
            },
        ]);

        let value = serde_json::to_value(&batch).unwrap();
        assert_eq!(value["total"], 2);
        assert_eq!(value["succeeded"], 1);
        assert_eq!(value["failed"], 1);
        assert_eq!(value["entries"][0]["index"], 0);
        assert!(value["entries"][0].get("error").is_none());
        assert_eq!(value["entries"][1]["error"], "line 2: expected value");
        assert!(value["entries"][1].get("result").is_none());
    }

    #[test]
    fn test_report_human() {
        let csv = "\
Gender,Age,Height,Weight,family_history,FAVC,FCVC,NCP,CH2O,FAF,TUE,CALC,CAEC,SMOKE,SCC,MTRANS,Obesity
Female,21,1.62,64,yes,no,2,3,2,0,1,no,Sometimes,no,no,Public_Transportation,Normal_Weight
Male,27,1.8,87,no,no,3,3,2,2,0,Frequently,Sometimes,no,no,Walking,Overweight_Level_I
";
        let report = Dataset::from_reader(csv.as_bytes())
            .unwrap()
            .report()
            .unwrap();
        let text = report.to_human();
        assert!(text.contains("Total rows: 2"));
        assert!(text.contains("Age: 21 to 27 years"));
        // CH2O is constant in this sample.
        assert!(text.contains("n/a"));
    }

    #[test]
    fn test_about_default() {
        let about = AboutOutput::default();
        assert_eq!(about.conclusions.len(), 4);
        assert!(about.to_human().contains("Gradient Boosting"));
    }
}
