//! Descriptive statistics behind the exploratory charts.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::dataset::dataset::Dataset;
use crate::error::{PredictorError, Result};
use crate::schema::Feature;

/// Variables of the correlation heatmap, in display order.
pub const CORRELATION_VARIABLES: [Feature; 8] = [
    Feature::Age,
    Feature::Height,
    Feature::Weight,
    Feature::Fcvc,
    Feature::Ncp,
    Feature::Ch2o,
    Feature::Faf,
    Feature::Tue,
];

/// Number of rows in one class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassCount {
    pub label: String,
    pub count: usize,
}

/// One point of the age/weight scatter plot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterPoint {
    pub age: f64,
    pub weight: f64,
    pub label: String,
}

/// Box-plot summary of one group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxSummary {
    pub label: String,
    pub count: usize,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    /// Smallest value within `q1 - 1.5·IQR`.
    pub lower_whisker: f64,
    /// Largest value within `q3 + 1.5·IQR`.
    pub upper_whisker: f64,
    pub outliers: usize,
}

impl BoxSummary {
    /// Summarize a non-empty group of values.
    pub fn from_values<S: Into<String>>(label: S, values: &[f64]) -> Result<Self> {
        if values.is_empty() {
            return Err(PredictorError::invalid_operation(
                "cannot summarize an empty group",
            ));
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let q1 = quantile(&sorted, 0.25);
        let median = quantile(&sorted, 0.5);
        let q3 = quantile(&sorted, 0.75);
        let iqr = q3 - q1;
        let low_fence = q1 - 1.5 * iqr;
        let high_fence = q3 + 1.5 * iqr;

        let inside: Vec<f64> = sorted
            .iter()
            .copied()
            .filter(|v| *v >= low_fence && *v <= high_fence)
            .collect();

        // Quartiles always lie inside the fences, so `inside` is non-empty.
        let lower_whisker = inside.first().copied().unwrap_or(q1);
        let upper_whisker = inside.last().copied().unwrap_or(q3);

        Ok(BoxSummary {
            label: label.into(),
            count: sorted.len(),
            min: sorted[0],
            q1,
            median,
            q3,
            max: sorted[sorted.len() - 1],
            lower_whisker,
            upper_whisker,
            outliers: sorted.len() - inside.len(),
        })
    }
}

/// Pearson correlation matrix. `None` where a variable is constant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    pub variables: Vec<String>,
    pub values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    /// Correlation between two variables by name.
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.variables.iter().position(|v| v == a)?;
        let j = self.variables.iter().position(|v| v == b)?;
        self.values[i][j]
    }
}

/// Everything the exploratory view shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExploratoryReport {
    pub total_rows: usize,
    pub class_distribution: Vec<ClassCount>,
    pub age_weight: Vec<ScatterPoint>,
    /// FAF distribution per class, in order of first appearance.
    pub activity_by_class: Vec<BoxSummary>,
    pub correlation: CorrelationMatrix,
}

impl Dataset {
    /// Compute the exploratory report.
    pub fn report(&self) -> Result<ExploratoryReport> {
        if self.is_empty() {
            return Err(PredictorError::invalid_operation(
                "cannot build a report from an empty dataset",
            ));
        }

        Ok(ExploratoryReport {
            total_rows: self.len(),
            class_distribution: self.class_distribution(),
            age_weight: self
                .rows()
                .iter()
                .map(|row| ScatterPoint {
                    age: row.age,
                    weight: row.weight,
                    label: row.obesity.clone(),
                })
                .collect(),
            activity_by_class: self.activity_by_class()?,
            correlation: self.correlation(),
        })
    }

    /// Row count per class, largest first, ties by label.
    pub fn class_distribution(&self) -> Vec<ClassCount> {
        let mut counts: AHashMap<&str, usize> = AHashMap::new();
        for row in self.rows() {
            *counts.entry(row.obesity.as_str()).or_insert(0) += 1;
        }

        let mut distribution: Vec<ClassCount> = counts
            .into_iter()
            .map(|(label, count)| ClassCount {
                label: label.to_string(),
                count,
            })
            .collect();
        distribution.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
        distribution
    }

    /// Box-plot summary of FAF for each class.
    pub fn activity_by_class(&self) -> Result<Vec<BoxSummary>> {
        let mut order: Vec<&str> = Vec::new();
        let mut groups: AHashMap<&str, Vec<f64>> = AHashMap::new();
        for row in self.rows() {
            let label = row.obesity.as_str();
            groups
                .entry(label)
                .or_insert_with(|| {
                    order.push(label);
                    Vec::new()
                })
                .push(row.faf);
        }

        order
            .into_iter()
            .map(|label| {
                let values = groups.remove(label).unwrap_or_default();
                BoxSummary::from_values(label, &values)
            })
            .collect()
    }

    /// Pearson correlation over the numeric variables.
    pub fn correlation(&self) -> CorrelationMatrix {
        let columns: Vec<Vec<f64>> = CORRELATION_VARIABLES
            .iter()
            .map(|feature| {
                self.rows()
                    .iter()
                    .filter_map(|row| row.numeric(*feature))
                    .collect()
            })
            .collect();

        let values = columns
            .iter()
            .map(|x| columns.iter().map(|y| pearson(x, y)).collect())
            .collect();

        CorrelationMatrix {
            variables: CORRELATION_VARIABLES
                .iter()
                .map(|f| f.name().to_string())
                .collect(),
            values,
        }
    }
}

/// Quantile of sorted values with linear interpolation between ranks.
pub fn quantile(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let position = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
}

/// Pearson correlation coefficient. `None` when either series is constant
/// or the lengths differ.
pub fn pearson(x: &[f64], y: &[f64]) -> Option<f64> {
    if x.len() != y.len() || x.len() < 2 {
        return None;
    }

    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    let mut covariance = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (a, b) in x.iter().zip(y) {
        let dx = a - mean_x;
        let dy = b - mean_y;
        covariance += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }
    Some((covariance / (var_x * var_y).sqrt()).clamp(-1.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Gender,Age,Height,Weight,family_history,FAVC,FCVC,NCP,CH2O,FAF,TUE,CALC,CAEC,SMOKE,SCC,MTRANS,Obesity
Female,21,1.62,64,yes,no,2,3,2,0,1,no,Sometimes,no,no,Public_Transportation,Normal_Weight
Female,21,1.52,56,yes,no,3,3,3,3,0,Sometimes,Sometimes,yes,yes,Public_Transportation,Normal_Weight
Male,23,1.8,77,yes,no,2,3,2,2,1,Frequently,Sometimes,no,no,Public_Transportation,Normal_Weight
Male,27,1.8,87,no,no,3,3,2,2,0,Frequently,Sometimes,no,no,Walking,Overweight_Level_I
Male,22,1.78,89.8,no,no,2,1,2,0,0,Sometimes,Sometimes,no,no,Public_Transportation,Overweight_Level_II
Male,29,1.62,53,no,yes,2,3,2,0,0,Sometimes,Sometimes,no,no,Automobile,Overweight_Level_I
";

    fn sample() -> Dataset {
        Dataset::from_reader(SAMPLE.as_bytes()).unwrap()
    }

    #[test]
    fn test_quantile() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile(&sorted, 0.0), 1.0);
        assert_eq!(quantile(&sorted, 0.25), 1.75);
        assert_eq!(quantile(&sorted, 0.5), 2.5);
        assert_eq!(quantile(&sorted, 1.0), 4.0);
        assert_eq!(quantile(&[7.0], 0.75), 7.0);
        assert!(quantile(&[], 0.5).is_nan());
    }

    #[test]
    fn test_pearson() {
        let x = [1.0, 2.0, 3.0, 4.0];
        assert!((pearson(&x, &[2.0, 4.0, 6.0, 8.0]).unwrap() - 1.0).abs() < 1e-12);
        assert!((pearson(&x, &[8.0, 6.0, 4.0, 2.0]).unwrap() + 1.0).abs() < 1e-12);
        assert_eq!(pearson(&x, &[5.0, 5.0, 5.0, 5.0]), None);
        assert_eq!(pearson(&x, &[1.0]), None);
    }

    #[test]
    fn test_box_summary_outliers() {
        let values = [1.0, 2.0, 2.0, 3.0, 3.0, 4.0, 50.0];
        let summary = BoxSummary::from_values("g", &values).unwrap();
        assert_eq!(summary.count, 7);
        assert_eq!(summary.min, 1.0);
        assert_eq!(summary.max, 50.0);
        assert_eq!(summary.median, 3.0);
        assert_eq!(summary.q1, 2.0);
        assert_eq!(summary.q3, 3.5);
        assert_eq!(summary.lower_whisker, 1.0);
        assert_eq!(summary.upper_whisker, 4.0);
        assert_eq!(summary.outliers, 1);

        assert!(BoxSummary::from_values("g", &[]).is_err());
    }

    #[test]
    fn test_class_distribution_order() {
        let distribution = sample().class_distribution();
        let labels: Vec<_> = distribution.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["Normal_Weight", "Overweight_Level_I", "Overweight_Level_II"]
        );
        assert_eq!(distribution[0].count, 3);
        assert_eq!(distribution[1].count, 2);
    }

    #[test]
    fn test_report() {
        let report = sample().report().unwrap();
        assert_eq!(report.total_rows, 6);
        assert_eq!(report.age_weight.len(), 6);
        assert_eq!(report.age_weight[3].weight, 87.0);

        let groups: Vec<_> = report
            .activity_by_class
            .iter()
            .map(|b| b.label.as_str())
            .collect();
        assert_eq!(
            groups,
            vec!["Normal_Weight", "Overweight_Level_I", "Overweight_Level_II"]
        );
        assert_eq!(report.activity_by_class[0].median, 2.0);

        let correlation = &report.correlation;
        assert_eq!(correlation.variables.len(), 8);
        assert!((correlation.get("Age", "Age").unwrap() - 1.0).abs() < 1e-12);
        assert_eq!(correlation.get("Age", "Height"), correlation.get("Height", "Age"));
    }

    #[test]
    fn test_constant_column_is_null() {
        let report = sample().report().unwrap();
        let rows: Vec<_> = sample()
            .rows()
            .iter()
            .filter(|r| r.ch2o == 2.0)
            .cloned()
            .collect();
        let subset = Dataset::new(rows);
        let correlation = subset.correlation();
        assert_eq!(correlation.get("CH2O", "Age"), None);
        assert!(report.correlation.get("CH2O", "Age").is_some());

        let json = serde_json::to_value(&correlation).unwrap();
        assert!(json["values"][5][0].is_null());
    }

    #[test]
    fn test_empty_dataset() {
        let err = Dataset::default().report().unwrap_err();
        assert!(matches!(err, PredictorError::InvalidOperation(_)));
    }
}
