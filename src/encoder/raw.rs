//! Raw form selections.

use serde::{Deserialize, Serialize};

use crate::schema::Feature;

/// One submission of the patient form, exactly as the user picked it.
///
/// Labels may be localized ("sim", "Moderado (2 vezes/dia)") or canonical
/// ("yes"). Field names accept both snake_case and the classifier's column
/// names, so `{"FCVC": ...}` and `{"fcvc": ...}` deserialize alike.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSelections {
    #[serde(alias = "Gender")]
    pub gender: String,
    #[serde(alias = "Age")]
    pub age: i64,
    #[serde(alias = "Height")]
    pub height: f64,
    #[serde(alias = "Weight")]
    pub weight: f64,
    pub family_history: String,
    #[serde(alias = "FAVC")]
    pub favc: String,
    #[serde(alias = "FCVC")]
    pub fcvc: String,
    #[serde(alias = "NCP")]
    pub ncp: String,
    #[serde(alias = "CH2O")]
    pub ch2o: String,
    #[serde(alias = "FAF")]
    pub faf: String,
    #[serde(alias = "TUE")]
    pub tue: String,
    #[serde(alias = "CALC")]
    pub calc: String,
    #[serde(alias = "CAEC")]
    pub caec: String,
    #[serde(alias = "SMOKE")]
    pub smoke: String,
    #[serde(alias = "SCC")]
    pub scc: String,
    #[serde(alias = "MTRANS")]
    pub mtrans: String,
}

impl RawSelections {
    /// The raw label chosen for a categorical or bucketed feature.
    ///
    /// Returns `None` for the numeric features.
    pub fn label(&self, feature: Feature) -> Option<&str> {
        let label = match feature {
            Feature::Gender => &self.gender,
            Feature::FamilyHistory => &self.family_history,
            Feature::Favc => &self.favc,
            Feature::Fcvc => &self.fcvc,
            Feature::Ncp => &self.ncp,
            Feature::Ch2o => &self.ch2o,
            Feature::Faf => &self.faf,
            Feature::Tue => &self.tue,
            Feature::Calc => &self.calc,
            Feature::Caec => &self.caec,
            Feature::Smoke => &self.smoke,
            Feature::Scc => &self.scc,
            Feature::Mtrans => &self.mtrans,
            Feature::Age | Feature::Height | Feature::Weight => return None,
        };
        Some(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_with_column_names() {
        let raw: RawSelections = serde_json::from_value(json!({
            "Gender": "Feminino",
            "Age": 30,
            "Height": 1.70,
            "Weight": 70.0,
            "family_history": "sim",
            "FAVC": "não",
            "FCVC": "Moderado (2 vezes/dia)",
            "NCP": "Moderado (2-3 refeições)",
            "CH2O": "Moderado (1,0 L/dia)",
            "FAF": "Pouco (0-1x/semana)",
            "TUE": "Pouco (0-1h/dia)",
            "CALC": "não",
            "CAEC": "Às vezes",
            "SMOKE": "não",
            "SCC": "não",
            "MTRANS": "Caminhada"
        }))
        .unwrap();

        assert_eq!(raw.gender, "Feminino");
        assert_eq!(raw.age, 30);
        assert_eq!(raw.label(Feature::Caec), Some("Às vezes"));
        assert_eq!(raw.label(Feature::Height), None);
    }

    #[test]
    fn test_missing_field_fails_to_deserialize() {
        let result: Result<RawSelections, _> = serde_json::from_value(json!({
            "gender": "Male",
            "age": 30
        }));
        assert!(result.is_err());
    }
}
