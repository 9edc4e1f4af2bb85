//! Integration tests for the encoding contract between the form and the
//! classifier.

use obesity_predictor::encoder::{FeatureEncoder, RawSelections};
use obesity_predictor::error::{PredictorError, Result};
use obesity_predictor::record::{FeatureValue, PatientRecord};
use obesity_predictor::schema::{Feature, Schema};

fn reference_input() -> RawSelections {
    RawSelections {
        gender: "Feminino".to_string(),
        age: 30,
        height: 1.70,
        weight: 70.0,
        family_history: "não".to_string(),
        favc: "não".to_string(),
        fcvc: "Moderado (2 vezes/dia)".to_string(),
        ncp: "Moderado (2-3 refeições)".to_string(),
        ch2o: "Moderado (1,0 L/dia)".to_string(),
        faf: "Pouco (0-1x/semana)".to_string(),
        tue: "Pouco (0-1h/dia)".to_string(),
        calc: "não".to_string(),
        caec: "Às vezes".to_string(),
        smoke: "não".to_string(),
        scc: "não".to_string(),
        mtrans: "Caminhada".to_string(),
    }
}

#[test]
fn test_reference_record() -> Result<()> {
    let record = FeatureEncoder::new().encode(&reference_input())?;

    let expected = PatientRecord::from_json(&serde_json::json!({
        "Gender": "Female", "Age": 30, "Height": 1.70, "Weight": 70.0,
        "family_history": "no", "FAVC": "no", "FCVC": 2, "NCP": 2, "CH2O": 2,
        "FAF": 0, "TUE": 0, "CALC": "no", "CAEC": "Sometimes", "SMOKE": "no",
        "SCC": "no", "MTRANS": "Walking"
    }))?;
    assert_eq!(record, expected);

    let names: Vec<_> = record.iter().map(|(f, _)| f.name()).collect();
    let schema_names: Vec<_> = Schema::standard().fields().iter().map(|f| f.name()).collect();
    assert_eq!(names, schema_names);

    Ok(())
}

#[test]
fn test_family_history_sim_is_yes() -> Result<()> {
    let mut raw = reference_input();
    raw.family_history = "sim".to_string();
    let record = FeatureEncoder::new().encode(&raw)?;
    assert_eq!(record.text(Feature::FamilyHistory), Some("yes"));
    Ok(())
}

#[test]
fn test_every_bucket_label_maps_to_its_value() -> Result<()> {
    let encoder = FeatureEncoder::new();
    let expected = [
        (Feature::Fcvc, "Pouco (1 vez/dia)", 1),
        (Feature::Fcvc, "Moderado (2 vezes/dia)", 2),
        (Feature::Fcvc, "Muito (3 vezes/dia)", 3),
        (Feature::Ncp, "Pouco (1 refeição)", 1),
        (Feature::Ncp, "Moderado (2-3 refeições)", 2),
        (Feature::Ncp, "Muito (4 refeições)", 3),
        (Feature::Ch2o, "Pouco (0,5 L/dia)", 1),
        (Feature::Ch2o, "Moderado (1,0 L/dia)", 2),
        (Feature::Ch2o, "Muito (1,5 L/dia)", 3),
        (Feature::Faf, "Pouco (0-1x/semana)", 0),
        (Feature::Faf, "Moderado (2x/semana)", 1),
        (Feature::Faf, "Muito (3x+/semana)", 2),
        (Feature::Tue, "Pouco (0-1h/dia)", 0),
        (Feature::Tue, "Moderado (1-2h/dia)", 1),
        (Feature::Tue, "Muito (3h+/dia)", 2),
    ];

    for (feature, label, value) in expected {
        let table = encoder.bucket_table(feature).expect("bucket table");
        assert_eq!(table.lookup(label)?, value, "{feature} {label}");
    }
    Ok(())
}

#[test]
fn test_localized_binary_normalization() -> Result<()> {
    let encoder = FeatureEncoder::new();

    let gender = encoder.label_table(Feature::Gender)?;
    assert_eq!(gender.normalize("Masculino")?, "Male");
    assert_eq!(gender.normalize("Feminino")?, "Female");

    for feature in [
        Feature::FamilyHistory,
        Feature::Favc,
        Feature::Smoke,
        Feature::Scc,
    ] {
        let table = encoder.label_table(feature)?;
        assert_eq!(table.normalize("sim")?, "yes");
        assert_eq!(table.normalize("não")?, "no");
    }
    Ok(())
}

#[test]
fn test_canonical_tokens_pass_through() -> Result<()> {
    let mut raw = reference_input();
    raw.gender = "Female".to_string();
    raw.family_history = "no".to_string();
    raw.calc = "no".to_string();
    raw.caec = "Sometimes".to_string();
    raw.mtrans = "Walking".to_string();

    let encoder = FeatureEncoder::new();
    assert_eq!(encoder.encode(&raw)?, encoder.encode(&reference_input())?);
    Ok(())
}

#[test]
fn test_encoding_is_deterministic() -> Result<()> {
    let encoder = FeatureEncoder::new();
    let raw = reference_input();
    assert_eq!(encoder.encode(&raw)?, encoder.encode(&raw)?);
    Ok(())
}

#[test]
fn test_slider_bounds_pass_through() -> Result<()> {
    let encoder = FeatureEncoder::new();

    for (age, height, weight) in [(10, 1.40, 40.0), (80, 2.10, 173.0)] {
        let mut raw = reference_input();
        raw.age = age;
        raw.height = height;
        raw.weight = weight;

        let record = encoder.encode(&raw)?;
        assert_eq!(record.get(Feature::Age), Some(&FeatureValue::Integer(age)));
        assert_eq!(record.number(Feature::Height), Some(height));
        assert_eq!(record.number(Feature::Weight), Some(weight));
    }
    Ok(())
}

#[test]
fn test_unknown_bucket_label_names_field() {
    let encoder = FeatureEncoder::new();

    for feature in Feature::BUCKETED {
        let mut raw = reference_input();
        match feature {
            Feature::Fcvc => raw.fcvc = "Extremo".to_string(),
            Feature::Ncp => raw.ncp = "Extremo".to_string(),
            Feature::Ch2o => raw.ch2o = "Extremo".to_string(),
            Feature::Faf => raw.faf = "Extremo".to_string(),
            Feature::Tue => raw.tue = "Extremo".to_string(),
            _ => unreachable!(),
        }

        match encoder.encode(&raw) {
            Err(PredictorError::UnmappedCategory { field, value }) => {
                assert_eq!(field, feature.name());
                assert_eq!(value, "Extremo");
            }
            other => panic!("expected UnmappedCategory for {feature}, got {other:?}"),
        }
    }
}

#[test]
fn test_out_of_range_is_rejected() {
    let encoder = FeatureEncoder::new();
    let mut raw = reference_input();
    raw.weight = 250.0;

    let err = encoder.encode(&raw).unwrap_err();
    assert!(err.is_recoverable());
    assert_eq!(err.field(), Some("Weight"));
}
