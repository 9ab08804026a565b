//! Sample and output text forms.

#![allow(clippy::unwrap_used, clippy::float_cmp)]

use dga_engine::prelude::*;

const LAB_REPORT: &str = r#"{
    "SamplingDate": "2019-11-04T09:30:00",
    "Hydrogen": {"Value": 120.0, "Unit": {"Name": "Parts per Million", "Symbol": "PPM", "Base": 1.0, "Family": "Concentration"}},
    "Methane": {"Value": 45.0, "Unit": {"Name": "Microlitres per Litre", "Symbol": "ul/l", "Base": 1.0, "Family": "Concentration"}},
    "Ethane": {"Value": 8000.0, "Unit": {"Name": "Parts per Billion", "Symbol": "PPB", "Base": 0.001, "Family": "Concentration"}},
    "Ethylene": {"Value": 12.0, "Unit": {"Name": "Parts per Million", "Symbol": "PPM", "Base": 1.0, "Family": "Concentration"}},
    "Acetylene": null,
    "CarbonMonoxide": {"Value": 350.0, "Unit": {"Name": "Parts per Million", "Symbol": "PPM", "Base": 1.0, "Family": "Concentration"}},
    "CarbonDioxide": {"Value": 0.25, "Unit": {"Name": "Percent", "Symbol": "%", "Base": 10000.0, "Family": "Concentration"}}
}"#;

#[test]
fn test_lab_report_units_convert_to_ppm() {
    let sample = parse_sample(LAB_REPORT).unwrap();

    assert_eq!(sample.ppm(Gas::Hydrogen), Some(120.0));
    assert_eq!(sample.ppm(Gas::Methane), Some(45.0));
    assert!((sample.ppm(Gas::Ethane).unwrap() - 8.0).abs() < 1e-9);
    assert_eq!(sample.ppm(Gas::CarbonDioxide), Some(2500.0));
    assert_eq!(sample.ppm(Gas::Acetylene), None);
    assert_eq!(sample.ppm(Gas::Oxygen), None);
}

#[test]
fn test_round_trip_preserves_units() {
    let sample = parse_sample(LAB_REPORT).unwrap();
    let text = serialize_sample(&sample).unwrap();
    let again = parse_sample(&text).unwrap();

    assert_eq!(again, sample);
    assert_eq!(serialize_sample(&again).unwrap(), text);
    assert_eq!(again.gas(Gas::Ethane).unwrap().unit, Unit::PARTS_PER_BILLION);
}

#[test]
fn test_unknown_unit_is_rejected() {
    let text = r#"{"SamplingDate":"2019-11-04T09:30:00","Hydrogen":{"Value":1.0,"Unit":{"Name":"Furlongs","Symbol":"fur","Base":1.0,"Family":"Concentration"}}}"#;
    let err = parse_sample(text).unwrap_err();
    assert!(matches!(err, Error::Parse { .. }));
    assert!(err.to_string().contains("fur"));
}

#[test]
fn test_parse_error_truncates_input() {
    let text = format!("{{\"SamplingDate\": \"not a date\", \"Padding\": \"{}\"}}", "x".repeat(200));
    match parse_sample(&text).unwrap_err() {
        Error::Parse { input, .. } => assert!(input.len() < 80 && input.ends_with("...")),
        other => panic!("unexpected error {other}"),
    }
}

#[test]
fn test_outputs_serialize_as_name_description_pairs() {
    let sample = parse_sample(LAB_REPORT).unwrap();
    let outputs = run_rogers_ratios(&sample.with_gas(Gas::Acetylene, Some(Measurement::ppm(0.5))).unwrap()).unwrap();

    let json = serde_json::to_value(outputs.entries()).unwrap();
    assert_eq!(json[0]["Name"], "Title");
    assert_eq!(json[1]["Name"], "C2H2/C2H4");
    assert_eq!(json[1]["Description"], "0.042");
}
