use std::path::PathBuf;

use tts_core::{
    classify_and_estimate, Estimate, RecordSource, TableSource, TestCategory, TotalEstimate,
    TransformerType, TtsError, WindingType,
};
use tts_io::{validate_dataset, CsvRecordSource, JsonTableSource};

fn repo_path(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join(relative)
}

#[test]
fn sample_records_classify_end_to_end() {
    let source = CsvRecordSource::open(repo_path("test_data/records.csv")).unwrap();
    let table = JsonTableSource::new(repo_path("test_data/parameters.json"))
        .load_parameter_table()
        .unwrap();

    let record = source.lookup_record("T-1003").unwrap();
    let assessment = classify_and_estimate(&record, &table).unwrap();
    assert_eq!(
        assessment.classification.transformer_type,
        TransformerType::Medium
    );
    assert_eq!(
        assessment.classification.winding_type,
        WindingType::ThreeWinding
    );
    let codes: Vec<u16> = assessment
        .categories
        .iter()
        .map(|c| c.code.unwrap().value())
        .collect();
    assert_eq!(codes, vec![43, 96, 52]);
    assert_eq!(
        assessment.total,
        TotalEstimate::Complete {
            cycle_time: 21.0,
            labor_hours: 10.5
        }
    );
}

#[test]
fn sample_gap_in_large_table() {
    let source = CsvRecordSource::open(repo_path("test_data/records.csv")).unwrap();
    let table = JsonTableSource::new(repo_path("test_data/parameters.json"))
        .load_parameter_table()
        .unwrap();

    let record = source.lookup_record("T-1004").unwrap();
    let assessment = classify_and_estimate(&record, &table).unwrap();
    assert_eq!(
        assessment.classification.transformer_type,
        TransformerType::Large
    );
    let cap_df = assessment
        .categories
        .iter()
        .find(|c| c.category == TestCategory::CapDf)
        .unwrap();
    assert_eq!(cap_df.schedule.cycle_time, Estimate::Unavailable);
    assert_eq!(cap_df.schedule.labor_hours, Estimate::Value(9.0));
    assert_eq!(assessment.total, TotalEstimate::Unavailable);
}

#[test]
fn sample_missing_rating_and_unknown_id() {
    let source = CsvRecordSource::open(repo_path("test_data/records.csv")).unwrap();
    let table = JsonTableSource::new(repo_path("test_data/parameters.json"))
        .load_parameter_table()
        .unwrap();

    let record = source.lookup_record("T-1006").unwrap();
    assert!(matches!(
        classify_and_estimate(&record, &table),
        Err(TtsError::Validation(_))
    ));

    assert!(matches!(
        source.lookup_record("T-9999"),
        Err(TtsError::NotFound { .. })
    ));
}

#[test]
fn sample_dataset_validation() {
    let records = repo_path("test_data/records.csv");
    let table = repo_path("test_data/parameters.json");
    let diag = validate_dataset(&records, Some(&table)).unwrap();

    assert_eq!(diag.error_count(), 1);
    assert!(diag
        .errors()
        .any(|i| i.entity.as_deref() == Some("T-1006")));
    assert!(diag
        .warnings()
        .any(|i| i.entity.as_deref() == Some("T-1002")));
    assert!(diag
        .warnings()
        .any(|i| i.entity.as_deref() == Some("Large Power(Cycle Time)")));
}
