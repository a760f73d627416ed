//! File-based ingestion tests.

use std::fs;

use cag_ingest::{IngestError, convert_csv_to_jsonl, read_encounters};
use serde_json::json;
use tempfile::TempDir;

#[test]
fn test_read_encounters_from_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("encounters.jsonl");
    let review = json!({"coronary_angiography": {"lesions": []}}).to_string();
    let lines = [
        json!({"patient_number": 11, "sex": "F", "age": 80, "date_of_angiography": "2024-04-01", "review": review.clone()}),
        json!({"patient_number": 12, "date_of_angiography": "2024-04-02", "review": "```json\n{}\n```"}),
    ];
    let content: String = lines.iter().map(|l| format!("{l}\n")).collect();
    fs::write(&path, content).unwrap();

    let encounters = read_encounters(&path).unwrap();

    assert_eq!(encounters.len(), 2);
    assert_eq!(encounters[0].patient_number, "11");
    assert_eq!(encounters[0].review, Some(json!(review)));
    assert_eq!(encounters[1].age, "N/A");
}

#[test]
fn test_read_encounters_missing_file() {
    let dir = TempDir::new().unwrap();
    let err = read_encounters(&dir.path().join("absent.jsonl")).unwrap_err();
    assert!(matches!(err, IngestError::FileNotFound { .. }));
}

#[test]
fn test_convert_then_read() {
    let dir = TempDir::new().unwrap();
    let csv_path = dir.path().join("export.csv");
    let jsonl_path = dir.path().join("export.jsonl");
    fs::write(
        &csv_path,
        "patient_number,sex,age,date_of_angiography,review\n\
         301,M,61,2024-06-01,\"```json\n{\"\"pci_details\"\": [{\"\"CTO\"\": true}]}\n```\"\n\
         302,F,49,2024-06-02,\n",
    )
    .unwrap();

    let count = convert_csv_to_jsonl(&csv_path, &jsonl_path).unwrap();
    assert_eq!(count, 2);

    let encounters = read_encounters(&jsonl_path).unwrap();
    assert_eq!(encounters.len(), 2);
    assert_eq!(encounters[0].patient_number, "301");
    assert_eq!(
        encounters[0].review,
        Some(json!("```json\n{\"pci_details\": [{\"CTO\": true}]}\n```"))
    );
    assert_eq!(encounters[1].review, Some(serde_json::Value::Null));
}
