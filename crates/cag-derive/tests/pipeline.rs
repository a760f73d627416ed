//! End-to-end derivation tests over realistic review payloads.

use cag_derive::{derive_batch, derive_encounter};
use cag_model::{DeriveOptions, Encounter, LesionType, PciValue, SegmentAssignment, Territory};
use serde_json::{Value, json};

fn encounter(patient: &str, review: Value) -> Encounter {
    Encounter {
        line: 1,
        patient_number: patient.to_string(),
        sex: "M".to_string(),
        age: "64".to_string(),
        date_of_angiography: "2024-09-10".to_string(),
        review: Some(review),
    }
}

fn fenced(review: &Value) -> Value {
    Value::String(format!("```json\n{review}\n```"))
}

fn three_vessel_review() -> Value {
    json!({
        "coronary_angiography": {
            "lesions": [
                {
                    "segment_code": ["6", "7"],
                    "luminal_narrowing_percentage": 90,
                    "lesion_characteristics": ["tubular", "calcification"]
                },
                {
                    "segment_code": ["6"],
                    "luminal_narrowing_percentage": 100,
                    "lesion_characteristics": ["CTO"]
                },
                {
                    "segment_code": ["11"],
                    "luminal_narrowing_percentage": 70,
                    "lesion_characteristics": ["eccentric"]
                },
                {
                    "segment_code": ["2"],
                    "luminal_narrowing_percentage": 50,
                    "lesion_characteristics": []
                },
                {
                    "segment_code": ["13"],
                    "luminal_narrowing_percentage": 40,
                    "lesion_characteristics": ["diffuse"]
                }
            ],
            "thrombus_aspiration": [{"segment_code": ["2"]}]
        },
        "previous_stents_rearrange": [],
        "current_stents_rearrange": [
            {"device": "Xience", "diameter_mm": 3.0, "length_mm": 38, "segment_code": ["6", "7"]},
            {"device": "Xience", "diameter_mm": 2.75, "length_mm": 28, "segment_code": ["11"]}
        ],
        "pci_details": [
            {
                "stents": [
                    {"device": "Xience", "diameter_mm": 3.0, "length_mm": 38, "segment_code": ["6", "7"]},
                    {"device": "Xience", "diameter_mm": 2.75, "length_mm": 28, "segment_code": ["11"]}
                ],
                "DEB_DCB": [],
                "CTO": true
            }
        ]
    })
}

#[test]
fn three_vessel_pci_encounter() {
    let record = derive_encounter(&encounter("1001", fenced(&three_vessel_review())));

    assert!(record.diagnostics.is_empty());
    assert!(record.cag);
    assert!(record.pci);
    assert_eq!(
        record.segment_codes,
        vec![
            SegmentAssignment::new("6", LesionType::C),
            SegmentAssignment::new("7", LesionType::B2),
            SegmentAssignment::new("11", LesionType::B1),
            SegmentAssignment::new("2", LesionType::A),
        ]
    );
    assert_eq!(record.lesion_total_num, 4);
    assert_eq!(record.lesion_b2c_num, 2);
    assert_eq!(
        record.vessel_disease,
        vec![Territory::Lad, Territory::Lcx, Territory::Rca]
    );
    assert_eq!(record.anatomical_dx.to_string(), "3VD");
    assert_eq!(record.segment_codes_of_current_stents, vec!["11", "6", "7"]);
    assert_eq!(record.segment_codes_of_thrombus_aspiration, vec!["2"]);
    assert_eq!(record.lengths_of_current_stents, vec![38.0, 28.0]);

    let complexity = record.complexity;
    assert_eq!(complexity.three_vessel_pci, PciValue::Flag(true));
    assert_eq!(complexity.three_or_more_lesions_treated, PciValue::Flag(true));
    assert_eq!(complexity.bifurcation_two_stents, PciValue::Flag(false));
    assert_eq!(complexity.three_or_more_stents, PciValue::Flag(false));
    assert_eq!(complexity.length_gt_60mm, PciValue::Flag(true));
    assert_eq!(complexity.cto_pci, PciValue::Flag(true));
    assert_eq!(complexity.complex_pci, PciValue::Flag(true));
    assert_eq!(record.current_stent.len(), 2);
}

#[test]
fn diagnostic_only_encounter() {
    let review = json!({
        "coronary_angiography": {
            "lesions": [
                {"segment_code": ["1"], "luminal_narrowing_percentage": 30, "lesion_characteristics": []}
            ]
        },
        "pci_details": []
    });
    let record = derive_encounter(&encounter("1002", fenced(&review)));

    assert!(record.cag);
    assert!(!record.pci);
    assert!(record.segment_codes.is_empty());
    assert_eq!(record.anatomical_dx.to_string(), "N/A");
    assert_eq!(record.complexity.complex_pci, PciValue::NotApplicable);
    assert_eq!(record.current_stent.current_value(), json!("N/A"));
    assert_eq!(record.previous_stent.previous_value(), json!([["N/A"]]));
}

#[test]
fn empty_object_list_field_keeps_angiography() {
    let review = json!({
        "coronary_angiography": {
            "lesions": [
                {"segment_code": ["6"], "luminal_narrowing_percentage": 90, "lesion_characteristics": ["CTO"]}
            ]
        },
        "pci_details": {}
    });
    let record = derive_encounter(&encounter("1004", fenced(&review)));

    assert!(record.diagnostics.is_empty());
    assert!(record.cag);
    assert!(!record.pci);
    assert_eq!(record.segment_codes, vec![SegmentAssignment::new("6", LesionType::C)]);
    assert_eq!(record.vessel_disease, vec![Territory::Lad]);
    assert_eq!(record.anatomical_dx.to_string(), "1VD");
    assert_eq!(record.complexity.complex_pci, PciValue::NotApplicable);
}

#[test]
fn no_angiography_no_pci_is_all_sentinel() {
    let record = derive_encounter(&encounter("1003", json!("{\"comment\": \"no study\"}")));

    assert!(!record.cag);
    assert!(!record.pci);
    for criterion in record.complexity.criteria() {
        assert_eq!(criterion, PciValue::NotApplicable);
    }
    assert_eq!(record.complexity.complex_pci, PciValue::NotApplicable);
    assert_eq!(record.previous_stent.previous_value(), json!([["N/A"]]));
    assert_eq!(record.current_stent.current_value(), json!("N/A"));
}

#[test]
fn malformed_payload_is_isolated() {
    let encounters = vec![
        encounter("2001", fenced(&three_vessel_review())),
        encounter("2002", json!("```json\n{\"coronary_angiography\": [\n```")),
        encounter("2003", fenced(&three_vessel_review())),
    ];
    let records = derive_batch(&encounters, &DeriveOptions::default());

    assert_eq!(records.len(), 3);
    assert_eq!(records[1].diagnostics.len(), 1);
    assert!(records[1].review.is_empty());
    assert!(!records[1].cag);
    assert_eq!(records[1].complexity.complex_pci, PciValue::NotApplicable);

    let alone = derive_encounter(&encounters[0]);
    assert_eq!(records[0], alone);
    assert_eq!(records[2].segment_codes, alone.segment_codes);
    assert_eq!(records[2].complexity, alone.complexity);
}

#[test]
fn parallel_and_sequential_agree() {
    let encounters: Vec<Encounter> = (0..32)
        .map(|i| {
            let review = if i % 3 == 0 {
                json!("not json")
            } else {
                fenced(&three_vessel_review())
            };
            encounter(&format!("P{i}"), review)
        })
        .collect();
    let sequential = derive_batch(&encounters, &DeriveOptions::default());
    let parallel = derive_batch(&encounters, &DeriveOptions::new().with_parallel(true));
    assert_eq!(sequential, parallel);
}
