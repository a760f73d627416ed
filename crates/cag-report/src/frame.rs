//! Report frame construction.
//!
//! List and object cells are stored as compact JSON text, PCI-conditional
//! cells as `True` / `False` / `N/A`, so the frame writes to CSV without
//! nested dtypes.

use anyhow::{Context, Result};
use cag_model::{COLUMN_NAMES, DerivedRecord, PciValue};
use polars::prelude::{Column, DataFrame};
use serde_json::Value;

/// Builds the report frame with [`COLUMN_NAMES`] in order.
pub fn build_report_frame(records: &[DerivedRecord]) -> Result<DataFrame> {
    let mut columns: Vec<Column> = Vec::with_capacity(COLUMN_NAMES.len());
    for name in COLUMN_NAMES {
        columns.push(build_column(name, records));
    }
    DataFrame::new(columns).context("build report frame")
}

fn build_column(name: &str, records: &[DerivedRecord]) -> Column {
    match name {
        "cag" => Column::new(name.into(), records.iter().map(|r| r.cag).collect::<Vec<_>>()),
        "pci" => Column::new(name.into(), records.iter().map(|r| r.pci).collect::<Vec<_>>()),
        "lesion_total_num" => Column::new(
            name.into(),
            records
                .iter()
                .map(|r| r.lesion_total_num as u32)
                .collect::<Vec<_>>(),
        ),
        "lesion_B2/C_num" => Column::new(
            name.into(),
            records
                .iter()
                .map(|r| r.lesion_b2c_num as u32)
                .collect::<Vec<_>>(),
        ),
        _ => Column::new(
            name.into(),
            records
                .iter()
                .map(|r| cell_text(r, name))
                .collect::<Vec<_>>(),
        ),
    }
}

/// Text form of one report cell.
pub fn cell_text(record: &DerivedRecord, column: &str) -> String {
    match column {
        "patient_number" => record.patient_number.clone(),
        "sex" => record.sex.clone(),
        "age" => record.age.clone(),
        "date_of_angiography" => record.date_of_angiography.clone(),
        "review" => Value::Object(record.review.clone()).to_string(),
        "cag" => record.cag.to_string(),
        "segment_codes_of_previous_stents" => codes_text(&record.segment_codes_of_previous_stents),
        "segment_code" => Value::Array(
            record
                .segment_codes
                .iter()
                .map(|s| Value::from(vec![s.code.as_str(), s.lesion_type.as_str()]))
                .collect(),
        )
        .to_string(),
        "vessel_disease" => Value::Array(
            record
                .vessel_disease
                .iter()
                .map(|t| Value::from(t.as_str()))
                .collect(),
        )
        .to_string(),
        "anatomical_dx_json" => record.anatomical_dx.to_string(),
        "lesion_total_num" => record.lesion_total_num.to_string(),
        "lesion_B2/C_num" => record.lesion_b2c_num.to_string(),
        "pci" => record.pci.to_string(),
        "lengths_of_current_stents" => record.lengths_value().to_string(),
        "segment_codes_of_current_stents" => codes_text(&record.segment_codes_of_current_stents),
        "segment_codes_of_deb_dcb" => codes_text(&record.segment_codes_of_deb_dcb),
        "segment_codes_of_thrombus_aspiration" => {
            codes_text(&record.segment_codes_of_thrombus_aspiration)
        }
        "segment_codes_of_kissing" => codes_text(&record.segment_codes_of_kissing),
        "three_vessel_PCI" => pci_text(record.complexity.three_vessel_pci),
        "three_or_more_lesions_treated" => {
            pci_text(record.complexity.three_or_more_lesions_treated)
        }
        "bifurcation_two_stents" => pci_text(record.complexity.bifurcation_two_stents),
        "three_or_more_stents" => pci_text(record.complexity.three_or_more_stents),
        "length_gt_60mm" => pci_text(record.complexity.length_gt_60mm),
        "cto_pci" => pci_text(record.complexity.cto_pci),
        "complex_pci" => pci_text(record.complexity.complex_pci),
        "previous_stent" => record.previous_stent.previous_value().to_string(),
        "current_stent" => record.current_stent.current_value().to_string(),
        _ => String::new(),
    }
}

fn codes_text(codes: &[String]) -> String {
    Value::from(codes.to_vec()).to_string()
}

fn pci_text(value: PciValue) -> String {
    value.to_string()
}
