//! Derived per-encounter summary.

use std::fmt;

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::enums::{LesionType, PciValue, Territory};
use crate::review::{NOT_AVAILABLE, StentRecord, number_value};

/// Output column names, in table order.
pub const COLUMN_NAMES: [&str; 27] = [
    "patient_number",
    "sex",
    "age",
    "date_of_angiography",
    "review",
    "cag",
    "segment_codes_of_previous_stents",
    "segment_code",
    "vessel_disease",
    "anatomical_dx_json",
    "lesion_total_num",
    "lesion_B2/C_num",
    "pci",
    "lengths_of_current_stents",
    "segment_codes_of_current_stents",
    "segment_codes_of_deb_dcb",
    "segment_codes_of_thrombus_aspiration",
    "segment_codes_of_kissing",
    "three_vessel_PCI",
    "three_or_more_lesions_treated",
    "bifurcation_two_stents",
    "three_or_more_stents",
    "length_gt_60mm",
    "cto_pci",
    "complex_pci",
    "previous_stent",
    "current_stent",
];

/// Final lesion type for one segment code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentAssignment {
    pub code: String,
    pub lesion_type: LesionType,
}

impl SegmentAssignment {
    pub fn new(code: impl Into<String>, lesion_type: LesionType) -> Self {
        Self {
            code: code.into(),
            lesion_type,
        }
    }
}

impl Serialize for SegmentAssignment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (&self.code, self.lesion_type).serialize(serializer)
    }
}

/// Anatomical diagnosis label (`LM`, `LM+2VD`, `3VD`, `N/A`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnatomicalDx {
    #[default]
    None,
    LeftMain { vessels: usize },
    VesselDisease { vessels: usize },
}

impl fmt::Display for AnatomicalDx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnatomicalDx::None => f.write_str(NOT_AVAILABLE),
            AnatomicalDx::LeftMain { vessels: 0 } => f.write_str("LM"),
            AnatomicalDx::LeftMain { vessels } => write!(f, "LM+{vessels}VD"),
            AnatomicalDx::VesselDisease { vessels } => write!(f, "{vessels}VD"),
        }
    }
}

impl Serialize for AnatomicalDx {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Stent display rows, or the sentinel when the section does not apply.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum StentListing {
    #[default]
    NotApplicable,
    Stents(Vec<StentRecord>),
}

impl StentListing {
    /// Previous stents render their sentinel as `[["N/A"]]`.
    pub fn previous_value(&self) -> Value {
        match self {
            StentListing::NotApplicable => Value::Array(vec![Value::Array(vec![Value::from(
                NOT_AVAILABLE,
            )])]),
            StentListing::Stents(stents) => rows_value(stents),
        }
    }

    /// Current stents render their sentinel as the bare `"N/A"`.
    pub fn current_value(&self) -> Value {
        match self {
            StentListing::NotApplicable => Value::from(NOT_AVAILABLE),
            StentListing::Stents(stents) => rows_value(stents),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            StentListing::NotApplicable => 0,
            StentListing::Stents(stents) => stents.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn rows_value(stents: &[StentRecord]) -> Value {
    Value::Array(
        stents
            .iter()
            .map(|stent| Value::Array(stent.display_row()))
            .collect(),
    )
}

/// The six complex-PCI criteria and their disjunction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ComplexPci {
    pub three_vessel_pci: PciValue,
    pub three_or_more_lesions_treated: PciValue,
    pub bifurcation_two_stents: PciValue,
    pub three_or_more_stents: PciValue,
    pub length_gt_60mm: PciValue,
    pub cto_pci: PciValue,
    pub complex_pci: PciValue,
}

impl ComplexPci {
    pub fn criteria(&self) -> [PciValue; 6] {
        [
            self.three_vessel_pci,
            self.three_or_more_lesions_treated,
            self.bifurcation_two_stents,
            self.three_or_more_stents,
            self.length_gt_60mm,
            self.cto_pci,
        ]
    }
}

/// One output row.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DerivedRecord {
    pub patient_number: String,
    pub sex: String,
    pub age: String,
    pub date_of_angiography: String,
    /// Parsed review object (empty on payload failure).
    pub review: Map<String, Value>,
    pub cag: bool,
    pub segment_codes_of_previous_stents: Vec<String>,
    pub segment_codes: Vec<SegmentAssignment>,
    pub vessel_disease: Vec<Territory>,
    pub anatomical_dx: AnatomicalDx,
    pub lesion_total_num: usize,
    pub lesion_b2c_num: usize,
    pub pci: bool,
    pub lengths_of_current_stents: Vec<f64>,
    pub segment_codes_of_current_stents: Vec<String>,
    pub segment_codes_of_deb_dcb: Vec<String>,
    pub segment_codes_of_thrombus_aspiration: Vec<String>,
    /// Reserved; no extraction rule exists yet.
    pub segment_codes_of_kissing: Vec<String>,
    pub complexity: ComplexPci,
    pub previous_stent: StentListing,
    pub current_stent: StentListing,
    /// Payload problems recovered while deriving this record.
    pub diagnostics: Vec<String>,
}

impl DerivedRecord {
    /// Stent lengths as JSON numbers (integral lengths without fraction).
    pub fn lengths_value(&self) -> Value {
        Value::Array(
            self.lengths_of_current_stents
                .iter()
                .copied()
                .map(number_value)
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn anatomical_dx_labels() {
        assert_eq!(AnatomicalDx::None.to_string(), "N/A");
        assert_eq!(AnatomicalDx::LeftMain { vessels: 0 }.to_string(), "LM");
        assert_eq!(AnatomicalDx::LeftMain { vessels: 2 }.to_string(), "LM+2VD");
        assert_eq!(AnatomicalDx::VesselDisease { vessels: 3 }.to_string(), "3VD");
    }

    #[test]
    fn stent_sentinels_differ_by_section() {
        assert_eq!(StentListing::NotApplicable.previous_value(), json!([["N/A"]]));
        assert_eq!(StentListing::NotApplicable.current_value(), json!("N/A"));
    }

    #[test]
    fn stent_rows_render_missing_values() {
        let listing = StentListing::Stents(vec![StentRecord {
            diameter_mm: Some(json!(3.5)),
            length_mm: Some(json!(38)),
            segment_code: Some(json!(["6"])),
            ..StentRecord::default()
        }]);
        assert_eq!(listing.current_value(), json!([["N/A", 3.5, 38, ["6"]]]));
        assert_eq!(listing.len(), 1);
    }

    #[test]
    fn stent_rows_keep_reported_values() {
        let stent: StentRecord =
            serde_json::from_value(json!({"device": "X", "diameter_mm": 3.0, "length_mm": 28}))
                .expect("stent");
        let listing = StentListing::Stents(vec![stent]);
        assert_eq!(listing.previous_value(), json!([["X", 3.0, 28, "N/A"]]));
        assert_eq!(
            listing.previous_value().to_string(),
            r#"[["X",3.0,28,"N/A"]]"#
        );
    }

    #[test]
    fn segment_assignment_serializes_as_pair() {
        let pairs = vec![
            SegmentAssignment::new("6", LesionType::C),
            SegmentAssignment::new("7", LesionType::B1),
        ];
        let json = serde_json::to_string(&pairs).expect("serialize");
        assert_eq!(json, r#"[["6","C"],["7","B1"]]"#);
    }
}
