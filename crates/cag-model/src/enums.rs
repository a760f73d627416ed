//! Type-safe enumerations for angiography classification.
//!
//! Territories, lesion types and PCI-conditional flags appear as plain
//! strings in the source reports; these enums give them an ordering and a
//! single canonical spelling.

use serde::{Serialize, Serializer};
use std::fmt;

/// Major coronary vessel territory.
///
/// Variant order is the display order used for vessel-disease lists:
/// LM, LAD, LCx, RCA.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Territory {
    /// Left main.
    Lm,
    /// Left anterior descending.
    Lad,
    /// Left circumflex.
    Lcx,
    /// Right coronary artery.
    Rca,
}

impl Territory {
    /// The three territories counted toward "N-vessel disease".
    pub const MAJOR: [Territory; 3] = [Territory::Rca, Territory::Lad, Territory::Lcx];

    /// Returns the canonical label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Territory::Lm => "LM",
            Territory::Lad => "LAD",
            Territory::Lcx => "LCx",
            Territory::Rca => "RCA",
        }
    }

    /// Returns true for RCA, LAD and LCx.
    pub fn is_major(&self) -> bool {
        !matches!(self, Territory::Lm)
    }
}

impl fmt::Display for Territory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Territory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Lesion severity type (ACC/AHA classification).
///
/// The derived ordering is the severity order `A < B1 < B2 < C`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LesionType {
    A,
    B1,
    B2,
    C,
}

impl LesionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LesionType::A => "A",
            LesionType::B1 => "B1",
            LesionType::B2 => "B2",
            LesionType::C => "C",
        }
    }

    /// Returns true for the complex types counted in `lesion_B2/C_num`.
    pub fn is_complex(&self) -> bool {
        matches!(self, LesionType::B2 | LesionType::C)
    }
}

impl fmt::Display for LesionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for LesionType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A flag that only has meaning when the encounter includes a PCI.
///
/// Encounters without a PCI section carry `NotApplicable` rather than
/// `false` for every PCI-conditional field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PciValue {
    #[default]
    NotApplicable,
    Flag(bool),
}

impl PciValue {
    /// Evaluates `criterion` only when `pci` is true.
    pub fn when_pci(pci: bool, criterion: impl FnOnce() -> bool) -> Self {
        if pci {
            PciValue::Flag(criterion())
        } else {
            PciValue::NotApplicable
        }
    }

    /// Returns true only for `Flag(true)`.
    pub fn is_true(&self) -> bool {
        matches!(self, PciValue::Flag(true))
    }
}

impl fmt::Display for PciValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PciValue::NotApplicable => f.write_str("N/A"),
            PciValue::Flag(true) => f.write_str("True"),
            PciValue::Flag(false) => f.write_str("False"),
        }
    }
}

impl Serialize for PciValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PciValue::NotApplicable => serializer.serialize_str("N/A"),
            PciValue::Flag(value) => serializer.serialize_bool(*value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lesion_type_severity_order() {
        assert!(LesionType::A < LesionType::B1);
        assert!(LesionType::B1 < LesionType::B2);
        assert!(LesionType::B2 < LesionType::C);
        assert_eq!(LesionType::B1.max(LesionType::C), LesionType::C);
    }

    #[test]
    fn territory_display_order() {
        let mut territories = vec![Territory::Rca, Territory::Lcx, Territory::Lm, Territory::Lad];
        territories.sort();
        let labels: Vec<_> = territories.iter().map(Territory::as_str).collect();
        assert_eq!(labels, vec!["LM", "LAD", "LCx", "RCA"]);
    }

    #[test]
    fn only_left_main_is_not_major() {
        let minor: Vec<_> = [Territory::Lm, Territory::Lad, Territory::Lcx, Territory::Rca]
            .into_iter()
            .filter(|t| !t.is_major())
            .collect();
        assert_eq!(minor, vec![Territory::Lm]);
        assert!(Territory::MAJOR.iter().all(Territory::is_major));
    }

    #[test]
    fn pci_value_skips_criterion_without_pci() {
        let value = PciValue::when_pci(false, || panic!("criterion must not run"));
        assert_eq!(value, PciValue::NotApplicable);
        assert_eq!(PciValue::when_pci(true, || true), PciValue::Flag(true));
    }

    #[test]
    fn pci_value_serializes() {
        let json = serde_json::to_string(&vec![
            PciValue::NotApplicable,
            PciValue::Flag(true),
            PciValue::Flag(false),
        ])
        .expect("serialize");
        assert_eq!(json, r#"["N/A",true,false]"#);
    }
}
