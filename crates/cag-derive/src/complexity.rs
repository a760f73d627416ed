//! Complex PCI criteria.
//!
//! Each criterion is `N/A` when the encounter has no PCI. An encounter is a
//! complex PCI when any one criterion holds.

use std::collections::BTreeSet;

use cag_model::{ComplexPci, PciValue, Territory};

use crate::stents::InterventionSummary;
use crate::taxonomy::territory_of;

/// Bifurcation junctions: main vessel, continuation and side branch.
pub const BIFURCATION_JUNCTIONS: [[&str; 3]; 7] = [
    ["5", "6", "11"],
    ["6", "7", "9"],
    ["7", "8", "10"],
    ["11", "13", "12a"],
    ["13", "14", "14a"],
    ["3", "4", "16"],
    ["13", "14", "15"],
];

/// Minimum number of stent length entries for a multi-stent procedure.
pub const MIN_STENT_COUNT: usize = 3;
/// Minimum number of distinct treated segments.
pub const MIN_TREATED_LESIONS: usize = 3;
/// Total stent length threshold in millimeters.
pub const LONG_STENT_LENGTH_MM: f64 = 60.0;

/// Treated segments reach all of RCA, LAD and LCx.
pub fn check_three_vessel_pci(treated: &BTreeSet<&str>) -> bool {
    let territories: BTreeSet<Territory> = treated.iter().filter_map(|c| territory_of(c)).collect();
    Territory::MAJOR.iter().all(|t| territories.contains(t))
}

pub fn check_three_or_more_lesions_treated(treated: &BTreeSet<&str>) -> bool {
    treated.len() >= MIN_TREATED_LESIONS
}

/// Stented segments cover every code of at least one bifurcation junction.
pub fn check_bifurcation_two_stents(stented: &BTreeSet<&str>) -> bool {
    BIFURCATION_JUNCTIONS
        .iter()
        .any(|junction| junction.iter().all(|code| stented.contains(code)))
}

/// Counts length entries, not distinct stents.
pub fn check_three_or_more_stents(lengths: &[f64]) -> bool {
    lengths.len() >= MIN_STENT_COUNT
}

pub fn check_length_gt_60mm(lengths: &[f64]) -> bool {
    lengths.iter().sum::<f64>() >= LONG_STENT_LENGTH_MM
}

/// `N/A` without PCI, otherwise true if any criterion is true.
pub fn determine_complex_pci(pci: bool, criteria: &[PciValue]) -> PciValue {
    PciValue::when_pci(pci, || criteria.iter().any(PciValue::is_true))
}

/// Evaluates all six criteria and their disjunction.
pub fn evaluate_complex_pci(pci: bool, summary: &InterventionSummary) -> ComplexPci {
    let treated = summary.treated_codes();
    let stented = summary.stented_codes();
    let lengths = summary.current_stent_lengths.as_slice();

    let mut complexity = ComplexPci {
        three_vessel_pci: PciValue::when_pci(pci, || check_three_vessel_pci(&treated)),
        three_or_more_lesions_treated: PciValue::when_pci(pci, || {
            check_three_or_more_lesions_treated(&treated)
        }),
        bifurcation_two_stents: PciValue::when_pci(pci, || check_bifurcation_two_stents(&stented)),
        three_or_more_stents: PciValue::when_pci(pci, || check_three_or_more_stents(lengths)),
        length_gt_60mm: PciValue::when_pci(pci, || check_length_gt_60mm(lengths)),
        cto_pci: PciValue::when_pci(pci, || summary.cto),
        complex_pci: PciValue::NotApplicable,
    };
    complexity.complex_pci = determine_complex_pci(pci, &complexity.criteria());
    complexity
}
