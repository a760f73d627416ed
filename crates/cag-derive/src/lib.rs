//! Derivation pipeline for angiography/PCI encounter records.
//!
//! Each encounter is processed independently:
//!
//! - **payload**: fence stripping, JSON parsing and empty-object fallback
//! - **taxonomy**: segment code to vessel territory
//! - **lesion**: lesion type scoring and per-segment merge
//! - **vessel**: diseased territories and anatomical diagnosis
//! - **stents**: stent, balloon and thrombus-aspiration extraction
//! - **complexity**: the six complex-PCI criteria
//! - **assemble**: per-encounter driver and batch map

pub mod assemble;
pub mod complexity;
pub mod error;
pub mod lesion;
pub mod payload;
pub mod stents;
pub mod taxonomy;
pub mod vessel;

pub use assemble::{derive_batch, derive_encounter};
pub use complexity::{
    BIFURCATION_JUNCTIONS, check_bifurcation_two_stents, check_length_gt_60mm,
    check_three_or_more_lesions_treated, check_three_or_more_stents, check_three_vessel_pci,
    determine_complex_pci, evaluate_complex_pci,
};
pub use error::PayloadError;
pub use lesion::{classify_lesion, extract_segment_types, merge_segment_types};
pub use payload::{ParsedPayload, parse_payload, strip_code_fences};
pub use stents::{InterventionSummary, extract_interventions};
pub use taxonomy::territory_of;
pub use vessel::{categorize_vessel_disease, determine_anatomical_dx};
