//! Diseased vessel territories and the anatomical diagnosis label.

use std::collections::BTreeSet;

use cag_model::{AnatomicalDx, Territory};

use crate::taxonomy::territory_of;

/// Collects the territories touched by lesion and previous-stent segments.
///
/// The set iterates in display order (LM, LAD, LCx, RCA). Codes without a
/// territory are dropped.
pub fn categorize_vessel_disease<A, B>(
    segment_codes: &[A],
    previous_stent_codes: &[B],
) -> BTreeSet<Territory>
where
    A: AsRef<str>,
    B: AsRef<str>,
{
    segment_codes
        .iter()
        .map(AsRef::<str>::as_ref)
        .chain(previous_stent_codes.iter().map(AsRef::<str>::as_ref))
        .filter_map(territory_of)
        .collect()
}

/// Reduces a territory set to `LM`, `LM+nVD`, `nVD` or `N/A`.
///
/// LM is never counted in `n`.
pub fn determine_anatomical_dx(territories: &BTreeSet<Territory>) -> AnatomicalDx {
    let vessels = territories.iter().filter(|t| t.is_major()).count();
    if territories.contains(&Territory::Lm) {
        AnatomicalDx::LeftMain { vessels }
    } else if vessels > 0 {
        AnatomicalDx::VesselDisease { vessels }
    } else {
        AnatomicalDx::None
    }
}
