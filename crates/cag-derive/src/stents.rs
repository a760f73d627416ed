//! Stent, balloon and thrombus-aspiration extraction.
//!
//! All segment code lists produced here are deduplicated and sorted
//! lexicographically before anything else reads them.

use std::collections::BTreeSet;

use cag_model::{Review, SegmentTarget, StentListing, StentRecord};

/// Intervention data extracted from one review payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InterventionSummary {
    pub previous_stent_codes: Vec<String>,
    pub current_stent_codes: Vec<String>,
    /// One entry per length value of each current stent.
    pub current_stent_lengths: Vec<f64>,
    pub deb_dcb_codes: Vec<String>,
    pub thrombus_aspiration_codes: Vec<String>,
    /// Any intervention block flagged as a CTO procedure.
    pub cto: bool,
    pub previous_stent: StentListing,
    pub current_stent: StentListing,
}

impl InterventionSummary {
    /// Segments treated during this procedure: current stents, balloons and
    /// thrombus aspiration.
    pub fn treated_codes(&self) -> BTreeSet<&str> {
        self.current_stent_codes
            .iter()
            .chain(&self.deb_dcb_codes)
            .chain(&self.thrombus_aspiration_codes)
            .map(String::as_str)
            .collect()
    }

    /// Segments covered by any stent, previous or current.
    pub fn stented_codes(&self) -> BTreeSet<&str> {
        self.previous_stent_codes
            .iter()
            .chain(&self.current_stent_codes)
            .map(String::as_str)
            .collect()
    }
}

/// Extracts stent and device data.
///
/// `cag` guards the previous-stent display rows and `pci` the current-stent
/// rows; the segment code lists are extracted regardless.
pub fn extract_interventions(review: &Review, cag: bool, pci: bool) -> InterventionSummary {
    let angiography = review.coronary_angiography.as_ref();

    let deb_dcb = angiography
        .map(|a| a.deb_dcb.as_slice())
        .unwrap_or_default()
        .iter()
        .chain(review.pci_details.iter().flat_map(|p| &p.deb_dcb));
    let thrombus = angiography
        .map(|a| a.thrombus_aspiration.as_slice())
        .unwrap_or_default()
        .iter()
        .chain(review.pci_details.iter().flat_map(|p| &p.thrombus_aspiration));

    InterventionSummary {
        previous_stent_codes: stent_codes(&review.previous_stents_rearrange),
        current_stent_codes: stent_codes(&review.current_stents_rearrange),
        current_stent_lengths: review
            .current_stents_rearrange
            .iter()
            .flat_map(|stent| stent.length().entries())
            .collect(),
        deb_dcb_codes: target_codes(deb_dcb),
        thrombus_aspiration_codes: target_codes(thrombus),
        cto: review.pci_details.iter().any(|p| p.cto),
        previous_stent: listing(cag, &review.previous_stents_rearrange),
        current_stent: listing(
            pci,
            review
                .pci_details
                .first()
                .map(|p| p.stents.as_slice())
                .unwrap_or_default(),
        ),
    }
}

fn stent_codes(stents: &[StentRecord]) -> Vec<String> {
    let codes: Vec<String> = stents.iter().flat_map(StentRecord::segment_codes).collect();
    sorted_unique(&codes)
}

fn target_codes<'a>(targets: impl Iterator<Item = &'a SegmentTarget>) -> Vec<String> {
    sorted_unique(targets.flat_map(|t| &t.segment_codes))
}

fn listing(applies: bool, stents: &[StentRecord]) -> StentListing {
    if applies && !stents.is_empty() {
        StentListing::Stents(stents.to_vec())
    } else {
        StentListing::NotApplicable
    }
}

/// Deduplicates and sorts segment codes as strings.
pub fn sorted_unique<'a>(codes: impl IntoIterator<Item = &'a String>) -> Vec<String> {
    codes
        .into_iter()
        .map(String::as_str)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
