//! Segment code to vessel territory mapping.
//!
//! Codes follow the AHA/SYNTAX coronary segment numbering. The four sets are
//! disjoint; any other code has no territory and is ignored by vessel
//! aggregation.

use cag_model::Territory;

pub const RCA_SEGMENTS: [&str; 8] = ["1", "2", "3", "4", "16", "16a", "16b", "16c"];
pub const LAD_SEGMENTS: [&str; 7] = ["6", "7", "8", "9", "9a", "10", "10a"];
pub const LCX_SEGMENTS: [&str; 9] = ["11", "12", "12a", "12b", "13", "14", "14a", "14b", "15"];
pub const LM_SEGMENTS: [&str; 1] = ["5"];

/// Returns the territory a segment code belongs to.
pub fn territory_of(code: &str) -> Option<Territory> {
    if RCA_SEGMENTS.contains(&code) {
        Some(Territory::Rca)
    } else if LAD_SEGMENTS.contains(&code) {
        Some(Territory::Lad)
    } else if LCX_SEGMENTS.contains(&code) {
        Some(Territory::Lcx)
    } else if LM_SEGMENTS.contains(&code) {
        Some(Territory::Lm)
    } else {
        None
    }
}
