//! Lesion type scoring and per-segment merge.

use std::collections::BTreeMap;

use cag_model::{Angiography, LesionType, SegmentAssignment};

/// Characteristics that make a lesion type C.
const TYPE_C_TAGS: [&str; 3] = ["diffuse", "total occlusion", "CTO"];
/// Characteristics that make a lesion type B2 on their own.
const TYPE_B2_TAGS: [&str; 2] = ["subtotal occlusion", "ISR"];
/// Type B characteristics: one gives B1, two or more give B2.
const TYPE_B_TAGS: [&str; 8] = [
    "tubular",
    "eccentric",
    "calcification",
    "moderate calcification",
    "severe calcification",
    "os",
    "bifurcation",
    "irregular",
];

/// Minimum luminal narrowing for a lesion to count.
pub const SIGNIFICANT_NARROWING: f64 = 50.0;

/// Classifies a lesion from its characteristic tags.
///
/// First match wins: any type C tag, then any B2 tag, then the count of
/// distinct type B tags.
pub fn classify_lesion<S: AsRef<str>>(characteristics: &[S]) -> LesionType {
    let has_any = |set: &[&str]| characteristics.iter().any(|tag| set.contains(&tag.as_ref()));

    if has_any(&TYPE_C_TAGS) {
        return LesionType::C;
    }
    if has_any(&TYPE_B2_TAGS) {
        return LesionType::B2;
    }
    let type_b = TYPE_B_TAGS
        .iter()
        .filter(|tag| characteristics.iter().any(|c| c.as_ref() == **tag))
        .count();
    match type_b {
        0 => LesionType::A,
        1 => LesionType::B1,
        _ => LesionType::B2,
    }
}

/// Returns true when a narrowing percentage is present and at least 50%.
pub fn is_significant(narrowing_percentage: Option<f64>) -> bool {
    narrowing_percentage.is_some_and(|value| value >= SIGNIFICANT_NARROWING)
}

/// Keeps the most severe type for each segment code.
///
/// Codes keep the order in which they were first assigned.
pub fn merge_segment_types<I>(assignments: I) -> Vec<SegmentAssignment>
where
    I: IntoIterator<Item = SegmentAssignment>,
{
    let mut merged: Vec<SegmentAssignment> = Vec::new();
    let mut positions: BTreeMap<String, usize> = BTreeMap::new();
    for assignment in assignments {
        match positions.get(&assignment.code) {
            Some(&index) => {
                let current = &mut merged[index].lesion_type;
                *current = (*current).max(assignment.lesion_type);
            }
            None => {
                positions.insert(assignment.code.clone(), merged.len());
                merged.push(assignment);
            }
        }
    }
    merged
}

/// Types every segment of every significant lesion, then merges per code.
pub fn extract_segment_types(angiography: Option<&Angiography>) -> Vec<SegmentAssignment> {
    let Some(angiography) = angiography else {
        return Vec::new();
    };
    let assignments = angiography
        .lesions
        .iter()
        .filter(|lesion| is_significant(lesion.narrowing_percentage))
        .flat_map(|lesion| {
            let lesion_type = classify_lesion(&lesion.characteristics);
            lesion
                .segment_codes
                .iter()
                .map(move |code| SegmentAssignment::new(code.clone(), lesion_type))
        });
    merge_segment_types(assignments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cag_model::Lesion;

    fn lesion(codes: &[&str], narrowing: Option<f64>, tags: &[&str]) -> Lesion {
        Lesion {
            segment_codes: codes.iter().map(|c| (*c).to_string()).collect(),
            narrowing_percentage: narrowing,
            characteristics: tags.iter().map(|t| (*t).to_string()).collect(),
        }
    }

    #[test]
    fn type_c_wins_over_type_b_tags() {
        assert_eq!(
            classify_lesion(&["diffuse", "tubular", "eccentric"]),
            LesionType::C
        );
        assert_eq!(classify_lesion(&["CTO"]), LesionType::C);
        assert_eq!(classify_lesion(&["total occlusion"]), LesionType::C);
    }

    #[test]
    fn type_b2_tags() {
        assert_eq!(classify_lesion(&["ISR"]), LesionType::B2);
        assert_eq!(classify_lesion(&["subtotal occlusion", "os"]), LesionType::B2);
        assert_eq!(classify_lesion(&["tubular", "eccentric"]), LesionType::B2);
    }

    #[test]
    fn type_b_count() {
        assert_eq!(classify_lesion(&["tubular"]), LesionType::B1);
        assert_eq!(classify_lesion(&["tubular", "thrombus"]), LesionType::B1);
        assert_eq!(classify_lesion::<&str>(&[]), LesionType::A);
        assert_eq!(classify_lesion(&["thrombus"]), LesionType::A);
    }

    #[test]
    fn repeated_tag_counts_once() {
        assert_eq!(classify_lesion(&["tubular", "tubular"]), LesionType::B1);
    }

    #[test]
    fn merge_keeps_most_severe() {
        let merged = merge_segment_types(vec![
            SegmentAssignment::new("6", LesionType::B1),
            SegmentAssignment::new("7", LesionType::A),
            SegmentAssignment::new("6", LesionType::C),
            SegmentAssignment::new("7", LesionType::A),
        ]);
        assert_eq!(
            merged,
            vec![
                SegmentAssignment::new("6", LesionType::C),
                SegmentAssignment::new("7", LesionType::A),
            ]
        );
    }

    #[test]
    fn merge_is_idempotent() {
        let once = merge_segment_types(vec![
            SegmentAssignment::new("6", LesionType::B1),
            SegmentAssignment::new("6", LesionType::C),
            SegmentAssignment::new("11", LesionType::B2),
        ]);
        let twice = merge_segment_types(once.iter().cloned().chain(once.iter().cloned()));
        assert_eq!(once, twice);
    }

    #[test]
    fn narrowing_threshold() {
        assert!(!is_significant(Some(40.0)));
        assert!(!is_significant(None));
        assert!(is_significant(Some(50.0)));
        assert!(is_significant(Some(99.0)));
    }

    #[test]
    fn extraction_skips_insignificant_lesions() {
        let angiography = Angiography {
            lesions: vec![
                lesion(&["6"], Some(40.0), &["diffuse"]),
                lesion(&["7"], None, &[]),
                lesion(&["11", "13"], Some(50.0), &["tubular"]),
                lesion(&["13"], Some(90.0), &["CTO"]),
            ],
            ..Angiography::default()
        };
        let segments = extract_segment_types(Some(&angiography));
        assert_eq!(
            segments,
            vec![
                SegmentAssignment::new("11", LesionType::B1),
                SegmentAssignment::new("13", LesionType::C),
            ]
        );
    }

    #[test]
    fn extraction_without_angiography_is_empty() {
        assert!(extract_segment_types(None).is_empty());
    }
}
