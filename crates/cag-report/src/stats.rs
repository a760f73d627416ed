//! Batch statistics over derived records.

use cag_model::DerivedRecord;

/// Counts across one analyzed batch.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BatchStatistics {
    pub encounters: usize,
    /// Encounters with an angiography section.
    pub cag_encounters: usize,
    /// Encounters with at least one intervention block.
    pub pci_encounters: usize,
    pub complex_pci_encounters: usize,
    /// Encounters whose review payload fell back to the empty object.
    pub fallback_encounters: usize,
    /// Significant lesions across angiography encounters.
    pub lesions: usize,
    /// B2 or C lesions across angiography encounters.
    pub complex_lesions: usize,
}

impl BatchStatistics {
    pub fn from_records(records: &[DerivedRecord]) -> Self {
        let mut stats = Self {
            encounters: records.len(),
            ..Self::default()
        };
        for record in records {
            if record.cag {
                stats.cag_encounters += 1;
                stats.lesions += record.lesion_total_num;
                stats.complex_lesions += record.lesion_b2c_num;
            }
            if record.pci {
                stats.pci_encounters += 1;
            }
            if record.complexity.complex_pci.is_true() {
                stats.complex_pci_encounters += 1;
            }
            if !record.diagnostics.is_empty() {
                stats.fallback_encounters += 1;
            }
        }
        stats
    }

    /// Percentage of B2/C lesions among all significant lesions in
    /// angiography encounters, `None` when there are no lesions.
    pub fn complex_lesion_percentage(&self) -> Option<f64> {
        if self.lesions == 0 {
            return None;
        }
        Some(100.0 * self.complex_lesions as f64 / self.lesions as f64)
    }

    /// Percentage to one decimal, `N/A` when undefined.
    pub fn complex_lesion_percentage_text(&self) -> String {
        self.complex_lesion_percentage()
            .map_or_else(|| "N/A".to_string(), |p| format!("{p:.1}%"))
    }
}
