pub mod derived;
pub mod encounter;
pub mod enums;
pub mod error;
pub mod options;
pub mod review;

pub use derived::{AnatomicalDx, COLUMN_NAMES, ComplexPci, DerivedRecord, SegmentAssignment, StentListing};
pub use encounter::Encounter;
pub use enums::{LesionType, PciValue, Territory};
pub use error::{CagError, Result};
pub use options::DeriveOptions;
pub use review::{Angiography, Lesion, Measure, PciDetail, Review, SegmentTarget, StentRecord, is_truthy};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pci_value_renders_sentinel() {
        assert_eq!(PciValue::NotApplicable.to_string(), "N/A");
        assert_eq!(PciValue::Flag(true).to_string(), "True");
        assert_eq!(PciValue::Flag(false).to_string(), "False");
    }

    #[test]
    fn derived_record_column_count() {
        assert_eq!(COLUMN_NAMES.len(), 27);
        assert_eq!(COLUMN_NAMES[0], "patient_number");
        assert_eq!(COLUMN_NAMES[26], "current_stent");
    }
}
