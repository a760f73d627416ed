//! Encounter ingestion.
//!
//! - **jsonl**: one encounter object per line
//! - **convert**: reshape a flat CSV export into the JSONL input format

pub mod convert;
pub mod error;
pub mod jsonl;

pub use convert::{convert_csv_to_jsonl, csv_cell_value, write_jsonl_from_csv};
pub use error::{IngestError, Result};
pub use jsonl::{parse_encounters, read_encounters};
