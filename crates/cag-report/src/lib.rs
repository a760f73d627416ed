//! Report generation for derived encounter records.
//!
//! - **frame**: one polars row per encounter with the fixed output columns
//! - **csv**: CSV export of the report frame
//! - **stats**: batch counts and the B2/C lesion percentage

pub mod csv;
pub mod frame;
pub mod options;
pub mod stats;

pub use csv::{write_report_csv, write_report_csv_to};
pub use frame::{build_report_frame, cell_text};
pub use options::ReportOptions;
pub use stats::BatchStatistics;
