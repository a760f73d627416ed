//! CSV export of the report frame.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use polars::prelude::{CsvWriter, DataFrame, SerWriter};
use tracing::info;

/// Writes the report frame to `output_path`, creating or truncating it.
pub fn write_report_csv(frame: &mut DataFrame, output_path: &Path) -> Result<()> {
    let file =
        File::create(output_path).with_context(|| format!("create {}", output_path.display()))?;
    let mut writer = BufWriter::new(file);
    write_report_csv_to(frame, &mut writer)
        .with_context(|| format!("write {}", output_path.display()))?;
    writer
        .flush()
        .with_context(|| format!("flush {}", output_path.display()))?;
    info!(
        output = %output_path.display(),
        rows = frame.height(),
        "report written"
    );
    Ok(())
}

/// Writes the report frame as CSV with a header row.
pub fn write_report_csv_to<W: Write>(frame: &mut DataFrame, writer: W) -> Result<()> {
    CsvWriter::new(writer)
        .include_header(true)
        .with_separator(b',')
        .finish(frame)
        .context("serialize report csv")
}
