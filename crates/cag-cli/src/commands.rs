use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{debug, info, info_span};

use cag_derive::derive_batch;
use cag_ingest::{convert_csv_to_jsonl, read_encounters};
use cag_report::{BatchStatistics, build_report_frame, write_report_csv};

use crate::logging::redact_value;
use crate::types::{AnalysisResult, AnalyzeRequest, ConversionResult};

pub fn run_analyze(request: &AnalyzeRequest) -> Result<AnalysisResult> {
    let span = info_span!("analyze", input = %request.input.display());
    let _guard = span.enter();

    // =========================================================================
    // Stage 1: Ingest
    // =========================================================================
    let start = Instant::now();
    let encounters = read_encounters(&request.input)
        .with_context(|| format!("read encounters from {}", request.input.display()))?;
    info!(
        encounters = encounters.len(),
        duration_ms = start.elapsed().as_millis(),
        "ingest complete"
    );

    // =========================================================================
    // Stage 2: Derive
    // =========================================================================
    let start = Instant::now();
    let records = derive_batch(&encounters, &request.derive);
    for record in records.iter().filter(|r| !r.diagnostics.is_empty()) {
        debug!(
            patient = redact_value(&record.patient_number),
            diagnostics = ?record.diagnostics,
            "encounter derived from empty review"
        );
    }
    let statistics = BatchStatistics::from_records(&records);
    info!(
        records = records.len(),
        cag = statistics.cag_encounters,
        pci = statistics.pci_encounters,
        complex_pci = statistics.complex_pci_encounters,
        duration_ms = start.elapsed().as_millis(),
        "derive complete"
    );

    // =========================================================================
    // Stage 3: Report
    // =========================================================================
    if let Some(output) = &request.output {
        let start = Instant::now();
        let mut frame = build_report_frame(&records)?;
        write_report_csv(&mut frame, output)?;
        info!(
            output = %output.display(),
            rows = frame.height(),
            duration_ms = start.elapsed().as_millis(),
            "report complete"
        );
    }

    Ok(AnalysisResult {
        input: request.input.clone(),
        output: request.output.clone(),
        records,
        statistics,
        report: request.report,
    })
}

pub fn run_convert(csv: &Path, jsonl: &Path) -> Result<ConversionResult> {
    let span = info_span!("convert", input = %csv.display());
    let _guard = span.enter();
    let start = Instant::now();
    let records = convert_csv_to_jsonl(csv, jsonl)
        .with_context(|| format!("convert {} to {}", csv.display(), jsonl.display()))?;
    info!(
        records,
        duration_ms = start.elapsed().as_millis(),
        "convert complete"
    );
    Ok(ConversionResult {
        input: csv.to_path_buf(),
        output: jsonl.to_path_buf(),
        records,
    })
}
