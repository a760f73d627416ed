use std::path::PathBuf;

use cag_model::{DeriveOptions, DerivedRecord};
use cag_report::{BatchStatistics, ReportOptions};

/// Inputs of one `analyze` run.
#[derive(Debug, Clone)]
pub struct AnalyzeRequest {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub derive: DeriveOptions,
    pub report: ReportOptions,
}

#[derive(Debug)]
pub struct AnalysisResult {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub records: Vec<DerivedRecord>,
    pub statistics: BatchStatistics,
    pub report: ReportOptions,
}

#[derive(Debug)]
pub struct ConversionResult {
    pub input: PathBuf,
    pub output: PathBuf,
    pub records: usize,
}
