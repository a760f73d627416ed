//! Error types for encounter ingestion.

use std::path::PathBuf;

use cag_model::CagError;
use thiserror::Error;

/// Errors that can occur while loading or converting encounter files.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Input file not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to create or write file.
    #[error("failed to write file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write to an output stream.
    #[error("failed to write output: {0}")]
    Output(#[source] std::io::Error),

    /// Failed to read from an input stream.
    #[error("failed to read line {line}: {source}")]
    LineRead {
        line: usize,
        #[source]
        source: std::io::Error,
    },

    // === Record Errors ===
    /// A line is not valid JSON.
    #[error("line {line}: invalid JSON: {source}")]
    InvalidJson {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    /// A line is valid JSON but not an object.
    #[error("line {line}: expected a JSON object")]
    NotAnObject { line: usize },

    /// A record lacks a required field.
    #[error(transparent)]
    Record(#[from] CagError),

    // === CSV Errors ===
    /// Failed to parse CSV.
    #[error("failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    /// Failed to serialize an output record.
    #[error("failed to serialize record {row}: {source}")]
    Serialize {
        row: usize,
        #[source]
        source: serde_json::Error,
    },
}

impl IngestError {
    pub(crate) fn open(path: &std::path::Path, err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: err,
            }
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
