//! Error types for DPD extract ingestion.

use std::path::PathBuf;

use dpd_model::TableKind;
use thiserror::Error;

/// Errors that can occur while loading extract tables.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// A required extract is absent for the requested scope.
    #[error("extract file not found: {path}")]
    MissingFile { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Parsing Errors ===
    /// The delimited reader rejected the file.
    #[error("failed to parse extract {path}: {source}")]
    CsvParse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A row has fewer fields than the table schema.
    #[error("{path}:{line}: expected {expected} fields, found {found}")]
    SchemaMismatch {
        path: PathBuf,
        line: u64,
        expected: usize,
        found: usize,
    },

    // === Catalog Errors ===
    /// The schema catalog has no entry for a required table.
    #[error("table '{table}' is missing from the schema catalog")]
    UnknownTable { table: TableKind },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
