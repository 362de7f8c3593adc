use std::path::PathBuf;

use dpd_model::{Category, ProductStatus};

/// Result of ingesting one scope and snapshotting its joined records.
#[derive(Debug, Clone)]
pub struct IngestSummary {
    pub status: ProductStatus,
    pub rows_loaded: usize,
    pub records: usize,
    pub snapshot: PathBuf,
}

/// Where the records of one output run came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordSource {
    Snapshot,
    Extracts,
}

#[derive(Debug, Clone)]
pub struct OutputSummary {
    pub status: ProductStatus,
    pub category: Category,
    pub source: RecordSource,
    pub input: usize,
    pub selected: usize,
    pub duplicates: usize,
    pub excluded: usize,
    pub database: PathBuf,
    pub lookup: PathBuf,
    pub curated: Option<PathBuf>,
    pub curated_entries: usize,
}

/// A scope whose run failed; the other scopes of the run are unaffected.
#[derive(Debug)]
pub struct ScopeFailure {
    pub status: ProductStatus,
    pub error: anyhow::Error,
}

/// Per-scope results of a multi-scope run.
#[derive(Debug)]
pub struct ScopeReport<T> {
    pub completed: Vec<T>,
    pub failures: Vec<ScopeFailure>,
}

impl<T> Default for ScopeReport<T> {
    fn default() -> Self {
        Self {
            completed: Vec::new(),
            failures: Vec::new(),
        }
    }
}

impl<T> ScopeReport<T> {
    /// Runs `task` for every status in order, recording each outcome.
    pub fn collect<F>(statuses: &[ProductStatus], mut task: F) -> Self
    where
        F: FnMut(usize, ProductStatus) -> anyhow::Result<T>,
    {
        let mut report = Self::default();
        for (index, &status) in statuses.iter().enumerate() {
            match task(index, status) {
                Ok(value) => report.completed.push(value),
                Err(error) => {
                    tracing::error!(scope = %status, error = %format!("{error:#}"), "scope failed");
                    report.failures.push(ScopeFailure { status, error });
                }
            }
        }
        report
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}
