use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    /// A build was requested before any drug product rows were ingested.
    #[error("no drug product data loaded; ingest the extracts first")]
    NoData,
}

pub type Result<T> = std::result::Result<T, CoreError>;
