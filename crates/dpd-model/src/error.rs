use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("unknown product status: {0}")]
    UnknownStatus(String),
    #[error("unknown drug category: {0}")]
    UnknownCategory(String),
    #[error("unknown table: {0}")]
    UnknownTable(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
