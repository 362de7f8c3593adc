//! DPD extract ingestion.
//!
//! This crate resolves extract paths for a product-status scope, reads the
//! headerless delimited files positionally against the schema catalog, and
//! collects the rows into an [`IngestionContext`] owned by one pipeline run.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use dpd_ingest::{IngestOptions, IngestionContext};
//! use dpd_model::{ProductStatus, SchemaCatalog};
//!
//! let mut ctx = IngestionContext::new(SchemaCatalog::dpd(), IngestOptions::default());
//! ctx.load_scope(Path::new("./allfiles"), ProductStatus::Marketed)?;
//! println!("{} drug products", ctx.primary().len());
//! ```

mod context;
mod discovery;
mod error;
mod reader;

// === Error Types ===
pub use error::{IngestError, Result};

// === Path Resolution ===
pub use discovery::{available_scopes, extract_path, scope_dir};

// === Table Loading ===
pub use reader::{IngestOptions, load_table};

// === Ingestion Context ===
pub use context::{IngestionContext, ScopeLoad};
