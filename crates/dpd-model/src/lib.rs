//! Data model for the Drug Product Database builder.
//!
//! Shared by the ingest, core and output crates: extract table schemas,
//! raw rows, joined drug records, scopes and output categories.

pub mod category;
pub mod drug;
pub mod error;
pub mod record;
pub mod schema;
pub mod status;

pub use category::{Category, ClassifierConfig};
pub use drug::{JoinedDrugRecord, OUTPUT_COLUMNS, OutputRow, flatten};
pub use error::{ModelError, Result};
pub use record::{DRUG_CODE, PLACEHOLDER_FIELDS, RawRecord};
pub use schema::{SchemaCatalog, TableKind, TableSchema};
pub use status::ProductStatus;
