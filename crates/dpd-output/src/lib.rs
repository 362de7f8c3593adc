//! Output generation for the DPD builder.
//!
//! - [`SnapshotStore`]: the full joined record set as versioned JSON
//! - [`write_database`]: the `drugs` SQLite table
//! - [`write_lookup`]: id-keyed JSON document
//! - [`write_curated`]: the sampled `drugs.json` subset

pub mod curated;
pub mod database;
pub mod error;
pub mod lookup;
pub mod paths;
pub mod snapshot;

pub use curated::{CURATED_FILE_NAME, CuratedDrug, curated_subset, write_curated};
pub use database::{TABLE_NAME, create_table_sql, insert_statement, sql_quote, write_database};
pub use error::{OutputError, Result};
pub use lookup::{lookup_map, write_lookup};
pub use paths::{GENERATED_EXTENSIONS, OutputPaths, clean_outputs};
pub use snapshot::{DEFAULT_SNAPSHOT_PREFIX, SnapshotStore};
