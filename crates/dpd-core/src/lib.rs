//! Core record building for the DPD builder.
//!
//! The pipeline stages live here:
//! 1. **Join**: fold subordinate extract rows onto `drug_product` rows
//! 2. **Normalize**: bilingual brand-name fallback
//! 3. **Select**: adjacent-DIN deduplication and category classification

pub mod classify;
pub mod dedupe;
pub mod error;
pub mod join;
pub mod normalize;
pub mod select;

pub use classify::CategoryClassifier;
pub use dedupe::{adjacent_unique_positions, dedupe_adjacent};
pub use error::{CoreError, Result};
pub use join::{
    IndexedTable, JoinStrategy, Joinable, LinearScanTable, build_records, fold_row, join_records,
    join_records_with_progress,
};
pub use normalize::{normalize_record, normalize_records};
pub use select::{Selection, select_records};
