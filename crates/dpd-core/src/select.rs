use tracing::info;

use dpd_model::{Category, JoinedDrugRecord};

use crate::classify::CategoryClassifier;
use crate::dedupe::dedupe_adjacent;

/// Records chosen for one output category, with the reasons others were dropped.
#[derive(Debug, Clone)]
pub struct Selection<'a> {
    pub category: Category,
    pub records: Vec<&'a JoinedDrugRecord>,
    pub duplicates: usize,
    pub excluded: usize,
}

impl Selection<'_> {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Deduplicates adjacent DINs, then keeps the records `category` includes.
///
/// Deduplication runs first, so a duplicate of a record that fails the
/// category check is still dropped as a duplicate.
pub fn select_records<'a>(
    records: &'a [JoinedDrugRecord],
    category: Category,
    classifier: &CategoryClassifier,
) -> Selection<'a> {
    let unique = dedupe_adjacent(records);
    let duplicates = records.len() - unique.len();
    let selected: Vec<&JoinedDrugRecord> = unique
        .into_iter()
        .filter(|record| classifier.includes(record, category))
        .collect();
    let excluded = records.len() - duplicates - selected.len();
    info!(
        category = %category,
        input = records.len(),
        selected = selected.len(),
        duplicates,
        excluded,
        "records selected"
    );
    Selection {
        category,
        records: selected,
        duplicates,
        excluded,
    }
}
