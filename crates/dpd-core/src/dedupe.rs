use dpd_model::JoinedDrugRecord;

/// Positions kept when collapsing adjacent items with equal keys.
///
/// Only contiguous runs collapse: each item is compared with the key of the
/// item before it, so `[A, A, B, A]` keeps positions `0, 2, 3`.
pub fn adjacent_unique_positions<'a, T, K, F>(items: &'a [T], mut key: F) -> Vec<usize>
where
    K: PartialEq,
    F: FnMut(&'a T) -> K,
{
    let mut kept = Vec::with_capacity(items.len());
    let mut previous: Option<K> = None;
    for (position, item) in items.iter().enumerate() {
        let current = key(item);
        if previous.as_ref() == Some(&current) {
            continue;
        }
        previous = Some(current);
        kept.push(position);
    }
    kept
}

/// Drops records repeating the `drug_identification_number` of the record
/// directly before them.
///
/// The extracts list duplicate DINs next to each other; repeats further apart
/// are not detected.
pub fn dedupe_adjacent(records: &[JoinedDrugRecord]) -> Vec<&JoinedDrugRecord> {
    adjacent_unique_positions(records, |record| record.drug_identification_number.as_str())
        .into_iter()
        .map(|position| &records[position])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_adjacent_duplicates_collapse() {
        let ids = ["A", "A", "B", "A"];
        assert_eq!(adjacent_unique_positions(&ids, |id| *id), vec![0, 2, 3]);
    }

    #[test]
    fn empty_input() {
        let ids: [&str; 0] = [];
        assert!(adjacent_unique_positions(&ids, |id| *id).is_empty());
    }

    #[test]
    fn dedupe_keeps_first_of_run() {
        let records: Vec<JoinedDrugRecord> = [("1", "A"), ("2", "A"), ("3", "B")]
            .into_iter()
            .map(|(code, din)| JoinedDrugRecord {
                drug_code: code.to_string(),
                drug_identification_number: din.to_string(),
                ..JoinedDrugRecord::default()
            })
            .collect();
        let kept: Vec<&str> = dedupe_adjacent(&records)
            .into_iter()
            .map(|record| record.drug_code.as_str())
            .collect();
        assert_eq!(kept, vec!["1", "3"]);
    }
}
