use dpd_model::JoinedDrugRecord;

/// Post-join cleanup of a single record.
///
/// A blank French brand name falls back to the English one. Placeholder
/// list fields (`packaging`, `packaging_f`, `upc`, `pharmaceutical_std`) are
/// already empty lists when no extract row populated them.
pub fn normalize_record(record: &mut JoinedDrugRecord) {
    if record.brand_name_f.is_empty() {
        record.brand_name_f = record.brand_name.clone();
    }
}

pub fn normalize_records(records: &mut [JoinedDrugRecord]) {
    records.iter_mut().for_each(normalize_record);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_localized_brand_falls_back() {
        let mut record = JoinedDrugRecord {
            brand_name: "TYLENOL".to_string(),
            ..JoinedDrugRecord::default()
        };
        normalize_record(&mut record);
        assert_eq!(record.brand_name_f, "TYLENOL");
    }

    #[test]
    fn localized_brand_is_kept() {
        let mut record = JoinedDrugRecord {
            brand_name: "COLD TABLETS".to_string(),
            brand_name_f: "COMPRIMES CONTRE LE RHUME".to_string(),
            ..JoinedDrugRecord::default()
        };
        normalize_record(&mut record);
        assert_eq!(record.brand_name_f, "COMPRIMES CONTRE LE RHUME");
        assert!(record.packaging.is_empty());
        assert!(record.pharmaceutical_std.is_empty());
    }
}
