//! The curated `drugs.json` sample.
//!
//! A reproducible sample: every record whose position in the selection is
//! 9 modulo 10 and that lists an `ORAL` route, sorted by brand name.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use dpd_model::{JoinedDrugRecord, flatten};

use crate::error::Result;
use crate::lookup::write_json;

pub const CURATED_FILE_NAME: &str = "drugs.json";
const SAMPLE_STRIDE: usize = 10;
const ORAL_ROUTE: &str = "ORAL";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CuratedDrug {
    pub id: String,
    pub brand_name: String,
    pub ingredients: String,
    pub dosage_form: String,
    pub admin_route: String,
    pub company: String,
    pub descriptor: String,
}

impl From<&JoinedDrugRecord> for CuratedDrug {
    fn from(record: &JoinedDrugRecord) -> Self {
        Self {
            id: record.drug_identification_number.clone(),
            brand_name: record.brand_name.clone(),
            ingredients: flatten(&record.ingredients),
            dosage_form: flatten(&record.dosage_form),
            admin_route: flatten(&record.admin_route),
            company: flatten(&record.company_name),
            descriptor: record.descriptor.clone(),
        }
    }
}

pub fn curated_subset(records: &[&JoinedDrugRecord]) -> Vec<CuratedDrug> {
    let mut curated: Vec<CuratedDrug> = records
        .iter()
        .enumerate()
        .filter(|(index, record)| {
            index % SAMPLE_STRIDE == SAMPLE_STRIDE - 1
                && record.admin_route.iter().any(|route| route == ORAL_ROUTE)
        })
        .map(|(_, record)| CuratedDrug::from(*record))
        .collect();
    curated.sort_by(|a, b| a.brand_name.cmp(&b.brand_name));
    curated
}

pub fn write_curated(path: &Path, records: &[&JoinedDrugRecord]) -> Result<usize> {
    let curated = curated_subset(records);
    write_json(path, &curated)?;
    info!(path = %path.display(), entries = curated.len(), "curated subset written");
    Ok(curated.len())
}
