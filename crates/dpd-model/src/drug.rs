//! The denormalized per-drug record produced by the join stage.

use serde::{Deserialize, Serialize};

use crate::record::RawRecord;

/// One `drug_product` row with every subordinate table folded in.
///
/// List fields hold one entry per matching subordinate row, in the order the
/// rows appear in the subordinate extract.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JoinedDrugRecord {
    pub drug_code: String,
    pub product_categorization: String,
    pub class: String,
    pub drug_identification_number: String,
    pub brand_name: String,
    pub descriptor: String,
    pub pediatric_flag: String,
    pub accession_number: String,
    pub number_of_ais: String,
    pub last_update_date: String,
    pub ai_group_no: String,
    pub class_f: String,
    pub brand_name_f: String,
    pub descriptor_f: String,

    /// Current status; only set from rows flagged `current_status_flag = Y`.
    pub status: String,
    pub status_f: String,

    pub ingredients: Vec<String>,
    pub ingredients_f: Vec<String>,
    pub company_name: Vec<String>,
    pub company_code: Vec<String>,
    pub dosage_form: Vec<String>,
    pub dosage_form_f: Vec<String>,
    pub packaging: Vec<String>,
    pub packaging_f: Vec<String>,
    pub upc: Vec<String>,
    pub pharmaceutical_std: Vec<String>,
    pub admin_route: Vec<String>,
    pub admin_route_f: Vec<String>,
    pub schedule: Vec<String>,
    pub schedule_f: Vec<String>,
    pub tc_atc: Vec<String>,
    pub tc_atc_f: Vec<String>,
    pub tc_ahfs: Vec<String>,
    pub tc_ahfs_f: Vec<String>,
    pub vet_species: Vec<String>,
    pub vet_species_f: Vec<String>,
}

impl JoinedDrugRecord {
    /// Seeds a record from a primary-table row; list fields start empty.
    pub fn from_primary(row: &RawRecord) -> Self {
        Self {
            drug_code: row.field("drug_code").to_string(),
            product_categorization: row.field("product_categorization").to_string(),
            class: row.field("class").to_string(),
            drug_identification_number: row.field("drug_identification_number").to_string(),
            brand_name: row.field("brand_name").to_string(),
            descriptor: row.field("descriptor").to_string(),
            pediatric_flag: row.field("pediatric_flag").to_string(),
            accession_number: row.field("accession_number").to_string(),
            number_of_ais: row.field("number_of_ais").to_string(),
            last_update_date: row.field("last_update_date").to_string(),
            ai_group_no: row.field("ai_group_no").to_string(),
            class_f: row.field("class_f").to_string(),
            brand_name_f: row.field("brand_name_f").to_string(),
            descriptor_f: row.field("descriptor_f").to_string(),
            ..Self::default()
        }
    }
}

/// Comma-joins a list field the way the relational output flattens it.
pub fn flatten(values: &[String]) -> String {
    values.join(",")
}

/// Column names of the `drugs` output table, in insertion order.
pub const OUTPUT_COLUMNS: [&str; 25] = [
    "id",
    "drug_code",
    "status",
    "status_f",
    "company_name",
    "company_code",
    "ph_std",
    "packaging",
    "packaging_f",
    "upc",
    "category",
    "class",
    "class_f",
    "brand_name",
    "brand_name_f",
    "ingredients",
    "ingredients_f",
    "dosage_form",
    "dosage_form_f",
    "admin_route",
    "admin_route_f",
    "schedule",
    "schedule_f",
    "descriptor",
    "descriptor_f",
];

/// Flat, text-only projection of a [`JoinedDrugRecord`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRow {
    pub id: String,
    pub drug_code: String,
    pub status: String,
    pub status_f: String,
    pub company_name: String,
    pub company_code: String,
    pub ph_std: String,
    pub packaging: String,
    pub packaging_f: String,
    pub upc: String,
    pub category: String,
    pub class: String,
    pub class_f: String,
    pub brand_name: String,
    pub brand_name_f: String,
    pub ingredients: String,
    pub ingredients_f: String,
    pub dosage_form: String,
    pub dosage_form_f: String,
    pub admin_route: String,
    pub admin_route_f: String,
    pub schedule: String,
    pub schedule_f: String,
    pub descriptor: String,
    pub descriptor_f: String,
}

impl OutputRow {
    /// Values in [`OUTPUT_COLUMNS`] order.
    pub fn values(&self) -> [&str; 25] {
        [
            self.id.as_str(),
            self.drug_code.as_str(),
            self.status.as_str(),
            self.status_f.as_str(),
            self.company_name.as_str(),
            self.company_code.as_str(),
            self.ph_std.as_str(),
            self.packaging.as_str(),
            self.packaging_f.as_str(),
            self.upc.as_str(),
            self.category.as_str(),
            self.class.as_str(),
            self.class_f.as_str(),
            self.brand_name.as_str(),
            self.brand_name_f.as_str(),
            self.ingredients.as_str(),
            self.ingredients_f.as_str(),
            self.dosage_form.as_str(),
            self.dosage_form_f.as_str(),
            self.admin_route.as_str(),
            self.admin_route_f.as_str(),
            self.schedule.as_str(),
            self.schedule_f.as_str(),
            self.descriptor.as_str(),
            self.descriptor_f.as_str(),
        ]
    }
}

impl From<&JoinedDrugRecord> for OutputRow {
    fn from(record: &JoinedDrugRecord) -> Self {
        Self {
            id: record.drug_identification_number.clone(),
            drug_code: record.drug_code.clone(),
            status: record.status.clone(),
            status_f: record.status_f.clone(),
            company_name: flatten(&record.company_name),
            company_code: flatten(&record.company_code),
            ph_std: flatten(&record.pharmaceutical_std),
            packaging: flatten(&record.packaging),
            packaging_f: flatten(&record.packaging_f),
            upc: flatten(&record.upc),
            category: record.product_categorization.clone(),
            class: record.class.clone(),
            class_f: record.class_f.clone(),
            brand_name: record.brand_name.clone(),
            brand_name_f: record.brand_name_f.clone(),
            ingredients: flatten(&record.ingredients),
            ingredients_f: flatten(&record.ingredients_f),
            dosage_form: flatten(&record.dosage_form),
            dosage_form_f: flatten(&record.dosage_form_f),
            admin_route: flatten(&record.admin_route),
            admin_route_f: flatten(&record.admin_route_f),
            schedule: flatten(&record.schedule),
            schedule_f: flatten(&record.schedule_f),
            descriptor: record.descriptor.clone(),
            descriptor_f: record.descriptor_f.clone(),
        }
    }
}
