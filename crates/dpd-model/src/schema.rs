//! Fixed positional schemas of the DPD extract tables.
//!
//! Extracts carry no header row, so each table is described by the ordered
//! list of its field names. One [`SchemaCatalog`] drives the loader for every
//! product-status scope.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Logical tables of the Drug Product Database extract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableKind {
    ActiveIngredients,
    Companies,
    DrugProduct,
    ProductStatus,
    DosageForm,
    Packaging,
    PharmaceuticalStandard,
    RouteOfAdministration,
    Schedule,
    TherapeuticClass,
    VeterinarySpecies,
}

impl TableKind {
    pub const ALL: [TableKind; 11] = [
        TableKind::ActiveIngredients,
        TableKind::Companies,
        TableKind::DrugProduct,
        TableKind::ProductStatus,
        TableKind::DosageForm,
        TableKind::Packaging,
        TableKind::PharmaceuticalStandard,
        TableKind::RouteOfAdministration,
        TableKind::Schedule,
        TableKind::TherapeuticClass,
        TableKind::VeterinarySpecies,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TableKind::ActiveIngredients => "active_ingredients",
            TableKind::Companies => "companies",
            TableKind::DrugProduct => "drug_product",
            TableKind::ProductStatus => "product_status",
            TableKind::DosageForm => "dosage_form",
            TableKind::Packaging => "packaging",
            TableKind::PharmaceuticalStandard => "pharmaceutical_standard",
            TableKind::RouteOfAdministration => "route_of_administration",
            TableKind::Schedule => "schedule",
            TableKind::TherapeuticClass => "therapeutic_class",
            TableKind::VeterinarySpecies => "veterinary_species",
        }
    }

    /// The primary table every other table is joined onto.
    pub fn is_primary(self) -> bool {
        self == TableKind::DrugProduct
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TableKind {
    type Err = ModelError;

    fn from_str(value: &str) -> Result<Self> {
        let key = value.trim();
        TableKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(key))
            .ok_or_else(|| ModelError::UnknownTable(value.to_string()))
    }
}

/// Field layout and source filename stem of one extract table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    pub kind: TableKind,
    /// Filename stem, e.g. `ingred` for `ingred.txt` / `ingred_ap.txt`.
    pub stem: String,
    pub fields: Vec<String>,
}

impl TableSchema {
    pub fn new(kind: TableKind, stem: &str, fields: &[&str]) -> Self {
        Self {
            kind,
            stem: stem.to_string(),
            fields: fields.iter().map(|field| (*field).to_string()).collect(),
        }
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }
}

/// The set of tables loaded for one ingestion run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaCatalog {
    pub tables: Vec<TableSchema>,
}

impl SchemaCatalog {
    /// Layout of the published DPD extract files.
    pub fn dpd() -> Self {
        let tables = vec![
            TableSchema::new(
                TableKind::ActiveIngredients,
                "ingred",
                &[
                    "drug_code",
                    "active_ingredient_code",
                    "ingredients",
                    "ingredient_supplied_ind",
                    "strength",
                    "strength_unit",
                    "strength_type",
                    "dosage_value",
                    "base",
                    "dosage_unit",
                    "notes",
                    "ingredients_f",
                    "strength_unit_f",
                    "strength_type_f",
                    "dosage_unit_f",
                ],
            ),
            TableSchema::new(
                TableKind::Companies,
                "comp",
                &[
                    "drug_code",
                    "mfr_code",
                    "company_code",
                    "company_name",
                    "company_type",
                    "address_mailing_flag",
                    "address_billing_flag",
                    "address_notification_flag",
                    "address_other",
                    "suite_number",
                    "street_name",
                    "city_name",
                    "province",
                    "country",
                    "postal_code",
                    "post_office_box",
                    "province_f",
                    "country_f",
                ],
            ),
            TableSchema::new(
                TableKind::DrugProduct,
                "drug",
                &[
                    "drug_code",
                    "product_categorization",
                    "class",
                    "drug_identification_number",
                    "brand_name",
                    "descriptor",
                    "pediatric_flag",
                    "accession_number",
                    "number_of_ais",
                    "last_update_date",
                    "ai_group_no",
                    "class_f",
                    "brand_name_f",
                    "descriptor_f",
                ],
            ),
            TableSchema::new(
                TableKind::ProductStatus,
                "status",
                &[
                    "drug_code",
                    "current_status_flag",
                    "status",
                    "history_date",
                    "status_f",
                    "lot_number",
                    "expiration_date",
                ],
            ),
            TableSchema::new(
                TableKind::DosageForm,
                "form",
                &[
                    "drug_code",
                    "pharm_form_code",
                    "pharmaceutical_form",
                    "pharmaceutical_form_f",
                ],
            ),
            TableSchema::new(
                TableKind::Packaging,
                "package",
                &[
                    "drug_code",
                    "upc",
                    "package_size_unit",
                    "package_type",
                    "package_size",
                    "product_information",
                    "package_size_unit_f",
                    "package_type_f",
                ],
            ),
            TableSchema::new(
                TableKind::PharmaceuticalStandard,
                "pharm",
                &["drug_code", "pharmaceutical_std"],
            ),
            TableSchema::new(
                TableKind::RouteOfAdministration,
                "route",
                &[
                    "drug_code",
                    "route_of_administration_code",
                    "route_of_administration",
                    "route_of_administration_f",
                ],
            ),
            TableSchema::new(
                TableKind::Schedule,
                "schedule",
                &["drug_code", "schedule", "schedule_f"],
            ),
            TableSchema::new(
                TableKind::TherapeuticClass,
                "ther",
                &[
                    "drug_code",
                    "tc_atc_number",
                    "tc_atc",
                    "tc_ahfs_number",
                    "tc_ahfs",
                    "tc_atc_f",
                    "tc_ahfs_f",
                ],
            ),
            TableSchema::new(
                TableKind::VeterinarySpecies,
                "vet",
                &[
                    "drug_code",
                    "vet_species",
                    "vet_sub_species",
                    "vet_species_f",
                ],
            ),
        ];
        Self { tables }
    }

    pub fn get(&self, kind: TableKind) -> Option<&TableSchema> {
        self.tables.iter().find(|table| table.kind == kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TableSchema> {
        self.tables.iter()
    }

    /// Tables joined onto the primary `drug_product` table.
    pub fn subordinates(&self) -> impl Iterator<Item = &TableSchema> {
        self.tables.iter().filter(|table| !table.kind.is_primary())
    }
}

impl Default for SchemaCatalog {
    fn default() -> Self {
        Self::dpd()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dpd_catalog_covers_every_table_once() {
        let catalog = SchemaCatalog::dpd();
        assert_eq!(catalog.tables.len(), TableKind::ALL.len());
        for kind in TableKind::ALL {
            let schema = catalog.get(kind).expect("table in catalog");
            assert_eq!(schema.fields[0], "drug_code", "{kind} keyed by drug_code");
        }
        assert_eq!(catalog.subordinates().count(), TableKind::ALL.len() - 1);
    }

    #[test]
    fn table_kind_parses_names() {
        assert_eq!(
            "route_of_administration".parse::<TableKind>().unwrap(),
            TableKind::RouteOfAdministration
        );
        assert!("biosimilar".parse::<TableKind>().is_err());
    }
}
