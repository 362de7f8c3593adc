//! Join engine: folds subordinate extract rows onto drug product records.
//!
//! Each subordinate table is wrapped in a [`Joinable`] that answers "which
//! rows share this `drug_code`?" in table order. [`LinearScanTable`] scans the
//! whole table per lookup; [`IndexedTable`] answers from a hash index built
//! once. Both return identical rows in identical order, so the strategy can
//! be swapped without touching the fold logic.

use std::collections::HashMap;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, info_span};

use dpd_ingest::IngestionContext;
use dpd_model::{JoinedDrugRecord, RawRecord, TableKind};

use crate::error::{CoreError, Result};
use crate::normalize::normalize_records;

/// Lookup of subordinate rows by join key.
pub trait Joinable {
    /// Rows whose `drug_code` equals `drug_code`, in table order.
    fn rows_for(&self, drug_code: &str) -> Vec<&RawRecord>;
}

/// Full scan of the table on every lookup.
#[derive(Debug, Clone, Copy)]
pub struct LinearScanTable<'a> {
    rows: &'a [RawRecord],
}

impl<'a> LinearScanTable<'a> {
    pub fn new(rows: &'a [RawRecord]) -> Self {
        Self { rows }
    }
}

impl Joinable for LinearScanTable<'_> {
    fn rows_for(&self, drug_code: &str) -> Vec<&RawRecord> {
        self.rows
            .iter()
            .filter(|row| row.drug_code() == drug_code)
            .collect()
    }
}

/// Hash index from `drug_code` to row positions.
#[derive(Debug, Clone)]
pub struct IndexedTable<'a> {
    rows: &'a [RawRecord],
    index: HashMap<&'a str, Vec<usize>>,
}

impl<'a> IndexedTable<'a> {
    pub fn new(rows: &'a [RawRecord]) -> Self {
        let mut index: HashMap<&'a str, Vec<usize>> = HashMap::new();
        for (position, row) in rows.iter().enumerate() {
            index.entry(row.drug_code()).or_default().push(position);
        }
        Self { rows, index }
    }
}

impl Joinable for IndexedTable<'_> {
    fn rows_for(&self, drug_code: &str) -> Vec<&RawRecord> {
        self.index
            .get(drug_code)
            .map(|positions| positions.iter().map(|&pos| &self.rows[pos]).collect())
            .unwrap_or_default()
    }
}

/// How subordinate tables are searched during the join.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JoinStrategy {
    LinearScan,
    #[default]
    Indexed,
}

impl JoinStrategy {
    pub fn table<'a>(self, rows: &'a [RawRecord]) -> Box<dyn Joinable + 'a> {
        match self {
            JoinStrategy::LinearScan => Box::new(LinearScanTable::new(rows)),
            JoinStrategy::Indexed => Box::new(IndexedTable::new(rows)),
        }
    }
}

/// Folds one matching subordinate row into `record`.
pub fn fold_row(kind: TableKind, record: &mut JoinedDrugRecord, row: &RawRecord) {
    match kind {
        TableKind::ActiveIngredients => {
            record.ingredients.push(format!(
                "{} {}{}",
                row.field("ingredients"),
                row.field("strength"),
                row.field("strength_unit")
            ));
            record.ingredients_f.push(format!(
                "{} {}{}",
                row.field("ingredients_f"),
                row.field("strength"),
                row.field("strength_unit_f")
            ));
        }
        TableKind::Companies => {
            record.company_name.push(row.field("company_name").to_string());
            record.company_code.push(row.field("company_code").to_string());
        }
        TableKind::DosageForm => {
            record
                .dosage_form
                .push(row.field("pharmaceutical_form").to_string());
            record
                .dosage_form_f
                .push(row.field("pharmaceutical_form_f").to_string());
        }
        TableKind::Packaging => {
            let information = row.field("product_information");
            record.upc.push(row.field("upc").to_string());
            record.packaging.push(information.to_string());
            record.packaging_f.push(information.to_string());
        }
        TableKind::PharmaceuticalStandard => {
            record
                .pharmaceutical_std
                .push(row.field("pharmaceutical_std").to_string());
        }
        TableKind::RouteOfAdministration => {
            record
                .admin_route
                .push(row.field("route_of_administration").to_string());
            record
                .admin_route_f
                .push(row.field("route_of_administration_f").to_string());
        }
        TableKind::Schedule => {
            record.schedule.push(row.field("schedule").to_string());
            record.schedule_f.push(row.field("schedule_f").to_string());
        }
        TableKind::ProductStatus => {
            // Historical rows are ignored; the last flagged row wins.
            if row.field("current_status_flag") == "Y" {
                record.status = row.field("status").to_string();
                record.status_f = row.field("status_f").to_string();
            }
        }
        TableKind::TherapeuticClass => {
            record.tc_atc.push(row.field("tc_atc").to_string());
            record.tc_atc_f.push(row.field("tc_atc_f").to_string());
            record.tc_ahfs.push(row.field("tc_ahfs").to_string());
            record.tc_ahfs_f.push(row.field("tc_ahfs_f").to_string());
        }
        TableKind::VeterinarySpecies => {
            record.vet_species.push(format!(
                "{}{}",
                row.field("vet_species"),
                row.field("vet_sub_species")
            ));
            record
                .vet_species_f
                .push(row.field("vet_species_f").to_string());
        }
        TableKind::DrugProduct => {}
    }
}

/// Joins every subordinate table of `ctx` onto its drug product rows.
pub fn join_records(ctx: &IngestionContext, strategy: JoinStrategy) -> Result<Vec<JoinedDrugRecord>> {
    join_records_with_progress(ctx, strategy, |_, _| {})
}

/// Like [`join_records`], reporting `(done, total)` after each primary row.
pub fn join_records_with_progress<F>(
    ctx: &IngestionContext,
    strategy: JoinStrategy,
    mut progress: F,
) -> Result<Vec<JoinedDrugRecord>>
where
    F: FnMut(usize, usize),
{
    let primary = ctx.primary();
    if primary.is_empty() {
        return Err(CoreError::NoData);
    }

    let span = info_span!("join", strategy = ?strategy, drug_products = primary.len());
    let _guard = span.enter();
    let start = Instant::now();

    let tables: Vec<(TableKind, Box<dyn Joinable + '_>)> = ctx
        .catalog()
        .subordinates()
        .map(|schema| (schema.kind, strategy.table(ctx.table(schema.kind))))
        .collect();
    debug!(
        tables = tables.len(),
        index_ms = start.elapsed().as_millis(),
        "subordinate tables prepared"
    );

    let total = primary.len();
    let mut records = Vec::with_capacity(total);
    for (done, row) in primary.iter().enumerate() {
        let mut record = JoinedDrugRecord::from_primary(row);
        for (kind, table) in &tables {
            for matched in table.rows_for(&record.drug_code) {
                fold_row(*kind, &mut record, matched);
            }
        }
        records.push(record);
        progress(done + 1, total);
    }

    info!(
        records = records.len(),
        duration_ms = start.elapsed().as_millis(),
        "join complete"
    );
    Ok(records)
}

/// Join followed by field normalization: the records written to a snapshot.
pub fn build_records<F>(
    ctx: &IngestionContext,
    strategy: JoinStrategy,
    progress: F,
) -> Result<Vec<JoinedDrugRecord>>
where
    F: FnMut(usize, usize),
{
    let mut records = join_records_with_progress(ctx, strategy, progress)?;
    normalize_records(&mut records);
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> RawRecord {
        RawRecord::from_row(
            pairs.iter().map(|(name, _)| *name),
            pairs.iter().map(|(_, value)| *value),
        )
    }

    #[test]
    fn linear_and_indexed_agree() {
        let rows = vec![
            row(&[("drug_code", "1"), ("schedule", "OTC")]),
            row(&[("drug_code", "2"), ("schedule", "Prescription")]),
            row(&[("drug_code", "1"), ("schedule", "Schedule D")]),
        ];
        let linear = LinearScanTable::new(&rows);
        let indexed = IndexedTable::new(&rows);
        for code in ["1", "2", "3"] {
            assert_eq!(linear.rows_for(code), indexed.rows_for(code));
        }
        let hits: Vec<&str> = indexed
            .rows_for("1")
            .into_iter()
            .map(|row| row.field("schedule"))
            .collect();
        assert_eq!(hits, vec!["OTC", "Schedule D"]);
    }

    #[test]
    fn ingredient_projection_concatenates_strength() {
        let mut record = JoinedDrugRecord::default();
        fold_row(
            TableKind::ActiveIngredients,
            &mut record,
            &row(&[
                ("drug_code", "1"),
                ("ingredients", "PALIPERIDONE"),
                ("strength", "6"),
                ("strength_unit", "MG"),
                ("ingredients_f", "Palip\u{e9}ridone"),
                ("strength_unit_f", "MG"),
            ]),
        );
        assert_eq!(record.ingredients, vec!["PALIPERIDONE 6MG"]);
        assert_eq!(record.ingredients_f, vec!["Palip\u{e9}ridone 6MG"]);
    }

    #[test]
    fn status_only_taken_from_current_rows() {
        let mut record = JoinedDrugRecord::default();
        for (flag, status) in [("N", "APPROVED"), ("Y", "MARKETED"), ("N", "CANCELLED")] {
            fold_row(
                TableKind::ProductStatus,
                &mut record,
                &row(&[
                    ("drug_code", "1"),
                    ("current_status_flag", flag),
                    ("status", status),
                    ("status_f", status),
                ]),
            );
        }
        assert_eq!(record.status, "MARKETED");
    }

    #[test]
    fn last_current_status_wins() {
        let mut record = JoinedDrugRecord::default();
        for status in ["MARKETED", "DORMANT"] {
            fold_row(
                TableKind::ProductStatus,
                &mut record,
                &row(&[
                    ("current_status_flag", "Y"),
                    ("status", status),
                    ("status_f", status),
                ]),
            );
        }
        assert_eq!(record.status, "DORMANT");
    }

    #[test]
    fn company_projection_keeps_name_and_code() {
        let mut record = JoinedDrugRecord::default();
        for (name, code) in [("PFIZER CANADA ULC", "10427"), ("APOTEX INC", "11570")] {
            fold_row(
                TableKind::Companies,
                &mut record,
                &row(&[
                    ("drug_code", "1"),
                    ("mfr_code", "PFI"),
                    ("company_code", code),
                    ("company_name", name),
                    ("city_name", "KIRKLAND"),
                ]),
            );
        }
        assert_eq!(record.company_name, vec!["PFIZER CANADA ULC", "APOTEX INC"]);
        assert_eq!(record.company_code, vec!["10427", "11570"]);
    }

    #[test]
    fn dosage_form_projection() {
        let mut record = JoinedDrugRecord::default();
        fold_row(
            TableKind::DosageForm,
            &mut record,
            &row(&[
                ("drug_code", "1"),
                ("pharm_form_code", "090"),
                ("pharmaceutical_form", "TABLET"),
                ("pharmaceutical_form_f", "Comprim\u{e9}"),
            ]),
        );
        assert_eq!(record.dosage_form, vec!["TABLET"]);
        assert_eq!(record.dosage_form_f, vec!["Comprim\u{e9}"]);
    }

    #[test]
    fn packaging_projection_copies_product_information_to_both_languages() {
        let mut record = JoinedDrugRecord::default();
        fold_row(
            TableKind::Packaging,
            &mut record,
            &row(&[
                ("drug_code", "1"),
                ("upc", "0123456789012"),
                ("package_type", "BOTTLE"),
                ("product_information", "100 TAB"),
                ("package_type_f", "Bouteille"),
            ]),
        );
        assert_eq!(record.upc, vec!["0123456789012"]);
        assert_eq!(record.packaging, vec!["100 TAB"]);
        assert_eq!(record.packaging_f, vec!["100 TAB"]);
    }

    #[test]
    fn pharmaceutical_standard_projection() {
        let mut record = JoinedDrugRecord::default();
        for standard in ["USP", "BP"] {
            fold_row(
                TableKind::PharmaceuticalStandard,
                &mut record,
                &row(&[("drug_code", "1"), ("pharmaceutical_std", standard)]),
            );
        }
        assert_eq!(record.pharmaceutical_std, vec!["USP", "BP"]);
    }

    #[test]
    fn therapeutic_class_projection_fills_all_four_lists() {
        let mut record = JoinedDrugRecord::default();
        fold_row(
            TableKind::TherapeuticClass,
            &mut record,
            &row(&[
                ("drug_code", "1"),
                ("tc_atc_number", "N02BA01"),
                ("tc_atc", "ACETYLSALICYLIC ACID"),
                ("tc_ahfs_number", "28:08.04.24"),
                ("tc_ahfs", "SALICYLATES"),
                ("tc_atc_f", "ACIDE ACETYLSALICYLIQUE"),
                ("tc_ahfs_f", "SALICYLATES F"),
            ]),
        );
        assert_eq!(record.tc_atc, vec!["ACETYLSALICYLIC ACID"]);
        assert_eq!(record.tc_atc_f, vec!["ACIDE ACETYLSALICYLIQUE"]);
        assert_eq!(record.tc_ahfs, vec!["SALICYLATES"]);
        assert_eq!(record.tc_ahfs_f, vec!["SALICYLATES F"]);
    }

    #[test]
    fn schedule_and_route_projections() {
        let mut record = JoinedDrugRecord::default();
        fold_row(
            TableKind::Schedule,
            &mut record,
            &row(&[("schedule", "OTC"), ("schedule_f", "En vente libre")]),
        );
        fold_row(
            TableKind::RouteOfAdministration,
            &mut record,
            &row(&[
                ("route_of_administration_code", "15"),
                ("route_of_administration", "ORAL"),
                ("route_of_administration_f", "Orale"),
            ]),
        );
        assert_eq!(record.schedule, vec!["OTC"]);
        assert_eq!(record.schedule_f, vec!["En vente libre"]);
        assert_eq!(record.admin_route, vec!["ORAL"]);
        assert_eq!(record.admin_route_f, vec!["Orale"]);
    }

    #[test]
    fn primary_rows_fold_to_nothing() {
        let mut record = JoinedDrugRecord::default();
        fold_row(
            TableKind::DrugProduct,
            &mut record,
            &row(&[("drug_code", "1"), ("brand_name", "ASPIRIN")]),
        );
        assert_eq!(record, JoinedDrugRecord::default());
    }

    #[test]
    fn vet_species_joins_sub_species_without_separator() {
        let mut record = JoinedDrugRecord::default();
        fold_row(
            TableKind::VeterinarySpecies,
            &mut record,
            &row(&[
                ("vet_species", "CATTLE"),
                ("vet_sub_species", "DAIRY"),
                ("vet_species_f", "Bovins"),
            ]),
        );
        assert_eq!(record.vet_species, vec!["CATTLEDAIRY"]);
        assert_eq!(record.vet_species_f, vec!["Bovins"]);
    }
}
