//! Tests for dpd-model types.

use dpd_model::{
    ClassifierConfig, JoinedDrugRecord, OUTPUT_COLUMNS, OutputRow, RawRecord, SchemaCatalog,
    TableKind,
};

fn sample_record() -> JoinedDrugRecord {
    JoinedDrugRecord {
        drug_code: "100027".to_string(),
        class: "Human".to_string(),
        drug_identification_number: "02511029".to_string(),
        brand_name: "MAR-PALIPERIDONE".to_string(),
        brand_name_f: "MAR-PALIPERIDONE".to_string(),
        ingredients: vec!["PALIPERIDONE 6MG".to_string()],
        admin_route: vec!["ORAL".to_string()],
        schedule: vec!["Prescription".to_string(), "Schedule D".to_string()],
        company_name: vec!["MARCAN PHARMACEUTICALS INC".to_string()],
        pharmaceutical_std: vec!["MFR".to_string()],
        ..JoinedDrugRecord::default()
    }
}

#[test]
fn primary_row_seeds_scalar_fields() {
    let schema = SchemaCatalog::dpd();
    let drug = schema.get(TableKind::DrugProduct).expect("drug table");
    let values = [
        "100027",
        "",
        "Human",
        "02511029",
        "MAR-PALIPERIDONE",
        "",
        "N",
        "",
        "1",
        "02-JUL-2021",
        "0152320002",
        "Humain",
        "",
        "",
    ];
    let row = RawRecord::from_row(drug.fields.iter().cloned(), values);
    let record = JoinedDrugRecord::from_primary(&row);

    assert_eq!(record.drug_code, "100027");
    assert_eq!(record.class_f, "Humain");
    assert_eq!(record.last_update_date, "02-JUL-2021");
    assert!(record.brand_name_f.is_empty());
    assert!(record.ingredients.is_empty());
    assert!(record.status.is_empty());
}

#[test]
fn output_row_flattens_lists() {
    let row = OutputRow::from(&sample_record());
    assert_eq!(row.id, "02511029");
    assert_eq!(row.schedule, "Prescription,Schedule D");
    assert_eq!(row.ph_std, "MFR");
    assert_eq!(row.upc, "");

    let values = row.values();
    assert_eq!(values.len(), OUTPUT_COLUMNS.len());
    let brand_idx = OUTPUT_COLUMNS
        .iter()
        .position(|column| *column == "brand_name")
        .expect("brand column");
    assert_eq!(values[brand_idx], "MAR-PALIPERIDONE");
}

#[test]
fn record_json_round_trip() {
    let record = sample_record();
    let json = serde_json::to_string(&record).expect("serialize record");
    let round: JoinedDrugRecord = serde_json::from_str(&json).expect("deserialize record");
    assert_eq!(round, record);
}

#[test]
fn record_defaults_missing_fields() {
    let json = r#"{"drug_code":"1","brand_name":"A"}"#;
    let record: JoinedDrugRecord = serde_json::from_str(json).expect("deserialize");
    assert_eq!(record.brand_name, "A");
    assert!(record.packaging.is_empty());
    assert!(record.upc.is_empty());
}

#[test]
fn classifier_config_partial_toml() {
    let config: ClassifierConfig =
        toml::from_str("otc_excluded_forms = [\"SOAP\"]").expect("parse classifier config");
    assert_eq!(config.otc_excluded_forms, vec!["SOAP".to_string()]);
    assert_eq!(config.human_marker, "Human");
}
