//! Extract fixtures shared by the CLI integration tests.

use std::fs;
use std::path::{Path, PathBuf};

use dpd_cli::config::PipelineConfig;
use dpd_ingest::{extract_path, scope_dir};
use dpd_model::{ProductStatus, SchemaCatalog};

/// Writes a scope of `count` oral drug products; even drug codes are OTC,
/// odd ones prescription.
pub fn write_scope(root: &Path, status: ProductStatus, count: usize) {
    let mut tables: Vec<(&str, String)> = vec![
        ("drug", String::new()),
        ("route", String::new()),
        ("schedule", String::new()),
        ("status", String::new()),
    ];
    for code in 1..=count {
        let schedule = if code % 2 == 0 { "OTC" } else { "Prescription" };
        let rows = [
            format!(
                "\"{code}\",\"\",\"Human\",\"{:08}\",\"BRAND {code:02}\",\"\",\"N\",\"\",\"1\",\"01-JAN-2020\",\"1\",\"Humain\",\"\",\"\"\n",
                1000 + code
            ),
            format!("\"{code}\",\"1\",\"ORAL\",\"Orale\"\n"),
            format!("\"{code}\",\"{schedule}\",\"{schedule}\"\n"),
            format!("\"{code}\",\"Y\",\"{status}\",\"01-JAN-2020\",\"{status}\",\"\",\"\"\n"),
        ];
        for ((_, body), row) in tables.iter_mut().zip(rows) {
            body.push_str(&row);
        }
    }

    let catalog = SchemaCatalog::dpd();
    fs::create_dir_all(scope_dir(root, status)).expect("create scope dir");
    for table in catalog.iter() {
        let body = tables
            .iter()
            .find(|(stem, _)| *stem == table.stem)
            .map(|(_, body)| body.as_str())
            .unwrap_or("");
        fs::write(extract_path(root, &table.stem, status), body).expect("write extract");
    }
}

pub fn config(base: &Path) -> PipelineConfig {
    PipelineConfig {
        extract_root: base.join("allfiles"),
        output_dir: base.join("out"),
        ..PipelineConfig::default()
    }
}

pub fn output(base: &Path, name: &str) -> PathBuf {
    base.join("out").join(name)
}
