//! SQLite output: one `drugs` table of text columns.

use std::fs;
use std::path::Path;
use std::time::Instant;

use rusqlite::Connection;
use tracing::{info, info_span};

use dpd_model::{OUTPUT_COLUMNS, OutputRow};

use crate::error::{OutputError, Result};

pub const TABLE_NAME: &str = "drugs";

/// Escapes a value for a single-quoted SQL literal.
pub fn sql_quote(value: &str) -> String {
    value.replace('\'', "''")
}

pub fn create_table_sql() -> String {
    let columns: Vec<String> = OUTPUT_COLUMNS
        .iter()
        .map(|column| format!("{column} TEXT NOT NULL"))
        .collect();
    format!("CREATE TABLE {TABLE_NAME} ({})", columns.join(", "))
}

pub fn insert_statement(row: &OutputRow) -> String {
    let values: Vec<String> = row
        .values()
        .iter()
        .map(|value| format!("'{}'", sql_quote(value)))
        .collect();
    format!("INSERT INTO {TABLE_NAME} VALUES ({})", values.join(", "))
}

/// Writes `rows` to a fresh database at `path`, replacing any existing file.
pub fn write_database(path: &Path, rows: &[OutputRow]) -> Result<usize> {
    let span = info_span!("write_database", path = %path.display(), rows = rows.len());
    let _guard = span.enter();
    let start = Instant::now();

    if path.exists() {
        fs::remove_file(path).map_err(|source| OutputError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    }

    let db_err = |source| OutputError::Database {
        path: path.to_path_buf(),
        source,
    };
    let mut conn = Connection::open(path).map_err(db_err)?;
    conn.execute_batch(&create_table_sql()).map_err(db_err)?;

    let tx = conn.transaction().map_err(db_err)?;
    for row in rows {
        tx.execute_batch(&insert_statement(row)).map_err(db_err)?;
    }
    tx.commit().map_err(db_err)?;

    info!(
        rows = rows.len(),
        duration_ms = start.elapsed().as_millis(),
        "database written"
    );
    Ok(rows.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_doubles_single_quotes() {
        assert_eq!(sql_quote("L'OREAL"), "L''OREAL");
        assert_eq!(sql_quote("plain"), "plain");
        assert_eq!(sql_quote("''"), "''''");
    }

    #[test]
    fn create_table_lists_all_columns() {
        let sql = create_table_sql();
        assert!(sql.starts_with("CREATE TABLE drugs (id TEXT NOT NULL, drug_code TEXT NOT NULL"));
        assert!(sql.ends_with("descriptor_f TEXT NOT NULL)"));
        assert_eq!(sql.matches("TEXT NOT NULL").count(), OUTPUT_COLUMNS.len());
    }

    #[test]
    fn insert_escapes_values() {
        let row = OutputRow {
            id: "02200001".to_string(),
            brand_name: "D'ARCY".to_string(),
            ..OutputRow::default()
        };
        let sql = insert_statement(&row);
        assert!(sql.starts_with("INSERT INTO drugs VALUES ('02200001', '', "));
        assert!(sql.contains("'D''ARCY'"));
    }
}
