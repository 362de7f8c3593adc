use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::info;

use dpd_model::OutputRow;

use crate::error::{OutputError, Result};

/// Rows keyed by `id`. A later row with the same id replaces an earlier one.
pub fn lookup_map(rows: &[OutputRow]) -> BTreeMap<&str, &OutputRow> {
    rows.iter().map(|row| (row.id.as_str(), row)).collect()
}

/// Writes the id-keyed lookup document.
pub fn write_lookup(path: &Path, rows: &[OutputRow]) -> Result<usize> {
    let map = lookup_map(rows);
    write_json(path, &map)?;
    info!(path = %path.display(), entries = map.len(), "lookup document written");
    Ok(map.len())
}

pub(crate) fn write_json<T: serde::Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let io_err = |source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, value).map_err(|source| OutputError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    writer.flush().map_err(io_err)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: &str, brand: &str) -> OutputRow {
        OutputRow {
            id: id.to_string(),
            brand_name: brand.to_string(),
            ..OutputRow::default()
        }
    }

    #[test]
    fn later_rows_win() {
        let rows = vec![row("1", "FIRST"), row("2", "OTHER"), row("1", "SECOND")];
        let map = lookup_map(&rows);
        assert_eq!(map.len(), 2);
        assert_eq!(map["1"].brand_name, "SECOND");
    }
}
