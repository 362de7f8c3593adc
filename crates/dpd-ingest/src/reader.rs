//! Positional reading of headerless extract files.

use std::path::Path;

use csv::{ByteRecord, ReaderBuilder};
use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};

use dpd_model::{RawRecord, TableSchema};

use crate::error::{IngestError, Result};

/// Options controlling how extract files are parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestOptions {
    /// Field delimiter byte (`,` for the published extracts).
    pub delimiter: u8,
    /// Encoding tried first for every row.
    pub encoding: &'static Encoding,
    /// Encoding used for the whole row when any field is not valid in
    /// `encoding`. The French extracts are Windows-1252.
    pub fallback_encoding: &'static Encoding,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            encoding: UTF_8,
            fallback_encoding: WINDOWS_1252,
        }
    }
}

/// Decodes every field of `record` with one encoding.
///
/// `options.encoding` is used when all fields decode cleanly; otherwise the
/// whole row is decoded with `options.fallback_encoding`.
fn decode_record(record: &ByteRecord, count: usize, options: IngestOptions) -> Vec<String> {
    let strict: Option<Vec<String>> = record
        .iter()
        .take(count)
        .map(|field| {
            options
                .encoding
                .decode_without_bom_handling_and_without_replacement(field)
                .map(|text| text.into_owned())
        })
        .collect();
    strict.unwrap_or_else(|| {
        record
            .iter()
            .take(count)
            .map(|field| {
                let (text, _) = options.fallback_encoding.decode_without_bom_handling(field);
                text.into_owned()
            })
            .collect()
    })
}

fn is_blank(record: &ByteRecord) -> bool {
    record.iter().all(|field| field.iter().all(u8::is_ascii_whitespace))
}

/// Reads a headerless extract and maps each row onto `schema`.
///
/// Every returned record carries the placeholder fields. Extra trailing
/// fields are ignored; a row shorter than the schema fails the whole file.
pub fn load_table(path: &Path, schema: &TableSchema, options: IngestOptions) -> Result<Vec<RawRecord>> {
    if !path.is_file() {
        return Err(IngestError::MissingFile {
            path: path.to_path_buf(),
        });
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(options.delimiter)
        .from_path(path)
        .map_err(|source| IngestError::CsvParse {
            path: path.to_path_buf(),
            source,
        })?;

    let expected = schema.field_count();
    let mut rows = Vec::new();
    let mut record = ByteRecord::new();
    loop {
        let more = reader
            .read_byte_record(&mut record)
            .map_err(|source| IngestError::CsvParse {
                path: path.to_path_buf(),
                source,
            })?;
        if !more {
            break;
        }
        if is_blank(&record) {
            continue;
        }
        if record.len() < expected {
            return Err(IngestError::SchemaMismatch {
                path: path.to_path_buf(),
                line: record.position().map_or(0, csv::Position::line),
                expected,
                found: record.len(),
            });
        }
        let values = decode_record(&record, expected, options);
        rows.push(RawRecord::from_row(schema.fields.iter().cloned(), values).with_placeholders());
    }

    tracing::debug!(
        table = %schema.kind,
        path = %path.display(),
        rows = rows.len(),
        "extract loaded"
    );
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dpd_model::{SchemaCatalog, TableKind};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_extract(content: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content).unwrap();
        file
    }

    fn schedule_schema() -> TableSchema {
        SchemaCatalog::dpd()
            .get(TableKind::Schedule)
            .cloned()
            .unwrap()
    }

    #[test]
    fn test_load_table_maps_positionally() {
        let file = create_temp_extract(b"\"100\",\"OTC\",\"En vente libre\"\n\"101\",\"Prescription\",\"Prescription\"\n");
        let rows = load_table(file.path(), &schedule_schema(), IngestOptions::default()).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].drug_code(), "100");
        assert_eq!(rows[0].field("schedule"), "OTC");
        assert_eq!(rows[0].field("schedule_f"), "En vente libre");
        assert_eq!(rows[1].field("schedule"), "Prescription");
        assert_eq!(rows[1].get("packaging"), Some(""));
    }

    #[test]
    fn test_load_table_short_row_fails() {
        let file = create_temp_extract(b"100,OTC,En vente libre\n101,Prescription\n");
        let result = load_table(file.path(), &schedule_schema(), IngestOptions::default());

        match result {
            Err(IngestError::SchemaMismatch {
                line,
                expected,
                found,
                ..
            }) => {
                assert_eq!(line, 2);
                assert_eq!(expected, 3);
                assert_eq!(found, 2);
            }
            other => panic!("expected schema mismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_load_table_ignores_extra_fields_and_blank_rows() {
        let file = create_temp_extract(b"100,OTC,En vente libre,extra\n\n  \n");
        let rows = load_table(file.path(), &schedule_schema(), IngestOptions::default()).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].field("schedule_f"), "En vente libre");
        assert!(rows[0].get("extra").is_none());
    }

    #[test]
    fn test_load_table_pipe_delimiter() {
        let file = create_temp_extract(b"100|OTC|En vente libre\n");
        let options = IngestOptions {
            delimiter: b'|',
            ..IngestOptions::default()
        };
        let rows = load_table(file.path(), &schedule_schema(), options).unwrap();

        assert_eq!(rows[0].field("schedule"), "OTC");
    }

    #[test]
    fn test_load_table_windows_1252_fallback() {
        let file = create_temp_extract(b"100,OTC,Comprim\xe9\n101,OTC,L\x92EAU\n");
        let rows = load_table(file.path(), &schedule_schema(), IngestOptions::default()).unwrap();

        assert_eq!(rows[0].field("schedule_f"), "Comprim\u{e9}");
        assert_eq!(rows[1].field("schedule_f"), "L\u{2019}EAU");
    }

    #[test]
    fn test_load_table_decodes_row_with_one_encoding() {
        // "é" in UTF-8 next to a Windows-1252 apostrophe: the row is not
        // valid UTF-8, so both fields go through the fallback.
        let file = create_temp_extract(b"100,\xc3\xa9,L\x92EAU\n101,\xc3\xa9,\xc3\xa9\n");
        let rows = load_table(file.path(), &schedule_schema(), IngestOptions::default()).unwrap();

        assert_eq!(rows[0].field("schedule"), "\u{c3}\u{a9}");
        assert_eq!(rows[0].field("schedule_f"), "L\u{2019}EAU");
        assert_eq!(rows[1].field("schedule"), "\u{e9}");
        assert_eq!(rows[1].field("schedule_f"), "\u{e9}");
    }

    #[test]
    fn test_load_table_fixed_encoding() {
        let file = create_temp_extract(b"100,OTC,D\xe9j\xe0\n");
        let options = IngestOptions {
            encoding: WINDOWS_1252,
            ..IngestOptions::default()
        };
        let rows = load_table(file.path(), &schedule_schema(), options).unwrap();

        assert_eq!(rows[0].field("schedule_f"), "D\u{e9}j\u{e0}");
    }

    #[test]
    fn test_load_table_missing_file() {
        let result = load_table(
            Path::new("does/not/exist.txt"),
            &schedule_schema(),
            IngestOptions::default(),
        );
        assert!(matches!(result, Err(IngestError::MissingFile { .. })));
    }
}
