//! JSON snapshots of the full joined record set.
//!
//! A snapshot lets output generation run again without re-reading the
//! extracts. Each snapshot is one JSON array stored as
//! `{dir}/{prefix}_{version}.json`; writing the same version again replaces it.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use dpd_model::JoinedDrugRecord;

use crate::error::{OutputError, Result};

pub const DEFAULT_SNAPSHOT_PREFIX: &str = "build";

#[derive(Debug, Clone)]
pub struct SnapshotStore {
    dir: PathBuf,
    prefix: String,
}

impl SnapshotStore {
    pub fn new(dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            prefix: prefix.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self, version: &str) -> PathBuf {
        self.dir.join(format!("{}_{version}.json", self.prefix))
    }

    pub fn exists(&self, version: &str) -> bool {
        self.path(version).is_file()
    }

    pub fn write(&self, version: &str, records: &[JoinedDrugRecord]) -> Result<PathBuf> {
        let path = self.path(version);
        let write_err = |source| OutputError::SnapshotWrite {
            path: path.clone(),
            source,
        };
        fs::create_dir_all(&self.dir).map_err(write_err)?;
        let file = File::create(&path).map_err(write_err)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, records).map_err(|source| OutputError::Json {
            path: path.clone(),
            source,
        })?;
        writer.flush().map_err(write_err)?;
        info!(path = %path.display(), records = records.len(), "snapshot written");
        Ok(path)
    }

    pub fn read(&self, version: &str) -> Result<Vec<JoinedDrugRecord>> {
        let path = self.path(version);
        let file = File::open(&path).map_err(|err| OutputError::SnapshotLoad {
            path: path.clone(),
            reason: err.to_string(),
        })?;
        let records: Vec<JoinedDrugRecord> = serde_json::from_reader(BufReader::new(file))
            .map_err(|err| OutputError::SnapshotLoad {
                path: path.clone(),
                reason: err.to_string(),
            })?;
        debug!(path = %path.display(), records = records.len(), "snapshot loaded");
        Ok(records)
    }

    /// Versions with a snapshot in the store directory, sorted.
    pub fn list_versions(&self) -> Result<Vec<String>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(OutputError::Io {
                    path: self.dir.clone(),
                    source,
                });
            }
        };
        let head = format!("{}_", self.prefix);
        let mut versions = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| OutputError::Io {
                path: self.dir.clone(),
                source,
            })?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            let version = name
                .strip_prefix(&head)
                .and_then(|rest| rest.strip_suffix(".json"));
            if let Some(version) = version.filter(|version| !version.is_empty()) {
                versions.push(version.to_string());
            }
        }
        versions.sort();
        Ok(versions)
    }
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::new(".", DEFAULT_SNAPSHOT_PREFIX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn path_uses_prefix_and_version() {
        let store = SnapshotStore::new("out", "build");
        assert_eq!(store.path("MARKETED"), PathBuf::from("out/build_MARKETED.json"));
    }

    #[test]
    fn missing_snapshot_is_load_error() {
        let tmp = TempDir::new().unwrap();
        let store = SnapshotStore::new(tmp.path(), "build");
        assert!(!store.exists("DORMANT"));
        assert!(matches!(
            store.read("DORMANT"),
            Err(OutputError::SnapshotLoad { .. })
        ));
    }

    #[test]
    fn malformed_snapshot_is_load_error() {
        let tmp = TempDir::new().unwrap();
        let store = SnapshotStore::new(tmp.path(), "build");
        fs::write(store.path("MARKETED"), "{not json").unwrap();
        assert!(matches!(
            store.read("MARKETED"),
            Err(OutputError::SnapshotLoad { .. })
        ));
    }

    #[test]
    fn lists_versions() {
        let tmp = TempDir::new().unwrap();
        let store = SnapshotStore::new(tmp.path(), "build");
        store.write("MARKETED", &[]).unwrap();
        store.write("APPROVED", &[]).unwrap();
        fs::write(tmp.path().join("otc_MARKETED.json"), "{}").unwrap();
        fs::write(tmp.path().join("build_.json"), "[]").unwrap();
        assert_eq!(store.list_versions().unwrap(), vec!["APPROVED", "MARKETED"]);
    }

    #[test]
    fn missing_directory_lists_nothing() {
        let tmp = TempDir::new().unwrap();
        let store = SnapshotStore::new(tmp.path().join("absent"), "build");
        assert!(store.list_versions().unwrap().is_empty());
    }
}
