use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use dpd_model::Category;

use crate::error::{OutputError, Result};

/// Extensions of files produced by a build; `clean_outputs` removes these.
pub const GENERATED_EXTENSIONS: [&str; 2] = ["json", "sql3"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub database: PathBuf,
    pub lookup: PathBuf,
}

impl OutputPaths {
    pub fn for_category(dir: &Path, category: Category, version: &str) -> Self {
        let stem = format!("{}_{version}", category.file_prefix());
        Self {
            database: dir.join(format!("{stem}.sql3")),
            lookup: dir.join(format!("{stem}.json")),
        }
    }
}

/// Removes generated `.json` and `.sql3` files from `dir`, snapshots included.
pub fn clean_outputs(dir: &Path) -> Result<Vec<PathBuf>> {
    let io_err = |source| OutputError::Io {
        path: dir.to_path_buf(),
        source,
    };
    let mut removed = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        let generated = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| GENERATED_EXTENSIONS.contains(&ext));
        if !generated || !path.is_file() {
            continue;
        }
        fs::remove_file(&path).map_err(|source| OutputError::Io {
            path: path.clone(),
            source,
        })?;
        removed.push(path);
    }
    removed.sort();
    info!(dir = %dir.display(), removed = removed.len(), "outputs cleaned");
    Ok(removed)
}
