//! Extract path resolution and scope discovery.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use dpd_model::{ProductStatus, SchemaCatalog};
use tracing::debug;

/// Directory holding the extracts of one scope.
///
/// The default scope reads `{root}` itself; other scopes read `{root}_{suffix}`.
pub fn scope_dir(root: &Path, status: ProductStatus) -> PathBuf {
    match status.suffix() {
        None => root.to_path_buf(),
        Some(suffix) => {
            let mut dir: OsString = root.as_os_str().to_owned();
            dir.push("_");
            dir.push(suffix);
            PathBuf::from(dir)
        }
    }
}

/// Resolves the extract file of table `stem` for `status`.
///
/// `{root}/{stem}.txt` for the default scope,
/// `{root}_{suffix}/{stem}_{suffix}.txt` otherwise.
pub fn extract_path(root: &Path, stem: &str, status: ProductStatus) -> PathBuf {
    let file_name = match status.suffix() {
        None => format!("{stem}.txt"),
        Some(suffix) => format!("{stem}_{suffix}.txt"),
    };
    scope_dir(root, status).join(file_name)
}

/// Lists the scopes whose directory holds every extract in `catalog`.
pub fn available_scopes(root: &Path, catalog: &SchemaCatalog) -> Vec<ProductStatus> {
    ProductStatus::ALL
        .into_iter()
        .filter(|status| {
            let dir = scope_dir(root, *status);
            if !dir.is_dir() {
                return false;
            }
            let missing = catalog
                .iter()
                .map(|table| extract_path(root, &table.stem, *status))
                .find(|path| !path.is_file());
            match missing {
                Some(path) => {
                    debug!(scope = %status, path = %path.display(), "scope incomplete");
                    false
                }
                None => true,
            }
        })
        .collect()
}
