//! Per-run ownership of loaded extract tables.

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Instant;

use tracing::{info, info_span};

use dpd_model::{ProductStatus, RawRecord, SchemaCatalog, TableKind};

use crate::discovery::extract_path;
use crate::error::{IngestError, Result};
use crate::reader::{IngestOptions, load_table};

/// Row counts of one committed scope load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeLoad {
    pub status: Option<ProductStatus>,
    pub rows: BTreeMap<TableKind, usize>,
}

impl ScopeLoad {
    pub fn total_rows(&self) -> usize {
        self.rows.values().sum()
    }
}

/// Table contents owned by one ingestion run.
///
/// Loading several scopes appends their rows to the same tables in load
/// order. A scope whose extracts cannot all be read leaves the context as it
/// was before the call.
#[derive(Debug, Clone, Default)]
pub struct IngestionContext {
    catalog: SchemaCatalog,
    options: IngestOptions,
    tables: BTreeMap<TableKind, Vec<RawRecord>>,
    scopes: Vec<ProductStatus>,
}

impl IngestionContext {
    pub fn new(catalog: SchemaCatalog, options: IngestOptions) -> Self {
        Self {
            catalog,
            options,
            tables: BTreeMap::new(),
            scopes: Vec::new(),
        }
    }

    pub fn catalog(&self) -> &SchemaCatalog {
        &self.catalog
    }

    /// Scopes committed so far, in load order.
    pub fn scopes(&self) -> &[ProductStatus] {
        &self.scopes
    }

    pub fn table(&self, kind: TableKind) -> &[RawRecord] {
        self.tables.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn primary(&self) -> &[RawRecord] {
        self.table(TableKind::DrugProduct)
    }

    /// True until a scope with at least one drug product row is loaded.
    pub fn is_empty(&self) -> bool {
        self.primary().is_empty()
    }

    pub fn clear(&mut self) {
        self.tables.clear();
        self.scopes.clear();
    }

    /// Appends already-parsed rows to a table.
    pub fn push_rows<I>(&mut self, kind: TableKind, rows: I)
    where
        I: IntoIterator<Item = RawRecord>,
    {
        self.tables.entry(kind).or_default().extend(rows);
    }

    /// Loads every catalog table of `status` from `root` and commits them.
    pub fn load_scope(&mut self, root: &Path, status: ProductStatus) -> Result<ScopeLoad> {
        let span = info_span!("load_scope", scope = %status, root = %root.display());
        let _guard = span.enter();
        let start = Instant::now();

        if self.catalog.get(TableKind::DrugProduct).is_none() {
            return Err(IngestError::UnknownTable {
                table: TableKind::DrugProduct,
            });
        }

        let mut staged = Vec::with_capacity(self.catalog.tables.len());
        for schema in self.catalog.iter() {
            let path = extract_path(root, &schema.stem, status);
            let rows = load_table(&path, schema, self.options)?;
            staged.push((schema.kind, rows));
        }

        let mut load = ScopeLoad {
            status: Some(status),
            rows: BTreeMap::new(),
        };
        for (kind, rows) in staged {
            *load.rows.entry(kind).or_default() += rows.len();
            self.push_rows(kind, rows);
        }
        self.scopes.push(status);

        info!(
            scope = %status,
            drug_products = load.rows.get(&TableKind::DrugProduct).copied().unwrap_or(0),
            total_rows = load.total_rows(),
            duration_ms = start.elapsed().as_millis(),
            "scope loaded"
        );
        Ok(load)
    }

    /// Loads each scope in turn; stops at the first failing scope.
    pub fn load_scopes(&mut self, root: &Path, statuses: &[ProductStatus]) -> Result<Vec<ScopeLoad>> {
        statuses
            .iter()
            .map(|status| self.load_scope(root, *status))
            .collect()
    }
}
