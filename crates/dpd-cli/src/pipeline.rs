//! Ingest, snapshot and output stages for one or more scopes.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, info_span, warn};

use dpd_core::{CategoryClassifier, build_records, select_records};
use dpd_ingest::{IngestionContext, available_scopes};
use dpd_model::{Category, JoinedDrugRecord, OutputRow, ProductStatus, SchemaCatalog};
use dpd_output::{
    CURATED_FILE_NAME, OutputPaths, SnapshotStore, clean_outputs, write_curated, write_database,
    write_lookup,
};

use crate::config::PipelineConfig;
use crate::progress::join_progress_bar;
use crate::types::{IngestSummary, OutputSummary, RecordSource, ScopeReport};

pub struct Pipeline {
    config: PipelineConfig,
    catalog: SchemaCatalog,
    classifier: CategoryClassifier,
    store: SnapshotStore,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        let classifier = CategoryClassifier::new(config.classifier.clone());
        let store = SnapshotStore::new(config.output_dir.clone(), config.snapshot_prefix.clone());
        Self {
            config,
            catalog: SchemaCatalog::dpd(),
            classifier,
            store,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }

    /// Scopes whose extract directory holds every table.
    pub fn available_scopes(&self) -> Vec<ProductStatus> {
        available_scopes(&self.config.extract_root, &self.catalog)
    }

    /// Scopes with a stored snapshot.
    pub fn snapshot_scopes(&self) -> Result<Vec<ProductStatus>> {
        let versions = self.store.list_versions().context("list snapshots")?;
        let mut scopes: Vec<ProductStatus> = versions
            .iter()
            .filter_map(|version| version.parse().ok())
            .collect();
        scopes.sort();
        Ok(scopes)
    }

    /// Loads the extracts of `status`, joins them and returns the records.
    pub fn build_scope(&self, status: ProductStatus) -> Result<(usize, Vec<JoinedDrugRecord>)> {
        let mut ctx = IngestionContext::new(self.catalog.clone(), self.config.ingest_options()?);
        let load = ctx
            .load_scope(&self.config.extract_root, status)
            .with_context(|| format!("load {status} extracts"))?;

        let bar = join_progress_bar(ctx.primary().len(), status.as_str());
        let records = build_records(&ctx, self.config.join_strategy, |done, _| {
            bar.set_position(done as u64);
        })
        .with_context(|| format!("join {status} extracts"));
        bar.finish_and_clear();
        Ok((load.total_rows(), records?))
    }

    /// Builds `status` from its extracts and stores the snapshot.
    pub fn ingest(&self, status: ProductStatus) -> Result<(IngestSummary, Vec<JoinedDrugRecord>)> {
        let span = info_span!("ingest", scope = %status);
        let _guard = span.enter();
        let start = Instant::now();

        let (rows_loaded, records) = self.build_scope(status)?;
        let snapshot = self
            .store
            .write(status.as_str(), &records)
            .with_context(|| format!("write {status} snapshot"))?;

        info!(
            rows_loaded,
            records = records.len(),
            duration_ms = start.elapsed().as_millis(),
            "scope ingested"
        );
        let summary = IngestSummary {
            status,
            rows_loaded,
            records: records.len(),
            snapshot,
        };
        Ok((summary, records))
    }

    /// Reads the stored snapshot when `reuse` is set, else re-ingests.
    ///
    /// A snapshot that fails to load falls back to ingestion.
    pub fn records_for(
        &self,
        status: ProductStatus,
        reuse: bool,
    ) -> Result<(RecordSource, Vec<JoinedDrugRecord>)> {
        if reuse {
            match self.store.read(status.as_str()) {
                Ok(records) => return Ok((RecordSource::Snapshot, records)),
                Err(error) => warn!(scope = %status, %error, "snapshot unusable, rebuilding"),
            }
        }
        let (_, records) = self.ingest(status)?;
        Ok((RecordSource::Extracts, records))
    }

    /// Ingests every status, continuing past scopes that fail.
    pub fn ingest_all(&self, statuses: &[ProductStatus]) -> ScopeReport<IngestSummary> {
        ScopeReport::collect(statuses, |_, status| {
            self.ingest(status).map(|(summary, _)| summary)
        })
    }

    /// Writes the database and lookup outputs of one scope, plus the curated
    /// subset when `curated` is set and enabled in the config.
    pub fn generate(
        &self,
        status: ProductStatus,
        category: Category,
        source: RecordSource,
        records: &[JoinedDrugRecord],
        curated: bool,
    ) -> Result<OutputSummary> {
        let span = info_span!("generate", scope = %status, category = %category);
        let _guard = span.enter();
        let start = Instant::now();

        let selection = select_records(records, category, &self.classifier);
        let rows: Vec<OutputRow> = selection
            .records
            .iter()
            .map(|record| OutputRow::from(*record))
            .collect();

        let dir = self.config.output_dir.as_path();
        std::fs::create_dir_all(dir)
            .with_context(|| format!("create output directory {}", dir.display()))?;
        let paths = OutputPaths::for_category(dir, category, status.as_str());
        write_database(&paths.database, &rows).context("write database")?;
        write_lookup(&paths.lookup, &rows).context("write lookup document")?;

        let (curated, curated_entries) = if curated && self.config.write_curated {
            let path = dir.join(CURATED_FILE_NAME);
            let entries = write_curated(&path, &selection.records).context("write curated subset")?;
            (Some(path), entries)
        } else {
            (None, 0)
        };

        info!(
            rows = rows.len(),
            duration_ms = start.elapsed().as_millis(),
            "outputs generated"
        );
        Ok(OutputSummary {
            status,
            category,
            source,
            input: records.len(),
            selected: selection.len(),
            duplicates: selection.duplicates,
            excluded: selection.excluded,
            database: paths.database,
            lookup: paths.lookup,
            curated,
            curated_entries,
        })
    }

    /// Non-interactive run over `statuses`, one output set per scope.
    pub fn run(
        &self,
        statuses: &[ProductStatus],
        category: Category,
        reuse_snapshot: bool,
    ) -> ScopeReport<OutputSummary> {
        self.run_with(statuses, category, |_| Ok(reuse_snapshot))
    }

    /// Runs every scope on its own; `reuse` decides per scope whether a
    /// stored snapshot may be used. A failing scope does not stop the others.
    ///
    /// `drugs.json` has a fixed name, so only the last scope writes it.
    pub fn run_with<F>(
        &self,
        statuses: &[ProductStatus],
        category: Category,
        mut reuse: F,
    ) -> ScopeReport<OutputSummary>
    where
        F: FnMut(ProductStatus) -> Result<bool>,
    {
        let last = statuses.len().saturating_sub(1);
        ScopeReport::collect(statuses, |index, status| {
            let (source, records) = self.records_for(status, reuse(status)?)?;
            self.generate(status, category, source, &records, index == last)
        })
    }

    /// Removes generated files from the output directory.
    pub fn clean(&self) -> Result<Vec<PathBuf>> {
        let dir = &self.config.output_dir;
        clean_outputs(dir).with_context(|| format!("clean {}", dir.display()))
    }
}
