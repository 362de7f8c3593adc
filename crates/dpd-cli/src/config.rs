//! TOML configuration for a builder run.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use encoding_rs::Encoding;
use serde::{Deserialize, Serialize};

use dpd_core::JoinStrategy;
use dpd_ingest::IngestOptions;
use dpd_model::ClassifierConfig;
use dpd_output::DEFAULT_SNAPSHOT_PREFIX;

/// Config file read from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "dpd-builder.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Marketed extracts live here; other scopes in `{extract_root}_{suffix}`.
    pub extract_root: PathBuf,
    /// Snapshots and outputs are written here.
    pub output_dir: PathBuf,
    pub snapshot_prefix: String,
    pub delimiter: char,
    /// WHATWG label of the encoding tried first (`utf-8`).
    pub encoding: String,
    /// Label of the encoding a row falls back to (`windows-1252`).
    pub fallback_encoding: String,
    pub join_strategy: JoinStrategy,
    /// Also write the sampled `drugs.json`.
    pub write_curated: bool,
    pub classifier: ClassifierConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            extract_root: PathBuf::from("./allfiles"),
            output_dir: PathBuf::from("."),
            snapshot_prefix: DEFAULT_SNAPSHOT_PREFIX.to_string(),
            delimiter: ',',
            encoding: "utf-8".to_string(),
            fallback_encoding: "windows-1252".to_string(),
            join_strategy: JoinStrategy::default(),
            write_curated: true,
            classifier: ClassifierConfig::default(),
        }
    }
}

impl PipelineConfig {
    pub fn ingest_options(&self) -> Result<IngestOptions> {
        if !self.delimiter.is_ascii() {
            bail!("delimiter {:?} is not a single ASCII character", self.delimiter);
        }
        Ok(IngestOptions {
            delimiter: self.delimiter as u8,
            encoding: resolve_encoding(&self.encoding)?,
            fallback_encoding: resolve_encoding(&self.fallback_encoding)?,
        })
    }
}

fn resolve_encoding(label: &str) -> Result<&'static Encoding> {
    match Encoding::for_label(label.trim().as_bytes()) {
        Some(encoding) => Ok(encoding),
        None => bail!("unknown text encoding {label:?}"),
    }
}

pub fn parse_config(content: &str) -> Result<PipelineConfig> {
    let config: PipelineConfig = toml::from_str(content).context("parse configuration")?;
    config.ingest_options()?;
    Ok(config)
}

/// Loads `path`, or [`DEFAULT_CONFIG_FILE`] when `path` is `None`.
///
/// A missing file yields the defaults; a file that fails to parse is an error.
pub fn load_config(path: Option<&Path>) -> Result<PipelineConfig> {
    let path = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
    match fs::read_to_string(path) {
        Ok(content) => {
            let config = parse_config(&content)
                .with_context(|| format!("invalid configuration in {}", path.display()))?;
            tracing::info!(path = %path.display(), "loaded configuration");
            Ok(config)
        }
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
            tracing::info!(path = %path.display(), "no configuration file found, using defaults");
            Ok(PipelineConfig::default())
        }
        Err(error) => {
            Err(error).with_context(|| format!("failed to read configuration {}", path.display()))
        }
    }
}
