//! CLI argument definitions for the DPD builder.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use dpd_model::{Category, ProductStatus};

#[derive(Parser)]
#[command(
    name = "dpd-builder",
    version,
    about = "Build denormalized drug tables from Health Canada DPD extracts",
    long_about = "Join the Drug Product Database extract tables into one record per drug,\n\
                  then write SQLite and JSON lookup outputs per regulatory category."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// TOML configuration file (default: ./dpd-builder.toml when present).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Interactive menu (the default).
    Menu,

    /// Build outputs for the given scopes without prompting.
    Build(BuildArgs),

    /// List scopes with complete extracts and stored snapshots.
    Scopes,

    /// Remove generated .json and .sql3 files from the output directory.
    Clean,
}

#[derive(Parser)]
pub struct BuildArgs {
    /// Product status scopes to build (MARKETED, APPROVED, INACTIVE, DORMANT).
    #[arg(long = "status", value_name = "STATUS", num_args = 1.., default_value = "MARKETED")]
    pub statuses: Vec<ProductStatus>,

    /// Output category (OTC, PRS, OTC+PRS, ALL).
    #[arg(long = "category", value_name = "CATEGORY", default_value = "OTC")]
    pub category: Category,

    /// Use the stored snapshot of a scope instead of re-reading its extracts.
    #[arg(long = "reuse-snapshot")]
    pub reuse_snapshot: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
