use std::io;

use anyhow::{Context, Result, bail};

use dpd_cli::menu::Menu;
use dpd_cli::pipeline::Pipeline;
use dpd_cli::summary::{print_failures, print_outputs, scopes_table};

use crate::cli::BuildArgs;

pub fn run_menu(pipeline: &Pipeline) -> Result<()> {
    let mut menu = Menu::new(pipeline, io::stdin().lock(), io::stdout());
    menu.run()
}

pub fn run_build(pipeline: &Pipeline, args: &BuildArgs) -> Result<()> {
    let report = pipeline.run(&args.statuses, args.category, args.reuse_snapshot);
    let mut stdout = io::stdout();
    if !report.completed.is_empty() {
        print_outputs(&mut stdout, &report.completed).context("print summary")?;
    }
    print_failures(&mut stdout, &report.failures).context("print summary")?;
    if !report.is_success() {
        bail!("{} of {} scope(s) failed", report.failures.len(), args.statuses.len());
    }
    Ok(())
}

pub fn run_scopes(pipeline: &Pipeline) -> Result<()> {
    let config = pipeline.config();
    let extracts = pipeline.available_scopes();
    let snapshots = pipeline.snapshot_scopes()?;
    println!("Extract root: {}", config.extract_root.display());
    println!("Output directory: {}", config.output_dir.display());
    println!("{}", scopes_table(&extracts, &snapshots));
    Ok(())
}

pub fn run_clean(pipeline: &Pipeline) -> Result<()> {
    let removed = pipeline.clean()?;
    for path in &removed {
        println!("removed {}", path.display());
    }
    println!("{} file(s) removed", removed.len());
    Ok(())
}
