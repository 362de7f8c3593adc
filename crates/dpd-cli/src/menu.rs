//! Interactive menu loop.
//!
//! Scope keys `1`-`5` pick the product statuses (`5` = all four), `a`-`d`
//! the output category. A failing action is reported and the loop carries on.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use tracing::{error, warn};

use dpd_model::{Category, ProductStatus};

use crate::pipeline::Pipeline;
use crate::summary::{print_failures, print_ingests, print_outputs};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuChoice {
    Scopes(Vec<ProductStatus>),
    Category(Category),
    Ingest,
    Generate,
    Clear,
    Quit,
}

pub fn parse_choice(input: &str) -> Option<MenuChoice> {
    let choice = match input.trim().to_ascii_lowercase().as_str() {
        "1" => MenuChoice::Scopes(vec![ProductStatus::Marketed]),
        "2" => MenuChoice::Scopes(vec![ProductStatus::Approved]),
        "3" => MenuChoice::Scopes(vec![ProductStatus::Inactive]),
        "4" => MenuChoice::Scopes(vec![ProductStatus::Dormant]),
        "5" => MenuChoice::Scopes(ProductStatus::ALL.to_vec()),
        "a" => MenuChoice::Category(Category::OtcPrescription),
        "b" => MenuChoice::Category(Category::Otc),
        "c" => MenuChoice::Category(Category::Prescription),
        "d" => MenuChoice::Category(Category::All),
        "i" => MenuChoice::Ingest,
        "r" => MenuChoice::Generate,
        "x" => MenuChoice::Clear,
        "q" => MenuChoice::Quit,
        _ => return None,
    };
    Some(choice)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuState {
    pub statuses: Vec<ProductStatus>,
    pub category: Category,
}

impl Default for MenuState {
    fn default() -> Self {
        Self {
            statuses: vec![ProductStatus::Marketed],
            category: Category::Otc,
        }
    }
}

pub struct Menu<'a, R, W> {
    pipeline: &'a Pipeline,
    input: R,
    out: W,
    state: MenuState,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(pipeline: &'a Pipeline, input: R, out: W) -> Self {
        Self {
            pipeline,
            input,
            out,
            state: MenuState::default(),
        }
    }

    pub fn state(&self) -> &MenuState {
        &self.state
    }

    /// Runs until `q` or end of input.
    pub fn run(&mut self) -> Result<()> {
        loop {
            let extracts = self.pipeline.available_scopes();
            let snapshots = self.pipeline.snapshot_scopes().unwrap_or_else(|error| {
                warn!(error = %format!("{error:#}"), "could not list snapshots");
                Vec::new()
            });
            self.render(&extracts, &snapshots)?;

            let Some(line) = self.read_line()? else {
                break;
            };
            let Some(choice) = parse_choice(&line) else {
                writeln!(self.out, "  unrecognised choice {:?}", line.trim())?;
                continue;
            };
            let outcome = match choice {
                MenuChoice::Quit => break,
                MenuChoice::Scopes(statuses) => self.select_scopes(statuses, &extracts),
                MenuChoice::Category(category) => {
                    self.state.category = category;
                    Ok(())
                }
                MenuChoice::Ingest => self.ingest(),
                MenuChoice::Generate => self.generate(&snapshots),
                MenuChoice::Clear => self.clear(),
            };
            if let Err(err) = outcome {
                error!(error = %format!("{err:#}"), "menu action failed");
                writeln!(self.out, "  error: {err:#}")?;
            }
        }
        writeln!(self.out, "Bye")?;
        Ok(())
    }

    fn render(&mut self, extracts: &[ProductStatus], snapshots: &[ProductStatus]) -> Result<()> {
        write!(
            self.out,
            "\n\
             * DPD extracts: {}\n\
             * Snapshots: {}\n\
             * Selected product status: {}\n\
             * Selected category: {}\n\
             \n\
             Select product status:\n\
             \x20 (1) Marketed drugs\n\
             \x20 (2) Approved drugs\n\
             \x20 (3) Inactive drugs\n\
             \x20 (4) Dormant drugs\n\
             \x20 (5) All drugs\n\
             \n\
             Select category:\n\
             \x20 (a) OTC drugs + Prescription drugs\n\
             \x20 (b) OTC drugs only\n\
             \x20 (c) Prescription drugs only\n\
             \x20 (d) All drug types\n\
             \n\
             Select:\n\
             \x20 (i) Ingest extracts and store snapshot\n\
             \x20 (r) Generate output files\n\
             \x20 (x) Clear outputs\n\
             \x20 (q) Quit\n\
             \n> ",
            join_statuses(extracts),
            join_statuses(snapshots),
            join_statuses(&self.state.statuses),
            self.state.category,
        )?;
        self.out.flush()?;
        Ok(())
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        let read = self.input.read_line(&mut line).context("read menu input")?;
        Ok((read > 0).then_some(line))
    }

    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        write!(self.out, "  {prompt} (y/N) ")?;
        self.out.flush()?;
        Ok(self
            .read_line()?
            .is_some_and(|answer| answer.trim().eq_ignore_ascii_case("y")))
    }

    fn select_scopes(
        &mut self,
        statuses: Vec<ProductStatus>,
        extracts: &[ProductStatus],
    ) -> Result<()> {
        if let Some(missing) = statuses.iter().find(|status| !extracts.contains(status)) {
            anyhow::bail!("DPD extracts for {missing} not found");
        }
        self.state.statuses = statuses;
        Ok(())
    }

    fn ingest(&mut self) -> Result<()> {
        let report = self.pipeline.ingest_all(&self.state.statuses);
        if !report.completed.is_empty() {
            print_ingests(&mut self.out, &report.completed)?;
        }
        print_failures(&mut self.out, &report.failures)?;
        Ok(())
    }

    fn generate(&mut self, snapshots: &[ProductStatus]) -> Result<()> {
        let pipeline = self.pipeline;
        let statuses = self.state.statuses.clone();
        let report = pipeline.run_with(&statuses, self.state.category, |status| {
            Ok(snapshots.contains(&status)
                && self.confirm(&format!(
                    "Snapshot for {status} exists. Do you want to use it?"
                ))?)
        });
        if !report.completed.is_empty() {
            print_outputs(&mut self.out, &report.completed)?;
        }
        print_failures(&mut self.out, &report.failures)?;
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        let removed = self.pipeline.clean()?;
        writeln!(self.out, "  removed {} file(s)", removed.len())?;
        Ok(())
    }
}

fn join_statuses(statuses: &[ProductStatus]) -> String {
    if statuses.is_empty() {
        return "none".to_string();
    }
    statuses
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
