//! Distillery directory commands

use anyhow::{bail, Result};
use clap::Subcommand;

use super::output::Output;
use crate::domain::base36;
use crate::storage::Registry;

#[derive(Subcommand)]
pub enum DistilleryCommands {
    /// Add or rename a distillery in the directory
    Add {
        /// 2-character alphanumeric code, unique within the registry
        code: String,

        /// Display name
        name: String,
    },

    /// List the distillery directory
    List,
}

pub fn run(cmd: DistilleryCommands, output: &Output) -> Result<()> {
    match cmd {
        DistilleryCommands::Add { code, name } => add(output, &code, &name),
        DistilleryCommands::List => list(output),
    }
}

fn add(output: &Output, code: &str, name: &str) -> Result<()> {
    let code = code.trim().to_ascii_uppercase();
    if code.len() != 2 || !code.chars().all(base36::is_base36) {
        bail!("Distillery code '{code}' does not match [A-Z0-9]{{2}}");
    }
    if name.trim().is_empty() {
        bail!("Distillery name must not be empty");
    }

    let mut registry = Registry::open_current()?;

    let mut previous = None;
    registry.update_config(|config| {
        previous = config.set_distillery(&code, name.trim());
    })?;

    match previous {
        Some(old) => output.success(&format!("Renamed distillery {code}: {old} -> {name}")),
        None => output.success(&format!("Added distillery {code}: {name}")),
    }

    Ok(())
}

fn list(output: &Output) -> Result<()> {
    let registry = Registry::open_current()?;
    let distilleries = &registry.config().distilleries;

    if output.is_json() {
        output.data(distilleries);
        return Ok(());
    }

    if distilleries.is_empty() {
        println!("No distilleries in the directory");
        return Ok(());
    }

    println!("{:<6} NAME", "CODE");
    for (code, name) in distilleries {
        println!("{:<6} {}", code, name);
    }

    Ok(())
}
