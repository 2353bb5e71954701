//! `notegit config` — create and inspect the settings file.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use colored::Colorize;

use notegit_core::settings;

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Write a default settings file if none exists.
    Init(ConfigArgs),
    /// Print the current settings.
    Show(ConfigArgs),
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Settings file (defaults to ~/.notegit/config.yaml).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn run(command: ConfigCommand) -> Result<()> {
    match command {
        ConfigCommand::Init(args) => init(args),
        ConfigCommand::Show(args) => show(args),
    }
}

fn init(args: ConfigArgs) -> Result<()> {
    let path = super::resolve_config_path(args.config)?;
    let created = settings::init_at(&path)
        .with_context(|| format!("could not create settings at {}", path.display()))?;
    if created {
        println!("{} created {}", "✓".green(), path.display());
        println!("Edit it to set branch, local_path, and (optionally) repo_url.");
    } else {
        println!("settings already exist at {}", path.display());
    }
    Ok(())
}

fn show(args: ConfigArgs) -> Result<()> {
    let path = super::resolve_config_path(args.config)?;
    let settings = settings::load_at(&path)
        .with_context(|| format!("failed to load settings from {}", path.display()))?;
    let yaml = serde_yaml::to_string(&settings).context("failed to render settings")?;
    print!("{yaml}");
    Ok(())
}
