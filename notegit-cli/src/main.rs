//! Notegit — periodic note export + git sync.
//!
//! # Usage
//!
//! ```text
//! notegit run [--config <path>]
//! notegit daemon [--config <path>]
//! notegit config init [--config <path>]
//! notegit config show [--config <path>]
//! ```

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{config::ConfigCommand, daemon::DaemonArgs, run::RunArgs};

#[derive(Parser, Debug)]
#[command(
    name = "notegit",
    version,
    about = "Export a note collection to a directory tree and sync it with git",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run one clean → bootstrap → export → commit → push pass now.
    Run(RunArgs),

    /// Run the recurring scheduler in the foreground until ctrl-c.
    Daemon(DaemonArgs),

    /// Manage the settings file.
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Run(args) => args.run(),
        Commands::Daemon(args) => args.run(),
        Commands::Config { command } => commands::config::run(command),
    }
}
