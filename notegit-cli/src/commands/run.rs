//! `notegit run` — one pipeline pass, with a printed summary.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use notegit_core::settings;
use notegit_store::JoplinClient;
use notegit_sync::{
    run_once, BootstrapOutcome, CommitOutcome, Notifier, PushOutcome, RunOutcome, RunReport,
};

/// Arguments for `notegit run`.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Settings file (defaults to ~/.notegit/config.yaml).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl RunArgs {
    pub fn run(self) -> Result<()> {
        super::init_tracing();

        let config_path = super::resolve_config_path(self.config)?;
        let settings = settings::load_at(&config_path)
            .with_context(|| format!("failed to load settings from {}", config_path.display()))?;

        let store = JoplinClient::new(settings.api_base_url.clone(), settings.api_token.clone());
        let notifier = ConsoleNotifier {
            enabled: settings.enable_notifications,
        };

        match run_once(&settings, &store, &notifier).context("sync run aborted")? {
            RunOutcome::Skipped { reason } => {
                println!("{} {reason}", "skipped:".yellow());
            }
            RunOutcome::Completed(report) => print_report(&report),
        }
        Ok(())
    }
}

/// Prints messages to stderr when notifications are enabled; logs otherwise.
struct ConsoleNotifier {
    enabled: bool,
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, message: &str) {
        if self.enabled {
            eprintln!("{} {message}", "notegit:".red().bold());
        } else {
            tracing::info!("{message}");
        }
    }
}

fn print_report(report: &RunReport) {
    let bootstrap = match &report.bootstrap {
        BootstrapOutcome::AlreadyInitialized => "existing repository".to_string(),
        BootstrapOutcome::Initialized => "initialized new repository".to_string(),
        BootstrapOutcome::Cloned => "cloned remote repository".to_string(),
        BootstrapOutcome::Degraded { reason } => format!("degraded ({reason})"),
    };
    println!(
        "{} exported {} notes ({} notebooks) — {bootstrap}",
        "✓".green(),
        report.export.notes_written,
        report.export.notebooks_created,
    );

    if report.export.orphaned_notes > 0 {
        println!(
            "  {} {} notes reference unknown notebooks and were not exported",
            "!".yellow(),
            report.export.orphaned_notes
        );
    }

    match &report.commit {
        CommitOutcome::Committed { message } => println!("  ✎  committed: {message}"),
        CommitOutcome::NothingToCommit => println!("  ·  nothing to commit"),
    }
    match &report.push {
        PushOutcome::Pushed => println!("  ↑  pushed to origin"),
        PushOutcome::NoRemoteConfigured => println!("  ·  no remote configured, push skipped"),
    }

    for problem in &report.degraded {
        println!("  {} {problem}", "!".yellow());
    }
}
