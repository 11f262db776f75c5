//! Gradebook command-line entry point.
//!
//! # Responsibility
//! - Resolve configuration from flags and environment.
//! - Dispatch subcommands to `gradebook_core` and report errors.

use std::io;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use gradebook_core::logging::normalize_level;
use gradebook_core::{init_logging, FileRecordRepository, GradebookConfig, RecordService};
use log::info;

mod cli;
mod commands;

use crate::cli::{Cli, Command};

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = resolve_config(&cli)?;
    if let Some(log_dir) = &config.log_dir {
        init_logging(config.log_level, log_dir).context("failed to initialize logging")?;
    }
    info!(
        "event=cli_start module=cli status=ok records_dir={}",
        config.records_dir.display()
    );

    let service = RecordService::new(FileRecordRepository::new(config.records_dir));
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match &cli.command {
        Command::Calc(args) => commands::run_calc(&service, args, &mut out),
        Command::List => commands::run_list(&service, &mut out),
        Command::Show { reg_no } => commands::run_show(&service, reg_no, &mut out),
        Command::Export {
            reg_no,
            destination,
        } => commands::run_export(&service, reg_no, destination, &mut out),
        Command::Compare => commands::run_compare(&service, &mut out, &mut io::stderr()),
    }
}

/// Flags win over `GRADEBOOK_*` environment values.
fn resolve_config(cli: &Cli) -> Result<GradebookConfig> {
    let mut config = GradebookConfig::from_env()?;
    if let Some(dir) = &cli.records_dir {
        config.records_dir = dir.clone();
    }
    if let Some(level) = &cli.log_level {
        config.log_level = normalize_level(level)?;
    }
    if let Some(dir) = &cli.log_dir {
        config.log_dir = Some(dir.clone());
    }
    Ok(config)
}
