//! logfilter
//!
//! Filter log files by date range and level using awk, with settings
//! resolved per file from layered XDG configuration.

use anyhow::{Context, Result};
use clap::Parser;
use logfilter::cli::Cli;
use logfilter::config::{ConfigLoader, FilterSettings, PROGRAM};
use logfilter::filter::{datestr, expand_logfiles, plan_jobs, run_jobs};
use logfilter::logging;
use serde_json::json;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

fn main() -> ExitCode {
    let debug = std::env::var_os(logging::DEBUG_ENV).is_some();
    if let Err(err) = logging::init(debug) {
        eprintln!("{}: {:#}", PROGRAM, err);
    }

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}: {:#}", PROGRAM, err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    debug!(?cli, "parsed arguments");

    let loader = ConfigLoader::load().context("failed to load configuration")?;
    for path in loader.config_files() {
        debug!("using configuration file: {}", path.display());
    }
    let overrides = cli.overrides();
    let defaults = loader.default_settings_with(&overrides)?;

    let files = if cli.logfiles.is_empty() {
        expand_logfiles(&defaults.logfiles)
    } else {
        cli.logfiles.clone()
    };
    if files.is_empty() {
        debug!("null glob");
        return Ok(());
    }

    let targets = files
        .into_iter()
        .map(|path| -> Result<(PathBuf, FilterSettings)> {
            let settings = loader.settings_with(&path.to_string_lossy(), &overrides)?;
            Ok((path, settings))
        })
        .collect::<Result<Vec<_>>>()?;

    if cli.show_config {
        return show_config(&loader, &targets);
    }

    let jobs = plan_jobs(targets, defaults.batch, datestr)?;
    let stdout = std::io::stdout();
    run_jobs(&jobs, &mut stdout.lock())
}

fn show_config(loader: &ConfigLoader, targets: &[(PathBuf, FilterSettings)]) -> Result<()> {
    let mut out = std::io::stdout().lock();
    for (path, settings) in targets {
        let resolved = loader.resolve(&path.to_string_lossy());
        let entry = json!({
            "file": path,
            "matched": resolved.matched(),
            "settings": settings,
        });
        writeln!(out, "{}", serde_json::to_string(&entry)?)?;
    }
    Ok(())
}
