//! apidoc — regenerate API tables in component documentation pages.
//!
//! Reads `apidoc.toml` (searched upwards from the working directory unless
//! `--config` is given), loads the custom elements manifest it names, and
//! rewrites the generated region of every mapped page.

use anyhow::{Context, Result};
use apidoc::analyzer::manifest::Manifest;
use apidoc::config::Config;
use apidoc::update::{self, Mode, UpdateOptions};
use clap::Parser;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "apidoc",
    version,
    about = "Regenerate API tables in component documentation from a custom elements manifest"
)]
struct Cli {
    /// Configuration file (default: nearest apidoc.toml)
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Report out-of-date pages without writing; exits 1 if any are stale
    #[arg(long)]
    check: bool,

    /// Fail when a page lacks the generated-region markers
    #[arg(long)]
    strict: bool,

    /// Log each updated page
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // --verbose enables INFO, otherwise RUST_LOG or WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .init();

    let config = Config::load(cli.config.as_deref()).context("failed to load configuration")?;
    let manifest = Manifest::load(&config.manifest)?;

    let options = UpdateOptions {
        mode: if cli.check { Mode::Check } else { Mode::Write },
        strict: cli.strict,
    };
    let report = update::run(&config, &manifest, &options)?;

    if !report.stale.is_empty() {
        for file in &report.stale {
            eprintln!("stale: {}", config.docs_dir.join(file).display());
        }
        return Ok(ExitCode::FAILURE);
    }

    Ok(ExitCode::SUCCESS)
}
