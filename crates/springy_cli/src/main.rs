//! springy - headless driver for the springy layout
//!
//! - `springy init` writes a default `springy.toml`
//! - `springy run` replays a scroll scenario and prints a JSON report

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use springy_cli::{run_scenario, DemoConfig, Scenario};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "springy")]
#[command(about = "Replay scroll scenarios against the springy grid layout")]
#[command(version)]
struct Cli {
    /// Log reconciliation and spring activity
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a default configuration file
    Init {
        /// Target file or directory
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Run a scenario and report the result
    Run {
        /// Configuration file or directory containing springy.toml
        #[arg(short, long, default_value = ".")]
        config: PathBuf,

        /// Scenario JSON file
        #[arg(short, long)]
        scenario: PathBuf,

        /// Write the report here instead of stdout
        #[arg(short, long)]
        report: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Init { path, force } => init(path, force),
        Command::Run {
            config,
            scenario,
            report,
        } => run(config, scenario, report),
    }
}

fn init(path: PathBuf, force: bool) -> Result<()> {
    let target = if path.is_dir() {
        path.join("springy.toml")
    } else {
        path
    };
    if target.exists() && !force {
        anyhow::bail!(
            "{} already exists. Pass --force to overwrite it.",
            target.display()
        );
    }

    let content = DemoConfig::default().to_toml()?;
    fs::write(&target, content).with_context(|| format!("Failed to write {}", target.display()))?;
    tracing::info!("Wrote {}", target.display());
    println!("Created {}", target.display());
    Ok(())
}

fn run(config: PathBuf, scenario: PathBuf, report_path: Option<PathBuf>) -> Result<()> {
    let config = DemoConfig::load_from_path(&config)?;
    let scenario = Scenario::from_path(&scenario)?;
    tracing::info!("Running {} steps", scenario.steps.len());

    let report = run_scenario(&config, &scenario)?;
    match report_path {
        Some(path) => report.write_to_path(&path)?,
        None => report.write_to_writer(&mut std::io::stdout().lock())?,
    }

    if report.is_failed() {
        std::process::exit(1);
    }
    Ok(())
}
