//! This module implements the CLI for devsalary: command parsing, wiring the
//! configured fetchers into the core pipeline, and printing the reports.
//!
//! All fetching, normalisation and aggregation lives in the [`devsalary-core`] crate.
//! This module is strictly CLI glue.
//!
//! ## How To Use
//! - From the shell: `devsalary report [--config devsalary.yaml] [--format json]`.
//! - Programmatically or from tests: call [`run`] with a constructed [`Cli`].
//!
//! [`devsalary-core`]: ../../devsalary-core/

use crate::load_config::{load_config, superjob_key_from_env, ReportConfig};
use crate::report::{render_json, render_table};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use devsalary_core::contract::{Platform, PlatformResultSet};
use devsalary_core::fetch::{HeadHunterFetcher, SuperJobFetcher};
use devsalary_core::pipeline::collect_statistics;
use std::path::PathBuf;

/// CLI for devsalary: programming-language vacancy and salary statistics.
#[derive(Parser)]
#[clap(
    name = "devsalary",
    version,
    about = "Average salaries per programming language from HeadHunter and SuperJob"
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Collect statistics for every configured language and print them
    Report {
        /// Optional YAML config file; built-in defaults are used without it
        #[clap(long)]
        config: Option<PathBuf>,
        /// Output format
        #[clap(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

/// Extracted async CLI logic entrypoint for integration tests and main()
pub async fn run(cli: Cli) -> Result<()> {
    tracing::info!("trace_initialised");

    match cli.command {
        Commands::Report { config, format } => {
            let config = load_config(config)?;
            let superjob_key = superjob_key_from_env();
            tracing::info!(command = "report", "Starting statistics collection");

            let reports = collect_reports(&config, superjob_key.as_deref()).await?;
            if superjob_key.is_none() {
                eprintln!("SuperJob secret key not found, SuperJob statistics skipped.");
            }
            print_reports(&reports, format)?;
            tracing::info!(command = "report", "Statistics collection complete");
            Ok(())
        }
    }
}

/// Runs HeadHunter, then SuperJob when a key is available. A skipped platform
/// still gets an (empty) entry so both reports are always printed.
pub async fn collect_reports(
    config: &ReportConfig,
    superjob_key: Option<&str>,
) -> Result<Vec<(Platform, PlatformResultSet)>> {
    let headhunter = HeadHunterFetcher::new(config.headhunter.clone(), config.retry)
        .context("Failed to build HeadHunter client")?;
    let hh_results = collect_statistics(&config.languages, &headhunter)
        .await
        .context("HeadHunter statistics failed")?;

    let sj_results = match superjob_key {
        Some(key) => {
            let superjob = SuperJobFetcher::new(config.superjob.clone(), key, config.retry)
                .context("Failed to build SuperJob client")?;
            collect_statistics(&config.languages, &superjob)
                .await
                .context("SuperJob statistics failed")?
        }
        None => {
            tracing::info!("Skipping SuperJob: no secret key");
            PlatformResultSet::new()
        }
    };

    Ok(vec![
        (Platform::HeadHunter, hh_results),
        (Platform::SuperJob, sj_results),
    ])
}

fn print_reports(reports: &[(Platform, PlatformResultSet)], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => {
            let tables: Vec<String> = reports
                .iter()
                .map(|(platform, results)| render_table(platform.title(), results))
                .collect();
            println!("{}", tables.join("\n\n"));
        }
        OutputFormat::Json => {
            println!("{}", render_json(reports).context("Failed to serialise report")?);
        }
    }
    Ok(())
}
