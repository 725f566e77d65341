//! `license-fetchr`: show the license text of every dependency pinned in the
//! bundled `Package.resolved`.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]) and install logging ([`logging`]).
//! 2. Load config ([`config::load_config`]).
//! 3. Read the manifest next to the executable ([`manifest::ManifestParser`]).
//! 4. For `show` / `all`, resolve licenses through the candidate fallback
//!    chain ([`fetcher::LicenseFetcher`]).
//! 5. Render the requested report ([`report`]).
//!
//! A missing manifest or license is never an error: the former lists nothing,
//! the latter prints a placeholder.

mod cli;
mod config;
mod fetcher;
mod logging;
mod manifest;
mod models;
mod report;

use std::time::Duration;

use anyhow::{anyhow, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};

use cli::{Cli, Command, ReportFormat};
use config::load_config;
use fetcher::http::HttpTransport;
use fetcher::{LicenseFetcher, Transport};
use manifest::ManifestParser;
use models::{DependencyDescriptor, LicenseReport};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let cwd = std::env::current_dir()?;
    let config = load_config(&cwd, cli.config.as_deref())?;

    let deps = ManifestParser::new(config.manifest.exclusion_policy()).parse_packages();
    tracing::debug!("{} dependencies after filtering", deps.len());

    let selected: Vec<DependencyDescriptor> = match &cli.command {
        Command::List => {
            match cli.report {
                ReportFormat::Terminal => report::terminal::render_list(&deps, cli.quiet),
                ReportFormat::Json => report::json::render(&deps)?,
            }
            return Ok(());
        }
        Command::Show { name } => {
            let dep = deps
                .iter()
                .find(|d| &d.name == name)
                .ok_or_else(|| anyhow!("no dependency named `{}` in the manifest", name))?;
            vec![dep.clone()]
        }
        Command::All => deps,
    };

    let transport = HttpTransport::new(config.fetch.timeout(), &config.fetch.user_agent)?;
    let fetcher = LicenseFetcher::new(transport);

    let mut reports = Vec::with_capacity(selected.len());
    for dep in &selected {
        let report = fetch_with_spinner(&fetcher, dep, cli.quiet).await?;
        if let ReportFormat::Terminal = cli.report {
            report::terminal::render_license(&report, cli.quiet);
        }
        reports.push(report);
    }

    if let ReportFormat::Json = cli.report {
        report::json::render(&reports)?;
    }

    Ok(())
}

async fn fetch_with_spinner<T: Transport>(
    fetcher: &LicenseFetcher<T>,
    dep: &DependencyDescriptor,
    quiet: bool,
) -> Result<LicenseReport> {
    let spinner = if !quiet {
        let pb = ProgressBar::new_spinner();
        pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
        pb.set_message(format!("Fetching license for {}", dep.name));
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    } else {
        None
    };

    let license = fetcher.fetch_license(dep).await;

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    Ok(LicenseReport::new(dep, license))
}
