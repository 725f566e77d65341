use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "license-fetchr",
    about = "Show the license text of every dependency pinned in the bundled Package.resolved",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Config file [default: ./.license-fetchr/config.toml, fallback ~/.config/license-fetchr/config.toml]
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Report format
    #[arg(long, default_value = "terminal", value_name = "FORMAT", global = true)]
    pub report: ReportFormat,

    /// Log every candidate URL that was tried
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// No spinner or headers
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the dependencies in the manifest
    List,
    /// Fetch and show the license of one dependency
    Show {
        /// Dependency identity as written in the manifest
        name: String,
    },
    /// Fetch and show the license of every dependency, one after another
    All,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ReportFormat {
    Terminal,
    Json,
}
