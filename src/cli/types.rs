//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tagsift")]
#[command(about = "Tagsift - learn tag preferences while browsing, then sync votes", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Load this YAML file instead of .tagsift/config.yaml and .tagsift/local.yaml
    #[arg(short, long, global = true, env = "TAGSIFT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Judge candidates one by one and learn from the answers
    Browse(BrowseArgs),

    /// Replay recorded decisions as votes and favorites
    Sync(SyncArgs),

    /// Show the ranked tag report and re-export the model
    Report(ReportArgs),
}

#[derive(Args, Debug, Default)]
pub struct BrowseArgs {
    /// Search query (overrides browse.query)
    #[arg(short, long)]
    pub query: Option<String>,

    /// Pages between model refreshes (overrides browse.refresh_every_pages)
    #[arg(long)]
    pub refresh_every: Option<u32>,
}

#[derive(Args, Debug, Default)]
pub struct SyncArgs {
    /// Only create publish tasks, do not contact the remote service
    #[arg(long)]
    pub queue_only: bool,
}

#[derive(Args, Debug, Default)]
pub struct ReportArgs {
    /// Maximum number of tags to display
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Include blacklisted tags
    #[arg(long)]
    pub all: bool,
}
