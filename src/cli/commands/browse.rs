use std::sync::Arc;

use anyhow::{Context, Result};
use console::style;
use tokio::sync::watch;
use tracing::{info, warn};

use super::report::print_report;
use super::{load_blacklist, open_store};
use crate::cli::reviewer::TerminalReviewer;
use crate::cli::types::BrowseArgs;
use crate::cli::Outcome;
use crate::domain::models::Config;
use crate::infrastructure::model_cache::ModelCache;
use crate::infrastructure::remote::RemoteClient;
use crate::services::{BrowseSession, SessionEnd, SessionSettings};

/// Handle the browse command
///
/// The shutdown sequence (final report, export, block suggestions, closing
/// the store, removing downloaded media) runs however the session ends.
pub async fn execute(args: BrowseArgs, config: &Config, json: bool) -> Result<Outcome> {
    let mut browse = config.browse.clone();
    if let Some(query) = args.query {
        browse.query = query;
    }
    if let Some(pages) = args.refresh_every {
        browse.refresh_every_pages = pages;
    }

    let blacklist = load_blacklist(&browse.blacklist_path).await?;
    let client = Arc::new(RemoteClient::new(&config.remote)?);
    let (db, store) = open_store(config).await?;

    let scratch = tempfile::Builder::new()
        .prefix("tagsift-")
        .tempdir()
        .context("Failed to create scratch directory")?;

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let signal = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("interrupt received, shutting down");
            let _ = shutdown_tx.send(true);
        }
    });

    let mut reviewer = TerminalReviewer::new(
        Arc::clone(&client),
        scratch.path(),
        browse.image_viewer.clone(),
        browse.video_viewer.clone(),
    );
    let mut session = BrowseSession::new(
        store,
        client,
        ModelCache::new(&browse.model_path),
        blacklist,
        SessionSettings::from(&browse),
        shutdown_rx,
    );

    let ended = session.run(&mut reviewer).await;
    signal.abort();

    let finalized = session.finalize().await;
    db.close().await;
    if let Err(err) = scratch.close() {
        warn!(error = %err, "failed to remove scratch directory");
    }

    match &finalized {
        Ok(report) if json => println!("{}", serde_json::to_string_pretty(report)?),
        Ok(report) => {
            println!();
            println!("{}", style("You might want to block these tags:").bold());
            print_report(report, browse.report_min_total, None);
        }
        Err(_) => {}
    }

    let end = ended?;
    finalized.context("Failed to build the final tag report")?;

    Ok(match end {
        SessionEnd::Exhausted => Outcome::Completed,
        SessionEnd::Interrupted => Outcome::Interrupted,
    })
}
