use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};

use super::open_store;
use crate::cli::types::SyncArgs;
use crate::cli::Outcome;
use crate::domain::models::Config;
use crate::infrastructure::remote::RemoteClient;
use crate::services::{SyncReport, SyncWorker};

/// Handle the sync command
pub async fn execute(args: SyncArgs, config: &Config, json: bool) -> Result<Outcome> {
    let (db, store) = open_store(config).await?;

    let result = async {
        let client = RemoteClient::new(&config.remote)?;
        if !args.queue_only && !client.has_credentials() {
            anyhow::bail!(
                "Remote credentials missing: set remote.login and remote.api_key \
                 (TAGSIFT_REMOTE__LOGIN / TAGSIFT_REMOTE__API_KEY)"
            );
        }

        let worker = SyncWorker::new(Arc::clone(&store), Arc::new(client))
            .with_publish_delay(Duration::from_millis(config.sync.publish_delay_ms));

        if args.queue_only {
            let queued = worker
                .enqueue_pending()
                .await
                .context("Failed to queue publish tasks")?;
            return Ok(SyncReport {
                queued,
                ..SyncReport::default()
            });
        }

        worker.run().await.context("Sync aborted")
    }
    .await;

    db.close().await;
    let report = result?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "Queued {} new task(s), published {}, {} left pending after errors",
            report.queued, report.processed, report.failed
        );
    }

    Ok(Outcome::Completed)
}
