use std::sync::Arc;

use anyhow::{Context, Result};

use super::{load_blacklist, open_store};
use crate::cli::output::TableFormatter;
use crate::cli::types::ReportArgs;
use crate::cli::Outcome;
use crate::domain::models::{Config, TagReport};
use crate::infrastructure::model_cache::ModelCache;
use crate::services::ModelBuilder;

/// Handle the report command
pub async fn execute(args: ReportArgs, config: &Config, json: bool) -> Result<Outcome> {
    let (db, store) = open_store(config).await?;
    let builder = ModelBuilder::new(
        Arc::clone(&store),
        ModelCache::new(&config.browse.model_path),
    );

    let built = async {
        let report = builder
            .build_report()
            .await
            .context("Failed to build tag report")?;
        let model = builder.export_model(&report).await;
        anyhow::Ok((report, model.len()))
    }
    .await;
    db.close().await;
    let (report, exported) = built?;

    let report = if args.all {
        report
    } else {
        report.excluding(&load_blacklist(&config.browse.blacklist_path).await?)
    };

    if json {
        let shown = TagReport {
            image_count: report.image_count,
            entries: report
                .entries
                .into_iter()
                .take(args.limit.unwrap_or(usize::MAX))
                .collect(),
        };
        println!("{}", serde_json::to_string_pretty(&shown)?);
        return Ok(Outcome::Completed);
    }

    print_report(&report, config.browse.report_min_total, args.limit);
    println!(
        "\n{} image(s) judged, model exported with {} tag(s) to {}",
        report.image_count,
        exported,
        builder.cache().path().display()
    );

    Ok(Outcome::Completed)
}

/// Print the ranked tags, or a note when there is nothing to rank yet.
pub(crate) fn print_report(report: &TagReport, min_total: u64, limit: Option<usize>) {
    if report.is_empty() {
        println!("No tag statistics yet.");
        return;
    }

    println!(
        "{}",
        TableFormatter::new().format_report(report, min_total, limit)
    );
}
