//! Interactive browsing loop.
//!
//! One page at a time: fetch, drop what should not be shown, refresh the
//! model when due, then score and review each remaining candidate before
//! recording the judgment. Nothing overlaps: the next candidate is not
//! looked at until the current one is recorded or skipped.

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::watch;
use tracing::{debug, info, instrument};

use super::decision_recorder::DecisionRecorder;
use super::model_builder::ModelBuilder;
use super::ranker;
use crate::domain::models::{Blacklist, BrowseConfig, Candidate, PreferenceModel, TagReport};
use crate::domain::ports::{
    CandidateSource, PreferenceStore, Review, Reviewer, ScoredCandidate, StoreError,
};
use crate::infrastructure::model_cache::ModelCache;

/// Knobs for one browsing session.
#[derive(Debug, Clone)]
pub struct SessionSettings {
    /// Search query sent with every page request
    pub query: String,
    /// Candidates per page
    pub page_size: u32,
    /// Pages between model refreshes
    pub refresh_every_pages: u32,
    /// Distance from the running average that triggers a suggestion
    pub suggestion_threshold: f64,
}

impl From<&BrowseConfig> for SessionSettings {
    fn from(config: &BrowseConfig) -> Self {
        Self {
            query: config.query.clone(),
            page_size: config.page_size,
            refresh_every_pages: config.refresh_every_pages.max(1),
            suggestion_threshold: config.suggestion_threshold,
        }
    }
}

/// Why [`BrowseSession::run`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The listing returned an empty page
    Exhausted,
    /// Shutdown signal or the user quit at the prompt
    Interrupted,
}

pub struct BrowseSession<S: PreferenceStore, C: CandidateSource> {
    store: Arc<S>,
    source: Arc<C>,
    recorder: DecisionRecorder<S>,
    builder: ModelBuilder<S>,
    blacklist: Blacklist,
    settings: SessionSettings,
    model: PreferenceModel,
    running_average: f64,
    shutdown: watch::Receiver<bool>,
}

impl<S: PreferenceStore, C: CandidateSource> BrowseSession<S, C> {
    pub fn new(
        store: Arc<S>,
        source: Arc<C>,
        cache: ModelCache,
        blacklist: Blacklist,
        settings: SessionSettings,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        Self {
            recorder: DecisionRecorder::new(Arc::clone(&store)),
            builder: ModelBuilder::new(Arc::clone(&store), cache),
            store,
            source,
            blacklist,
            settings,
            model: PreferenceModel::new(),
            running_average: 0.0,
            shutdown,
        }
    }

    pub fn model(&self) -> &PreferenceModel {
        &self.model
    }

    pub fn running_average(&self) -> f64 {
        self.running_average
    }

    /// Browse until the listing runs out, the user quits or shutdown is
    /// signalled.
    ///
    /// # Errors
    /// Store failures and candidate pages that could not be fetched after
    /// retries. Reviewer errors are propagated as well.
    #[instrument(skip(self, reviewer), fields(query = %self.settings.query))]
    pub async fn run<R: Reviewer>(&mut self, reviewer: &mut R) -> Result<SessionEnd> {
        let mut page: u32 = 1;
        let mut pages_since_refresh: Option<u32> = None;

        loop {
            let candidates = tokio::select! {
                biased;
                () = shutdown_requested(&mut self.shutdown) => return Ok(SessionEnd::Interrupted),
                fetched = self.source.fetch_page(&self.settings.query, page, self.settings.page_size) => {
                    fetched.with_context(|| format!("Failed to fetch candidate page {page}"))?
                }
            };

            if candidates.is_empty() {
                info!(page, "no more candidates");
                return Ok(SessionEnd::Exhausted);
            }

            let fresh = self.filter(candidates).await?;
            debug!(page, fresh = fresh.len(), "page filtered");

            let due = pages_since_refresh.map_or(true, |n| n >= self.settings.refresh_every_pages);
            if !fresh.is_empty() && due {
                self.refresh().await?;
                pages_since_refresh = Some(0);
            }

            for (candidate, tags) in fresh {
                let scored = self.score(candidate, tags).await?;

                let review = tokio::select! {
                    biased;
                    () = shutdown_requested(&mut self.shutdown) => return Ok(SessionEnd::Interrupted),
                    review = reviewer.review(&scored) => review?,
                };

                match review {
                    Review::Judged(judgment) => {
                        self.recorder
                            .record(scored.candidate.id, judgment, scored.tags)
                            .await?;
                    }
                    Review::Skip => debug!(post_id = scored.candidate.id, "skipped"),
                    Review::Quit => return Ok(SessionEnd::Interrupted),
                }
            }

            page += 1;
            if let Some(n) = pages_since_refresh.as_mut() {
                *n += 1;
            }
        }
    }

    /// Final report and export, minus blacklisted tags.
    ///
    /// Runs on every way out of a session, interrupted or not.
    pub async fn finalize(&mut self) -> Result<TagReport, StoreError> {
        let (report, model) = self.builder.refresh().await?;
        self.model = model;
        Ok(report.excluding(&self.blacklist))
    }

    /// Rebuild the model and the running average it is compared against.
    async fn refresh(&mut self) -> Result<(), StoreError> {
        let (_, model) = self.builder.refresh().await?;
        let decisions = self.store.list_decisions().await?;
        self.running_average = ranker::running_average(&decisions, &model);
        self.model = model;

        debug!(running_average = self.running_average, "running average updated");
        Ok(())
    }

    /// Keep candidates that have media, carry no blacklisted tag and have
    /// not been judged before.
    async fn filter(
        &self,
        candidates: Vec<Candidate>,
    ) -> Result<Vec<(Candidate, Vec<String>)>, StoreError> {
        let mut fresh = Vec::with_capacity(candidates.len());

        for candidate in candidates {
            if candidate.media_url().is_none() {
                debug!(post_id = candidate.id, "no media url, skipping");
                continue;
            }

            let tags = candidate.flattened_tags();
            if self.blacklist.blocks(&tags) {
                debug!(post_id = candidate.id, "blacklisted, skipping");
                continue;
            }

            if self.store.has_decision(candidate.id).await? {
                continue;
            }

            fresh.push((candidate, tags));
        }

        Ok(fresh)
    }

    async fn score(
        &self,
        candidate: Candidate,
        tags: Vec<String>,
    ) -> Result<ScoredCandidate, StoreError> {
        let predicted = ranker::predict(&tags, &self.model);
        let suggestion = ranker::suggest_action(
            predicted,
            self.running_average,
            self.settings.suggestion_threshold,
        );

        Ok(ScoredCandidate {
            candidate,
            tags,
            predicted,
            running_average: self.running_average,
            suggestion,
            decision_count: self.store.count_decisions().await?,
        })
    }
}

/// Resolves once shutdown is signalled; never resolves if the sender is gone.
async fn shutdown_requested(shutdown: &mut watch::Receiver<bool>) {
    let signalled = shutdown.wait_for(|stop| *stop).await.is_ok();
    if !signalled {
        std::future::pending::<()>().await;
    }
}
