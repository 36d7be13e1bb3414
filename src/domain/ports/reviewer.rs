use anyhow::Result;
use async_trait::async_trait;

use crate::domain::models::{Candidate, Judgment, SuggestedAction};

/// A candidate annotated by the ranker, ready to be shown.
#[derive(Debug, Clone)]
pub struct ScoredCandidate {
    pub candidate: Candidate,
    /// Flattened tag set
    pub tags: Vec<String>,
    /// `None` when no tag is known to the model
    pub predicted: Option<f64>,
    pub running_average: f64,
    pub suggestion: SuggestedAction,
    /// Decisions recorded so far, for the header line
    pub decision_count: u64,
}

impl ScoredCandidate {
    /// Distance from the running average, when there is a prediction.
    pub fn difference(&self) -> Option<f64> {
        self.predicted.map(|p| p - self.running_average)
    }
}

/// Outcome of presenting a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Review {
    Judged(Judgment),
    /// Move on without recording anything
    Skip,
    /// End the session
    Quit,
}

/// Presents candidates and collects judgments (terminal, test double, ...)
#[async_trait]
pub trait Reviewer: Send {
    async fn review(&mut self, scored: &ScoredCandidate) -> Result<Review>;
}
