//! Preference model and tag report.
//!
//! The report is derived from tag statistics; the model is the report's score
//! column normalized into `[0, 1]`. Neither is a source of truth: both can be
//! rebuilt from the `tag_stats` table at any time.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Blacklist, TagStat};

/// Normalized per-tag preference scores.
///
/// Backed by a `BTreeMap` so serialization order is stable across rebuilds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PreferenceModel {
    scores: BTreeMap<String, f64>,
}

impl PreferenceModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, tag: &str) -> Option<f64> {
        self.scores.get(tag).copied()
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.scores.iter().map(|(tag, score)| (tag.as_str(), *score))
    }
}

impl FromIterator<(String, f64)> for PreferenceModel {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self {
            scores: iter.into_iter().collect(),
        }
    }
}

/// One row of the ranked tag report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagReportEntry {
    pub name: String,
    pub likes: u64,
    pub dislikes: u64,
    pub total: u64,
    /// `dislikes / total`
    pub dislike_ratio: f64,
    /// `total / image_count`
    pub image_share: f64,
    /// `(1 - dislike_ratio) * image_share`
    pub score: f64,
}

/// Tag statistics ranked for presentation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TagReport {
    /// Number of recorded decisions when the report was built
    pub image_count: u64,
    /// Ordered by dislike ratio descending, then total descending
    pub entries: Vec<TagReportEntry>,
}

impl TagReport {
    /// Build the ranked report from raw statistics.
    ///
    /// Rows with `total == 0` are skipped. With no recorded decisions the
    /// share is undefined, so the report is empty.
    pub fn from_stats(stats: &[TagStat], image_count: u64) -> Self {
        if image_count == 0 {
            return Self::default();
        }

        #[allow(clippy::cast_precision_loss)]
        let images = image_count as f64;

        let mut entries: Vec<TagReportEntry> = stats
            .iter()
            .filter_map(|stat| {
                let dislike_ratio = stat.dislike_ratio()?;
                #[allow(clippy::cast_precision_loss)]
                let image_share = stat.total as f64 / images;
                Some(TagReportEntry {
                    name: stat.name.clone(),
                    likes: stat.likes,
                    dislikes: stat.dislikes,
                    total: stat.total,
                    dislike_ratio,
                    image_share,
                    score: (1.0 - dislike_ratio) * image_share,
                })
            })
            .collect();

        // Name as last key keeps the order independent of the input order.
        entries.sort_by(|a, b| {
            b.dislike_ratio
                .total_cmp(&a.dislike_ratio)
                .then_with(|| b.total.cmp(&a.total))
                .then_with(|| a.name.cmp(&b.name))
        });

        Self {
            image_count,
            entries,
        }
    }

    /// Normalize scores by the maximum score.
    ///
    /// Returns an empty model when there are no rows or every score is zero.
    pub fn export(&self) -> PreferenceModel {
        let max = self
            .entries
            .iter()
            .map(|entry| entry.score)
            .max_by(f64::total_cmp)
            .unwrap_or(0.0);

        if max.partial_cmp(&0.0) != Some(Ordering::Greater) {
            return PreferenceModel::new();
        }

        self.entries
            .iter()
            .map(|entry| (entry.name.clone(), entry.score / max))
            .collect()
    }

    /// Copy of the report without blacklisted tags.
    pub fn excluding(&self, blacklist: &Blacklist) -> Self {
        Self {
            image_count: self.image_count,
            entries: self
                .entries
                .iter()
                .filter(|entry| !blacklist.contains(&entry.name))
                .cloned()
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
