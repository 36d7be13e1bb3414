//! Tag statistics domain model.
//!
//! A `TagStat` aggregates how often a tag appeared on accepted and rejected
//! candidates. Rows are created lazily on first occurrence and never deleted.

use serde::{Deserialize, Serialize};

/// Like/dislike counters for a single tag.
///
/// Invariant: `total == likes + dislikes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagStat {
    /// Tag name, unique
    pub name: String,
    /// Judgments that accepted a candidate carrying this tag
    pub likes: u64,
    /// Judgments that rejected a candidate carrying this tag
    pub dislikes: u64,
    /// All judgments of candidates carrying this tag
    pub total: u64,
}

impl TagStat {
    /// Share of judgments that were rejections, or `None` for an empty row.
    pub fn dislike_ratio(&self) -> Option<f64> {
        if self.total == 0 {
            return None;
        }
        #[allow(clippy::cast_precision_loss)]
        Some(self.dislikes as f64 / self.total as f64)
    }

    /// `total == likes + dislikes`
    pub fn is_consistent(&self) -> bool {
        self.likes + self.dislikes == self.total
    }
}
