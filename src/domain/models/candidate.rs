//! Candidate domain model.
//!
//! Candidates come from the remote listing. The core only needs the id and the
//! flattened tag set; file and timestamp fields are carried for display.

use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Media file attached to a candidate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaFile {
    /// Absent when the remote hides the file (e.g. login-gated content)
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub ext: String,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
}

impl MediaFile {
    /// Videos need a separate player and an explicit confirmation.
    pub fn is_video(&self) -> bool {
        matches!(self.ext.to_lowercase().as_str(), "webm" | "swf")
    }
}

/// An item presented to the user for judgment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: i64,
    /// Tags grouped by category
    #[serde(default)]
    pub tags: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub file: MediaFile,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Candidate {
    /// All tags across categories, first occurrence wins.
    pub fn flattened_tags(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.tags
            .values()
            .flatten()
            .filter(|tag| seen.insert(tag.as_str()))
            .cloned()
            .collect()
    }

    pub fn media_url(&self) -> Option<&str> {
        self.file.url.as_deref().filter(|url| !url.is_empty())
    }
}
