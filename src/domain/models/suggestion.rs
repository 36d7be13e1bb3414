//! Ranker output.

use serde::{Deserialize, Serialize};

/// Action the ranker suggests for a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SuggestedAction {
    /// No prediction, or too close to the running average
    #[default]
    None,
    /// Predicted clearly above the running average
    Favor,
    /// Predicted clearly below the running average
    Disfavor,
}

impl SuggestedAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Favor => "favor",
            Self::Disfavor => "disfavor",
        }
    }
}

impl std::fmt::Display for SuggestedAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
