//! Publish task domain model.
//!
//! A publish task replays one decision against the remote service. Tasks move
//! through `Unqueued -> Pending -> Processed`; the processed flag never reverts.

use serde::{Deserialize, Serialize};

use super::Decision;

/// Queue state of a decision's remote replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PublishState {
    /// Decision has no task yet
    Unqueued,
    /// Task exists and still has to be replayed
    Pending,
    /// Both remote calls succeeded
    Processed,
}

impl PublishState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unqueued => "unqueued",
            Self::Pending => "pending",
            Self::Processed => "processed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Processed)
    }

    pub fn can_transition_to(&self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Unqueued, Self::Pending) | (Self::Pending, Self::Processed)
        )
    }
}

impl std::fmt::Display for PublishState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A queued vote/favorite replay, keyed by the decision id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishTask {
    pub id: i64,
    /// `true` = upvote + favorite, `false` = downvote + unfavorite
    pub vote: bool,
    pub processed: bool,
}

impl PublishTask {
    pub fn from_decision(decision: &Decision) -> Self {
        Self {
            id: decision.id,
            vote: decision.liked,
            processed: false,
        }
    }

    pub const fn state(&self) -> PublishState {
        if self.processed {
            PublishState::Processed
        } else {
            PublishState::Pending
        }
    }

    /// Human readable summary of the remote effect.
    pub fn describe(&self) -> &'static str {
        if self.vote {
            "Upvote and favorite"
        } else {
            "Downvote and unfavorite"
        }
    }
}
