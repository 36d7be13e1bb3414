//! Decision domain model.
//!
//! A decision is the durable record of one judgment. It is created exactly
//! once per candidate id and never modified afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::errors::{DomainError, DomainResult};

/// Accept or reject, as answered at the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Judgment {
    Accept,
    Reject,
}

impl Judgment {
    pub const fn is_accept(self) -> bool {
        matches!(self, Self::Accept)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Accept => "accept",
            Self::Reject => "reject",
        }
    }
}

impl std::fmt::Display for Judgment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Recorded judgment of a candidate.
///
/// Exactly one of `liked` / `disliked` is true.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    /// Remote candidate identifier
    pub id: i64,
    pub liked: bool,
    pub disliked: bool,
    /// Flattened tag set, in the order the candidate listed them
    pub tags: Vec<String>,
    pub recorded_at: DateTime<Utc>,
}

impl Decision {
    pub fn new(id: i64, judgment: Judgment, tags: Vec<String>) -> Self {
        let liked = judgment.is_accept();
        Self {
            id,
            liked,
            disliked: !liked,
            tags,
            recorded_at: Utc::now(),
        }
    }

    /// Rebuild a decision from persisted columns, checking the liked/disliked exclusivity.
    pub fn from_parts(
        id: i64,
        liked: bool,
        disliked: bool,
        tags: Vec<String>,
        recorded_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        if liked == disliked {
            return Err(DomainError::ValidationFailed(format!(
                "decision {id} must be exactly one of liked/disliked"
            )));
        }
        Ok(Self {
            id,
            liked,
            disliked,
            tags,
            recorded_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_accept_sets_liked_only() {
        let decision = Decision::new(42, Judgment::Accept, vec!["a".to_string()]);
        assert!(decision.liked);
        assert!(!decision.disliked);
    }

    #[test]
    fn test_new_reject_sets_disliked_only() {
        let decision = Decision::new(7, Judgment::Reject, vec![]);
        assert!(!decision.liked);
        assert!(decision.disliked);
    }

    #[test]
    fn test_from_parts_rejects_both_flags() {
        let result = Decision::from_parts(1, true, true, vec![], Utc::now());
        assert!(matches!(result, Err(DomainError::ValidationFailed(_))));
    }

    #[test]
    fn test_from_parts_rejects_neither_flag() {
        let result = Decision::from_parts(1, false, false, vec![], Utc::now());
        assert!(result.is_err());
    }
}
