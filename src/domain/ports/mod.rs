//! Port trait definitions (Hexagonal Architecture)
//!
//! This module defines async trait interfaces that infrastructure adapters must implement:
//! - PreferenceStore: durable tag statistics, decisions and publish tasks
//! - PublishTarget: remote vote / favorite actions
//! - CandidateSource: paginated candidate listing
//! - Reviewer: presents a scored candidate and collects the user's judgment
//!
//! These traits define the contracts that keep the services independent
//! of SQLite, HTTP and the terminal.

pub mod candidate_source;
pub mod errors;
pub mod preference_store;
pub mod publish_target;
pub mod reviewer;

pub use candidate_source::CandidateSource;
pub use errors::StoreError;
pub use preference_store::PreferenceStore;
pub use publish_target::PublishTarget;
pub use reviewer::{Review, Reviewer, ScoredCandidate};
