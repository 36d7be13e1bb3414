//! Tagsift - tag preference learning with durable vote sync
//!
//! Tagsift shows candidate media items one at a time, records each
//! accept/reject judgment, learns a per-tag preference score from the
//! accumulated judgments and later replays the judgments to the remote
//! service as votes and favorites.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): Pure models and port traits
//! - **Service Layer** (`services`): Recording, model building, ranking and sync
//! - **Infrastructure Layer** (`infrastructure`): SQLite, HTTP, config, logging
//! - **CLI Layer** (`cli`): Command-line interface
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use tagsift::infrastructure::database::{DatabaseConnection, SqlitePreferenceStore};
//! use tagsift::services::DecisionRecorder;
//! use tagsift::Judgment;
//!
//! let db = DatabaseConnection::open(".tagsift/history.db", 5).await?;
//! db.migrate().await?;
//! let store = Arc::new(SqlitePreferenceStore::new(db.pool().clone()));
//! DecisionRecorder::new(Arc::clone(&store))
//!     .record(42, Judgment::Accept, vec!["wolf".into()])
//!     .await?;
//! ```

pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::models::{
    Blacklist, Candidate, Config, Decision, Judgment, PreferenceModel, PublishTask,
    SuggestedAction, TagReport, TagStat,
};
pub use domain::ports::{CandidateSource, PreferenceStore, PublishTarget, Reviewer, StoreError};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{
    BrowseSession, DecisionRecorder, ModelBuilder, SyncReport, SyncWorker, TagStatsAggregator,
};
