use async_trait::async_trait;

use super::errors::StoreError;
use crate::domain::models::{Decision, PublishTask, TagStat};

/// Repository interface for the preference store
///
/// The store exclusively owns the tag statistics, decision and publish task
/// tables. Every other component reaches them through this contract.
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    /// Count one judgment for a tag, creating the row on first occurrence
    ///
    /// The read-increment-write is a single atomic statement, so two writers
    /// can never interleave on the same tag.
    ///
    /// # Returns
    /// * `Ok(TagStat)` - The row after the increment
    /// * `Err(StoreError)` on query failure
    async fn upsert_tag_stat(&self, name: &str, liked: bool) -> Result<TagStat, StoreError>;

    /// Count one judgment for every tag in `tags` as one transaction
    ///
    /// Either all counters are bumped or none are.
    async fn record_tag_votes(&self, tags: &[String], liked: bool) -> Result<(), StoreError>;

    /// List all tag statistics ordered by name
    async fn list_tag_stats(&self) -> Result<Vec<TagStat>, StoreError>;

    /// Insert a new decision
    ///
    /// # Returns
    /// * `Ok(())` on success
    /// * `Err(StoreError::DuplicateKey)` if a decision with this id exists
    /// * `Err(StoreError)` on other failures
    async fn insert_decision(&self, decision: &Decision) -> Result<(), StoreError>;

    /// Check whether a candidate has already been judged
    async fn has_decision(&self, id: i64) -> Result<bool, StoreError>;

    /// Number of recorded decisions
    async fn count_decisions(&self) -> Result<u64, StoreError>;

    /// List all decisions ordered by id
    async fn list_decisions(&self) -> Result<Vec<Decision>, StoreError>;

    /// Queue a publish task unless one already exists for this id
    ///
    /// # Returns
    /// * `Ok(true)` if the task was inserted
    /// * `Ok(false)` if a task with this id was already present (no-op)
    async fn insert_publish_task_if_absent(&self, task: &PublishTask) -> Result<bool, StoreError>;

    /// Look up a single publish task
    async fn get_publish_task(&self, id: i64) -> Result<Option<PublishTask>, StoreError>;

    /// List tasks that have not been processed yet, ordered by id
    async fn list_pending_publish_tasks(&self) -> Result<Vec<PublishTask>, StoreError>;

    /// Flip a task's processed flag to true
    ///
    /// # Returns
    /// * `Ok(())` on success (also when the task was already processed)
    /// * `Err(StoreError::NotFound)` if no task with this id exists
    async fn mark_publish_task_processed(&self, id: i64) -> Result<(), StoreError>;
}
