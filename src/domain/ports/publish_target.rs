use anyhow::Result;
use async_trait::async_trait;

/// Remote service that receives replayed decisions
///
/// Every action must be idempotent: repeating a call after a crash or a
/// partial failure must leave the remote state as a single call would.
#[async_trait]
pub trait PublishTarget: Send + Sync {
    /// Cast a +1 (`up == true`) or -1 vote without toggling an existing one
    async fn vote(&self, post_id: i64, up: bool) -> Result<()>;

    /// Add the post to favorites; already favorited counts as success
    async fn favorite(&self, post_id: i64) -> Result<()>;

    /// Remove the post from favorites; not favorited counts as success
    async fn unfavorite(&self, post_id: i64) -> Result<()>;
}
