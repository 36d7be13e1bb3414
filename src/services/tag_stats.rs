//! Per-tag like/dislike counters.

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::domain::ports::{PreferenceStore, StoreError};

/// Feeds judged tag sets into the store's counters.
pub struct TagStatsAggregator<S: PreferenceStore> {
    store: Arc<S>,
}

impl<S: PreferenceStore> TagStatsAggregator<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Bump `likes` or `dislikes` and `total` for every tag, creating
    /// missing counters on the fly.
    #[instrument(skip(self, tags), fields(tag_count = tags.len()))]
    pub async fn record_tags(&self, tags: &[String], liked: bool) -> Result<(), StoreError> {
        if tags.is_empty() {
            return Ok(());
        }

        self.store.record_tag_votes(tags, liked).await?;
        debug!(liked, "tag counters updated");
        Ok(())
    }
}

impl<S: PreferenceStore> Clone for TagStatsAggregator<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::{DatabaseConnection, SqlitePreferenceStore};

    async fn setup() -> Arc<SqlitePreferenceStore> {
        let db = DatabaseConnection::in_memory().await.unwrap();
        db.migrate().await.unwrap();
        Arc::new(SqlitePreferenceStore::new(db.pool().clone()))
    }

    #[tokio::test]
    async fn test_record_tags_creates_and_increments() {
        let store = setup().await;
        let aggregator = TagStatsAggregator::new(Arc::clone(&store));

        aggregator
            .record_tags(&["wolf".to_string(), "forest".to_string()], true)
            .await
            .unwrap();
        aggregator
            .record_tags(&["wolf".to_string()], false)
            .await
            .unwrap();

        let stats = store.list_tag_stats().await.unwrap();
        let wolf = stats.iter().find(|s| s.name == "wolf").unwrap();
        assert_eq!((wolf.likes, wolf.dislikes, wolf.total), (1, 1, 2));
        let forest = stats.iter().find(|s| s.name == "forest").unwrap();
        assert_eq!((forest.likes, forest.dislikes, forest.total), (1, 0, 1));
        assert!(stats.iter().all(crate::domain::models::TagStat::is_consistent));
    }

    #[tokio::test]
    async fn test_empty_tag_set_is_noop() {
        let store = setup().await;
        let aggregator = TagStatsAggregator::new(Arc::clone(&store));

        aggregator.record_tags(&[], false).await.unwrap();
        assert!(store.list_tag_stats().await.unwrap().is_empty());
    }
}
