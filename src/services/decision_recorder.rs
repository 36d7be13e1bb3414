//! Records judgments and feeds the tag counters.

use std::sync::Arc;

use tracing::{debug, instrument, warn};

use super::tag_stats::TagStatsAggregator;
use crate::domain::models::{Decision, Judgment};
use crate::domain::ports::{PreferenceStore, StoreError};

/// What happened to a judgment handed to [`DecisionRecorder::record`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    Recorded,
    /// A decision for this id already existed; nothing was changed
    Duplicate,
}

pub struct DecisionRecorder<S: PreferenceStore> {
    store: Arc<S>,
    aggregator: TagStatsAggregator<S>,
}

impl<S: PreferenceStore> DecisionRecorder<S> {
    pub fn new(store: Arc<S>) -> Self {
        let aggregator = TagStatsAggregator::new(Arc::clone(&store));
        Self { store, aggregator }
    }

    /// Persist the decision, then bump the tag counters.
    ///
    /// The decision row is written first. If the process dies before the
    /// counters are updated, the decision exists without its statistics,
    /// which the model builder tolerates. A duplicate id is absorbed here
    /// and never reaches the counters.
    #[instrument(skip(self, tags), fields(tag_count = tags.len()))]
    pub async fn record(
        &self,
        post_id: i64,
        judgment: Judgment,
        tags: Vec<String>,
    ) -> Result<RecordOutcome, StoreError> {
        let decision = Decision::new(post_id, judgment, tags);

        match self.store.insert_decision(&decision).await {
            Ok(()) => {}
            Err(StoreError::DuplicateKey(id)) => {
                warn!(post_id = id, "decision already recorded, ignoring");
                return Ok(RecordOutcome::Duplicate);
            }
            Err(err) => return Err(err),
        }

        self.aggregator
            .record_tags(&decision.tags, decision.liked)
            .await?;

        debug!(post_id, judgment = %judgment, "decision recorded");
        Ok(RecordOutcome::Recorded)
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

    fn tags(names: &[&str]) -> Vec<String> {
        names.iter().map(ToString::to_string).collect()
    }

    #[tokio::test]
    async fn test_record_writes_decision_and_stats() {
        let store = setup().await;
        let recorder = DecisionRecorder::new(Arc::clone(&store));

        let outcome = recorder
            .record(10, Judgment::Reject, tags(&["a", "b"]))
            .await
            .unwrap();

        assert_eq!(outcome, RecordOutcome::Recorded);
        let decisions = store.list_decisions().await.unwrap();
        assert_eq!(decisions.len(), 1);
        assert!(decisions[0].disliked);

        let stats = store.list_tag_stats().await.unwrap();
        assert_eq!(stats.len(), 2);
        assert!(stats.iter().all(|s| s.dislikes == 1 && s.total == 1));
    }

    #[tokio::test]
    async fn test_duplicate_does_not_touch_stats() {
        let store = setup().await;
        let recorder = DecisionRecorder::new(Arc::clone(&store));

        recorder
            .record(10, Judgment::Accept, tags(&["a"]))
            .await
            .unwrap();
        let outcome = recorder
            .record(10, Judgment::Reject, tags(&["a"]))
            .await
            .unwrap();

        assert_eq!(outcome, RecordOutcome::Duplicate);
        let stats = store.list_tag_stats().await.unwrap();
        assert_eq!((stats[0].likes, stats[0].dislikes, stats[0].total), (1, 0, 1));
        assert_eq!(store.count_decisions().await.unwrap(), 1);
    }
}
