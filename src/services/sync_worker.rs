//! Replays recorded decisions against the remote service.
//!
//! Each decision becomes exactly one publish task. A task moves from
//! pending to processed only after both of its remote calls succeed; a
//! failure leaves it pending for the next run. The remote calls are
//! idempotent, so re-running a half-finished task is safe.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Serialize;
use tokio::time::sleep;
use tracing::{info, instrument, warn};

use crate::domain::models::{PublishState, PublishTask};
use crate::domain::ports::{PreferenceStore, PublishTarget, StoreError};

/// Default pause after each successfully published task
pub const DEFAULT_PUBLISH_DELAY: Duration = Duration::from_millis(1000);

/// Counters for one worker run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    /// Tasks created from decisions that had none
    pub queued: usize,
    /// Tasks whose remote calls all succeeded
    pub processed: usize,
    /// Tasks left pending after a failed remote call
    pub failed: usize,
}

pub struct SyncWorker<S: PreferenceStore, T: PublishTarget> {
    store: Arc<S>,
    target: Arc<T>,
    publish_delay: Duration,
}

impl<S: PreferenceStore, T: PublishTarget> SyncWorker<S, T> {
    pub fn new(store: Arc<S>, target: Arc<T>) -> Self {
        Self {
            store,
            target,
            publish_delay: DEFAULT_PUBLISH_DELAY,
        }
    }

    #[must_use]
    pub const fn with_publish_delay(mut self, delay: Duration) -> Self {
        self.publish_delay = delay;
        self
    }

    /// Queue population followed by a drain of every pending task.
    #[instrument(skip(self))]
    pub async fn run(&self) -> Result<SyncReport, StoreError> {
        let queued = self.enqueue_pending().await?;
        let mut report = self.drain().await?;
        report.queued = queued;

        info!(
            queued = report.queued,
            processed = report.processed,
            failed = report.failed,
            "sync finished"
        );
        Ok(report)
    }

    /// Create a publish task for every decision that has none yet.
    ///
    /// Returns how many tasks were created.
    pub async fn enqueue_pending(&self) -> Result<usize, StoreError> {
        let mut queued = 0;
        for decision in self.store.list_decisions().await? {
            let task = PublishTask::from_decision(&decision);
            if self.store.insert_publish_task_if_absent(&task).await? {
                queued += 1;
            }
        }
        Ok(queued)
    }

    /// Publish every pending task in id order.
    ///
    /// Remote failures are logged and counted; store failures abort the run.
    pub async fn drain(&self) -> Result<SyncReport, StoreError> {
        let pending = self.store.list_pending_publish_tasks().await?;
        let total = pending.len();
        let mut report = SyncReport::default();

        for (index, task) in pending.iter().enumerate() {
            debug_assert!(!task.state().is_terminal());
            info!("{}/{}: {}: {}", index + 1, total, task.id, task.describe());

            if let Err(err) = self.publish(task).await {
                warn!(post_id = task.id, error = %format!("{err:#}"), "publish failed, task stays pending");
                report.failed += 1;
                continue;
            }

            debug_assert!(task.state().can_transition_to(PublishState::Processed));
            self.store.mark_publish_task_processed(task.id).await?;
            report.processed += 1;

            if index + 1 < total && !self.publish_delay.is_zero() {
                sleep(self.publish_delay).await;
            }
        }

        Ok(report)
    }

    async fn publish(&self, task: &PublishTask) -> Result<()> {
        self.target
            .vote(task.id, task.vote)
            .await
            .context("vote failed")?;

        if task.vote {
            self.target
                .favorite(task.id)
                .await
                .context("favorite failed")?;
        } else {
            self.target
                .unfavorite(task.id)
                .await
                .context("unfavorite failed")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{Decision, Judgment};
    use crate::infrastructure::database::{DatabaseConnection, SqlitePreferenceStore};
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingTarget {
        calls: Mutex<Vec<String>>,
        fail_vote_for: Option<i64>,
    }

    #[async_trait]
    impl PublishTarget for RecordingTarget {
        async fn vote(&self, post_id: i64, up: bool) -> Result<()> {
            if self.fail_vote_for == Some(post_id) {
                anyhow::bail!("service unavailable");
            }
            self.calls.lock().unwrap().push(format!("vote:{post_id}:{up}"));
            Ok(())
        }

        async fn favorite(&self, post_id: i64) -> Result<()> {
            self.calls.lock().unwrap().push(format!("fav:{post_id}"));
            Ok(())
        }

        async fn unfavorite(&self, post_id: i64) -> Result<()> {
            self.calls.lock().unwrap().push(format!("unfav:{post_id}"));
            Ok(())
        }
    }

    async fn setup() -> Arc<SqlitePreferenceStore> {
        let db = DatabaseConnection::in_memory().await.unwrap();
        db.migrate().await.unwrap();
        Arc::new(SqlitePreferenceStore::new(db.pool().clone()))
    }

    #[tokio::test]
    async fn test_run_publishes_in_id_order() {
        let store = setup().await;
        store
            .insert_decision(&Decision::new(2, Judgment::Reject, vec![]))
            .await
            .unwrap();
        store
            .insert_decision(&Decision::new(1, Judgment::Accept, vec![]))
            .await
            .unwrap();

        let target = Arc::new(RecordingTarget::default());
        let worker = SyncWorker::new(Arc::clone(&store), Arc::clone(&target))
            .with_publish_delay(Duration::ZERO);

        let report = worker.run().await.unwrap();
        assert_eq!(
            report,
            SyncReport {
                queued: 2,
                processed: 2,
                failed: 0
            }
        );
        assert_eq!(
            *target.calls.lock().unwrap(),
            vec!["vote:1:true", "fav:1", "vote:2:false", "unfav:2"]
        );
    }

    #[tokio::test]
    async fn test_failed_task_does_not_block_queue() {
        let store = setup().await;
        for id in [1, 2, 3] {
            store
                .insert_decision(&Decision::new(id, Judgment::Accept, vec![]))
                .await
                .unwrap();
        }

        let target = Arc::new(RecordingTarget {
            fail_vote_for: Some(2),
            ..RecordingTarget::default()
        });
        let worker =
            SyncWorker::new(Arc::clone(&store), target).with_publish_delay(Duration::ZERO);

        let report = worker.run().await.unwrap();
        assert_eq!(report.processed, 2);
        assert_eq!(report.failed, 1);

        let pending = store.list_pending_publish_tasks().await.unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].id, 2);
    }
}
