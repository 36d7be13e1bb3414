use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};

use crate::domain::errors::DomainError;
use crate::domain::models::{Decision, PublishTask, TagStat};
use crate::domain::ports::{PreferenceStore, StoreError};

/// `SQLite` implementation of `PreferenceStore` using sqlx
///
/// All statements are parameterized. Counter updates are single upsert
/// statements, so concurrent writers serialize per tag key.
pub struct SqlitePreferenceStore {
    pool: SqlitePool,
}

#[derive(FromRow)]
struct TagStatRow {
    name: String,
    likes: i64,
    dislikes: i64,
    total: i64,
}

#[derive(FromRow)]
struct DecisionRow {
    id: i64,
    liked: bool,
    disliked: bool,
    tags: String,
    recorded_at: String,
}

#[derive(FromRow)]
struct PublishTaskRow {
    id: i64,
    vote: bool,
    processed: bool,
}

const UPSERT_TAG_STAT: &str = r"
    INSERT INTO tag_stats (name, likes, dislikes, total)
    VALUES (?, ?, ?, 1)
    ON CONFLICT(name) DO UPDATE SET
        likes = likes + excluded.likes,
        dislikes = dislikes + excluded.dislikes,
        total = total + 1
";

fn counter(value: i64, column: &str, tag: &str) -> Result<u64, StoreError> {
    u64::try_from(value).map_err(|_| {
        StoreError::CorruptRecord(DomainError::ValidationFailed(format!(
            "negative {column} ({value}) for tag '{tag}'"
        )))
    })
}

impl TryFrom<TagStatRow> for TagStat {
    type Error = StoreError;

    fn try_from(row: TagStatRow) -> Result<Self, Self::Error> {
        let stat = Self {
            likes: counter(row.likes, "likes", &row.name)?,
            dislikes: counter(row.dislikes, "dislikes", &row.name)?,
            total: counter(row.total, "total", &row.name)?,
            name: row.name,
        };
        if !stat.is_consistent() {
            return Err(StoreError::CorruptRecord(DomainError::ValidationFailed(format!(
                "tag '{}' has total {} but {} likes and {} dislikes",
                stat.name, stat.total, stat.likes, stat.dislikes
            ))));
        }
        Ok(stat)
    }
}

impl TryFrom<DecisionRow> for Decision {
    type Error = StoreError;

    fn try_from(row: DecisionRow) -> Result<Self, Self::Error> {
        let tags: Vec<String> = serde_json::from_str(&row.tags)?;
        let recorded_at = DateTime::parse_from_rfc3339(&row.recorded_at)?.with_timezone(&Utc);
        Ok(Self::from_parts(
            row.id,
            row.liked,
            row.disliked,
            tags,
            recorded_at,
        )?)
    }
}

impl From<PublishTaskRow> for PublishTask {
    fn from(row: PublishTaskRow) -> Self {
        Self {
            id: row.id,
            vote: row.vote,
            processed: row.processed,
        }
    }
}

impl SqlitePreferenceStore {
    /// Create a new store over an already migrated pool
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PreferenceStore for SqlitePreferenceStore {
    async fn upsert_tag_stat(&self, name: &str, liked: bool) -> Result<TagStat, StoreError> {
        let query = format!("{UPSERT_TAG_STAT} RETURNING name, likes, dislikes, total");
        let row: TagStatRow = sqlx::query_as(&query)
            .bind(name)
            .bind(i64::from(liked))
            .bind(i64::from(!liked))
            .fetch_one(&self.pool)
            .await?;

        row.try_into()
    }

    async fn record_tag_votes(&self, tags: &[String], liked: bool) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;

        for tag in tags {
            sqlx::query(UPSERT_TAG_STAT)
                .bind(tag)
                .bind(i64::from(liked))
                .bind(i64::from(!liked))
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn list_tag_stats(&self) -> Result<Vec<TagStat>, StoreError> {
        let rows: Vec<TagStatRow> =
            sqlx::query_as("SELECT name, likes, dislikes, total FROM tag_stats ORDER BY name")
                .fetch_all(&self.pool)
                .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn insert_decision(&self, decision: &Decision) -> Result<(), StoreError> {
        let tags_json = serde_json::to_string(&decision.tags)?;
        let recorded_at = decision.recorded_at.to_rfc3339();

        let result = sqlx::query(
            r"
            INSERT INTO decisions (id, liked, disliked, tags, recorded_at)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT(id) DO NOTHING
            ",
        )
        .bind(decision.id)
        .bind(decision.liked)
        .bind(decision.disliked)
        .bind(tags_json)
        .bind(recorded_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::DuplicateKey(decision.id));
        }
        Ok(())
    }

    async fn has_decision(&self, id: i64) -> Result<bool, StoreError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM decisions WHERE id = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count > 0)
    }

    async fn count_decisions(&self) -> Result<u64, StoreError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM decisions")
            .fetch_one(&self.pool)
            .await?;
        Ok(u64::try_from(count).unwrap_or(0))
    }

    async fn list_decisions(&self) -> Result<Vec<Decision>, StoreError> {
        let rows: Vec<DecisionRow> = sqlx::query_as(
            "SELECT id, liked, disliked, tags, recorded_at FROM decisions ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn insert_publish_task_if_absent(&self, task: &PublishTask) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r"
            INSERT INTO publish_tasks (id, vote, processed)
            VALUES (?, ?, ?)
            ON CONFLICT(id) DO NOTHING
            ",
        )
        .bind(task.id)
        .bind(task.vote)
        .bind(task.processed)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn get_publish_task(&self, id: i64) -> Result<Option<PublishTask>, StoreError> {
        let row: Option<PublishTaskRow> =
            sqlx::query_as("SELECT id, vote, processed FROM publish_tasks WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map(Into::into))
    }

    async fn list_pending_publish_tasks(&self) -> Result<Vec<PublishTask>, StoreError> {
        let rows: Vec<PublishTaskRow> = sqlx::query_as(
            "SELECT id, vote, processed FROM publish_tasks WHERE processed = 0 ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn mark_publish_task_processed(&self, id: i64) -> Result<(), StoreError> {
        let processed_at = Utc::now().to_rfc3339();
        let result = sqlx::query(
            r"
            UPDATE publish_tasks
            SET processed = 1, processed_at = COALESCE(processed_at, ?)
            WHERE id = ?
            ",
        )
        .bind(processed_at)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }
}
