use thiserror::Error;

/// Preference store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// A decision with this candidate id was already recorded
    #[error("Duplicate key: decision {0} already recorded")]
    DuplicateKey(i64),

    /// No row with this id
    #[error("Record not found: {0}")]
    NotFound(i64),

    /// The database rejected or failed the statement
    #[error("Query failed: {0}")]
    QueryFailed(#[from] sqlx::Error),

    /// Stored tag list is not valid JSON
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Stored timestamp is not RFC 3339
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(#[from] chrono::ParseError),

    /// Stored row violates a domain invariant
    #[error("Corrupt record: {0}")]
    CorruptRecord(#[from] crate::domain::errors::DomainError),

    /// Database could not be opened
    #[error("Connection pool error: {0}")]
    ConnectionPoolError(String),

    /// Schema migrations failed
    #[error("Migration error: {0}")]
    MigrationError(String),
}
