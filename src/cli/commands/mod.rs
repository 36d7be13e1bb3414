//! CLI command implementations.

pub mod browse;
pub mod report;
pub mod sync;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::debug;

use crate::domain::models::{Blacklist, Config};
use crate::infrastructure::database::{DatabaseConnection, SqlitePreferenceStore};

/// Open the configured database, apply migrations and wrap it in a store.
pub(crate) async fn open_store(
    config: &Config,
) -> Result<(DatabaseConnection, Arc<SqlitePreferenceStore>)> {
    let db = DatabaseConnection::open(&config.database.path, config.database.max_connections)
        .await
        .with_context(|| format!("Failed to open database at {}", config.database.path))?;
    db.migrate().await.context("Failed to run database migrations")?;

    let store = Arc::new(SqlitePreferenceStore::new(db.pool().clone()));
    Ok((db, store))
}

/// Read the blacklist file; a missing file is an empty blacklist.
pub(crate) async fn load_blacklist(path: impl AsRef<Path>) -> Result<Blacklist> {
    let path = path.as_ref();
    match tokio::fs::read_to_string(path).await {
        Ok(contents) => {
            let blacklist = Blacklist::parse(&contents);
            debug!(path = %path.display(), tags = blacklist.len(), "blacklist loaded");
            Ok(blacklist)
        }
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Blacklist::default()),
        Err(err) => {
            Err(err).with_context(|| format!("Failed to read blacklist {}", path.display()))
        }
    }
}
