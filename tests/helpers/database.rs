use std::sync::Arc;

use tagsift::infrastructure::database::{DatabaseConnection, SqlitePreferenceStore};

/// Create an in-memory preference store for testing
///
/// Each call creates a completely isolated database with migrations applied.
pub async fn setup_test_store() -> Arc<SqlitePreferenceStore> {
    let db = DatabaseConnection::in_memory()
        .await
        .expect("failed to create test database");
    db.migrate().await.expect("failed to run migrations");

    Arc::new(SqlitePreferenceStore::new(db.pool().clone()))
}

/// Open a file-backed database, as the binary does
pub async fn open_file_db(path: &std::path::Path) -> DatabaseConnection {
    let db = DatabaseConnection::open(path, 2)
        .await
        .expect("failed to open database file");
    db.migrate().await.expect("failed to run migrations");
    db
}
