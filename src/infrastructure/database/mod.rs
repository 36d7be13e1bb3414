//! `SQLite` persistence for the preference store

pub mod connection;
pub mod preference_repo;

pub use connection::DatabaseConnection;
pub use preference_repo::SqlitePreferenceStore;
