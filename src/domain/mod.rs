//! Domain layer for the tagsift preference core
//!
//! This module contains the domain models and the port traits the services
//! are written against.

pub mod errors;
pub mod models;
pub mod ports;

// Re-export error types for convenient access
pub use errors::{DomainError, DomainResult};
pub use ports::StoreError;
