//! Remote media service integration
//!
//! One HTTP client serves both external collaborators: the candidate
//! listing and the publish target for replayed votes and favorites.

pub mod client;
pub mod errors;
pub mod retry;

pub use client::RemoteClient;
pub use errors::RemoteError;
pub use retry::RetryPolicy;
