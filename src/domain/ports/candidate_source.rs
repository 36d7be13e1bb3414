use anyhow::Result;
use async_trait::async_trait;

use crate::domain::models::Candidate;

/// Paginated listing of candidates
#[async_trait]
pub trait CandidateSource: Send + Sync {
    /// Fetch one page (1-based) of candidates matching `query`
    ///
    /// An empty page means the listing is exhausted.
    async fn fetch_page(&self, query: &str, page: u32, limit: u32) -> Result<Vec<Candidate>>;
}
