use crate::domain::model::{Grant, KeywordSet};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Turns a free-text query into keywords.
///
/// A degraded answer from the model (bad status, unexpected shape) is an empty
/// set, not an error. Only transport failures are `Err`.
#[async_trait]
pub trait KeywordExtractor: Send + Sync {
    async fn extract_keywords(&self, query: &str) -> Result<KeywordSet>;
}

/// Read-only access to the full grant catalog. No filtering is pushed down.
#[async_trait]
pub trait GrantCatalog: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<Grant>>;
}
