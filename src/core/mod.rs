pub mod matcher;

pub use crate::domain::model::{Grant, KeywordSet, MatchResponse};
pub use crate::domain::ports::{GrantCatalog, KeywordExtractor};
pub use crate::utils::error::Result;
