use crate::core::{Grant, GrantCatalog, KeywordExtractor, KeywordSet, MatchResponse};
use crate::utils::error::Result;

/// Upper bound on grants returned per query.
pub const MAX_MATCHES: usize = 5;

pub const NO_MATCHES_MESSAGE: &str = "No relevant grants found.";

const SUMMARY_HEADER: &str = "Top matching grants:";

/// Matches a query against the catalog through keyword extraction.
///
/// The two outbound calls run one after the other: keywords first, then the
/// catalog. Either failing as a transport error fails the whole match.
pub struct GrantMatcher<E: KeywordExtractor, C: GrantCatalog> {
    extractor: E,
    catalog: C,
}

impl<E: KeywordExtractor, C: GrantCatalog> GrantMatcher<E, C> {
    pub fn new(extractor: E, catalog: C) -> Self {
        Self { extractor, catalog }
    }

    pub async fn run(&self, query: &str) -> Result<MatchResponse> {
        tracing::debug!("User query: {}", query);

        let keywords = self.extractor.extract_keywords(query).await?;
        tracing::debug!("Extracted keywords: {:?}", keywords.as_slice());

        let grants = self.catalog.fetch_all().await?;
        tracing::debug!(
            "Fetched grants: {:?}",
            grants
                .iter()
                .map(|g| (g.title.as_str(), &g.tags))
                .collect::<Vec<_>>()
        );

        let matches = filter_grants(grants, &keywords);
        tracing::info!(
            "Matched {} grant(s) with {} keyword(s)",
            matches.len(),
            keywords.len()
        );

        Ok(build_response(matches))
    }
}

/// Keeps grants that contain at least one keyword, in catalog order.
pub fn filter_grants(grants: Vec<Grant>, keywords: &KeywordSet) -> Vec<Grant> {
    if keywords.is_empty() {
        return Vec::new();
    }

    grants
        .into_iter()
        .filter(|grant| keywords.matches(grant))
        .collect()
}

/// Truncates to [`MAX_MATCHES`] and renders the summary message.
pub fn build_response(mut matches: Vec<Grant>) -> MatchResponse {
    matches.truncate(MAX_MATCHES);
    MatchResponse {
        message: summarize(&matches),
        grants: matches,
    }
}

pub fn summarize(grants: &[Grant]) -> String {
    if grants.is_empty() {
        return NO_MATCHES_MESSAGE.to_string();
    }

    let lines: Vec<String> = grants.iter().map(Grant::summary_line).collect();
    format!("{}\n{}", SUMMARY_HEADER, lines.join("\n"))
}
