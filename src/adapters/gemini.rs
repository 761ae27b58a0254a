use crate::domain::model::KeywordSet;
use crate::domain::ports::KeywordExtractor;
use crate::utils::error::{MatchError, Result, Service};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

/// Keyword extraction through the Gemini `generateContent` REST endpoint.
#[derive(Debug, Clone)]
pub struct GeminiExtractor {
    client: Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiExtractor {
    pub fn new(client: Client, base_url: &str, model: &str, api_key: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: api_key.to_string(),
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

pub fn build_prompt(query: &str) -> String {
    format!(
        "Extract a comma-separated list of keywords (no sentences, just words) from this user query for grant matching: {}",
        query
    )
}

/// 取第一個 candidate 的第一段文字；結構不符時回傳空字串
pub fn candidate_text(body: &Value) -> &str {
    body.pointer("/candidates/0/content/parts/0/text")
        .and_then(Value::as_str)
        .unwrap_or("")
}

#[async_trait]
impl KeywordExtractor for GeminiExtractor {
    async fn extract_keywords(&self, query: &str) -> Result<KeywordSet> {
        let body = json!({
            "contents": [{ "parts": [{ "text": build_prompt(query) }] }]
        });

        tracing::debug!("Requesting keywords from model: {}", self.model);

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| MatchError::service(Service::Extraction, e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| MatchError::service(Service::Extraction, e.to_string()))?;

        if !status.is_success() {
            tracing::warn!("Keyword extraction returned HTTP {}; using no keywords", status);
        }

        let keywords_text = match serde_json::from_str::<Value>(&text) {
            Ok(value) => candidate_text(&value).to_string(),
            Err(e) => {
                tracing::warn!("Keyword extraction returned non-JSON body: {}", e);
                String::new()
            }
        };

        Ok(KeywordSet::parse(&keywords_text))
    }
}
