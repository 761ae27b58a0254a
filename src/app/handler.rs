//! HTTP contract of the grant matching function, independent of the transport
//! it is mounted on (axum server, Lambda, tests).

use crate::adapters::{GeminiExtractor, SupabaseCatalog};
use crate::config::FunctionConfig;
use crate::core::matcher::GrantMatcher;
use crate::domain::model::MatchResponse;
use crate::utils::error::{ErrorCategory, MatchError, Result};
use crate::utils::validation::validate_required_field;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Header names are lower-case so every transport can use them as-is.
pub const CORS_HEADERS: [(&str, &str); 3] = [
    ("access-control-allow-origin", "*"),
    (
        "access-control-allow-headers",
        "authorization, x-client-info, apikey, content-type",
    ),
    ("access-control-allow-methods", "POST, OPTIONS"),
];

#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    pub query: String,
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

/// Status, headers and body ready to be written by any transport.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionResponse {
    pub status: u16,
    pub headers: Vec<(&'static str, &'static str)>,
    pub body: String,
}

impl FunctionResponse {
    fn new(status: u16, content_type: &'static str, body: String) -> Self {
        let mut headers = CORS_HEADERS.to_vec();
        headers.push(("content-type", content_type));
        Self {
            status,
            headers,
            body,
        }
    }

    pub fn json<T: Serialize>(status: u16, payload: &T) -> Self {
        match serde_json::to_string(payload) {
            Ok(body) => Self::new(status, "application/json", body),
            Err(e) => {
                tracing::error!("Failed to encode response: {}", e);
                Self::error(500, "Failed to contact Gemini API or Supabase")
            }
        }
    }

    pub fn error(status: u16, message: &str) -> Self {
        let body = serde_json::to_string(&ErrorBody { error: message })
            .unwrap_or_else(|_| r#"{"error":"Internal error"}"#.to_string());
        Self::new(status, "application/json", body)
    }

    pub fn preflight() -> Self {
        Self::new(200, "text/plain", "ok".to_string())
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| *value)
    }
}

/// The grant matching function: owns configuration and a pooled HTTP client.
#[derive(Debug, Clone)]
pub struct GrantFunction {
    config: FunctionConfig,
    client: Client,
}

impl GrantFunction {
    pub fn new(config: FunctionConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| MatchError::ConfigError {
                message: format!("Failed to build HTTP client: {}", e),
            })?;

        Ok(Self { config, client })
    }

    pub async fn handle(&self, method: &str, body: &[u8]) -> FunctionResponse {
        match method {
            "OPTIONS" => FunctionResponse::preflight(),
            "POST" => match self.handle_post(body).await {
                Ok(response) => FunctionResponse::json(200, &response),
                Err(e) => error_response(&e),
            },
            other => {
                tracing::debug!("Rejected {} request", other);
                FunctionResponse::error(405, "Method not allowed")
            }
        }
    }

    async fn handle_post(&self, body: &[u8]) -> Result<MatchResponse> {
        let request: MatchRequest =
            serde_json::from_slice(body).map_err(|e| MatchError::RequestError {
                message: e.to_string(),
            })?;

        self.run_query(&request.query).await
    }

    /// 檢查憑證後執行一次比對；任何外部呼叫之前就會因缺少憑證而失敗
    pub async fn run_query(&self, query: &str) -> Result<MatchResponse> {
        let api_key = validate_required_field("ai_api_key", &self.config.ai_api_key)?;
        let catalog_url = validate_required_field("catalog_url", &self.config.catalog_url)?;
        let service_role_key =
            validate_required_field("service_role_key", &self.config.service_role_key)?;

        let extractor = GeminiExtractor::new(
            self.client.clone(),
            &self.config.ai_base_url,
            &self.config.ai_model,
            api_key,
        );
        let catalog = SupabaseCatalog::new(
            self.client.clone(),
            catalog_url,
            service_role_key,
            &self.config.grants_table,
        );

        GrantMatcher::new(extractor, catalog).run(query).await
    }
}

fn error_response(err: &MatchError) -> FunctionResponse {
    let status = match err.category() {
        ErrorCategory::Request => 400,
        ErrorCategory::Configuration | ErrorCategory::Service | ErrorCategory::Internal => 500,
    };

    match err.category() {
        ErrorCategory::Request => tracing::warn!("❌ {}", err),
        _ => tracing::error!("❌ Grant matching failed: {} (Category: {:?})", err, err.category()),
    }

    FunctionResponse::error(status, err.public_message())
}
