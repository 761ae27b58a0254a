#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::utils::error::{MatchError, Result};
use crate::utils::validation::{self, Validate};
use std::time::Duration;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command};

pub const DEFAULT_AI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_AI_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_GRANTS_TABLE: &str = "grants";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

/// Runtime settings for the grant matching function.
///
/// Credentials stay optional here; a missing one fails each request, not startup.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionConfig {
    pub catalog_url: Option<String>,
    pub service_role_key: Option<String>,
    pub grants_table: String,
    pub ai_api_key: Option<String>,
    pub ai_base_url: String,
    pub ai_model: String,
    pub request_timeout_seconds: u64,
}

impl Default for FunctionConfig {
    fn default() -> Self {
        Self {
            catalog_url: None,
            service_role_key: None,
            grants_table: DEFAULT_GRANTS_TABLE.to_string(),
            ai_api_key: None,
            ai_base_url: DEFAULT_AI_BASE_URL.to_string(),
            ai_model: DEFAULT_AI_MODEL.to_string(),
            request_timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

impl FunctionConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 從任意 key/value 來源讀取（測試時不必動到行程環境變數）
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let request_timeout_seconds = match get("REQUEST_TIMEOUT_SECONDS") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| MatchError::InvalidConfigValueError {
                    field: "request_timeout_seconds".to_string(),
                    value: raw.clone(),
                    reason: "Expected a whole number of seconds".to_string(),
                })?,
            None => defaults.request_timeout_seconds,
        };

        Ok(Self {
            catalog_url: get("VITE_SUPABASE_URL").or_else(|| get("SUPABASE_URL")),
            service_role_key: get("SERVICE_ROLE_KEY"),
            grants_table: get("GRANTS_TABLE").unwrap_or(defaults.grants_table),
            ai_api_key: get("AI_API_KEY"),
            ai_base_url: get("AI_BASE_URL").unwrap_or(defaults.ai_base_url),
            ai_model: get("AI_MODEL").unwrap_or(defaults.ai_model),
            request_timeout_seconds,
        })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

impl Validate for FunctionConfig {
    fn validate(&self) -> Result<()> {
        if let Some(url) = &self.catalog_url {
            validation::validate_url("catalog_url", url)?;
        }
        validation::validate_url("ai_base_url", &self.ai_base_url)?;
        validation::validate_non_empty_string("ai_model", &self.ai_model)?;
        validation::validate_identifier("grants_table", &self.grants_table)?;
        validation::validate_range(
            "request_timeout_seconds",
            self.request_timeout_seconds,
            1,
            120,
        )?;

        if self.ai_api_key.is_none() {
            tracing::warn!("AI_API_KEY is not set; every match request will fail");
        }
        if self.catalog_url.is_none() || self.service_role_key.is_none() {
            tracing::warn!("Grant catalog credentials are not set; every match request will fail");
        }

        tracing::debug!("✅ Function configuration validation passed");
        Ok(())
    }
}
