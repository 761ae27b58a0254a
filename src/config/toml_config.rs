use crate::config::{
    FunctionConfig, DEFAULT_AI_BASE_URL, DEFAULT_AI_MODEL, DEFAULT_GRANTS_TABLE,
    DEFAULT_TIMEOUT_SECONDS,
};
use crate::utils::error::{MatchError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_BIND: &str = "127.0.0.1:8000";

/// 檔案形式的設定，可取代環境變數
///
/// ```toml
/// [catalog]
/// url = "https://abc.supabase.co"
/// service_role_key = "${SERVICE_ROLE_KEY}"
///
/// [extraction]
/// api_key = "${AI_API_KEY}"
/// model = "gemini-1.5-flash"
///
/// [http]
/// timeout_seconds = 10
///
/// [server]
/// bind = "0.0.0.0:8000"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub catalog: CatalogSection,
    #[serde(default)]
    pub extraction: ExtractionSection,
    #[serde(default)]
    pub http: HttpSection,
    #[serde(default)]
    pub server: ServerSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogSection {
    pub url: Option<String>,
    pub service_role_key: Option<String>,
    pub table: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractionSection {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HttpSection {
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerSection {
    pub bind: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(MatchError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| MatchError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${AI_API_KEY})，未設定的變數會變成空字串
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").map_err(|e| {
            MatchError::ConfigError {
                message: format!("Invalid substitution pattern: {}", e),
            }
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            std::env::var(&caps[1]).unwrap_or_default()
        });

        Ok(result.into_owned())
    }

    pub fn bind_address(&self) -> &str {
        self.server.bind.as_deref().unwrap_or(DEFAULT_BIND)
    }

    pub fn to_function_config(&self) -> FunctionConfig {
        let non_empty = |value: &Option<String>| value.clone().filter(|v| !v.trim().is_empty());

        FunctionConfig {
            catalog_url: non_empty(&self.catalog.url),
            service_role_key: non_empty(&self.catalog.service_role_key),
            grants_table: non_empty(&self.catalog.table)
                .unwrap_or_else(|| DEFAULT_GRANTS_TABLE.to_string()),
            ai_api_key: non_empty(&self.extraction.api_key),
            ai_base_url: non_empty(&self.extraction.base_url)
                .unwrap_or_else(|| DEFAULT_AI_BASE_URL.to_string()),
            ai_model: non_empty(&self.extraction.model)
                .unwrap_or_else(|| DEFAULT_AI_MODEL.to_string()),
            request_timeout_seconds: self
                .http
                .timeout_seconds
                .unwrap_or(DEFAULT_TIMEOUT_SECONDS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_from_file_with_env_substitution() {
        std::env::set_var("GRANT_MATCH_TEST_SERVICE_KEY", "role-key-123");

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("grant-match.toml");
        std::fs::write(
            &path,
            r#"
[catalog]
url = "https://abc.supabase.co"
service_role_key = "${GRANT_MATCH_TEST_SERVICE_KEY}"
table = "grants"

[extraction]
api_key = "${GRANT_MATCH_TEST_UNSET_VARIABLE}"
model = "gemini-1.5-pro"

[http]
timeout_seconds = 5

[server]
bind = "0.0.0.0:9000"
"#,
        )
        .unwrap();

        let config = TomlConfig::from_file(&path).unwrap();
        assert_eq!(config.bind_address(), "0.0.0.0:9000");

        let function_config = config.to_function_config();
        assert_eq!(function_config.service_role_key.as_deref(), Some("role-key-123"));
        // 未設定的變數視為未提供
        assert!(function_config.ai_api_key.is_none());
        assert_eq!(function_config.ai_model, "gemini-1.5-pro");
        assert_eq!(function_config.ai_base_url, DEFAULT_AI_BASE_URL);
        assert_eq!(function_config.request_timeout_seconds, 5);
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert_eq!(config.bind_address(), DEFAULT_BIND);
        assert_eq!(config.to_function_config(), FunctionConfig::default());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = TomlConfig::from_toml_str("[catalog\nurl = 1").unwrap_err();
        assert!(matches!(err, MatchError::ConfigError { .. }));
    }
}
