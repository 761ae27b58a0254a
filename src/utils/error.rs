use std::fmt;
use thiserror::Error;

/// 外部服務
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    Extraction,
    Catalog,
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Service::Extraction => write!(f, "keyword extraction"),
            Service::Catalog => write!(f, "grant catalog"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Request,
    Service,
    Internal,
}

#[derive(Error, Debug)]
pub enum MatchError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("{service} service error: {message}")]
    ServiceError { service: Service, message: String },

    #[error("Invalid request: {message}")]
    RequestError { message: String },
}

impl MatchError {
    pub fn service(service: Service, message: impl Into<String>) -> Self {
        MatchError::ServiceError {
            service,
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            MatchError::ConfigError { .. }
            | MatchError::MissingConfigError { .. }
            | MatchError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            MatchError::RequestError { .. } => ErrorCategory::Request,
            MatchError::ServiceError { .. } => ErrorCategory::Service,
            MatchError::IoError(_) => ErrorCategory::Internal,
        }
    }

    /// 給本機 CLI 使用者的訊息：設定錯誤需要指出是哪個欄位
    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => self.to_string(),
            _ => self.public_message().to_string(),
        }
    }

    /// 對外訊息：不帶任何內部細節
    pub fn public_message(&self) -> &'static str {
        match self {
            MatchError::MissingConfigError { field } if field == "ai_api_key" => {
                "AI API key not set"
            }
            MatchError::MissingConfigError { .. } => "Grant catalog credentials not set",
            MatchError::ConfigError { .. } | MatchError::InvalidConfigValueError { .. } => {
                "Function is not configured"
            }
            MatchError::RequestError { .. } => "Invalid request body",
            MatchError::ServiceError {
                service: Service::Catalog,
                ..
            } => "Failed to fetch grants",
            _ => "Failed to contact Gemini API or Supabase",
        }
    }
}

pub type Result<T> = std::result::Result<T, MatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_messages_hide_details() {
        let err = MatchError::service(Service::Catalog, "relation \"grants\" does not exist");
        assert_eq!(err.public_message(), "Failed to fetch grants");
        assert_eq!(err.category(), ErrorCategory::Service);

        let err = MatchError::service(Service::Extraction, "connection reset by peer");
        assert_eq!(
            err.public_message(),
            "Failed to contact Gemini API or Supabase"
        );
    }

    #[test]
    fn test_user_friendly_message_names_config_field() {
        let err = MatchError::InvalidConfigValueError {
            field: "request_timeout_seconds".to_string(),
            value: "0".to_string(),
            reason: "Value must be between 1 and 120".to_string(),
        };
        assert_eq!(err.public_message(), "Function is not configured");
        assert_eq!(
            err.user_friendly_message(),
            "Invalid value '0' for request_timeout_seconds: Value must be between 1 and 120"
        );

        let err = MatchError::service(Service::Catalog, "HTTP 401 Unauthorized");
        assert_eq!(err.user_friendly_message(), "Failed to fetch grants");
    }

    #[test]
    fn test_missing_credentials_messages() {
        let err = MatchError::MissingConfigError {
            field: "ai_api_key".to_string(),
        };
        assert_eq!(err.public_message(), "AI API key not set");
        assert_eq!(err.category(), ErrorCategory::Configuration);

        let err = MatchError::MissingConfigError {
            field: "service_role_key".to_string(),
        };
        assert_eq!(err.public_message(), "Grant catalog credentials not set");
    }
}
