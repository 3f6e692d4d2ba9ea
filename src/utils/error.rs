use thiserror::Error;

#[derive(Error, Debug)]
pub enum RedditError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("received {status} HTTP response: {message}")]
    Api { status: u16, message: String },

    /// `json.errors` of an `api_type=json` call,
    /// e.g. `SUBREDDIT_NOEXIST: that subreddit doesn't exist`
    #[error("Reddit rejected the request: {message}")]
    Rejected { message: String },

    #[error("Authentication failed: {message}")]
    Auth { message: String },

    #[error("{what} not found")]
    NotFound { what: String },

    #[error("Unexpected response: {message}")]
    UnexpectedResponse { message: String },

    /// MCP 會話層失敗（握手或 stdio 傳輸）
    #[error("MCP transport error: {message}")]
    Transport { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid configuration value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

/// 錯誤分類，用於決定 CLI 的退出碼與日誌層級
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Remote,
    Authentication,
    Configuration,
    Data,
    System,
}

impl RedditError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            RedditError::Http(_) => ErrorCategory::Network,
            RedditError::Api { .. }
            | RedditError::Rejected { .. }
            | RedditError::NotFound { .. } => ErrorCategory::Remote,
            RedditError::Auth { .. } => ErrorCategory::Authentication,
            RedditError::ConfigError { .. }
            | RedditError::MissingConfigError { .. }
            | RedditError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            RedditError::SerializationError(_) | RedditError::UnexpectedResponse { .. } => {
                ErrorCategory::Data
            }
            RedditError::IoError(_) | RedditError::Transport { .. } => ErrorCategory::System,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check network connectivity and the configured API base URL",
            ErrorCategory::Remote => {
                "Check that the target exists and the account has the required permissions"
            }
            ErrorCategory::Authentication => {
                "Verify the client id, client secret and refresh token"
            }
            ErrorCategory::Configuration => {
                "Fix the configuration file or the corresponding command line flags"
            }
            ErrorCategory::Data => "The API returned data in an unexpected shape; retry later",
            ErrorCategory::System => "Check file permissions and available resources",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            RedditError::MissingConfigError { field } => {
                format!("Required setting '{}' is not configured", field)
            }
            RedditError::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            RedditError::Auth { .. } => "Could not authenticate with Reddit".to_string(),
            other => other.to_string(),
        }
    }

    /// 是否為 API 回傳的 404
    pub fn is_not_found(&self) -> bool {
        match self {
            RedditError::NotFound { .. } => true,
            RedditError::Api { status, .. } => *status == 404,
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, RedditError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_categories() {
        let err = RedditError::Api {
            status: 403,
            message: "forbidden".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Remote);
        assert_eq!(err.to_string(), "received 403 HTTP response: forbidden");

        let err = RedditError::MissingConfigError {
            field: "reddit.client_id".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert!(err.user_friendly_message().contains("reddit.client_id"));
    }

    #[test]
    fn test_not_found_detection() {
        assert!(RedditError::Api {
            status: 404,
            message: "Not Found".to_string()
        }
        .is_not_found());
        assert!(RedditError::NotFound {
            what: "rule".to_string()
        }
        .is_not_found());
        assert!(!RedditError::Auth {
            message: "bad token".to_string()
        }
        .is_not_found());
    }
}
