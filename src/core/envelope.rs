use crate::domain::params::InvalidChoice;
use crate::utils::error::RedditError;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

/// Uniform response of every operation: `{"successful", "data", "error"}`.
///
/// Exactly one of "success with data" or "failure with error" holds; a failure always
/// carries `data: {}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub successful: bool,
    pub data: Value,
    pub error: Option<String>,
}

impl Envelope {
    pub fn success(data: Value) -> Self {
        Self {
            successful: true,
            data,
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            successful: false,
            data: json!({}),
            error: Some(error.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.successful
    }
}

impl From<OperationResult> for Envelope {
    fn from(result: OperationResult) -> Self {
        match result {
            Ok(data) => Envelope::success(data),
            Err(e) => Envelope::failure(e.to_string()),
        }
    }
}

/// 操作失敗的結構化原因；`Display` 即為信封中的錯誤字串
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("{0}")]
    InvalidChoice(#[from] InvalidChoice),

    #[error("{message}")]
    InvalidArgument { field: String, message: String },

    #[error("Invalid '{field}' format: '{value}'. Must start with {expected}.")]
    InvalidIdentifier {
        field: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("{0}")]
    Client(#[from] RedditError),

    #[error("{context}: {source}")]
    ClientContext {
        context: String,
        #[source]
        source: RedditError,
    },

    #[error("{0}")]
    Failed(String),
}

impl OperationError {
    pub fn invalid_argument(field: &str, message: impl Into<String>) -> Self {
        OperationError::InvalidArgument {
            field: field.to_string(),
            message: message.into(),
        }
    }

    pub fn missing_parameter(field: &str) -> Self {
        Self::invalid_argument(field, format!("Missing required parameter '{}'.", field))
    }

    /// Whether the failure was detected before any client call.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            OperationError::InvalidChoice(_)
                | OperationError::InvalidArgument { .. }
                | OperationError::InvalidIdentifier { .. }
        )
    }
}

pub type OperationResult = std::result::Result<Value, OperationError>;

/// Prefixes client failures with a static description of what was being attempted.
pub trait ClientContext<T> {
    fn context(self, context: &str) -> std::result::Result<T, OperationError>;

    fn with_context<F: FnOnce() -> String>(self, f: F) -> std::result::Result<T, OperationError>;
}

impl<T> ClientContext<T> for std::result::Result<T, RedditError> {
    fn context(self, context: &str) -> std::result::Result<T, OperationError> {
        self.map_err(|source| OperationError::ClientContext {
            context: context.to_string(),
            source,
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> std::result::Result<T, OperationError> {
        self.map_err(|source| OperationError::ClientContext {
            context: f(),
            source,
        })
    }
}

/// `{"status": message}`, used for confirmations and "nothing found" results.
pub fn status(message: impl Into<String>) -> Value {
    json!({ "status": message.into() })
}
