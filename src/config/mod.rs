pub mod toml_config;

use crate::adapters::http::{
    Credentials, RedditApiConfig, DEFAULT_API_BASE_URL, DEFAULT_AUTH_BASE_URL,
};
use crate::adapters::mcp::ServerIdentity;
use crate::utils::error::{RedditError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_range, validate_required_field, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use toml_config::TomlConfig;

#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use std::path::PathBuf;

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

impl LogFormat {
    pub fn parse(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "compact" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            _ => Err(RedditError::InvalidConfigValueError {
                field: "logging.format".to_string(),
                value: value.to_string(),
                reason: "Expected 'compact' or 'json'".to_string(),
            }),
        }
    }
}

#[cfg(feature = "cli")]
#[derive(Clone, Parser)]
#[command(name = "reddit-tools")]
#[command(version)]
#[command(about = "MCP tool server exposing the Reddit API over stdio")]
pub struct CliConfig {
    #[arg(long, help = "Path to a TOML config file")]
    pub config: Option<PathBuf>,

    #[arg(long, env = "REDDIT_CLIENT_ID")]
    pub client_id: Option<String>,

    #[arg(long, env = "REDDIT_CLIENT_SECRET", hide_env_values = true)]
    pub client_secret: Option<String>,

    #[arg(long, env = "REDDIT_REFRESH_TOKEN", hide_env_values = true)]
    pub refresh_token: Option<String>,

    #[arg(long, env = "REDDIT_USER_AGENT")]
    pub user_agent: Option<String>,

    #[arg(long, help = "Reddit OAuth API base URL")]
    pub api_base_url: Option<String>,

    #[arg(long, help = "Reddit token endpoint base URL")]
    pub auth_base_url: Option<String>,

    #[arg(long, help = "HTTP request timeout in seconds")]
    pub timeout_seconds: Option<u64>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, value_enum, help = "Log output format")]
    pub log_format: Option<LogFormat>,
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            client_id: self.client_id.clone(),
            client_secret: self.client_secret.clone(),
            refresh_token: self.refresh_token.clone(),
            user_agent: self.user_agent.clone(),
            api_base_url: self.api_base_url.clone(),
            auth_base_url: self.auth_base_url.clone(),
            timeout_seconds: self.timeout_seconds,
            verbose: self.verbose,
            log_format: self.log_format,
        }
    }

    /// Reads the file named by `--config`, if any.
    pub fn load_file(&self) -> Result<Option<TomlConfig>> {
        self.config.as_ref().map(TomlConfig::from_file).transpose()
    }
}

/// Values given on the command line or in the environment; they win over the file.
#[derive(Clone, Default)]
pub struct SettingsOverrides {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub refresh_token: Option<String>,
    pub user_agent: Option<String>,
    pub api_base_url: Option<String>,
    pub auth_base_url: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub verbose: bool,
    pub log_format: Option<LogFormat>,
}

/// 合併後的執行設定
#[derive(Debug, Clone)]
pub struct RedditSettings {
    pub credentials: Credentials,
    pub user_agent: String,
    pub api_base_url: String,
    pub auth_base_url: String,
    pub timeout_seconds: u64,
    pub server_name: String,
    pub verbose: bool,
    pub log_format: LogFormat,
}

fn default_user_agent() -> String {
    format!(
        "{}/{} (MCP tool server)",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    )
}

impl RedditSettings {
    pub fn resolve(file: Option<TomlConfig>, overrides: SettingsOverrides) -> Result<Self> {
        let file = file.unwrap_or_default();
        let reddit = file.reddit.clone().unwrap_or_default();
        let api = file.api.clone().unwrap_or_default();
        let logging = file.logging.clone().unwrap_or_default();

        let client_id = overrides.client_id.or(reddit.client_id);
        let client_secret = overrides.client_secret.or(reddit.client_secret);
        let refresh_token = overrides.refresh_token.or(reddit.refresh_token);

        let log_format = match overrides.log_format {
            Some(format) => format,
            None => logging
                .format
                .as_deref()
                .map(LogFormat::parse)
                .transpose()?
                .unwrap_or_default(),
        };

        Ok(Self {
            credentials: Credentials {
                client_id: validate_required_field("reddit.client_id", &client_id)?.clone(),
                client_secret: validate_required_field("reddit.client_secret", &client_secret)?
                    .clone(),
                refresh_token: validate_required_field("reddit.refresh_token", &refresh_token)?
                    .clone(),
            },
            user_agent: overrides
                .user_agent
                .or(reddit.user_agent)
                .unwrap_or_else(default_user_agent),
            api_base_url: overrides
                .api_base_url
                .or(api.base_url)
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
            auth_base_url: overrides
                .auth_base_url
                .or(api.auth_base_url)
                .unwrap_or_else(|| DEFAULT_AUTH_BASE_URL.to_string()),
            timeout_seconds: overrides
                .timeout_seconds
                .or(api.timeout_seconds)
                .unwrap_or(DEFAULT_TIMEOUT_SECONDS),
            server_name: file
                .server
                .and_then(|s| s.name)
                .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string()),
            verbose: overrides.verbose || logging.is_verbose(),
            log_format,
        })
    }

    pub fn api_config(&self) -> RedditApiConfig {
        RedditApiConfig {
            api_base_url: self.api_base_url.clone(),
            auth_base_url: self.auth_base_url.clone(),
            credentials: self.credentials.clone(),
            user_agent: self.user_agent.clone(),
            timeout_seconds: self.timeout_seconds,
        }
    }

    pub fn server_identity(&self) -> ServerIdentity {
        ServerIdentity {
            name: self.server_name.clone(),
            ..ServerIdentity::default()
        }
    }
}

/// `${VAR}` left in a value means the variable was not set.
fn ensure_resolved(field: &str, value: &str) -> Result<()> {
    if value.contains("${") {
        return Err(RedditError::MissingConfigError {
            field: format!("{} (unresolved placeholder)", field),
        });
    }
    Ok(())
}

impl Validate for RedditSettings {
    fn validate(&self) -> Result<()> {
        let secrets = [
            ("reddit.client_id", &self.credentials.client_id),
            ("reddit.client_secret", &self.credentials.client_secret),
            ("reddit.refresh_token", &self.credentials.refresh_token),
            ("reddit.user_agent", &self.user_agent),
        ];
        for (field, value) in secrets {
            validate_non_empty_string(field, value)?;
            ensure_resolved(field, value)?;
        }

        validate_url("api.base_url", &self.api_base_url)?;
        validate_url("api.auth_base_url", &self.auth_base_url)?;
        validate_range("api.timeout_seconds", self.timeout_seconds, 1, 300)?;
        Ok(())
    }
}
