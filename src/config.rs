use std::time::Duration;

use url::Url;

/// Default compute API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.magalu.cloud/br-ne-1/compute";

/// Default timeout for tool operations (30 seconds).
const DEFAULT_TOOL_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("VM_API_KEY environment variable is required")]
    MissingApiKey,
    #[error("VM_API_URL is not a valid http(s) base URL: {0}")]
    InvalidApiUrl(String),
    #[error("VM_TOOL_TIMEOUT_SECS must be a positive integer")]
    InvalidTimeout,
    #[error("VM_LOG_FORMAT must be `text` or `json`, got `{0}`")]
    InvalidLogFormat(String),
}

/// Log output format on stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub api_url: Url,
    pub api_key: String,
    pub tenant_id: Option<String>,
    pub tool_timeout: Duration,
    pub log_format: LogFormat,
}

impl ServerConfig {
    /// Load configuration from environment.
    ///
    /// - `VM_API_KEY` (required) — sent as `x-api-key`
    /// - `VM_API_URL` (optional) — compute API base, `/v1` is appended
    /// - `VM_TENANT_ID` (optional) — default `x-tenant-id`
    /// - `VM_TOOL_TIMEOUT_SECS` (optional, default 30) — max seconds per tool call
    /// - `VM_LOG_FORMAT` (optional, `text` or `json`)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("VM_API_KEY")
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let raw_url = lookup("VM_API_URL")
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_url = parse_api_url(raw_url.trim())?;

        let tenant_id = lookup("VM_TENANT_ID")
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        let tool_timeout_secs = match lookup("VM_TOOL_TIMEOUT_SECS") {
            Some(val) => match val.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => return Err(ConfigError::InvalidTimeout),
            },
            None => DEFAULT_TOOL_TIMEOUT_SECS,
        };

        let log_format = match lookup("VM_LOG_FORMAT").as_deref().map(str::trim) {
            None | Some("") | Some("text") => LogFormat::Text,
            Some("json") => LogFormat::Json,
            Some(other) => return Err(ConfigError::InvalidLogFormat(other.to_string())),
        };

        Ok(Self {
            api_url,
            api_key,
            tenant_id,
            tool_timeout: Duration::from_secs(tool_timeout_secs),
            log_format,
        })
    }
}

fn parse_api_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|e| ConfigError::InvalidApiUrl(format!("{raw}: {e}")))?;

    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(ConfigError::InvalidApiUrl(raw.to_string()));
    }

    Ok(url)
}
