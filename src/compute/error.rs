use crate::protocol::{McpErrorCode, McpErrorResponse};

/// Longest upstream body excerpt kept in error messages.
const MAX_BODY_EXCERPT: usize = 512;

/// Failure talking to the compute API.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("invalid request URL: {0}")]
    Url(String),
    #[error("invalid path segment `{0}`")]
    InvalidSegment(String),
    #[error("invalid request: {0}")]
    Request(#[source] reqwest::Error),
    #[error("compute API request timed out")]
    Timeout,
    #[error("compute API unreachable: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("compute API returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("invalid response body: {0}")]
    Decode(String),
}

impl ApiError {
    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_builder() {
            Self::Request(err)
        } else {
            Self::Transport(err)
        }
    }

    pub(crate) fn status(status: u16, body: &[u8]) -> Self {
        let text = String::from_utf8_lossy(body);
        let trimmed = text.trim();
        let body = if trimmed.chars().count() > MAX_BODY_EXCERPT {
            let mut excerpt: String = trimmed.chars().take(MAX_BODY_EXCERPT).collect();
            excerpt.push_str("...");
            excerpt
        } else {
            trimmed.to_string()
        };
        Self::Status { status, body }
    }

    /// Upstream HTTP status, when the API answered at all.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Map a compute API failure onto the MCP error vocabulary.
///
/// 401/403 → unauthorized, 404 → not_found, other 4xx → upstream_rejected,
/// everything else non-2xx → upstream_error.
impl From<ApiError> for McpErrorResponse {
    fn from(err: ApiError) -> Self {
        let code = match &err {
            ApiError::Client(_) | ApiError::Url(_) | ApiError::Decode(_) => {
                McpErrorCode::InternalError
            }
            ApiError::Request(_) | ApiError::InvalidSegment(_) => McpErrorCode::InvalidArguments,
            ApiError::Timeout => McpErrorCode::Timeout,
            ApiError::Transport(_) => McpErrorCode::Unreachable,
            ApiError::Status { status, .. } => match status {
                401 | 403 => McpErrorCode::Unauthorized,
                404 => McpErrorCode::NotFound,
                400..=499 => McpErrorCode::UpstreamRejected,
                _ => McpErrorCode::UpstreamError,
            },
        };

        McpErrorResponse::new(code, err.to_string()).with_status(err.http_status())
    }
}
