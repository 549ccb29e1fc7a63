use thiserror::Error;

/// Errors returned by [`crate::ApiClient`].
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network, TLS or timeout failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("not found: {path}")]
    NotFound { path: String },

    /// Any other non-2xx response. `detail` is the backend's free-text error
    /// message when the body carried one.
    #[error("unexpected HTTP status {status} from {path}{}", detail_suffix(.detail.as_deref()))]
    Status {
        status: u16,
        path: String,
        detail: Option<String>,
    },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },

    #[error("pagination limit reached for {path}: exceeded {max_pages} pages")]
    PaginationLimit { path: String, max_pages: usize },
}

fn detail_suffix(detail: Option<&str>) -> String {
    detail.map(|d| format!(": {d}")).unwrap_or_default()
}

impl ApiError {
    /// The backend's error detail text, if the response carried one.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Status { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound { .. })
    }
}
