use std::fmt;

/// Typed error for backend calls.
///
/// Distinguishes error categories (auth, network, API, stream read, parse,
/// timeout) without losing context.
#[derive(Debug)]
pub enum LlmError {
    /// Missing or invalid API key
    Auth(String),
    /// Network-level failure (DNS, connection, timeout)
    Network(String),
    /// API returned a non-success HTTP status
    Api { status: u16, body: String },
    /// Error reading from the SSE stream
    StreamRead(String),
    /// Failed to parse response JSON
    Parse(String),
    /// Call did not complete within its deadline
    Timeout(String),
    /// Error reported by the backend inside an otherwise healthy response
    Backend(String),
}

impl fmt::Display for LlmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LlmError::Auth(msg) => write!(f, "Auth error: {}", msg),
            LlmError::Network(msg) => write!(f, "Network error: {}", msg),
            LlmError::Api { status, body } => write!(f, "API error {}: {}", status, body),
            LlmError::StreamRead(msg) => write!(f, "Stream read error: {}", msg),
            LlmError::Parse(msg) => write!(f, "Parse error: {}", msg),
            LlmError::Timeout(msg) => write!(f, "Timed out: {}", msg),
            LlmError::Backend(msg) => write!(f, "Backend error: {}", msg),
        }
    }
}

impl std::error::Error for LlmError {}

impl LlmError {
    /// Raised while opening the connection, before any response body was read.
    pub fn is_connection_failure(&self) -> bool {
        matches!(self, LlmError::Auth(_) | LlmError::Network(_) | LlmError::Api { .. } | LlmError::Timeout(_))
    }
}

impl From<reqwest::Error> for LlmError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            LlmError::Timeout(e.to_string())
        } else {
            LlmError::Network(e.to_string())
        }
    }
}
