//! Upstream fetch errors

#[derive(Debug)]
pub enum FetchError {
    Http(reqwest::Error),
    Status(u16),
    Parse(String),
    Timeout(u64),
    Unavailable(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Http(err)
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Parse(err.to_string())
    }
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::Http(e) => write!(f, "HTTP error: {}", e),
            FetchError::Status(code) => write!(f, "Upstream returned status {}", code),
            FetchError::Parse(e) => write!(f, "Malformed upstream body: {}", e),
            FetchError::Timeout(ms) => write!(f, "Upstream timed out after {}ms", ms),
            FetchError::Unavailable(e) => write!(f, "Upstream unavailable: {}", e),
        }
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FetchError::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl FetchError {
    /// Whether another attempt could succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            FetchError::Http(_) | FetchError::Unavailable(_) => true,
            FetchError::Status(code) => *code >= 500 || *code == 429,
            FetchError::Parse(_) | FetchError::Timeout(_) => false,
        }
    }
}
