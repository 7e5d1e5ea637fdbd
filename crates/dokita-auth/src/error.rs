#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("unauthorized")]
    Unauthorized,

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Map a non-success HTTP status and its body text to an error.
    pub fn from_status(status: reqwest::StatusCode, body: String) -> Self {
        match status {
            reqwest::StatusCode::UNAUTHORIZED => AuthError::Unauthorized,
            reqwest::StatusCode::FORBIDDEN => AuthError::Forbidden(body),
            reqwest::StatusCode::NOT_FOUND => AuthError::NotFound(body),
            reqwest::StatusCode::BAD_REQUEST => AuthError::InvalidInput(body),
            other => AuthError::Internal(format!("{other}: {body}")),
        }
    }
}
