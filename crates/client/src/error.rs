use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("{endpoint} returned HTTP {status}")]
    Http { status: u16, endpoint: String },

    #[error("validation error: {0}")]
    Validation(String),

    #[error("malformed payload: {0}")]
    Payload(#[from] serde_json::Error),
}

impl ApiError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ApiError::Network(_) => "Network error. Check the host address.",
            ApiError::Http { .. } => "The plugin backend rejected the request.",
            ApiError::Validation(_) => "Invalid input.",
            ApiError::Payload(_) => "The backend sent an unreadable response.",
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
