use thiserror::Error;

#[derive(Error, Debug)]
pub enum SwipeError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    // Article source errors
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP error {0}")]
    HttpStatus(u16),

    #[error("Malformed upstream response: {0}")]
    Upstream(String),

    #[error("Fetch worker is not running")]
    WorkerUnavailable,

    // Session cache errors (never surfaced as feed errors)
    #[error("Session cache error: {0}")]
    Cache(String),

    // Like persistence errors
    #[error("Could not persist like: {0}")]
    Persistence(String),

    // Storage errors
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // User input errors
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<reqwest::Error> for SwipeError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            SwipeError::HttpStatus(status.as_u16())
        } else if err.is_decode() {
            SwipeError::Upstream(err.to_string())
        } else {
            SwipeError::Network(err.to_string())
        }
    }
}

impl SwipeError {
    /// Whether this failure came from the article source boundary
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            SwipeError::Network(_)
                | SwipeError::HttpStatus(_)
                | SwipeError::Upstream(_)
                | SwipeError::WorkerUnavailable
        )
    }
}

pub type SwipeResult<T> = Result<T, SwipeError>;
