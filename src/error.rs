use thiserror::Error;

#[derive(Error, Debug)]
pub enum StargazerExportError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Missing GitHub token")]
    MissingToken,

    #[error("Invalid repository: {0}")]
    InvalidRepository(String),

    #[error("GitHub API error: {0}")]
    Api(String),

    #[error("GraphQL error: {0}")]
    GraphQl(String),

    #[error("Missing field in response: {0}")]
    MissingField(String),

    #[error("Pagination error: {0}")]
    PaginationViolation(String),

    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    #[error("Authentication error: {0}")]
    AuthError(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl StargazerExportError {
    /// Whether the failure happened before any request was sent.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            StargazerExportError::InvalidInput(_)
                | StargazerExportError::MissingToken
                | StargazerExportError::InvalidRepository(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, StargazerExportError>;
