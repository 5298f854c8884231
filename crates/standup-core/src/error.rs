use thiserror::Error;

#[derive(Debug, Error)]
pub enum StandupError {
    /// Submission rejected before any sink was contacted.
    #[error("{0}")]
    Validation(String),

    #[error("{0} parameter required")]
    MissingParameter(&'static str),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

impl StandupError {
    /// True for errors caused by the caller's input rather than the service.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::MissingParameter(_))
    }
}

pub type Result<T> = std::result::Result<T, StandupError>;
