use thiserror::Error;

/// Failure of a single catalog read. Cloneable so it can live inside a
/// cached query entry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error: {status}")]
    Http { status: u16 },

    #[error("Product {0} not found")]
    NotFound(String),

    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl FetchError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, FetchError::NotFound(_) | FetchError::Http { status: 404 })
    }
}

#[derive(Error, Debug)]
pub enum ShelfError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("Could not open browser: {0}")]
    Browser(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ShelfError>;
