use thiserror::Error;

/// Core error type shared across dremelgen crates.
#[derive(Debug, Error)]
pub enum Error {
    /// Reading a document collection failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// A document could not be encoded or decoded.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias for results returned by dremelgen crates.
pub type Result<T> = std::result::Result<T, Error>;
