//! CallGuard error types

use thiserror::Error;

/// CallGuard error type
#[derive(Error, Debug)]
pub enum Error {
    /// Call rejected by the local policy gate (inline mode)
    #[error("Blocked by CallGuard policy: {0}")]
    PolicyBlocked(String),

    /// Call rejected by the remote decision endpoint (proxy mode, HTTP 403)
    #[error("Blocked by CallGuard proxy: {0}")]
    RemoteBlocked(String),

    /// Proxy-mode call failed for a reason other than a policy block
    #[error("Proxy error: {0}")]
    ProxyFailure(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for CallGuard operations
pub type Result<T> = std::result::Result<T, Error>;
