//! Error handling for dlbridge

use thiserror::Error;

/// Main error type for bridge operations
#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("failed to send the download to the manager: {0}")]
    SendFailed(String),

    #[error("connection to the download manager timed out")]
    Timeout,

    #[error("unexpected response from the download manager: {0:?}")]
    InvalidResponse(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("browser host error: {0}")]
    Host(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

impl BridgeError {
    /// Whether this error came from the control channel (and should degrade
    /// to a confirmation window) rather than from the browser host.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            BridgeError::Http(_)
                | BridgeError::SendFailed(_)
                | BridgeError::Timeout
                | BridgeError::InvalidResponse(_)
        )
    }
}

/// Result type alias for bridge operations
pub type Result<T> = std::result::Result<T, BridgeError>;
