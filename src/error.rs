use thiserror::Error;

#[derive(Error, Debug)]
pub enum PortalError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Service error ({status}): {message}")]
    Service { status: u16, message: String },

    #[error("Malformed service response: {0}")]
    MalformedResponse(String),

    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Realtime error: {0}")]
    Realtime(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<validator::ValidationErrors> for PortalError {
    fn from(err: validator::ValidationErrors) -> Self {
        PortalError::Validation(err.to_string())
    }
}

impl From<tokio_tungstenite::tungstenite::Error> for PortalError {
    fn from(err: tokio_tungstenite::tungstenite::Error) -> Self {
        PortalError::Realtime(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PortalError>;
