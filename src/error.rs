//! Error types for Jama API operations.

use thiserror::Error;

/// Errors that can occur during Jama API operations.
#[derive(Debug, Error)]
pub enum JamaError {
    /// Configuration is missing or incomplete.
    #[error("Jama configuration required: {0}")]
    ConfigMissing(String),

    /// The client credential exchange failed.
    #[error("Jama authentication failed: {message}")]
    Authentication {
        message: String,
        status_code: Option<u16>,
    },

    /// An authorized operation was attempted before `authenticate` succeeded.
    #[error("Not authenticated: call authenticate() before accessing items")]
    NotAuthenticated,

    /// The item addressing arguments were ambiguous or insufficient.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// The item lookup failed.
    #[error("Failed to fetch item: {message}")]
    Fetch {
        message: String,
        status_code: Option<u16>,
    },

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),
}

impl JamaError {
    /// HTTP status code of the failed response, if the server answered at all.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Authentication { status_code, .. } | Self::Fetch { status_code, .. } => {
                *status_code
            }
            _ => None,
        }
    }

    pub(crate) fn auth(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
            status_code: None,
        }
    }

    pub(crate) fn fetch(message: impl Into<String>) -> Self {
        Self::Fetch {
            message: message.into(),
            status_code: None,
        }
    }
}

/// Result type alias for Jama operations.
pub type Result<T> = core::result::Result<T, JamaError>;
