use serde::Serialize;
use std::error::Error;
use std::fmt;
use warp::http::StatusCode;

pub const VALIDATION_ERROR_MESSAGE: &str = "username is required";
pub const UPSTREAM_ERROR_MESSAGE: &str = "RT API error";
pub const SERVER_ERROR_MESSAGE: &str = "server error";

#[derive(Debug)]
pub enum RelayError {
    // Caller errors
    ValidationError(String),

    // Provider answered with a non-success status
    UpstreamError { status: u16, body: String },

    // Unexpected errors
    TransportError(String),
    MalformedResponse(String),
    ConfigError(String),
}

/// Coarse classification used by the HTTP boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Upstream,
    Unexpected,
}

/// JSON body sent to the caller on failure
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl RelayError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ValidationError(_) => ErrorKind::Validation,
            Self::UpstreamError { .. } => ErrorKind::Upstream,
            Self::TransportError(_) | Self::MalformedResponse(_) | Self::ConfigError(_) => {
                ErrorKind::Unexpected
            }
        }
    }

    /// Status code the caller receives. Upstream statuses are forwarded as-is.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::ValidationError(_) => StatusCode::BAD_REQUEST,
            Self::UpstreamError { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn body(&self) -> ErrorBody {
        match self {
            Self::ValidationError(msg) => ErrorBody {
                error: msg.clone(),
                details: None,
            },
            Self::UpstreamError { body, .. } => ErrorBody {
                error: UPSTREAM_ERROR_MESSAGE.to_string(),
                details: Some(body.clone()),
            },
            other => ErrorBody {
                error: SERVER_ERROR_MESSAGE.to_string(),
                details: Some(other.to_string()),
            },
        }
    }
}

impl fmt::Display for RelayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            Self::UpstreamError { status, body } => {
                write!(f, "Provider returned status {}: {}", status, body)
            }
            Self::TransportError(msg) => write!(f, "Transport error: {}", msg),
            Self::MalformedResponse(msg) => write!(f, "Malformed provider response: {}", msg),
            Self::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl Error for RelayError {}

impl From<reqwest::Error> for RelayError {
    fn from(err: reqwest::Error) -> Self {
        RelayError::TransportError(err.to_string())
    }
}

impl From<serde_json::Error> for RelayError {
    fn from(err: serde_json::Error) -> Self {
        RelayError::MalformedResponse(err.to_string())
    }
}

// Generic result type for the relay
pub type Result<T> = std::result::Result<T, RelayError>;
