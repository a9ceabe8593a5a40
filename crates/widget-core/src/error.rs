//! Shared error types for the widget weather backend.
//!
//! Domain crates keep their own error enums and embed these where the
//! failure is not specific to them (transport faults, configuration).

use thiserror::Error;

/// Network-related errors (HTTP, connectivity).
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl NetworkError {
    pub fn user_message(&self) -> &'static str {
        match self {
            NetworkError::ConnectionFailed(_) => {
                "Unable to reach the weather service. Check your internet connection."
            }
            NetworkError::Timeout => "The weather service did not answer in time.",
            NetworkError::ServerError { status, .. } if *status >= 500 => {
                "The weather service is experiencing issues. Please try again later."
            }
            NetworkError::ServerError { .. } => "The weather request was rejected.",
            NetworkError::InvalidResponse(_) => "Received an unexpected response from the weather service.",
        }
    }

    /// Whether a caller could reasonably try the same request again.
    pub fn is_transient(&self) -> bool {
        match self {
            NetworkError::Timeout | NetworkError::ConnectionFailed(_) => true,
            NetworkError::ServerError { status, .. } => *status >= 500,
            NetworkError::InvalidResponse(_) => false,
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Configuration parse error: {0}")]
    ParseError(String),
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::NotFound(_) => "Configuration not found. Using defaults.",
            ConfigError::Invalid(_) => "Invalid configuration. Check your settings.",
            ConfigError::ParseError(_) => "Configuration file is malformed. Check your settings.",
        }
    }
}

/// Extension trait for converting reqwest errors to our error types.
pub trait ReqwestErrorExt {
    fn into_network_error(self) -> NetworkError;
}

impl ReqwestErrorExt for reqwest::Error {
    fn into_network_error(self) -> NetworkError {
        if self.is_timeout() {
            NetworkError::Timeout
        } else if self.is_connect() {
            NetworkError::ConnectionFailed(self.to_string())
        } else if let Some(status) = self.status() {
            NetworkError::ServerError {
                status: status.as_u16(),
                message: self.to_string(),
            }
        } else if self.is_decode() {
            NetworkError::InvalidResponse(self.to_string())
        } else {
            NetworkError::ConnectionFailed(self.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_error_message_depends_on_status() {
        let upstream = NetworkError::ServerError {
            status: 503,
            message: "unavailable".into(),
        };
        assert!(upstream.user_message().contains("issues"));

        let rejected = NetworkError::ServerError {
            status: 400,
            message: "bad request".into(),
        };
        assert!(rejected.user_message().contains("rejected"));
    }

    #[test]
    fn test_transient_classification() {
        assert!(NetworkError::Timeout.is_transient());
        assert!(NetworkError::ConnectionFailed("reset".into()).is_transient());
        assert!(!NetworkError::InvalidResponse("garbage".into()).is_transient());
        assert!(!NetworkError::ServerError {
            status: 404,
            message: String::new(),
        }
        .is_transient());
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::ParseError("expected `=`".into());
        assert!(err.to_string().contains("expected `=`"));
        assert!(err.user_message().contains("malformed"));
    }
}
