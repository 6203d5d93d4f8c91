//! Error types and handling for the MaskService backends

use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use thiserror::Error;

/// Result type alias for MaskService operations
pub type Result<T> = std::result::Result<T, ServiceError>;

/// Main error type for the MaskService backends
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Client input errors (unknown role, malformed parameters)
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Authentication errors (bad password, missing credentials)
    #[error("Authentication error: {message}")]
    Auth { message: String },

    /// Token past its expiry window
    #[error("Token expired: {message}")]
    TokenExpired { message: String },

    /// Token with a bad signature or malformed structure
    #[error("Invalid token: {message}")]
    TokenInvalid { message: String },

    /// Missing resource (history entry, module name)
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// Host metrics sampling failures
    #[error("Metrics error: {message}")]
    Metrics { message: String },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Generic errors
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl ServiceError {
    /// Create a configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create an authentication error
    pub fn auth<S: Into<String>>(message: S) -> Self {
        Self::Auth {
            message: message.into(),
        }
    }

    /// Create a token-expired error
    pub fn token_expired<S: Into<String>>(message: S) -> Self {
        Self::TokenExpired {
            message: message.into(),
        }
    }

    /// Create an invalid-token error
    pub fn token_invalid<S: Into<String>>(message: S) -> Self {
        Self::TokenInvalid {
            message: message.into(),
        }
    }

    /// Create a not-found error
    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create a metrics sampling error
    pub fn metrics<S: Into<String>>(message: S) -> Self {
        Self::Metrics {
            message: message.into(),
        }
    }

    /// Get the error code used in HTTP error bodies
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::Config { .. } => "CONFIG_ERROR",
            ServiceError::Validation { .. } => "VALIDATION_ERROR",
            ServiceError::Auth { .. } => "AUTH_FAILED",
            ServiceError::TokenExpired { .. } => "TOKEN_EXPIRED",
            ServiceError::TokenInvalid { .. } => "TOKEN_INVALID",
            ServiceError::NotFound { .. } => "NOT_FOUND",
            ServiceError::Metrics { .. } => "METRICS_ERROR",
            ServiceError::Io(_) => "IO_ERROR",
            ServiceError::Serde(_) => "SERIALIZATION_ERROR",
            ServiceError::Yaml(_) => "YAML_ERROR",
            ServiceError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get the error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            ServiceError::Config { .. } => "config",
            ServiceError::Validation { .. } => "validation",
            ServiceError::Auth { .. }
            | ServiceError::TokenExpired { .. }
            | ServiceError::TokenInvalid { .. } => "auth",
            ServiceError::NotFound { .. } => "not_found",
            ServiceError::Metrics { .. } => "metrics",
            ServiceError::Io(_) => "io",
            ServiceError::Serde(_) => "serialization",
            ServiceError::Yaml(_) => "yaml",
            ServiceError::Internal(_) => "internal",
        }
    }
}

impl actix_web::ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::Validation { .. } => StatusCode::BAD_REQUEST,
            ServiceError::Auth { .. }
            | ServiceError::TokenExpired { .. }
            | ServiceError::TokenInvalid { .. } => StatusCode::UNAUTHORIZED,
            ServiceError::NotFound { .. } => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "error": {
                "code": self.code(),
                "message": self.to_string(),
                "type": self.category(),
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::ResponseError;

    #[test]
    fn test_status_code_mapping() {
        assert_eq!(
            ServiceError::validation("bad role").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServiceError::auth("wrong password").status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ServiceError::token_expired("past exp").status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ServiceError::not_found("no such module").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ServiceError::metrics("sampling failed").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_expired_and_invalid_are_distinct_codes() {
        assert_eq!(ServiceError::token_expired("e").code(), "TOKEN_EXPIRED");
        assert_eq!(ServiceError::token_invalid("i").code(), "TOKEN_INVALID");
    }
}
