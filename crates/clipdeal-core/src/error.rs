//! Error types for the Clipdeal marketplace.

use thiserror::Error;

/// Main error type for marketplace operations.
#[derive(Error, Debug, Clone)]
pub enum MarketError {
    /// A request parameter or field failed validation.
    #[error("validation failed for '{field}': {message}")]
    Validation { field: String, message: String },

    /// The requested resource does not exist, or exists but is hidden.
    ///
    /// Hidden rows (draft or soft-deleted content) deliberately produce the
    /// same error as absent rows so their existence never leaks.
    #[error("{resource} not found: {id}")]
    NotFound { resource: &'static str, id: String },

    /// No authenticated user on a route that requires one.
    #[error("authentication required")]
    NotAuthenticated,

    /// The authenticated user may not perform this action.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// A storage-level unique constraint rejected a write.
    #[error("unique constraint '{constraint}' violated by '{value}'")]
    UniqueViolation {
        constraint: &'static str,
        value: String,
    },

    /// An illegal status transition was requested.
    #[error("invalid status transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },

    /// Failed to reach a remote Clipdeal node.
    #[error("connection error: {0}")]
    Connection(String),

    /// A remote Clipdeal node returned an error envelope.
    #[error("remote error: {0}")]
    Remote(String),

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

impl MarketError {
    /// Shorthand for a validation failure on a named field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        MarketError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Shorthand for a not-found error.
    pub fn not_found(resource: &'static str, id: impl ToString) -> Self {
        MarketError::NotFound {
            resource,
            id: id.to_string(),
        }
    }

    /// Stable machine-readable code carried in the response envelope.
    pub fn error_code(&self) -> &'static str {
        match self {
            MarketError::Validation { .. } => "validation_error",
            MarketError::NotFound { .. } => "not_found",
            MarketError::NotAuthenticated => "not_authenticated",
            MarketError::Forbidden(_) => "permission_denied",
            MarketError::UniqueViolation { .. } => "unique_violation",
            MarketError::InvalidTransition { .. } => "invalid_transition",
            MarketError::Connection(_) => "connection_error",
            MarketError::Remote(_) => "remote_error",
            MarketError::Internal(_) => "internal_error",
        }
    }

    /// Returns the violated constraint name, if this is a unique violation.
    pub fn violated_constraint(&self) -> Option<&'static str> {
        match self {
            MarketError::UniqueViolation { constraint, .. } => Some(constraint),
            _ => None,
        }
    }
}

/// Convenience Result type for marketplace operations.
pub type Result<T> = std::result::Result<T, MarketError>;

impl From<serde_json::Error> for MarketError {
    fn from(err: serde_json::Error) -> Self {
        MarketError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            MarketError::validation("period", "bad").error_code(),
            "validation_error"
        );
        assert_eq!(
            MarketError::not_found("content", "x").error_code(),
            "not_found"
        );
        assert_eq!(MarketError::NotAuthenticated.error_code(), "not_authenticated");
    }

    #[test]
    fn test_violated_constraint() {
        let err = MarketError::UniqueViolation {
            constraint: "booth.slug",
            value: "acme".to_string(),
        };
        assert_eq!(err.violated_constraint(), Some("booth.slug"));
        assert_eq!(MarketError::NotAuthenticated.violated_constraint(), None);
    }
}
