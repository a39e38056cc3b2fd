//! Error types for fedigraph.

use thiserror::Error;

/// Application result type.
pub type AppResult<T> = Result<T, AppError>;

/// Application error type.
///
/// Structural mutations (registration, follow, unfollow, posting) report
/// failures through this type. Read-side graph queries never produce
/// [`AppError::ActorNotFound`]; they answer with an empty result instead.
#[derive(Debug, Error)]
pub enum AppError {
    // === Client Errors ===
    #[error("Actor already exists: {0}")]
    DuplicateActor(String),

    #[error("Actor not found: {0}")]
    ActorNotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    // === Server Errors ===
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the stable error code for this error.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateActor(_) => "DUPLICATE_ACTOR",
            Self::ActorNotFound(_) => "ACTOR_NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns whether this error was caused by the caller's input.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::DuplicateActor(_) | Self::ActorNotFound(_) | Self::Validation(_)
        )
    }
}

// === From implementations ===

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            AppError::DuplicateActor("alice".to_string()).error_code(),
            "DUPLICATE_ACTOR"
        );
        assert_eq!(
            AppError::ActorNotFound("bob".to_string()).error_code(),
            "ACTOR_NOT_FOUND"
        );
        assert_eq!(
            AppError::Config("missing".to_string()).error_code(),
            "CONFIG_ERROR"
        );
    }

    #[test]
    fn test_client_vs_server_errors() {
        assert!(AppError::ActorNotFound("x".to_string()).is_client_error());
        assert!(AppError::Validation("x".to_string()).is_client_error());
        assert!(!AppError::Internal("x".to_string()).is_client_error());
        assert!(!AppError::Config("x".to_string()).is_client_error());
    }

    #[test]
    fn test_display_includes_identifier() {
        let err = AppError::ActorNotFound("@carol@srv".to_string());
        assert_eq!(err.to_string(), "Actor not found: @carol@srv");
    }

    #[test]
    fn test_from_anyhow() {
        let err: AppError = anyhow::anyhow!("boom").into();
        assert!(matches!(err, AppError::Internal(msg) if msg == "boom"));
    }
}
