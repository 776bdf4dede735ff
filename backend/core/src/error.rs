use thiserror::Error;

/// Top-level error type for the Wayfarer runtime.
#[derive(Debug, Error)]
pub enum WayfarerError {
    #[error("session not found: {0}")]
    SessionNotFound(String),

    #[error("session already exists: {0}")]
    SessionExists(String),

    #[error("provider not registered: {0}")]
    ProviderNotRegistered(String),

    #[error("LLM provider error ({provider}): {message}")]
    Provider { provider: String, message: String },

    #[error("stream interrupted: {0}")]
    Stream(String),

    #[error("message rejected: {0}")]
    Rejected(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_error_display() {
        let err = WayfarerError::Provider {
            provider: "openrouter".into(),
            message: "503 Service Unavailable".into(),
        };
        assert_eq!(
            err.to_string(),
            "LLM provider error (openrouter): 503 Service Unavailable"
        );
    }

    #[test]
    fn test_session_errors_name_the_id() {
        assert_eq!(
            WayfarerError::SessionExists("abc".into()).to_string(),
            "session already exists: abc"
        );
    }
}
