//! Error types for the voxcart-search crate.
//!
//! These errors never cross the public search boundary: adapters absorb
//! them into sample fallbacks. They exist so the live path can use `?`
//! and so failures are logged with a stable message. No API keys appear
//! in error messages.

/// Errors that can occur on the live path of a provider call.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The HTTP request could not be sent or its body could not be read.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The provider answered with a non-success status code.
    #[error("provider returned status {0}")]
    Status(u16),

    /// The provider response was not the expected JSON shape.
    #[error("parse error: {0}")]
    Parse(String),

    /// The provider did not answer within the configured timeout.
    #[error("provider timed out: {0}")]
    Timeout(String),

    /// Invalid search configuration.
    #[error("config error: {0}")]
    Config(String),
}

/// Convenience type alias for voxcart-search results.
pub type Result<T> = std::result::Result<T, SearchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_http() {
        let err = SearchError::Http("connection refused".into());
        assert_eq!(err.to_string(), "HTTP error: connection refused");
    }

    #[test]
    fn display_status() {
        let err = SearchError::Status(503);
        assert_eq!(err.to_string(), "provider returned status 503");
    }

    #[test]
    fn display_parse() {
        let err = SearchError::Parse("expected object".into());
        assert_eq!(err.to_string(), "parse error: expected object");
    }

    #[test]
    fn display_timeout() {
        let err = SearchError::Timeout("Amazon after 8s".into());
        assert_eq!(err.to_string(), "provider timed out: Amazon after 8s");
    }

    #[test]
    fn display_config() {
        let err = SearchError::Config("timeout_seconds must be greater than 0".into());
        assert_eq!(
            err.to_string(),
            "config error: timeout_seconds must be greater than 0"
        );
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SearchError>();
    }
}
