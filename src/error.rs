//! Error types for the voxcart application layer.

use crate::voice::CaptureError;

/// Top-level error type for configuration, voice capture and history.
///
/// Search itself never produces one of these: provider and orchestration
/// failures are absorbed into sample data inside `voxcart-search`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Configuration could not be loaded, parsed or applied.
    #[error("config error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Voice capture backend error.
    #[error("voice capture error: {0}")]
    Voice(#[from] CaptureError),

    /// Recent-search history store error.
    #[error("history error: {0}")]
    History(String),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_config() {
        let err = AppError::Config("bad toml".into());
        assert_eq!(err.to_string(), "config error: bad toml");
    }

    #[test]
    fn voice_error_converts() {
        let err: AppError = CaptureError::PermissionDenied.into();
        assert_eq!(
            err.to_string(),
            "voice capture error: microphone permission denied"
        );
    }

    #[test]
    fn io_error_converts() {
        let err: AppError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(err.to_string().starts_with("I/O error"));
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AppError>();
    }
}
