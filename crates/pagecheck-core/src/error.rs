//! Unified error types for pagecheck

use thiserror::Error;

/// Unified error type for all probe operations
#[derive(Error, Debug)]
pub enum PagecheckError {
    // Browser lifecycle errors
    #[error("Browser launch failed: {0}")]
    Launch(String),

    // Navigation errors (connection refused, DNS, DOM-ready deadline)
    #[error("Navigation failed: {0}")]
    Navigation(String),

    // Element-visibility wait errors
    #[error("Heading '{name}' not visible within {timeout_ms}ms")]
    HeadingTimeout { name: String, timeout_ms: u64 },

    // Screenshot capture errors
    #[error("Screenshot capture failed: {0}")]
    Screenshot(String),

    // In-page JavaScript errors
    #[error("Script evaluation failed: {0}")]
    Evaluation(String),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // Generic
    #[error("{0}")]
    Other(String),
}

impl PagecheckError {
    /// Stable machine-readable failure class, suitable for a CI wrapper
    /// to branch on without parsing the human-readable message.
    pub fn kind(&self) -> &'static str {
        match self {
            PagecheckError::Launch(_) => "launch",
            PagecheckError::Navigation(_) => "navigation",
            PagecheckError::HeadingTimeout { .. } => "heading-timeout",
            PagecheckError::Screenshot(_) => "screenshot",
            PagecheckError::Evaluation(_) => "evaluation",
            PagecheckError::Config(_) => "config",
            PagecheckError::Io(_) => "io",
            PagecheckError::Serialization(_) => "serialization",
            PagecheckError::Other(_) => "other",
        }
    }
}

/// Result type alias using PagecheckError
pub type Result<T> = std::result::Result<T, PagecheckError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds_are_stable() {
        assert_eq!(PagecheckError::Launch("boom".into()).kind(), "launch");
        assert_eq!(
            PagecheckError::Navigation("refused".into()).kind(),
            "navigation"
        );
        assert_eq!(
            PagecheckError::HeadingTimeout {
                name: "Title".into(),
                timeout_ms: 10_000,
            }
            .kind(),
            "heading-timeout"
        );
        assert_eq!(PagecheckError::Screenshot("cdp".into()).kind(), "screenshot");
    }

    #[test]
    fn test_heading_timeout_display() {
        let err = PagecheckError::HeadingTimeout {
            name: "Novel to Manga Converter".into(),
            timeout_ms: 10_000,
        };
        let msg = err.to_string();
        assert!(msg.contains("Novel to Manga Converter"));
        assert!(msg.contains("10000ms"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: PagecheckError = io.into();
        assert_eq!(err.kind(), "io");
    }
}
