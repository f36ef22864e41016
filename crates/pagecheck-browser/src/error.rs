//! Browser automation error types - re-exports unified PagecheckError
//!
//! All browser errors use the unified PagecheckError type:
//! - Launch(String) - browser process could not be started
//! - Navigation(String) - connection refused, DNS failure, DOM-ready deadline
//! - HeadingTimeout { name, timeout_ms } - heading not visible in time
//! - Screenshot(String) - CDP capture failures
//! - Evaluation(String) - in-page JavaScript failures
//! - Io(std::io::Error) - artifact write failures
//!
//! Error messages should be descriptive and include context about the
//! operation that failed.

pub use pagecheck_core::{PagecheckError, Result};

// Convenience alias for call sites that only deal with browser failures
pub type BrowserError = PagecheckError;
