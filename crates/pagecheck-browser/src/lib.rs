//! Browser automation and page verification for pagecheck
//!
//! This crate drives a headless Chrome/Chromium via the Chrome DevTools
//! Protocol (CDP) to run a single-shot page-verification probe: navigate
//! to a URL, wait for an expected heading to become visible, and save a
//! screenshot artifact.
//!
//! # Features
//!
//! - **Browser Management**: Launch and control Chrome/Chromium browsers
//! - **DOM-ready Navigation**: Bounded wait for document construction,
//!   not full resource completion
//! - **Heading Verification**: Locate headings by accessible role/name
//! - **Screenshot Capture**: Full-page success and best-effort failure
//!   artifacts
//!
//! # Example
//!
//! ```no_run
//! use pagecheck_browser::probe::run_probe;
//! use pagecheck_core::ProbeConfig;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ProbeConfig::default();
//!     let report = run_probe(&config).await?;
//!
//!     if report.passed() {
//!         println!("Verified, artifact at {:?}", report.artifact);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Requirements
//!
//! - Chrome or Chromium browser installed
//! - For headless operation, no additional setup required
//!
//! # Architecture
//!
//! - [`browser`]: Browser lifecycle and session management
//! - [`screenshot`]: Screenshot capture and artifact writing
//! - [`probe`]: The verification probe sequence
//! - [`error`]: Error types for browser operations

pub mod browser;
pub mod error;
pub mod probe;
pub mod screenshot;

// Re-export commonly used types
pub use browser::BrowserSession;
pub use error::{BrowserError, Result};
pub use probe::{run_probe, ProbeOutcome, ProbeReport};
pub use screenshot::{
    capture_element_to_path, capture_full_page, capture_screenshot, capture_to_path,
    write_artifact, ScreenshotOptions,
};
