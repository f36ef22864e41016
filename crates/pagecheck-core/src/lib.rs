//! # pagecheck-core
//!
//! Core types for the pagecheck page-verification probe.
//!
//! A probe run is a single sequential pass: launch a headless browser,
//! navigate to a target URL, wait for an expected heading to become
//! visible, and capture a screenshot artifact. This crate holds the
//! pieces shared by the browser layer and the CLI:
//!
//! - [`PagecheckError`] / [`Result`] — unified error type for all probe
//!   operations, with stable [`PagecheckError::kind`] strings so callers
//!   can act on the failure class rather than on log text
//! - [`ProbeConfig`] — injectable probe configuration (target URL,
//!   expected heading, artifact paths, timeouts), loadable from TOML
//! - [`fail_open`] — helper for best-effort operations that must never
//!   abort the run, such as the failure-screenshot attempt

#![allow(dead_code)]

mod config;
mod error;
pub mod fail_open;

pub use config::{BrowserSettings, ProbeConfig};
pub use error::{PagecheckError, Result};
