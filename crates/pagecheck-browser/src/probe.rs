//! Single-shot page-verification probe
//!
//! The probe is one sequential pass, no retries, no concurrency:
//! launch -> navigate (DOM-ready) -> dump markup -> wait for heading ->
//! screenshot -> teardown. Every failure after launch is converted into
//! a [`ProbeOutcome::Failed`] report with a best-effort failure
//! screenshot; only a launch failure surfaces as `Err` to the caller.

use crate::browser::BrowserSession;
use crate::error::Result;
use crate::screenshot::{capture_element_to_path, capture_to_path};
use chrono::{DateTime, Utc};
use pagecheck_core::fail_open::fail_open;
use pagecheck_core::{PagecheckError, ProbeConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Outcome of a probe run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum ProbeOutcome {
    /// Heading was visible and the success artifact was written
    Passed,
    /// Some step after launch failed; `kind` is the stable failure class
    Failed { kind: String, message: String },
}

/// Report for a completed probe run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeReport {
    /// Pass/fail outcome
    pub outcome: ProbeOutcome,
    /// Artifact actually written: the success screenshot on pass, the
    /// failure screenshot on fail (absent if that capture itself failed)
    pub artifact: Option<PathBuf>,
    /// When the run completed
    pub captured_at: DateTime<Utc>,
}

impl ProbeReport {
    fn from_success(artifact: PathBuf) -> Self {
        Self {
            outcome: ProbeOutcome::Passed,
            artifact: Some(artifact),
            captured_at: Utc::now(),
        }
    }

    fn failed(err: &PagecheckError, artifact: Option<PathBuf>) -> Self {
        Self {
            outcome: ProbeOutcome::Failed {
                kind: err.kind().to_string(),
                message: err.to_string(),
            },
            artifact,
            captured_at: Utc::now(),
        }
    }

    /// Whether the probe verified the page
    pub fn passed(&self) -> bool {
        matches!(self.outcome, ProbeOutcome::Passed)
    }

    /// Stable failure class, if the probe failed
    pub fn failure_kind(&self) -> Option<&str> {
        match &self.outcome {
            ProbeOutcome::Passed => None,
            ProbeOutcome::Failed { kind, .. } => Some(kind),
        }
    }
}

/// Run the verification probe described by `config`
///
/// Returns `Err` only when the browser itself cannot be launched. Every
/// later failure (navigation, heading timeout, screenshot) is recovered
/// into a [`ProbeOutcome::Failed`] report after a best-effort attempt to
/// write the failure screenshot. The browser session is owned by this
/// function and released on every branch.
pub async fn run_probe(config: &ProbeConfig) -> Result<ProbeReport> {
    info!(
        "Probing {} for heading '{}'",
        config.target_url, config.expected_heading
    );

    let session = BrowserSession::launch_with_settings(&config.browser).await?;

    let report = match verify_and_capture(&session, config).await {
        Ok(artifact) => {
            info!("Screenshot taken successfully!");
            ProbeReport::from_success(artifact)
        }
        Err(e) => {
            error!("Probe failed: {}", e);

            let artifact = capture_failure_artifact(&session, &config.error_path).await;
            if artifact.is_some() {
                info!("Error screenshot taken.");
            }

            ProbeReport::failed(&e, artifact)
        }
    };

    // Close failures are not part of the verdict; only launch failures
    // surface as `Err`.
    if let Err(e) = session.close().await {
        warn!("Browser close failed: {}", e);
    }
    Ok(report)
}

/// Best-effort failure screenshot: full-page first, falling back to an
/// element capture of `body` (a different CDP path that can still work
/// when the full-page stitch fails on a wedged page). Both attempts are
/// fail-open; a page too broken for either yields `None`.
async fn capture_failure_artifact(
    session: &BrowserSession,
    error_path: &Path,
) -> Option<PathBuf> {
    if fail_open("error_screenshot", || capture_to_path(session, error_path))
        .await
        .is_some()
    {
        return Some(error_path.to_path_buf());
    }

    fail_open("error_screenshot_body", || {
        capture_element_to_path(session, "body", error_path)
    })
    .await
    .map(|_| error_path.to_path_buf())
}

/// The fallible middle of the probe: navigate, dump content, wait for
/// the heading, capture the success screenshot. Returns the success
/// artifact path.
async fn verify_and_capture(session: &BrowserSession, config: &ProbeConfig) -> Result<PathBuf> {
    session
        .navigate_dom_ready(
            &config.target_url,
            Duration::from_millis(config.nav_timeout_ms),
        )
        .await?;

    // Full rendered markup goes to the diagnostic stream for manual
    // debugging of failed runs.
    let content = session.page_content().await?;
    debug!("--- Page Content ---\n{}\n--------------------", content);

    session
        .wait_for_heading(
            &config.expected_heading,
            Duration::from_millis(config.heading_timeout_ms),
        )
        .await?;

    capture_to_path(session, &config.success_path).await?;
    Ok(config.success_path.clone())
}
