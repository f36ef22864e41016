//! Browser lifecycle management using Chrome DevTools Protocol

use crate::error::Result;
use headless_chrome::{Browser, LaunchOptions, Tab};
use pagecheck_core::{BrowserSettings, PagecheckError};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{sleep, Instant};
use tracing::{debug, info};

/// Poll interval for readiness and visibility waits
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Active browser session with Chrome DevTools Protocol
///
/// The session exclusively owns the browser process. Dropping it (or
/// calling [`BrowserSession::close`]) releases the process, so every
/// exit path of a probe run tears the browser down exactly once.
pub struct BrowserSession {
    /// Underlying browser instance (kept alive for tab lifetime)
    #[allow(dead_code)]
    browser: Browser,
    /// Current active tab
    tab: Arc<Tab>,
}

impl BrowserSession {
    /// Launch a new headless browser with default settings
    pub async fn launch() -> Result<Self> {
        Self::launch_with_settings(&BrowserSettings::default()).await
    }

    /// Launch a browser with the given settings
    pub async fn launch_with_settings(settings: &BrowserSettings) -> Result<Self> {
        info!(
            "Launching browser (headless: {}, size: {}x{})",
            settings.headless, settings.window_width, settings.window_height
        );

        let launch_options = LaunchOptions::default_builder()
            .headless(settings.headless)
            .window_size(Some((settings.window_width, settings.window_height)))
            .build()
            .map_err(|e| PagecheckError::Launch(format!("Invalid launch options: {}", e)))?;

        let browser = Browser::new(launch_options)
            .map_err(|e| PagecheckError::Launch(format!("Failed to launch browser: {}", e)))?;

        let tab = browser
            .new_tab()
            .map_err(|e| PagecheckError::Launch(format!("Failed to create tab: {}", e)))?;

        info!("Browser launched successfully");

        Ok(Self { browser, tab })
    }

    /// Navigate to a URL and wait only for initial DOM construction
    ///
    /// This is deliberately weaker than a full-load wait: the probe must
    /// not hang on slow external resources. The wait resolves once
    /// `document.readyState` leaves `"loading"`, bounded by `timeout`.
    pub async fn navigate_dom_ready(&self, url: &str, timeout: Duration) -> Result<()> {
        debug!("Navigating to {} (DOM-ready wait, timeout {:?})", url, timeout);

        self.tab
            .navigate_to(url)
            .map_err(|e| PagecheckError::Navigation(format!("Failed to navigate to {}: {}", url, e)))?;

        let deadline = Instant::now() + timeout;
        loop {
            // Evaluation can fail transiently while the document swaps;
            // treat that the same as "still loading".
            let ready_state = self
                .evaluate_script("document.readyState")
                .await
                .ok()
                .and_then(|v| v.as_str().map(str::to_string))
                .unwrap_or_default();

            if ready_state == "interactive" || ready_state == "complete" {
                info!("DOM ready for {}", url);
                return Ok(());
            }

            if Instant::now() >= deadline {
                return Err(PagecheckError::Navigation(format!(
                    "DOM not ready for {} within {:?}",
                    url, timeout
                )));
            }

            sleep(POLL_INTERVAL).await;
        }
    }

    /// Wait for a heading with the given exact accessible name to become
    /// visible
    ///
    /// Headings are located by role (`h1`-`h6` plus `[role="heading"]`)
    /// and matched on their computed accessible name (`aria-label` when
    /// present, trimmed text content otherwise). Visibility means the
    /// element contributes at least one client rect.
    pub async fn wait_for_heading(&self, name: &str, timeout: Duration) -> Result<()> {
        debug!("Waiting for heading '{}' (timeout: {:?})", name, timeout);

        let script = heading_visible_script(name)?;
        let deadline = Instant::now() + timeout;
        let mut evaluated_once = false;
        let mut last_eval_err = None;

        loop {
            match self.evaluate_script(&script).await {
                Ok(value) => {
                    evaluated_once = true;
                    last_eval_err = None;
                    if value.as_bool().unwrap_or(false) {
                        debug!("Heading found: {}", name);
                        return Ok(());
                    }
                }
                Err(e) => {
                    last_eval_err = Some(e);
                }
            }

            if Instant::now() >= deadline {
                return Err(heading_wait_deadline_error(
                    name,
                    timeout,
                    evaluated_once,
                    last_eval_err,
                ));
            }

            sleep(POLL_INTERVAL).await;
        }
    }

    /// Get the full rendered markup of the current document
    pub async fn page_content(&self) -> Result<String> {
        let result = self
            .evaluate_script("document.documentElement.outerHTML")
            .await?;
        Ok(result.as_str().unwrap_or("").to_string())
    }

    /// Execute JavaScript in the page context
    ///
    /// # Returns
    /// JSON result from JavaScript execution
    pub async fn evaluate_script(&self, script: &str) -> Result<serde_json::Value> {
        let result = self
            .tab
            .evaluate(script, false)
            .map_err(|e| PagecheckError::Evaluation(format!("JavaScript evaluation failed: {}", e)))?;

        Ok(result.value.unwrap_or(serde_json::Value::Null))
    }

    /// Get the current page title
    pub async fn title(&self) -> Result<String> {
        let result = self.evaluate_script("document.title").await?;
        Ok(result.as_str().unwrap_or("").to_string())
    }

    /// Get the current URL
    pub async fn current_url(&self) -> Result<String> {
        let result = self.evaluate_script("window.location.href").await?;
        Ok(result.as_str().unwrap_or("").to_string())
    }

    /// Get reference to the active tab
    pub fn tab(&self) -> &Arc<Tab> {
        &self.tab
    }

    /// Close the browser session
    pub async fn close(self) -> Result<()> {
        info!("Closing browser session");
        // Browser will be dropped and cleaned up automatically
        Ok(())
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        debug!("BrowserSession dropped, browser will be cleaned up");
    }
}

/// Classify a heading-wait deadline: a tab that never evaluated a single
/// poll is crashed or detached, and that evaluation failure is the truer
/// error than a visibility timeout.
fn heading_wait_deadline_error(
    name: &str,
    timeout: Duration,
    evaluated_once: bool,
    last_eval_err: Option<PagecheckError>,
) -> PagecheckError {
    match last_eval_err {
        Some(e) if !evaluated_once => e,
        _ => PagecheckError::HeadingTimeout {
            name: name.to_string(),
            timeout_ms: timeout.as_millis() as u64,
        },
    }
}

/// Build the in-page script that reports whether a heading with the given
/// exact accessible name is currently visible.
///
/// The name is JSON-encoded into the script so quotes and backslashes in
/// the expected text cannot break out of the string literal.
pub(crate) fn heading_visible_script(name: &str) -> Result<String> {
    let encoded = serde_json::to_string(name)?;
    Ok(format!(
        r#"
        (() => {{
            const expected = {encoded};
            const headings = document.querySelectorAll('h1,h2,h3,h4,h5,h6,[role="heading"]');
            for (const el of headings) {{
                const label = (el.getAttribute('aria-label') || el.textContent || '').trim();
                if (label === expected && el.getClientRects().length > 0) {{
                    return true;
                }}
            }}
            return false;
        }})()
        "#
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_script_embeds_name() {
        let script = heading_visible_script("Novel to Manga Converter").unwrap();
        assert!(script.contains(r#""Novel to Manga Converter""#));
        assert!(script.contains("getClientRects"));
        assert!(script.contains(r#"[role="heading"]"#));
    }

    #[test]
    fn test_heading_script_escapes_quotes() {
        let script = heading_visible_script(r#"Say "hello""#).unwrap();
        // The quote inside the name must be escaped, not terminate the literal
        assert!(script.contains(r#""Say \"hello\"""#));
    }

    #[test]
    fn test_heading_script_escapes_backslash_and_newline() {
        let script = heading_visible_script("a\\b\nc").unwrap();
        assert!(script.contains(r#""a\\b\nc""#));
    }

    #[test]
    fn test_deadline_with_dead_tab_is_evaluation_error() {
        let err = heading_wait_deadline_error(
            "Title",
            Duration::from_secs(10),
            false,
            Some(PagecheckError::Evaluation("tab detached".into())),
        );
        assert_eq!(err.kind(), "evaluation");
    }

    #[test]
    fn test_deadline_after_successful_polls_is_heading_timeout() {
        // A transient evaluation failure on the last poll does not mask
        // the fact that the heading was genuinely observed to be absent.
        let err = heading_wait_deadline_error(
            "Title",
            Duration::from_secs(10),
            true,
            Some(PagecheckError::Evaluation("transient".into())),
        );
        assert_eq!(err.kind(), "heading-timeout");
    }

    #[test]
    fn test_deadline_with_no_eval_errors_is_heading_timeout() {
        let err = heading_wait_deadline_error("Title", Duration::from_secs(10), true, None);
        match err {
            PagecheckError::HeadingTimeout { name, timeout_ms } => {
                assert_eq!(name, "Title");
                assert_eq!(timeout_ms, 10_000);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
