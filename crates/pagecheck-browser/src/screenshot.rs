//! Screenshot capture using Chrome DevTools Protocol

use crate::browser::BrowserSession;
use crate::error::{PagecheckError, Result};
use headless_chrome::protocol::cdp::Page::CaptureScreenshotFormatOption;
use std::path::Path;
use tracing::{debug, info};

/// Screenshot capture options
#[derive(Debug, Clone)]
pub struct ScreenshotOptions {
    /// CSS selector for element screenshot (None for full page)
    pub selector: Option<String>,
    /// Capture full page (scrolls and stitches if needed)
    pub full_page: bool,
}

impl Default for ScreenshotOptions {
    fn default() -> Self {
        Self {
            selector: None,
            full_page: true,
        }
    }
}

impl ScreenshotOptions {
    /// Create options for full-page screenshot
    pub fn full_page() -> Self {
        Self {
            selector: None,
            full_page: true,
        }
    }

    /// Create options for element screenshot
    pub fn element(selector: &str) -> Self {
        Self {
            selector: Some(selector.to_string()),
            full_page: false,
        }
    }
}

/// Capture a PNG screenshot of the current document
///
/// Full-page by default; with a selector, captures just that element.
/// Element capture goes through a different CDP path than full-page
/// capture, so it can still succeed on pages where the full-page
/// stitch fails.
pub async fn capture_screenshot(
    session: &BrowserSession,
    options: &ScreenshotOptions,
) -> Result<Vec<u8>> {
    if let Some(selector) = &options.selector {
        debug!("Capturing element screenshot: {}", selector);

        let element = session
            .tab()
            .wait_for_element(selector)
            .map_err(|_e| PagecheckError::Screenshot(format!("Element not found: {}", selector)))?;

        element
            .capture_screenshot(CaptureScreenshotFormatOption::Png)
            .map_err(|e| PagecheckError::Screenshot(format!("Element capture failed: {}", e)))
    } else {
        debug!("Capturing full page screenshot");

        session
            .tab()
            .capture_screenshot(CaptureScreenshotFormatOption::Png, None, None, options.full_page)
            .map_err(|e| PagecheckError::Screenshot(format!("CDP capture failed: {}", e)))
    }
}

/// Capture a full-page PNG screenshot of the current document
pub async fn capture_full_page(session: &BrowserSession) -> Result<Vec<u8>> {
    capture_screenshot(session, &ScreenshotOptions::full_page()).await
}

/// Write screenshot data to an artifact path, creating parent directories
///
/// Overwrites any artifact from a previous run at the same path.
pub async fn write_artifact(data: &[u8], path: &Path) -> Result<u64> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    tokio::fs::write(path, data).await?;

    info!("Screenshot stored: {} ({} bytes)", path.display(), data.len());
    Ok(data.len() as u64)
}

/// Capture a full-page screenshot and write it to the given path
pub async fn capture_to_path(session: &BrowserSession, path: &Path) -> Result<u64> {
    let data = capture_full_page(session).await?;
    write_artifact(&data, path).await
}

/// Capture a screenshot of a specific element and write it to the given
/// path
pub async fn capture_element_to_path(
    session: &BrowserSession,
    selector: &str,
    path: &Path,
) -> Result<u64> {
    let data = capture_screenshot(session, &ScreenshotOptions::element(selector)).await?;
    write_artifact(&data, path).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_screenshot_options_default() {
        let options = ScreenshotOptions::default();
        assert!(options.selector.is_none());
        assert!(options.full_page);
    }

    #[test]
    fn test_screenshot_options_full_page() {
        let options = ScreenshotOptions::full_page();
        assert!(options.selector.is_none());
        assert!(options.full_page);
    }

    #[test]
    fn test_screenshot_options_element() {
        let options = ScreenshotOptions::element("body");
        assert_eq!(options.selector.as_deref(), Some("body"));
        assert!(!options.full_page);
    }

    #[tokio::test]
    async fn test_write_artifact_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir
            .path()
            .join("jules-scratch/verification/homepage.png");

        let data = b"fake png bytes";
        let written = write_artifact(data, &path).await.unwrap();

        assert_eq!(written, data.len() as u64);
        assert!(path.exists());
        let content = tokio::fs::read(&path).await.unwrap();
        assert_eq!(content, data);
    }

    #[tokio::test]
    async fn test_write_artifact_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("error.png");

        write_artifact(b"first run", &path).await.unwrap();
        write_artifact(b"second run", &path).await.unwrap();

        let content = tokio::fs::read(&path).await.unwrap();
        assert_eq!(content, b"second run");
    }
}
