//! Probe configuration
//!
//! Everything the original hardcoded is injectable here: target URL,
//! expected heading text, artifact paths, and both timeouts. Loaded from
//! `pagecheck.toml` when present, defaults otherwise.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::{PagecheckError, Result};

/// Configuration for a single probe run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeConfig {
    /// URL the probe navigates to
    #[serde(default = "default_target_url")]
    pub target_url: String,

    /// Exact accessible name of the heading that must become visible
    #[serde(default = "default_expected_heading")]
    pub expected_heading: String,

    /// Screenshot path written on success
    #[serde(default = "default_success_path")]
    pub success_path: PathBuf,

    /// Screenshot path written (best-effort) on failure
    #[serde(default = "default_error_path")]
    pub error_path: PathBuf,

    /// Bound on the heading-visibility wait
    #[serde(default = "default_heading_timeout_ms")]
    pub heading_timeout_ms: u64,

    /// Bound on navigation reaching DOM-ready
    #[serde(default = "default_nav_timeout_ms")]
    pub nav_timeout_ms: u64,

    /// Browser launch settings
    #[serde(default)]
    pub browser: BrowserSettings,
}

/// Browser launch settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserSettings {
    /// Run in headless mode (default: true)
    #[serde(default = "default_headless")]
    pub headless: bool,

    /// Browser window width
    #[serde(default = "default_window_width")]
    pub window_width: u32,

    /// Browser window height
    #[serde(default = "default_window_height")]
    pub window_height: u32,
}

// Default value providers
fn default_target_url() -> String {
    "http://localhost:3000/".to_string()
}

fn default_expected_heading() -> String {
    "Novel to Manga Converter".to_string()
}

fn default_success_path() -> PathBuf {
    PathBuf::from("jules-scratch/verification/homepage.png")
}

fn default_error_path() -> PathBuf {
    PathBuf::from("jules-scratch/verification/error.png")
}

fn default_heading_timeout_ms() -> u64 {
    10_000
}

fn default_nav_timeout_ms() -> u64 {
    30_000
}

fn default_headless() -> bool {
    true
}

fn default_window_width() -> u32 {
    1920
}

fn default_window_height() -> u32 {
    1080
}

impl ProbeConfig {
    /// Load configuration from a TOML file, or use defaults if it does
    /// not exist.
    pub fn load_or_default(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            toml::from_str(&content)
                .map_err(|e| PagecheckError::Config(format!("Failed to parse config file: {}", e)))
        } else {
            Ok(Self::default())
        }
    }

    /// Write the default configuration to the given path
    pub fn write_default(config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let config = Self::default();
        let content = toml::to_string_pretty(&config)
            .map_err(|e| PagecheckError::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(config_path, content)?;
        Ok(())
    }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            target_url: default_target_url(),
            expected_heading: default_expected_heading(),
            success_path: default_success_path(),
            error_path: default_error_path(),
            heading_timeout_ms: default_heading_timeout_ms(),
            nav_timeout_ms: default_nav_timeout_ms(),
            browser: BrowserSettings::default(),
        }
    }
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            headless: default_headless(),
            window_width: default_window_width(),
            window_height: default_window_height(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = ProbeConfig::default();
        assert_eq!(config.target_url, "http://localhost:3000/");
        assert_eq!(config.expected_heading, "Novel to Manga Converter");
        assert_eq!(
            config.success_path,
            PathBuf::from("jules-scratch/verification/homepage.png")
        );
        assert_eq!(
            config.error_path,
            PathBuf::from("jules-scratch/verification/error.png")
        );
        assert_eq!(config.heading_timeout_ms, 10_000);
        assert!(config.browser.headless);
        assert_eq!(config.browser.window_width, 1920);
        assert_eq!(config.browser.window_height, 1080);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: ProbeConfig = toml::from_str(
            r#"
            target_url = "http://127.0.0.1:8080/"
            expected_heading = "Dashboard"
            "#,
        )
        .unwrap();

        assert_eq!(config.target_url, "http://127.0.0.1:8080/");
        assert_eq!(config.expected_heading, "Dashboard");
        assert_eq!(config.heading_timeout_ms, 10_000);
        assert!(config.browser.headless);
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("pagecheck.toml");

        let config = ProbeConfig::load_or_default(&path).unwrap();
        assert_eq!(config.target_url, "http://localhost:3000/");
    }

    #[test]
    fn test_write_default_then_load_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("pagecheck.toml");

        ProbeConfig::write_default(&path).unwrap();
        assert!(path.exists());

        let loaded = ProbeConfig::load_or_default(&path).unwrap();
        assert_eq!(loaded.expected_heading, "Novel to Manga Converter");
        assert_eq!(loaded.nav_timeout_ms, 30_000);
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("pagecheck.toml");
        std::fs::write(&path, "target_url = [not toml").unwrap();

        let err = ProbeConfig::load_or_default(&path).unwrap_err();
        assert_eq!(err.kind(), "config");
    }
}
