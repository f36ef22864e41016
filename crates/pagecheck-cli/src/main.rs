//! pagecheck CLI - single-shot page-verification probe
//!
//! Usage:
//!   pagecheck run                  Probe the configured URL
//!   pagecheck run --url <URL>      Probe a specific URL
//!   pagecheck init                 Write a default pagecheck.toml
//!
//! Exit codes: 0 = page verified, 1 = probe failed (artifact written
//! best-effort), 2 = browser launch or configuration error.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pagecheck_browser::run_probe;
use pagecheck_core::ProbeConfig;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "pagecheck")]
#[command(author, version, about = "Headless-browser page verification probe")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the verification probe
    Run {
        /// Config file path
        #[arg(long, default_value = "pagecheck.toml")]
        config: PathBuf,

        /// URL to probe (overrides config)
        #[arg(long)]
        url: Option<String>,

        /// Exact heading text that must become visible (overrides config)
        #[arg(long)]
        heading: Option<String>,

        /// Screenshot path written on success (overrides config)
        #[arg(long)]
        success_path: Option<PathBuf>,

        /// Screenshot path written on failure (overrides config)
        #[arg(long)]
        error_path: Option<PathBuf>,

        /// Heading-visibility timeout in milliseconds (overrides config)
        #[arg(long)]
        timeout_ms: Option<u64>,

        /// Run with a visible browser window
        #[arg(long)]
        headed: bool,

        /// Print the probe report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write a default pagecheck.toml
    Init {
        /// Config file path
        #[arg(default_value = "pagecheck.toml")]
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Run {
            config,
            url,
            heading,
            success_path,
            error_path,
            timeout_ms,
            headed,
            json,
        } => {
            cmd_run(
                config,
                url,
                heading,
                success_path,
                error_path,
                timeout_ms,
                headed,
                json,
            )
            .await
        }
        Commands::Init { path } => cmd_init(path),
    }
}

#[allow(clippy::too_many_arguments)]
async fn cmd_run(
    config_path: PathBuf,
    url: Option<String>,
    heading: Option<String>,
    success_path: Option<PathBuf>,
    error_path: Option<PathBuf>,
    timeout_ms: Option<u64>,
    headed: bool,
    json: bool,
) -> Result<ExitCode> {
    let mut config = load_config(&config_path)?;
    apply_overrides(
        &mut config,
        url,
        heading,
        success_path,
        error_path,
        timeout_ms,
        headed,
    );

    let report = match run_probe(&config).await {
        Ok(report) => report,
        Err(e) => {
            // Launch failures have no page to screenshot; report and
            // exit distinctly so CI can tell "environment broken" from
            // "page broken".
            eprintln!("pagecheck: {}", e);
            return Ok(ExitCode::from(2));
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        match report.failure_kind() {
            None => {
                println!("PASS {}", config.target_url);
                if let Some(artifact) = &report.artifact {
                    println!("  artifact: {}", artifact.display());
                }
            }
            Some(kind) => {
                println!("FAIL {} ({})", config.target_url, kind);
                match &report.artifact {
                    Some(artifact) => println!("  artifact: {}", artifact.display()),
                    None => println!("  artifact: <failure screenshot could not be captured>"),
                }
            }
        }
    }

    if report.passed() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(1))
    }
}

fn cmd_init(path: PathBuf) -> Result<ExitCode> {
    ProbeConfig::write_default(&path).context("Failed to write default config")?;
    info!("Wrote default config to {}", path.display());
    println!("Created {}", path.display());
    Ok(ExitCode::SUCCESS)
}

fn load_config(path: &PathBuf) -> Result<ProbeConfig> {
    ProbeConfig::load_or_default(path)
        .with_context(|| format!("Failed to load config from {}", path.display()))
}

fn apply_overrides(
    config: &mut ProbeConfig,
    url: Option<String>,
    heading: Option<String>,
    success_path: Option<PathBuf>,
    error_path: Option<PathBuf>,
    timeout_ms: Option<u64>,
    headed: bool,
) {
    if let Some(url) = url {
        config.target_url = url;
    }
    if let Some(heading) = heading {
        config.expected_heading = heading;
    }
    if let Some(path) = success_path {
        config.success_path = path;
    }
    if let Some(path) = error_path {
        config.error_path = path;
    }
    if let Some(ms) = timeout_ms {
        config.heading_timeout_ms = ms;
    }
    if headed {
        config.browser.headless = false;
    }
}
