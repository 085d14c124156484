// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use anyhow::{Context, Result};
use clap::Parser;
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{info, warn};

use feature_service::build_router;
use feature_service::config::{load_config_or_default, validate_config, FeatureConfig};
use feature_service::observability::{self, CrateDebugFlags};

/// Feature service - REST API for enumerated sequence features
#[derive(Parser, Debug)]
#[command(
    name = "feature-server",
    version,
    author,
    long_about = None,
    after_help = observability::debug_flags_help()
)]
struct Args {
    /// Path to feature_configuration.toml (searched for when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to bind
    #[arg(long)]
    host: Option<String>,

    /// Port to bind
    #[arg(short, long)]
    port: Option<u16>,

    /// SQLite database file
    #[arg(long, conflicts_with = "memory")]
    database: Option<PathBuf>,

    /// Keep features in memory only (lost on exit)
    #[arg(long, default_value_t = false)]
    memory: bool,

    /// Lookup miss behavior: "empty_body" or "explicit_404"
    #[arg(long)]
    not_found_policy: Option<String>,

    /// Default log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Enable debug logging for a crate (repeatable), e.g. --debug feature-api
    #[arg(long = "debug", value_name = "CRATE")]
    debug: Vec<String>,

    /// Enable debug logging for all crates
    #[arg(long, default_value_t = false)]
    debug_all: bool,
}

impl Args {
    /// CLI values in the key format understood by the config loader
    fn overrides(&self) -> HashMap<String, String> {
        let mut overrides = HashMap::new();
        if let Some(host) = &self.host {
            overrides.insert("api_host".to_string(), host.clone());
        }
        if let Some(port) = self.port {
            overrides.insert("api_port".to_string(), port.to_string());
        }
        if let Some(policy) = &self.not_found_policy {
            overrides.insert("not_found_policy".to_string(), policy.clone());
        }
        if let Some(path) = &self.database {
            overrides.insert("database_backend".to_string(), "sqlite".to_string());
            overrides.insert("database_path".to_string(), path.display().to_string());
        }
        if self.memory {
            overrides.insert("database_backend".to_string(), "memory".to_string());
        }
        if let Some(level) = &self.log_level {
            overrides.insert("log_level".to_string(), level.clone());
        }
        overrides
    }

    fn debug_flags(&self) -> CrateDebugFlags {
        let mut flags = CrateDebugFlags::from_names(&self.debug).with_env();
        if self.debug_all {
            flags.enable_all();
        }
        flags
    }
}

#[cfg(feature = "file-logging")]
fn init_logging(
    config: &FeatureConfig,
    flags: &CrateDebugFlags,
) -> Result<Option<observability::LoggingGuard>> {
    if !config.logging.file_logging {
        observability::init_console_logging(flags, &config.logging.level)?;
        return Ok(None);
    }
    let guard = observability::init_logging(
        flags,
        &config.logging.level,
        &config.logging.log_dir,
        config.logging.retention_days,
        config.logging.retention_runs,
    )?;
    info!(target: "feature-server", "Writing logs to {}", guard.log_dir().display());
    Ok(Some(guard))
}

#[cfg(not(feature = "file-logging"))]
fn init_logging(config: &FeatureConfig, flags: &CrateDebugFlags) -> Result<()> {
    observability::init_console_logging(flags, &config.logging.level)?;
    if config.logging.file_logging {
        warn!(
            target: "feature-server",
            "logging.file_logging is set but this build lacks the file-logging feature"
        );
    }
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(target: "feature-server", "Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    info!(target: "feature-server", "Shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_config_or_default(args.config.as_deref(), Some(&args.overrides()))
        .context("Failed to load configuration")?;
    validate_config(&config)?;

    let debug_flags = args.debug_flags();
    let _logging_guard = init_logging(&config, &debug_flags)?;
    if debug_flags.any_enabled() {
        info!(
            target: "feature-server",
            "Debug logging enabled for: {}",
            debug_flags.enabled_crates().join(", ")
        );
    }

    info!(
        target: "feature-server",
        "feature-server {} starting (backend: {}, not_found_policy: {})",
        env!("CARGO_PKG_VERSION"),
        config.database.backend,
        config.api.not_found_policy
    );

    let app = build_router(&config)?;

    let addr = format!("{}:{}", config.api.host, config.api.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!(target: "feature-server", "Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!(target: "feature-server", "Stopped");
    Ok(())
}
