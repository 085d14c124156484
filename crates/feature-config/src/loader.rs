// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration file loading with override support
//!
//! Values are layered in this order, later layers winning:
//! 1. TOML file (or built-in defaults when no file exists)
//! 2. Environment variables
//! 3. CLI arguments

use crate::{ConfigError, ConfigResult, FeatureConfig};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Default configuration file name
pub const CONFIG_FILE_NAME: &str = "feature_configuration.toml";

/// Environment variable naming an explicit configuration file
pub const CONFIG_PATH_ENV: &str = "FEATURE_CONFIG_PATH";

/// Find the configuration file
///
/// Search order:
/// 1. `FEATURE_CONFIG_PATH` environment variable
/// 2. Current working directory
/// 3. Up to five parent directories
///
/// # Errors
///
/// Returns `ConfigError::NotFound` if no config file is found in any location
pub fn find_config_file() -> ConfigResult<PathBuf> {
    if let Ok(env_path) = env::var(CONFIG_PATH_ENV) {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return Ok(path);
        }
        return Err(ConfigError::NotFound(format!(
            "Config file specified by {} not found: {}",
            CONFIG_PATH_ENV,
            path.display()
        )));
    }

    let mut search_paths = Vec::new();
    if let Ok(cwd) = env::current_dir() {
        search_paths.push(cwd.join(CONFIG_FILE_NAME));
        let mut current = cwd.as_path();
        for _ in 0..5 {
            match current.parent() {
                Some(parent) => {
                    search_paths.push(parent.join(CONFIG_FILE_NAME));
                    current = parent;
                }
                None => break,
            }
        }
    }

    if let Some(found) = search_paths.iter().find(|p| p.exists()) {
        return Ok(found.clone());
    }

    let search_list = search_paths
        .iter()
        .map(|p| format!("  - {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n");

    Err(ConfigError::NotFound(format!(
        "'{}' not found in any of these locations:\n{}\n\nSet {} to specify a custom location.",
        CONFIG_FILE_NAME, search_list, CONFIG_PATH_ENV
    )))
}

/// Load configuration from a TOML file and apply overrides
///
/// # Arguments
///
/// * `config_path` - Optional path to config file. If `None`, the file is searched for.
/// * `cli_args` - Optional CLI argument overrides
///
/// # Errors
///
/// Returns error if the config file is not found or contains invalid TOML.
/// Validation is left to [`crate::validate_config`].
pub fn load_config(
    config_path: Option<&Path>,
    cli_args: Option<&HashMap<String, String>>,
) -> ConfigResult<FeatureConfig> {
    let config_file = match config_path {
        Some(path) => path.to_path_buf(),
        None => find_config_file()?,
    };

    let content = fs::read_to_string(&config_file)?;
    let mut config: FeatureConfig = toml::from_str(&content)?;
    info!(target: "feature-config", "Loaded configuration from {}", config_file.display());

    apply_overrides(&mut config, cli_args);
    Ok(config)
}

/// Like [`load_config`], but start from defaults when no file can be found.
///
/// An explicit `config_path` that does not exist is still an error.
pub fn load_config_or_default(
    config_path: Option<&Path>,
    cli_args: Option<&HashMap<String, String>>,
) -> ConfigResult<FeatureConfig> {
    if config_path.is_some() {
        return load_config(config_path, cli_args);
    }
    match find_config_file() {
        Ok(path) => load_config(Some(&path), cli_args),
        Err(ConfigError::NotFound(msg)) if env::var(CONFIG_PATH_ENV).is_err() => {
            debug!(target: "feature-config", "{}", msg);
            info!(target: "feature-config", "No {} found, using defaults", CONFIG_FILE_NAME);
            let mut config = FeatureConfig::default();
            apply_overrides(&mut config, cli_args);
            Ok(config)
        }
        Err(e) => Err(e),
    }
}

fn apply_overrides(config: &mut FeatureConfig, cli_args: Option<&HashMap<String, String>>) {
    apply_environment_overrides(config);
    if let Some(cli) = cli_args {
        apply_cli_overrides(config, cli);
    }
}

/// Apply environment variable overrides to configuration
///
/// Supported environment variables:
/// - `FEATURE_API_HOST` -> `api.host`
/// - `FEATURE_API_PORT` -> `api.port`
/// - `FEATURE_NOT_FOUND_POLICY` -> `api.not_found_policy`
/// - `FEATURE_DATABASE_BACKEND` -> `database.backend`
/// - `FEATURE_DATABASE_PATH` -> `database.path`
/// - `FEATURE_DATABASE_POOL_SIZE` -> `database.pool_size`
/// - `FEATURE_DATABASE_BUSY_TIMEOUT_MS` -> `database.busy_timeout_ms`
/// - `FEATURE_LOG_LEVEL` -> `logging.level`
/// - `FEATURE_LOG_DIR` -> `logging.log_dir`
///
/// Values that do not parse are ignored.
pub fn apply_environment_overrides(config: &mut FeatureConfig) {
    let vars: HashMap<String, String> = [
        ("FEATURE_API_HOST", "api_host"),
        ("FEATURE_API_PORT", "api_port"),
        ("FEATURE_NOT_FOUND_POLICY", "not_found_policy"),
        ("FEATURE_DATABASE_BACKEND", "database_backend"),
        ("FEATURE_DATABASE_PATH", "database_path"),
        ("FEATURE_DATABASE_POOL_SIZE", "database_pool_size"),
        ("FEATURE_DATABASE_BUSY_TIMEOUT_MS", "database_busy_timeout_ms"),
        ("FEATURE_LOG_LEVEL", "log_level"),
        ("FEATURE_LOG_DIR", "log_dir"),
    ]
    .into_iter()
    .filter_map(|(var, key)| env::var(var).ok().map(|value| (key.to_string(), value)))
    .collect();

    apply_cli_overrides(config, &vars);
}

/// Apply CLI argument overrides to configuration
///
/// # Arguments
///
/// * `config` - Configuration to modify
/// * `cli_args` - map of overrides, e.g. `{"api_host": "127.0.0.1", "api_port": "9000"}`
///
/// Recognized keys: `api_host`, `api_port`, `not_found_policy`, `database_backend`,
/// `database_path`, `database_pool_size`, `database_busy_timeout_ms`, `log_level`,
/// `log_dir`.
pub fn apply_cli_overrides(config: &mut FeatureConfig, cli_args: &HashMap<String, String>) {
    // API settings
    if let Some(value) = cli_args.get("api_host") {
        config.api.host = value.clone();
    }
    if let Some(value) = cli_args.get("api_port") {
        if let Ok(port) = value.parse::<u16>() {
            config.api.port = port;
        }
    }
    if let Some(value) = cli_args.get("not_found_policy") {
        match value.parse() {
            Ok(policy) => config.api.not_found_policy = policy,
            Err(e) => warn!(target: "feature-config", "Ignoring override: {}", e),
        }
    }

    // Database settings
    if let Some(value) = cli_args.get("database_backend") {
        match value.parse() {
            Ok(backend) => config.database.backend = backend,
            Err(e) => warn!(target: "feature-config", "Ignoring override: {}", e),
        }
    }
    if let Some(value) = cli_args.get("database_path") {
        config.database.path = PathBuf::from(value);
    }
    if let Some(value) = cli_args.get("database_pool_size") {
        if let Ok(size) = value.parse::<usize>() {
            config.database.pool_size = size;
        }
    }
    if let Some(value) = cli_args.get("database_busy_timeout_ms") {
        if let Ok(timeout) = value.parse::<u64>() {
            config.database.busy_timeout_ms = timeout;
        }
    }

    // Logging settings
    if let Some(value) = cli_args.get("log_level") {
        config.logging.level = value.clone();
    }
    if let Some(value) = cli_args.get("log_dir") {
        config.logging.log_dir = PathBuf::from(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DatabaseBackend, NotFoundPolicy};
    use std::fs::File;
    use std::io::Write;
    use std::sync::Mutex;
    use tempfile::tempdir;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    const OVERRIDE_VARS: [&str; 9] = [
        "FEATURE_API_HOST",
        "FEATURE_API_PORT",
        "FEATURE_NOT_FOUND_POLICY",
        "FEATURE_DATABASE_BACKEND",
        "FEATURE_DATABASE_PATH",
        "FEATURE_DATABASE_POOL_SIZE",
        "FEATURE_DATABASE_BUSY_TIMEOUT_MS",
        "FEATURE_LOG_LEVEL",
        "FEATURE_LOG_DIR",
    ];

    fn clear_override_vars() {
        for var in OVERRIDE_VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_config_path_env_var_wins() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("features.toml");
        File::create(&config_path).unwrap();

        env::set_var(CONFIG_PATH_ENV, config_path.to_str().unwrap());
        let result = find_config_file();
        env::remove_var(CONFIG_PATH_ENV);

        assert_eq!(result.unwrap(), config_path);
    }

    #[test]
    fn test_find_config_file_env_var_missing_file() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let dir = tempdir().unwrap();

        env::set_var(CONFIG_PATH_ENV, dir.path().join("absent.toml"));
        let result = find_config_file();
        env::remove_var(CONFIG_PATH_ENV);

        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        clear_override_vars();
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);

        let mut file = File::create(&config_path).unwrap();
        writeln!(file, "[api]").unwrap();
        writeln!(file, "port = 8383").unwrap();
        writeln!(file, "[database]").unwrap();
        writeln!(file, "path = \"/var/lib/features.db\"").unwrap();

        let config = load_config(Some(&config_path), None).unwrap();

        assert_eq!(config.api.port, 8383);
        assert_eq!(config.database.path, PathBuf::from("/var/lib/features.db"));
        assert_eq!(config.database.backend, DatabaseBackend::Sqlite);
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&config_path, "[api\nport = ").unwrap();

        let result = load_config(Some(&config_path), None);
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn test_explicit_missing_path_is_io_error() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let dir = tempdir().unwrap();
        let result = load_config_or_default(Some(&dir.path().join("nope.toml")), None);
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_environment_overrides() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        clear_override_vars();
        let mut config = FeatureConfig::default();

        env::set_var("FEATURE_API_HOST", "172.16.4.20");
        env::set_var("FEATURE_API_PORT", "8181");
        env::set_var("FEATURE_NOT_FOUND_POLICY", "explicit_404");
        env::set_var("FEATURE_DATABASE_BACKEND", "memory");
        env::set_var("FEATURE_DATABASE_POOL_SIZE", "not-a-number");

        apply_environment_overrides(&mut config);
        clear_override_vars();

        assert_eq!(config.api.host, "172.16.4.20");
        assert_eq!(config.api.port, 8181);
        assert_eq!(config.api.not_found_policy, NotFoundPolicy::Explicit404);
        assert_eq!(config.database.backend, DatabaseBackend::Memory);
        assert_eq!(config.database.pool_size, 4);
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = FeatureConfig::default();
        let mut cli_args = HashMap::new();
        cli_args.insert("api_host".to_string(), "127.0.0.2".to_string());
        cli_args.insert("api_port".to_string(), "8282".to_string());
        cli_args.insert("database_path".to_string(), "/tmp/x.db".to_string());
        cli_args.insert("log_level".to_string(), "debug".to_string());

        apply_cli_overrides(&mut config, &cli_args);

        assert_eq!(config.api.host, "127.0.0.2");
        assert_eq!(config.api.port, 8282);
        assert_eq!(config.database.path, PathBuf::from("/tmp/x.db"));
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_override_precedence() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        clear_override_vars();
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);

        let mut file = File::create(&config_path).unwrap();
        writeln!(file, "[api]").unwrap();
        writeln!(file, "host = \"loci.internal\"").unwrap();
        writeln!(file, "port = 8484").unwrap();

        env::set_var("FEATURE_API_HOST", "loci.env");
        env::set_var("FEATURE_API_PORT", "8585");

        let mut cli_args = HashMap::new();
        cli_args.insert("api_host".to_string(), "loci.cli".to_string());

        let config = load_config(Some(&config_path), Some(&cli_args)).unwrap();
        clear_override_vars();

        // CLI wins for host, env wins for port
        assert_eq!(config.api.host, "loci.cli");
        assert_eq!(config.api.port, 8585);
    }
}
