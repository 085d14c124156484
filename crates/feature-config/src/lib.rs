// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration for the feature service
//!
//! Settings come from `feature_configuration.toml`, then `FEATURE_*`
//! environment variables, then command-line overrides. Later sources win.
//!
//! ```rust,no_run
//! use feature_config::{load_config_or_default, validate_config};
//!
//! # fn main() -> Result<(), feature_config::ConfigError> {
//! let config = load_config_or_default(None, None)?;
//! validate_config(&config)?;
//! println!("listening on {}:{}", config.api.host, config.api.port);
//! # Ok(())
//! # }
//! ```

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod loader;
pub mod types;
pub mod validation;

pub use loader::{
    apply_cli_overrides, apply_environment_overrides, find_config_file, load_config,
    load_config_or_default, CONFIG_FILE_NAME,
};
pub use types::*;
pub use validation::{validate_config, ConfigValidationError};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// No configuration file at any searched location
    #[error("configuration file not found: {0}")]
    NotFound(String),

    #[error("cannot read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed configuration file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("{0}")]
    Invalid(String),

    /// A named setting (policy, backend) had no matching variant
    #[error("unrecognized setting: {0}")]
    UnknownValue(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_round_trips_through_toml() {
        let config = FeatureConfig::default();
        let text = toml::to_string(&config).unwrap();
        let parsed: FeatureConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_malformed_toml_maps_to_toml_error() {
        let err: ConfigError = toml::from_str::<FeatureConfig>("[api\nport = 1")
            .unwrap_err()
            .into();
        assert!(matches!(err, ConfigError::Toml(_)));
    }
}
