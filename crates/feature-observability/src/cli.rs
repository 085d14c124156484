// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Per-crate debug switches
//!
//! Crates are named by their hyphenated package name (`feature-api`), which is
//! also the `target:` every crate logs under.

use std::collections::BTreeSet;
use std::env;

use crate::KNOWN_CRATES;

/// Environment variable listing crates to debug (comma-separated, or `all`)
pub const DEBUG_ENV_VAR: &str = "FEATURE_DEBUG";

/// ```rust
/// use feature_observability::CrateDebugFlags;
///
/// let flags = CrateDebugFlags::from_names(["feature_api"]);
/// assert!(flags.is_enabled("feature-api"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrateDebugFlags {
    enabled_crates: BTreeSet<String>,
}

impl CrateDebugFlags {
    /// Build flags from bare crate names, e.g. the values of a repeatable `--debug` option
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut flags = CrateDebugFlags::default();
        for name in names {
            flags.enable(name.as_ref());
        }
        flags
    }

    /// Enable one crate. `all` enables every known crate; blank names are ignored.
    pub fn enable(&mut self, crate_name: &str) {
        let crate_name = crate_name.trim();
        if crate_name == "all" {
            self.enable_all();
        } else if !crate_name.is_empty() {
            self.enabled_crates.insert(crate_name.replace('_', "-"));
        }
    }

    pub fn enable_all(&mut self) {
        for crate_name in KNOWN_CRATES {
            self.enabled_crates.insert(crate_name.to_string());
        }
    }

    /// Merge crates named in `FEATURE_DEBUG`
    pub fn with_env(mut self) -> Self {
        if let Ok(value) = env::var(DEBUG_ENV_VAR) {
            for crate_name in value.split(',') {
                self.enable(crate_name);
            }
        }
        self
    }

    /// Check if debug is enabled for a specific crate
    pub fn is_enabled(&self, crate_name: &str) -> bool {
        self.enabled_crates.contains(crate_name)
    }

    /// Get all enabled crates, sorted
    pub fn enabled_crates(&self) -> Vec<&str> {
        self.enabled_crates.iter().map(String::as_str).collect()
    }

    pub fn any_enabled(&self) -> bool {
        !self.enabled_crates.is_empty()
    }

    /// Create an `EnvFilter` directive string from the flags
    ///
    /// Each enabled crate contributes its hyphenated log target and its
    /// module path (`feature-api=debug,feature_api=debug`), followed by
    /// `default_level` for everything else.
    pub fn to_filter_string(&self, default_level: &str) -> String {
        let mut filters = Vec::with_capacity(self.enabled_crates.len() * 2 + 1);
        for crate_name in &self.enabled_crates {
            filters.push(format!("{}=debug", crate_name));
            filters.push(format!("{}=debug", crate_name.replace('-', "_")));
        }
        filters.push(default_level.to_ascii_lowercase());
        filters.join(",")
    }
}

/// Trailer for `feature-server --help`
pub fn debug_flags_help() -> String {
    format!(
        "Debug logging:\n  \
         --debug <CRATE>   repeatable, one of: {crates}, all\n  \
         --debug-all       every crate above\n  \
         {var}=a,b   same, read from the environment",
        crates = KNOWN_CRATES.join(", "),
        var = DEBUG_ENV_VAR,
    )
}
