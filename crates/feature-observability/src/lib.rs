// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # feature-observability
//!
//! Logging infrastructure shared by the feature service crates, with
//! per-crate debug flag support.
//!
//! ## Features
//! - `file-logging`: JSON log files under timestamped run directories

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod init;

pub use cli::*;
pub use init::*;

/// Crate names accepted by the debug flags. Each is also the `target` its log events use.
pub const KNOWN_CRATES: &[&str] = &[
    "feature-api",
    "feature-services",
    "feature-store-sqlite",
    "feature-config",
    "feature-server",
];
