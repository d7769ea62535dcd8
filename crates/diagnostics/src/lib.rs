// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Simple diagnostics library for komuten
//!
//! Provides one place to configure logging for every crate in the
//! workspace. Libraries log through the `log` facade; the binary calls
//! [`init_diagnostics`] once at startup.
//!
//! Usage:
//! - Set KOMUTEN_LOG=off (default) - no logs
//! - Set KOMUTEN_LOG=info - basic build progress
//! - Set KOMUTEN_LOG=debug - one line per written file, skipped content, etc.

use log::LevelFilter;
use std::sync::Once;

// Re-export log so callers can use `diagnostics::log::info!` without a direct dependency
pub use log;

/// Environment variable holding the log level.
pub const LOG_ENV: &str = "KOMUTEN_LOG";

static INIT: Once = Once::new();

/// Map a `KOMUTEN_LOG` value to a level filter.
///
/// Returns `None` for values we don't recognise.
pub fn parse_level(value: &str) -> Option<LevelFilter> {
    match value.trim().to_ascii_lowercase().as_str() {
        "off" | "" => Some(LevelFilter::Off),
        "error" => Some(LevelFilter::Error),
        "warn" => Some(LevelFilter::Warn),
        "info" => Some(LevelFilter::Info),
        "debug" => Some(LevelFilter::Debug),
        "trace" => Some(LevelFilter::Trace),
        _ => None,
    }
}

/// Initialize diagnostics based on the KOMUTEN_LOG environment variable
///
/// This should be called once at application startup. It's safe to call
/// multiple times - subsequent calls will be ignored.
pub fn init_diagnostics() {
    INIT.call_once(|| {
        let raw = std::env::var(LOG_ENV).unwrap_or_else(|_| "off".to_string());
        let (level, unknown) = match parse_level(&raw) {
            Some(level) => (level, false),
            None => (LevelFilter::Info, true),
        };

        if level == LevelFilter::Off {
            return;
        }

        // try_init: a test harness may already have installed a logger
        let _ = env_logger::Builder::new()
            .filter_level(level)
            .format_timestamp(None)
            .target(env_logger::Target::Stderr)
            .try_init();

        if unknown {
            log::warn!("Unknown {} value '{}', using 'info'", LOG_ENV, raw);
        }
    });
}

/// Re-export the init function for convenience
pub use init_diagnostics as init;
