//! Common test utilities and logging infrastructure
//!
//! Import this module in integration tests:
//! ```rust,ignore
//! mod common;
//! use common::init_test_logging;
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG=debug` - Show the crate's `log` records in test output
//! - `TEST_LOG_JSON=1` - Output JSON format for CI parsing
//!
//! Not every helper is used by every test binary.

#![allow(dead_code)]

use std::sync::Once;

use term_layout::config::RenderConfig;
use term_layout::terminal::OutputEnv;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

static INIT: Once = Once::new();

/// Initialize test logging. Idempotent.
///
/// `log` records emitted by the library are bridged into `tracing` by the
/// subscriber's `tracing-log` integration.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let use_json = std::env::var("TEST_LOG_JSON").is_ok();
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("term_layout=debug,test=info"));

        if use_json {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_test_writer())
                .try_init()
                .ok();
        } else {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    fmt::layer()
                        .with_test_writer()
                        .with_file(true)
                        .with_line_number(true)
                        .with_target(true)
                        .compact(),
                )
                .try_init()
                .ok();
        }
    });
}

/// A span guard that marks a test phase in the log output.
pub fn test_phase(name: &str) -> tracing::span::EnteredSpan {
    let span = tracing::info_span!("test_phase", phase = name);
    tracing::info!(phase = name, "entering test phase");
    span.entered()
}

/// Output environment snapshot for an interactive UTF-8 terminal.
pub fn tty_env() -> OutputEnv {
    OutputEnv {
        is_terminal: true,
        encoding: Some("utf-8".to_string()),
        no_color: None,
    }
}

/// Output environment snapshot for a pipe.
pub fn pipe_env() -> OutputEnv {
    OutputEnv {
        is_terminal: false,
        encoding: Some("utf-8".to_string()),
        no_color: None,
    }
}

/// Interactive config whose terminal is `width` columns wide.
pub fn tty_config(width: usize) -> RenderConfig {
    RenderConfig::builder()
        .env(tty_env())
        .terminal_width(width)
        .build()
}

/// Non-interactive config.
pub fn pipe_config() -> RenderConfig {
    RenderConfig::builder().env(pipe_env()).build()
}

/// Join expected lines the way renderers do: every line ends with `\n`.
pub fn lines(expected: &[&str]) -> String {
    expected.iter().map(|line| format!("{line}\n")).collect()
}

// =============================================================================
// Environment Helpers
// =============================================================================

/// Sets or removes an environment variable and restores the previous value
/// on drop.
///
/// Changing the environment is unsound while other threads read it, so every
/// test holding a guard must be `#[serial]`.
pub struct EnvVarGuard {
    key: &'static str,
    original: Option<String>,
}

impl EnvVarGuard {
    pub fn set(key: &'static str, value: &str) -> Self {
        let original = std::env::var(key).ok();
        // SAFETY: Test-only code, serialized with `#[serial]`
        unsafe { std::env::set_var(key, value) };
        Self { key, original }
    }

    pub fn remove(key: &'static str) -> Self {
        let original = std::env::var(key).ok();
        // SAFETY: Test-only code, serialized with `#[serial]`
        unsafe { std::env::remove_var(key) };
        Self { key, original }
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        // SAFETY: Test-only code, serialized with `#[serial]`
        match self.original.take() {
            Some(value) => unsafe { std::env::set_var(self.key, value) },
            None => unsafe { std::env::remove_var(self.key) },
        }
    }
}
