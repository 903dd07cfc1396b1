//! Telemetry utilities for command timing and log setup.

use crate::config::LogConfig;
use std::time::Instant;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Guard for timing command execution.
///
/// Logs the command latency when dropped.
pub struct CommandTimer {
    command: String,
    start: Instant,
}

impl CommandTimer {
    /// Start timing a command.
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            start: Instant::now(),
        }
    }

    pub fn command(&self) -> &str {
        &self.command
    }
}

impl Drop for CommandTimer {
    fn drop(&mut self) {
        let micros = self.start.elapsed().as_micros() as u64;
        debug!(command = %self.command, elapsed_us = micros, "Command finished");
    }
}

/// Build the filter: `RUST_LOG` wins, then the configured directive.
pub fn env_filter(config: &LogConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.filter))
}

/// Install the global subscriber. Call once, from `main`.
pub fn init(config: &LogConfig) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_target(true);
    if config.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Standardized span constructors for bot observability.
pub mod spans {
    use tracing::{Span, info_span};

    /// Create a span for one incoming message.
    pub fn dispatch(line: u64, prefix: &str) -> Span {
        info_span!("dispatch", line = line, prefix = %prefix)
    }

    /// Create a span for a command execution.
    pub fn command(name: &str, depth: usize) -> Span {
        info_span!("command", name = %name, depth = depth)
    }
}
