//! Tracing setup for the fabsave CLI
//!
//! Logs always go to stderr; stdout carries the tee'd input.
//!
//! Usage:
//!   fabsave -v notes                  # info: config file and saved path
//!   fabsave -vv notes                 # debug: resolved config, tags
//!   fabsave -q notes                  # errors only
//!   RUST_LOG=fabsave_core=trace ...   # Fine-grained log control

use std::io::IsTerminal;

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Tracing configuration options
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingConfig {
    /// Count of `-v` flags minus count of `-q` flags
    pub verbosity: i8,
}

impl TracingConfig {
    pub fn from_flags(verbose: u8, quiet: u8) -> Self {
        let verbosity = i16::from(verbose) - i16::from(quiet);
        Self {
            verbosity: verbosity.clamp(i16::from(i8::MIN), i16::from(i8::MAX)) as i8,
        }
    }

    /// Filter directive for this verbosity (default: warn)
    pub fn level(&self) -> &'static str {
        match self.verbosity {
            i8::MIN..=-2 => "off",
            -1 => "error",
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

/// Initialize console tracing; RUST_LOG wins over the flags when set
pub fn init(config: &TracingConfig) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.level()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(config.verbosity >= 2) // Show targets at debug and above
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}
