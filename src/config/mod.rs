//! Configuration loading and management.
//!
//! This module is split into logical submodules:
//! - [`types`]: Top-level config struct, error type and loading
//! - [`dispatch`]: Message prefix configuration (DispatchConfig)
//! - [`syntax`]: Argument type options (SyntaxConfig)
//! - [`log`]: Log filter and output format (LogConfig)
//! - [`validation`]: Startup checks across sections

mod defaults;
mod dispatch;
mod log;
mod syntax;
mod types;
mod validation;

pub use dispatch::DispatchConfig;
pub use log::LogConfig;
pub use syntax::SyntaxConfig;
pub use types::{Config, ConfigError};
pub use validation::{ValidationError, validate};
