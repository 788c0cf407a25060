//! Configuration for the cache inspector.
//!
//! Structures are organized by concern:
//! - `root`: main configuration, file loading and CLI overrides
//! - `logging`: logging settings
//! - `shell`: interactive shell settings

pub mod logging;
pub mod root;
pub mod shell;

pub use logging::LoggingConfig;
pub use root::{CliOverrides, Config, ConfigError};
pub use shell::ShellConfig;
