//! Logging utilities.
//!
//! Centralizes logger initialization. Code everywhere else logs through the
//! `log` facade only.

mod init;

pub use init::{init_logging, LoggingConfig};
