//! Shared utilities for db-setup components
//!
//! This crate provides common functionality used by the provisioning flows:
//! - Structured logging initialization
//! - Environment variable parsing helpers
//! - External command execution with classified failures

pub mod command;
pub mod config;
pub mod logging;

pub use command::{CommandError, CommandRunner, ShellCommand, SystemRunner};
pub use config::ConfigExt;
pub use logging::init_logging;
