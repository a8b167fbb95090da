//! External tool configuration
//!
//! Which provisioning commands to invoke and where credentials go by default.

use common::{ConfigExt, ShellCommand};
use std::path::PathBuf;

pub const NEON_CLI_VAR: &str = "DB_SETUP_NEON_CLI";
pub const UPSTASH_CLI_VAR: &str = "DB_SETUP_UPSTASH_CLI";
pub const ENV_FILE_VAR: &str = "DB_SETUP_ENV_FILE";

pub const DEFAULT_NEON_CLI: &str = "npx neondb";
pub const DEFAULT_UPSTASH_CLI: &str = "upstash";
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Resolved provisioning tools
#[derive(Debug, Clone)]
pub struct Tools {
    pub neon: ShellCommand,
    pub upstash: ShellCommand,
    /// Env file used when the Redis flow's path prompt is left empty.
    pub default_env_file: PathBuf,
}

impl Tools {
    /// Load tool commands from environment variables
    pub fn from_env() -> Self {
        Self::resolve(
            &String::env_or(NEON_CLI_VAR, DEFAULT_NEON_CLI),
            &String::env_or(UPSTASH_CLI_VAR, DEFAULT_UPSTASH_CLI),
            &String::env_or(ENV_FILE_VAR, DEFAULT_ENV_FILE),
        )
    }

    fn resolve(neon: &str, upstash: &str, env_file: &str) -> Self {
        Self {
            neon: ShellCommand::parse(neon).unwrap_or_else(default_neon),
            upstash: ShellCommand::parse(upstash).unwrap_or_else(default_upstash),
            default_env_file: PathBuf::from(env_file),
        }
    }
}

impl Default for Tools {
    fn default() -> Self {
        Self::resolve(DEFAULT_NEON_CLI, DEFAULT_UPSTASH_CLI, DEFAULT_ENV_FILE)
    }
}

fn default_neon() -> ShellCommand {
    ShellCommand::new("npx").arg("neondb")
}

fn default_upstash() -> ShellCommand {
    ShellCommand::new("upstash")
}
