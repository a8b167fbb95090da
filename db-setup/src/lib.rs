//! Interactive provisioning of managed databases
//!
//! Runs the Neon Postgres and Upstash Redis provisioning tools on the user's
//! behalf and records the resulting credentials in a dotenv file:
//! - Prompting (yes/no, menus, free text)
//! - Env file appends
//! - The Neon and Upstash flows and the menu that sequences them

pub mod env_file;
pub mod error;
pub mod menu;
pub mod neon;
pub mod prompt;
pub mod step;
pub mod tools;
pub mod upstash;

#[cfg(test)]
mod testing;

pub use env_file::{EnvFile, EnvFileError};
pub use error::SetupError;
pub use prompt::{LinePrompter, PromptError, Prompter};
pub use tools::Tools;
