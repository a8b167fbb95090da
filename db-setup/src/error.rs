//! Errors that end a setup run

use crate::env_file::EnvFileError;
use crate::prompt::PromptError;
use common::CommandError;
use thiserror::Error;

/// Any failure that aborts provisioning.
///
/// Flows return this instead of exiting; the binary is the only place that
/// turns it into a process exit status.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error(transparent)]
    Command(#[from] CommandError),

    #[error(transparent)]
    EnvFile(#[from] EnvFileError),

    #[error(transparent)]
    Prompt(#[from] PromptError),
}
