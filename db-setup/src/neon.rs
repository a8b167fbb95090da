//! Neon Postgres provisioning
//!
//! The Neon tool writes the connection string into the env file itself, so this
//! flow only decides which flags to pass and runs it.

use crate::error::SetupError;
use crate::prompt::{PromptError, Prompter};
use crate::step::run_step;
use crate::tools::Tools;
use common::{CommandRunner, ShellCommand};

/// Options gathered from the user before the Neon tool runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NeonOptions {
    /// Let the tool pick every default (`--yes`); the other fields are ignored.
    pub use_defaults: bool,
    pub seed_file: Option<String>,
    pub env_path: Option<String>,
    pub env_key: Option<String>,
}

impl NeonOptions {
    /// Ask the Neon questions in order.
    pub async fn gather<P: Prompter + ?Sized>(prompter: &mut P) -> Result<Self, PromptError> {
        let use_defaults = prompter
            .confirm("Do you want to use default settings for Neon (skip prompts)?")
            .await?;
        if use_defaults {
            return Ok(Self {
                use_defaults,
                ..Self::default()
            });
        }

        let seed_file = prompter
            .input("Enter path to SQL seed file (optional, leave blank to skip): ")
            .await?;
        let env_path = prompter
            .input("Enter path to .env file (default: ./.env): ")
            .await?;
        let env_key = prompter
            .input("Enter environment variable key for connection string (default: DATABASE_URL): ")
            .await?;

        Ok(Self {
            use_defaults,
            seed_file: non_empty(seed_file),
            env_path: non_empty(env_path),
            env_key: non_empty(env_key),
        })
    }

    /// Neon invocation: `--yes`, or `--seed`, `--env`, `--key` for each answered option.
    pub fn command(&self, neon: &ShellCommand) -> ShellCommand {
        let mut cmd = neon.clone();
        if self.use_defaults {
            return cmd.arg("--yes");
        }
        for (flag, value) in [
            ("--seed", &self.seed_file),
            ("--env", &self.env_path),
            ("--key", &self.env_key),
        ] {
            if let Some(value) = value {
                cmd = cmd.arg(flag).arg(value.as_str());
            }
        }
        cmd
    }
}

fn non_empty(answer: String) -> Option<String> {
    if answer.is_empty() {
        None
    } else {
        Some(answer)
    }
}

/// Provision a Neon Postgres database.
pub async fn setup_neon<P, R>(prompter: &mut P, runner: &R, tools: &Tools) -> Result<(), SetupError>
where
    P: Prompter + ?Sized,
    R: CommandRunner + ?Sized,
{
    prompter.say("\n--- Setting up Neon Postgres ---").await?;

    let options = NeonOptions::gather(prompter).await?;
    let command = options.command(&tools.neon);

    run_step(
        prompter,
        runner,
        &command,
        "Running Neon CLI to provision database",
    )
    .await?;

    prompter
        .say("Neon setup complete. Check your .env file for credentials.")
        .await?;
    Ok(())
}
