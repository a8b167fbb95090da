//! Supervised execution of a single provisioning step

use crate::error::SetupError;
use crate::prompt::Prompter;
use common::{CommandRunner, ShellCommand};

/// Announce `description`, run `command` attached to the terminal, confirm success.
///
/// A failure is returned untouched so nothing after it in the flow runs.
pub async fn run_step<P, R>(
    prompter: &mut P,
    runner: &R,
    command: &ShellCommand,
    description: &str,
) -> Result<(), SetupError>
where
    P: Prompter + ?Sized,
    R: CommandRunner + ?Sized,
{
    prompter.say(&format!("\n{}...", description)).await?;
    runner.run_interactive(command).await?;
    prompter.say("Command executed successfully.").await?;
    Ok(())
}
