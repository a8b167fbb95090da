//! Top-level menu sequencing the provisioning flows

use crate::error::SetupError;
use crate::neon::setup_neon;
use crate::prompt::Prompter;
use crate::tools::Tools;
use crate::upstash::setup_upstash;
use common::CommandRunner;

const MENU_ITEMS: &[&str] = &["Neon Postgres", "Upstash Redis", "Both"];

/// What the user chose to provision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Postgres,
    Redis,
    Both,
}

impl Selection {
    fn from_choice(choice: usize) -> Option<Self> {
        match choice {
            0 => Some(Self::Postgres),
            1 => Some(Self::Redis),
            2 => Some(Self::Both),
            _ => None,
        }
    }
}

/// Run one interactive setup session.
///
/// With [`Selection::Both`] Postgres runs first; if it fails Redis never starts.
pub async fn run<P, R>(prompter: &mut P, runner: &R, tools: &Tools) -> Result<(), SetupError>
where
    P: Prompter + ?Sized,
    R: CommandRunner + ?Sized,
{
    prompter.say("Welcome to the Database Setup CLI!").await?;

    let choice = prompter
        .select("Which database do you want to set up?", MENU_ITEMS)
        .await?;

    match choice.and_then(Selection::from_choice) {
        Some(Selection::Postgres) => setup_neon(prompter, runner, tools).await?,
        Some(Selection::Redis) => setup_upstash(prompter, runner, tools).await?,
        Some(Selection::Both) => {
            setup_neon(prompter, runner, tools).await?;
            setup_upstash(prompter, runner, tools).await?;
        }
        None => {
            prompter
                .say("No database setup selected. Exiting.")
                .await?
        }
    }

    prompter.say("\nSetup process finished.").await?;
    Ok(())
}
