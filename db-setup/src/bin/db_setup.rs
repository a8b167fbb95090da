//! Interactive database setup
//!
//! Asks which managed databases to provision, runs the provisioning tools and
//! saves credentials to an env file. This is the only place that decides the
//! process exit status: any error from a flow ends the run with status 1.

use anyhow::{Context, Result};
use common::{init_logging, SystemRunner};
use db_setup::{menu, LinePrompter, SetupError, Tools};
use std::process::ExitCode;
use tracing::{debug, error};

#[tokio::main]
async fn main() -> ExitCode {
    let _guard = init_logging("db-setup");

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let tools = Tools::from_env();
    debug!(neon = %tools.neon, upstash = %tools.upstash, "Resolved provisioning tools");

    let mut prompter = LinePrompter::stdio();
    menu::run(&mut prompter, &SystemRunner, &tools)
        .await
        .context("Database setup aborted")
}

fn report(err: &anyhow::Error) {
    if let Some(SetupError::Command(cmd_err)) = err.downcast_ref::<SetupError>() {
        eprintln!("Error executing command: {}", cmd_err.command());
    }
    eprintln!("Error: {:#}", err);
    error!(error = %format!("{:#}", err), "Setup aborted");
}
