//! Upstash Redis provisioning
//!
//! Authenticates (or trusts pre-set credentials), creates a database through
//! the Upstash tool's JSON output and appends its connection details to an
//! env file.

use crate::env_file::EnvFile;
use crate::error::SetupError;
use crate::prompt::Prompter;
use crate::step::run_step;
use crate::tools::Tools;
use common::command::run_json;
use common::{CommandRunner, ConfigExt, ShellCommand};
use serde::{Deserialize, Deserializer};
use std::path::PathBuf;
use tracing::{info, warn};

pub const REDIS_URL_KEY: &str = "UPSTASH_REDIS_URL";
pub const REDIS_REST_TOKEN_KEY: &str = "UPSTASH_REDIS_REST_TOKEN";

const AUTH_CHOICES: &[&str] = &[
    "Login with email/API key",
    "Use environment variables (UPSTASH_EMAIL, UPSTASH_API_KEY)",
];
const CREDENTIAL_VARS: [&str; 2] = ["UPSTASH_EMAIL", "UPSTASH_API_KEY"];

/// How the Upstash tool gets its credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMethod {
    /// `upstash auth login`, answered by the user in the terminal.
    Login,
    /// `UPSTASH_EMAIL` and `UPSTASH_API_KEY` are already exported.
    Environment,
}

impl AuthMethod {
    fn from_choice(choice: usize) -> Option<Self> {
        match choice {
            0 => Some(Self::Login),
            1 => Some(Self::Environment),
            _ => None,
        }
    }
}

/// Name and region for a new database. Neither is validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedisCreateRequest {
    pub name: String,
    pub region: String,
}

impl RedisCreateRequest {
    pub fn command(&self, upstash: &ShellCommand) -> ShellCommand {
        upstash.clone().args([
            "redis".to_string(),
            "create".to_string(),
            format!("--name={}", self.name),
            format!("--region={}", self.region),
            "--json".to_string(),
        ])
    }
}

/// The part of `upstash redis create --json` output we keep.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RedisDatabase {
    pub password: String,
    pub endpoint: String,
    /// Accepts `6379` or `"6379"`.
    #[serde(deserialize_with = "port_number")]
    pub port: u16,
    pub rest_token: String,
}

fn port_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u16, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Port {
        Number(u16),
        Text(String),
    }

    match Port::deserialize(deserializer)? {
        Port::Number(port) => Ok(port),
        Port::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid port {:?}", text))),
    }
}

impl RedisDatabase {
    pub fn redis_url(&self) -> String {
        format!("redis://{}@{}:{}", self.password, self.endpoint, self.port)
    }

    pub fn env_entries(&self) -> Vec<(&'static str, String)> {
        vec![
            (REDIS_URL_KEY, self.redis_url()),
            (REDIS_REST_TOKEN_KEY, self.rest_token.clone()),
        ]
    }
}

/// Credential variables the Upstash tool expects but the environment lacks.
pub fn missing_credential_vars() -> Vec<&'static str> {
    missing_vars(&CREDENTIAL_VARS)
}

fn missing_vars(vars: &[&'static str]) -> Vec<&'static str> {
    vars.iter()
        .copied()
        .filter(|var| !String::env_present(var))
        .collect()
}

/// Provision an Upstash Redis database and save its credentials.
///
/// Cancelling the authentication menu returns `Ok` without running anything.
pub async fn setup_upstash<P, R>(
    prompter: &mut P,
    runner: &R,
    tools: &Tools,
) -> Result<(), SetupError>
where
    P: Prompter + ?Sized,
    R: CommandRunner + ?Sized,
{
    prompter.say("\n--- Setting up Upstash Redis ---").await?;

    let choice = prompter
        .select(
            "How do you want to authenticate with Upstash?",
            AUTH_CHOICES,
        )
        .await?;

    match choice.and_then(AuthMethod::from_choice) {
        Some(AuthMethod::Login) => {
            prompter
                .say("Please log in to Upstash. You will be prompted for your email and API key.")
                .await?;
            let login = tools.upstash.clone().args(["auth", "login"]);
            run_step(prompter, runner, &login, "Logging in to Upstash").await?;
        }
        Some(AuthMethod::Environment) => {
            prompter
                .say("Assuming UPSTASH_EMAIL and UPSTASH_API_KEY are set in your environment.")
                .await?;
            for var in missing_credential_vars() {
                warn!(var, "Upstash credential variable is not set");
            }
        }
        None => {
            prompter
                .say("Authentication cancelled. Skipping Upstash Redis setup.")
                .await?;
            return Ok(());
        }
    }

    let request = RedisCreateRequest {
        name: prompter
            .input("Enter a name for your Redis database: ")
            .await?,
        region: prompter
            .input("Enter the region for your Redis database (e.g., eu-west-1, us-central1): ")
            .await?,
    };

    prompter.say("Creating Upstash Redis database...").await?;
    let database: RedisDatabase = run_json(runner, &request.command(&tools.upstash)).await?;
    info!(name = %request.name, endpoint = %database.endpoint, "Redis database created");

    let answer = prompter
        .input("Enter the path to your .env file to save Redis credentials (default: ./.env): ")
        .await?;
    let path = if answer.is_empty() {
        tools.default_env_file.clone()
    } else {
        PathBuf::from(answer)
    };
    EnvFile::new(path).append(&database.env_entries()).await?;

    prompter
        .say("Upstash Redis setup complete. Credentials saved to your .env file.")
        .await?;
    prompter
        .say(&format!("Redis Endpoint: {}", database.endpoint))
        .await?;
    prompter.say(&format!("Redis Port: {}", database.port)).await?;
    prompter
        .say(&format!("Redis Password: {}", database.password))
        .await?;
    prompter
        .say(&format!("Redis REST Token: {}", database.rest_token))
        .await?;
    Ok(())
}
