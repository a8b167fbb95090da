//! Command execution utilities
//!
//! Provides consistent command execution with classified failures and logging.
//! Every external invocation goes through [`CommandRunner`], so a failed spawn,
//! a non-zero exit and unparseable output all surface as a [`CommandError`].

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::fmt;
use std::process::Stdio;
use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, instrument};

/// An external command line, kept as a program plus its arguments.
///
/// Arguments are passed to the child verbatim; nothing is interpreted by a shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl ShellCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Split a whitespace separated command line such as `npx neondb`.
    ///
    /// Returns `None` for a blank line.
    pub fn parse(line: &str) -> Option<Self> {
        let mut words = line.split_whitespace();
        let program = words.next()?;
        Some(Self::new(program).args(words))
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

impl fmt::Display for ShellCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Why an external command did not produce a usable result.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("failed to execute {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{command} failed ({})", describe_exit(.code))]
    Failed { command: String, code: Option<i32> },

    #[error("{command} produced malformed output: {source}")]
    MalformedOutput {
        command: String,
        #[source]
        source: serde_json::Error,
    },
}

impl CommandError {
    /// The command line that failed, as shown to the user.
    pub fn command(&self) -> &str {
        match self {
            Self::Spawn { command, .. }
            | Self::Failed { command, .. }
            | Self::MalformedOutput { command, .. } => command,
        }
    }
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit {}", code),
        None => "terminated by signal".to_string(),
    }
}

/// Executes external commands on behalf of the provisioning flows.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run with stdin, stdout and stderr connected to the terminal.
    ///
    /// Interactive prompts from the child are visible and answerable.
    async fn run_interactive(&self, command: &ShellCommand) -> Result<(), CommandError>;

    /// Run with stdout captured and returned; stdin and stderr stay on the terminal.
    async fn run_captured(&self, command: &ShellCommand) -> Result<String, CommandError>;
}

/// Run a command and parse its stdout as a single JSON document.
///
/// # Example
/// ```ignore
/// let db: RedisDatabase = run_json(&runner, &create_command).await?;
/// ```
pub async fn run_json<T, R>(runner: &R, command: &ShellCommand) -> Result<T, CommandError>
where
    T: DeserializeOwned,
    R: CommandRunner + ?Sized,
{
    let stdout = runner.run_captured(command).await?;
    serde_json::from_str(&stdout).map_err(|source| CommandError::MalformedOutput {
        command: command.to_string(),
        source,
    })
}

/// [`CommandRunner`] backed by real child processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl SystemRunner {
    fn command(command: &ShellCommand) -> Command {
        let mut cmd = Command::new(&command.program);
        cmd.args(&command.args).stdin(Stdio::inherit()).stderr(Stdio::inherit());
        cmd
    }
}

#[async_trait]
impl CommandRunner for SystemRunner {
    #[instrument(skip_all, fields(cmd = %command))]
    async fn run_interactive(&self, command: &ShellCommand) -> Result<(), CommandError> {
        debug!("Running interactive command");

        let status = Self::command(command)
            .stdout(Stdio::inherit())
            .status()
            .await
            .map_err(|source| CommandError::Spawn {
                command: command.to_string(),
                source,
            })?;

        debug!(code = ?status.code(), "Command exited");
        if status.success() {
            Ok(())
        } else {
            Err(CommandError::Failed {
                command: command.to_string(),
                code: status.code(),
            })
        }
    }

    #[instrument(skip_all, fields(cmd = %command))]
    async fn run_captured(&self, command: &ShellCommand) -> Result<String, CommandError> {
        debug!("Running captured command");

        let output = Self::command(command)
            .stdout(Stdio::piped())
            .output()
            .await
            .map_err(|source| CommandError::Spawn {
                command: command.to_string(),
                source,
            })?;

        debug!(code = ?output.status.code(), bytes = output.stdout.len(), "Command exited");
        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).into_owned())
        } else {
            Err(CommandError::Failed {
                command: command.to_string(),
                code: output.status.code(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[test]
    fn test_display_joins_program_and_args() {
        let cmd = ShellCommand::new("upstash")
            .args(["redis", "create"])
            .arg("--json");
        assert_eq!(cmd.to_string(), "upstash redis create --json");
    }

    #[test]
    fn test_parse_splits_on_whitespace() {
        let cmd = ShellCommand::parse("  npx   neondb ").unwrap();
        assert_eq!(cmd.program, "npx");
        assert_eq!(cmd.args, vec!["neondb"]);
        assert!(ShellCommand::parse("   ").is_none());
    }

    #[test]
    fn test_failed_message_mentions_exit_code() {
        let err = CommandError::Failed {
            command: "npx neondb --yes".to_string(),
            code: Some(2),
        };
        assert_eq!(err.to_string(), "npx neondb --yes failed (exit 2)");
        assert_eq!(err.command(), "npx neondb --yes");

        let killed = CommandError::Failed {
            command: "upstash auth login".to_string(),
            code: None,
        };
        assert!(killed.to_string().contains("terminated by signal"));
    }

    #[tokio::test]
    async fn test_captured_returns_stdout() {
        let out = SystemRunner
            .run_captured(&ShellCommand::new("echo").arg("hello"))
            .await
            .unwrap();
        assert_eq!(out, "hello\n");
    }

    #[tokio::test]
    async fn test_nonzero_exit_is_failed() {
        let err = SystemRunner
            .run_interactive(&ShellCommand::new("false"))
            .await
            .unwrap_err();
        assert!(matches!(err, CommandError::Failed { code: Some(1), .. }));
    }

    #[tokio::test]
    async fn test_missing_program_is_spawn_error() {
        let err = SystemRunner
            .run_captured(&ShellCommand::new("db-setup-no-such-program"))
            .await
            .unwrap_err();
        assert!(matches!(err, CommandError::Spawn { .. }));
    }

    #[derive(Debug, Deserialize)]
    struct Answer {
        value: u32,
    }

    #[tokio::test]
    async fn test_run_json_parses_stdout() {
        let cmd = ShellCommand::new("echo").arg(r#"{"value": 42}"#);
        let answer: Answer = run_json(&SystemRunner, &cmd).await.unwrap();
        assert_eq!(answer.value, 42);
    }

    #[tokio::test]
    async fn test_run_json_rejects_malformed_output() {
        let cmd = ShellCommand::new("echo").arg("not json");
        let err = run_json::<Answer, _>(&SystemRunner, &cmd)
            .await
            .unwrap_err();
        assert!(matches!(err, CommandError::MalformedOutput { .. }));
        assert_eq!(err.command(), "echo not json");
    }
}
