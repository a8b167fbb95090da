//! Test doubles shared by the flow tests

use crate::prompt::LinePrompter;
use async_trait::async_trait;
use common::{CommandError, CommandRunner, ShellCommand};
use std::sync::Mutex;

/// Records every command and answers from a script instead of spawning.
#[derive(Default)]
pub struct FakeRunner {
    calls: Mutex<Vec<String>>,
    failing: Vec<String>,
    output: String,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the command with this exact rendering exit with status 1.
    pub fn fail_on(mut self, command: &str) -> Self {
        self.failing.push(command.to_string());
        self
    }

    /// Stdout returned by every captured run.
    pub fn with_output(mut self, output: &str) -> Self {
        self.output = output.to_string();
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, command: &ShellCommand) -> Result<(), CommandError> {
        let rendered = command.to_string();
        self.calls.lock().unwrap().push(rendered.clone());
        if self.failing.contains(&rendered) {
            return Err(CommandError::Failed {
                command: rendered,
                code: Some(1),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl CommandRunner for FakeRunner {
    async fn run_interactive(&self, command: &ShellCommand) -> Result<(), CommandError> {
        self.record(command)
    }

    async fn run_captured(&self, command: &ShellCommand) -> Result<String, CommandError> {
        self.record(command)?;
        Ok(self.output.clone())
    }
}

pub fn prompter(input: &str) -> LinePrompter<&[u8], Vec<u8>> {
    LinePrompter::new(input.as_bytes(), Vec::new())
}

pub fn transcript(prompter: &LinePrompter<&[u8], Vec<u8>>) -> String {
    String::from_utf8_lossy(prompter.writer()).into_owned()
}
