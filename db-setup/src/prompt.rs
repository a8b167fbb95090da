//! Interactive terminal prompts
//!
//! The flows only talk to the user through [`Prompter`]: yes/no questions,
//! numbered single-choice menus, free-text questions and plain messages.
//! Prompts are answered one line at a time, strictly in the order asked.

use async_trait::async_trait;
use thiserror::Error;
use tokio::io::{
    self, AsyncBufRead, AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader,
};

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("input closed before an answer was given")]
    Closed,

    #[error("terminal IO failed: {0}")]
    Io(#[from] std::io::Error),
}

#[async_trait]
pub trait Prompter: Send {
    /// Print a line of output.
    async fn say(&mut self, message: &str) -> Result<(), PromptError>;

    /// Ask a yes/no question, repeating it until the answer is one of the two.
    async fn confirm(&mut self, question: &str) -> Result<bool, PromptError>;

    /// Offer a numbered list. `None` means the user cancelled or gave no valid choice.
    async fn select(&mut self, question: &str, items: &[&str])
        -> Result<Option<usize>, PromptError>;

    /// Ask for free text. The answer is trimmed and may be empty.
    async fn input(&mut self, question: &str) -> Result<String, PromptError>;
}

/// Line-oriented [`Prompter`] over any async reader/writer pair.
pub struct LinePrompter<R, W> {
    reader: R,
    writer: W,
}

impl LinePrompter<BufReader<io::Stdin>, io::Stdout> {
    /// Prompter bound to the process's stdin and stdout.
    pub fn stdio() -> Self {
        Self::new(line_reader(io::stdin()), io::stdout())
    }
}

/// Buffer a shared input one byte at a time.
///
/// Nothing past the current answer is consumed, so child processes reading the
/// same stdin get the rest.
pub fn line_reader<T: AsyncRead>(inner: T) -> BufReader<T> {
    BufReader::with_capacity(1, inner)
}

impl<R, W> LinePrompter<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Everything written so far.
    pub fn writer(&self) -> &W {
        &self.writer
    }

    async fn ask(&mut self, text: &str) -> Result<Option<String>, PromptError> {
        self.writer.write_all(text.as_bytes()).await?;
        self.writer.flush().await?;

        let mut line = String::new();
        if self.reader.read_line(&mut line).await? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

#[async_trait]
impl<R, W> Prompter for LinePrompter<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    async fn say(&mut self, message: &str) -> Result<(), PromptError> {
        self.writer.write_all(message.as_bytes()).await?;
        self.writer.write_all(b"\n").await?;
        self.writer.flush().await?;
        Ok(())
    }

    async fn confirm(&mut self, question: &str) -> Result<bool, PromptError> {
        let text = format!("{} [y/n]: ", question);
        loop {
            let answer = self.ask(&text).await?.ok_or(PromptError::Closed)?;
            match answer.to_lowercase().as_str() {
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => continue,
            }
        }
    }

    async fn select(
        &mut self,
        question: &str,
        items: &[&str],
    ) -> Result<Option<usize>, PromptError> {
        let mut text = String::from("\n");
        for (i, item) in items.iter().enumerate() {
            text.push_str(&format!("[{}] {}\n", i + 1, item));
        }
        text.push_str(&format!(
            "[0] CANCEL\n\n{} [1...{} / 0]: ",
            question,
            items.len()
        ));

        let choice = self
            .ask(&text)
            .await?
            .and_then(|answer| answer.parse::<usize>().ok())
            .filter(|n| (1..=items.len()).contains(n))
            .map(|n| n - 1);
        Ok(choice)
    }

    async fn input(&mut self, question: &str) -> Result<String, PromptError> {
        self.ask(question).await?.ok_or(PromptError::Closed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prompter(input: &str) -> LinePrompter<&[u8], Vec<u8>> {
        LinePrompter::new(input.as_bytes(), Vec::new())
    }

    #[tokio::test]
    async fn test_confirm_repeats_until_valid() {
        let mut p = prompter("maybe\nYES\n");
        assert!(p.confirm("Continue?").await.unwrap());

        let out = String::from_utf8_lossy(p.writer()).into_owned();
        assert_eq!(out.matches("Continue? [y/n]: ").count(), 2);
    }

    #[tokio::test]
    async fn test_confirm_on_closed_input() {
        let mut p = prompter("");
        assert!(matches!(
            p.confirm("Continue?").await,
            Err(PromptError::Closed)
        ));
    }

    #[tokio::test]
    async fn test_select_lists_items_and_cancel() {
        let mut p = prompter("2\n");
        let choice = p.select("Pick one", &["alpha", "beta"]).await.unwrap();
        assert_eq!(choice, Some(1));

        let out = String::from_utf8_lossy(p.writer()).into_owned();
        assert!(out.contains("[1] alpha\n[2] beta\n[0] CANCEL\n"));
        assert!(out.ends_with("Pick one [1...2 / 0]: "));
    }

    #[tokio::test]
    async fn test_select_treats_unrecognized_as_none() {
        for answer in ["0\n", "3\n", "beta\n", "\n", ""] {
            let mut p = prompter(answer);
            let choice = p.select("Pick one", &["alpha", "beta"]).await.unwrap();
            assert_eq!(choice, None, "answer {:?}", answer);
        }
    }

    #[tokio::test]
    async fn test_line_reader_leaves_later_input_unread() {
        let mut rest: &[u8] = b"1\nfor the child\n";
        {
            let mut p = LinePrompter::new(line_reader(&mut rest), Vec::new());
            assert_eq!(p.input("Choice: ").await.unwrap(), "1");
        }
        assert_eq!(rest, b"for the child\n");
    }

    #[tokio::test]
    async fn test_input_is_trimmed_and_may_be_empty() {
        let mut p = prompter("  seed.sql \n\n");
        assert_eq!(p.input("Seed: ").await.unwrap(), "seed.sql");
        assert_eq!(p.input("Env: ").await.unwrap(), "");
        assert!(matches!(p.input("Key: ").await, Err(PromptError::Closed)));
    }
}
