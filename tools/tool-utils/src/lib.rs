//! Helpers shared by the interactive tools: reading answers from the terminal
//! and running external commands

use eyre::{eyre, Result};
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::process::{Command, Output, Stdio};

/// Execute a command, capturing its output, and fail if it exits unsuccessfully
///
/// The error carries the command's stderr so that compiler diagnostics reach the user
pub fn run_command_captured(mut cmd: Command) -> Result<Output> {
    cmd.stdout(Stdio::piped()).stderr(Stdio::piped());
    let output = cmd
        .output()
        .map_err(|e| eyre!("Failed to run {:?}: {}", cmd.get_program(), e))?;

    if output.status.success() {
        Ok(output)
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr);
        Err(eyre!(
            "Command failed with status {}: {}",
            output.status,
            stderr.trim()
        ))
    }
}

// ----------
// | Prompt |
// ----------

/// A source of answers to interactive prompts
pub trait LineReader {
    /// Show `prompt` and read one line of input, without its line terminator
    ///
    /// Returns `None` once the input is exhausted
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;
}

/// Reads answers from the terminal the process is attached to
#[derive(Debug, Default, Clone, Copy)]
pub struct StdinReader;

impl LineReader for StdinReader {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        print!("{}", prompt);
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().lock().read_line(&mut input)? == 0 {
            return Ok(None);
        }

        Ok(Some(input.trim_end_matches(['\r', '\n']).to_string()))
    }
}

/// Replays a fixed list of answers and records every prompt it was shown
#[derive(Debug, Default, Clone)]
pub struct ScriptedReader {
    /// The answers not yet consumed
    answers: VecDeque<String>,
    /// The prompts shown so far, in order
    prompts: Vec<String>,
}

impl ScriptedReader {
    /// Create a reader that answers each prompt with the next item of `answers`
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            prompts: Vec::new(),
        }
    }

    /// The prompts shown so far
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    /// The number of answers that were never read
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl LineReader for ScriptedReader {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.prompts.push(prompt.to_string());
        Ok(self.answers.pop_front())
    }
}

/// Prompt for a single answer, trimming surrounding whitespace
///
/// Running out of input while an answer is required is an error
pub fn prompt_for_input(reader: &mut impl LineReader, prompt: &str) -> Result<String> {
    reader
        .read_line(prompt)?
        .map(|input| input.trim().to_string())
        .ok_or_else(|| eyre!("Input closed while waiting for: {}", prompt.trim()))
}
