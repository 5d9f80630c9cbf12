// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Interactive confirmation prompts.
//!
//! Dotstrap asks the user before it destroys anything. The question is
//! written to an output stream once, and answers are read line by line from
//! an input stream until one of them is acceptable. Both streams are injected
//! through [`Prompter`], so a prompt can be driven by a terminal or by a
//! scripted buffer alike.
//!
//! Deciding what an accepted answer _means_ is kept apart from the read loop.
//! The loop only knows how to validate and retry, while interpretation is a
//! plain function of the accepted line.

use std::io::{self, BufRead, Write};
use tracing::debug;

/// Ask the user for a yes or no decision.
///
/// Layer of indirection between the installer and whatever is on the other
/// end of the question.
pub trait Confirm {
    /// Ask question, and block until a yes or no answer is given.
    ///
    /// # Errors
    ///
    /// - Return [`PromptError::EndOfInput`] if no valid answer was given
    ///   before input ran dry.
    /// - Return [`PromptError::Read`] or [`PromptError::Write`] if stream I/O
    ///   fails.
    fn confirm(&mut self, message: &str) -> Result<bool>;
}

/// Line based prompter over arbitrary input and output streams.
#[derive(Debug)]
pub struct Prompter<R, W>
where
    R: BufRead,
    W: Write,
{
    input: R,
    output: W,
}

impl<R, W> Prompter<R, W>
where
    R: BufRead,
    W: Write,
{
    /// Construct new prompter.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Prompt for a line of input until it passes validation.
    ///
    /// Writes `message` to the output stream exactly once. No newline is
    /// appended to it. Lines are then read from the input stream until
    /// `validate` accepts one, which is handed to `interpret` with its line
    /// terminator stripped. Rejected lines are silently discarded. Bytes that
    /// are not valid UTF-8 are replaced before validation, so garbage input is
    /// simply rejected like any other line.
    ///
    /// # Errors
    ///
    /// - Return [`PromptError::Write`] if message cannot be written.
    /// - Return [`PromptError::Read`] if input stream cannot be read.
    /// - Return [`PromptError::EndOfInput`] if input stream closes before an
    ///   acceptable line is read.
    pub fn prompt<T>(
        &mut self,
        message: &str,
        validate: impl Fn(&str) -> bool,
        interpret: impl FnOnce(&str) -> T,
    ) -> Result<T> {
        self.output
            .write_all(message.as_bytes())
            .and_then(|_| self.output.flush())
            .map_err(PromptError::Write)?;

        let mut line = Vec::new();
        loop {
            line.clear();
            let count = self
                .input
                .read_until(b'\n', &mut line)
                .map_err(PromptError::Read)?;
            if count == 0 {
                return Err(PromptError::EndOfInput);
            }

            let decoded = String::from_utf8_lossy(&line);
            let answer = decoded.trim_end_matches(['\r', '\n']);
            if validate(answer) {
                return Ok(interpret(answer));
            }

            debug!("reject answer {answer:?}");
        }
    }

    /// Take back ownership of underlying streams.
    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }
}

impl<R, W> Confirm for Prompter<R, W>
where
    R: BufRead,
    W: Write,
{
    fn confirm(&mut self, message: &str) -> Result<bool> {
        self.prompt(message, is_yes_or_no, answered_yes)
    }
}

/// Check that answer starts with "y" or "n", ignoring case.
pub fn is_yes_or_no(answer: &str) -> bool {
    matches!(answer.chars().next(), Some('y' | 'Y' | 'n' | 'N'))
}

/// Interpret accepted answer as a decision.
///
/// Anything starting with "y", ignoring case, means yes. Everything else
/// means no.
pub fn answered_yes(answer: &str) -> bool {
    matches!(answer.chars().next(), Some('y' | 'Y'))
}

/// Prompt error types.
#[derive(Debug, thiserror::Error)]
pub enum PromptError {
    /// Input stream closed before an acceptable answer was given.
    #[error("input ended before a valid answer was given")]
    EndOfInput,

    /// Input stream cannot be read from.
    #[error("failed to read answer from input")]
    Read(#[source] io::Error),

    /// Output stream cannot be written to.
    #[error("failed to write prompt to output")]
    Write(#[source] io::Error),
}

/// Friendly result alias :3
pub type Result<T, E = PromptError> = std::result::Result<T, E>;
