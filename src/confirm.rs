//! Confirmation policies for actions proposed by a comparison.

use anyhow::{Context, Result};
use colored::Colorize;
use std::io::{self, BufRead, Write};

/// Decides whether a proposed action goes ahead.
pub trait Confirmer {
    fn confirm(&mut self, question: &str) -> Result<bool>;
}

impl<C: Confirmer + ?Sized> Confirmer for Box<C> {
    fn confirm(&mut self, question: &str) -> Result<bool> {
        (**self).confirm(question)
    }
}

/// Accepts everything (`--yes`).
pub struct AssumeYes;

impl Confirmer for AssumeYes {
    fn confirm(&mut self, _question: &str) -> Result<bool> {
        Ok(true)
    }
}

/// Declines everything (non-interactive CI runs).
pub struct AssumeNo;

impl Confirmer for AssumeNo {
    fn confirm(&mut self, _question: &str) -> Result<bool> {
        Ok(false)
    }
}

/// Asks on `output` and reads one line from `input`. Only `y`/`Y` confirms.
pub struct TerminalConfirmer<R, W> {
    input: R,
    output: W,
}

impl TerminalConfirmer<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalConfirmer<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> Confirmer for TerminalConfirmer<R, W> {
    fn confirm(&mut self, question: &str) -> Result<bool> {
        write!(self.output, " {} {} ", question, "(y/N)".dimmed())?;
        self.output.flush()?;

        let mut answer = String::new();
        self.input
            .read_line(&mut answer)
            .context("Failed to read answer from terminal")?;

        Ok(is_yes(&answer))
    }
}

fn is_yes(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("y")
}
