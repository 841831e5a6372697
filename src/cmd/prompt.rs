//! Line based prompting with re-prompt on recoverable validation errors

use crate::tax::TaxError;
use std::io::{BufRead, Write};

/// Input problems that are reported to the user before asking again
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("Name must not be empty.")]
    EmptyName,
    #[error(transparent)]
    Tax(#[from] TaxError),
}

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Prompter { input, output }
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    /// Ask until `parse` accepts the answer. Only I/O failures and end of
    /// input end the loop with an error.
    pub fn ask<T, F>(&mut self, prompt: &str, parse: F) -> anyhow::Result<T>
    where
        F: Fn(&str) -> Result<T, InputError>,
    {
        loop {
            let line = self.read_line(prompt)?;
            match parse(&line) {
                Ok(value) => return Ok(value),
                Err(err) => {
                    log::debug!("Rejected input {:?}: {:?}", line, err);
                    writeln!(self.output, "{}", err)?;
                }
            }
        }
    }

    fn read_line(&mut self, prompt: &str) -> anyhow::Result<String> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            anyhow::bail!("Unexpected end of input at prompt '{}'", prompt.trim_end());
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

/// Trimmed, non-empty employee name
pub fn parse_name(line: &str) -> Result<String, InputError> {
    let name = line.trim();
    if name.is_empty() {
        return Err(InputError::EmptyName);
    }
    Ok(name.to_string())
}
