/// Console input with validation
///
/// Reads one line per answer and re-prompts until it parses. Every read
/// returns `None` at end of input so the caller can wind down cleanly.

use crate::cli::menu::MenuChoice;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Where prompts and results are written
    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Read one raw line without its terminator
    fn read_line(&mut self) -> io::Result<Option<String>> {
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    /// Ask for free text; the answer is returned as typed
    pub fn text(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.read_line()
    }

    /// Ask until the answer parses as `T`
    fn parsed<T: FromStr>(&mut self, prompt: &str, complaint: &str) -> io::Result<Option<T>> {
        loop {
            write!(self.output, "{}", prompt)?;
            let Some(line) = self.read_line()? else {
                return Ok(None);
            };

            match line.trim().parse::<T>() {
                Ok(value) => return Ok(Some(value)),
                Err(_) => writeln!(self.output, "{}", complaint)?,
            }
        }
    }

    pub fn integer(&mut self, prompt: &str) -> io::Result<Option<i64>> {
        self.parsed(prompt, "Invalid input! Please enter a valid integer.")
    }

    pub fn number(&mut self, prompt: &str) -> io::Result<Option<f64>> {
        self.parsed(prompt, "Invalid input! Please enter a valid number.")
    }

    /// Read a menu selection, re-prompting on anything out of range
    pub fn choice(&mut self) -> io::Result<Option<MenuChoice>> {
        let max = MenuChoice::ALL.len();
        write!(self.output, "Enter your choice (1-{}): ", max)?;

        loop {
            let Some(line) = self.read_line()? else {
                return Ok(None);
            };

            match line.parse::<MenuChoice>() {
                Ok(choice) => return Ok(Some(choice)),
                Err(()) => write!(
                    self.output,
                    "Invalid choice! Please enter a number between 1 and {}: ",
                    max
                )?,
            }
        }
    }

    /// Wait for Enter; `false` at end of input
    pub fn pause(&mut self) -> io::Result<bool> {
        write!(self.output, "\nPress Enter to continue...")?;
        Ok(self.read_line()?.is_some())
    }
}
