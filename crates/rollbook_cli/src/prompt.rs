//! Line-oriented prompting over any buffered reader.
//!
//! # Responsibility
//! - Print a label, read one line, hand back the trimmed value.
//! - Re-prompt on unparsable numeric input instead of failing the flow.
//!
//! # Invariants
//! - Every helper returns `Ok(None)` once the reader hits end of input, so
//!   menu loops can treat EOF as a request to quit.
//! - Labels are printed without a trailing newline and stdout is flushed
//!   before the read, so the cursor stays on the prompt line.

use std::io::{self, BufRead, Write};

/// Reads prompted values one line at a time.
///
/// Generic over the reader so menu flows can be driven from an in-memory
/// script in tests.
pub struct Prompter<R> {
    input: R,
}

impl<R: BufRead> Prompter<R> {
    pub fn new(input: R) -> Self {
        Self { input }
    }

    /// Prints `label` and reads one line, trimmed of surrounding whitespace.
    pub fn line(&mut self, label: &str) -> io::Result<Option<String>> {
        print!("{label}");
        io::stdout().flush()?;
        let mut buffer = String::new();
        if self.input.read_line(&mut buffer)? == 0 {
            return Ok(None);
        }
        Ok(Some(buffer.trim().to_string()))
    }

    /// Reads one line, mapping blank input to an absent value.
    pub fn optional(&mut self, label: &str) -> io::Result<Option<Option<String>>> {
        let Some(value) = self.line(label)? else {
            return Ok(None);
        };
        if value.is_empty() {
            Ok(Some(None))
        } else {
            Ok(Some(Some(value)))
        }
    }

    /// Re-prompts until the line parses as a signed integer.
    pub fn integer(&mut self, label: &str) -> io::Result<Option<i64>> {
        loop {
            let Some(value) = self.line(label)? else {
                return Ok(None);
            };
            match value.parse::<i64>() {
                Ok(parsed) => return Ok(Some(parsed)),
                Err(_) => println!("Please enter a valid integer."),
            }
        }
    }

    /// Re-prompts until the line is blank or parses as a year number.
    pub fn optional_year(&mut self, label: &str) -> io::Result<Option<Option<i32>>> {
        loop {
            let Some(value) = self.line(label)? else {
                return Ok(None);
            };
            if value.is_empty() {
                return Ok(Some(None));
            }
            match value.parse::<i32>() {
                Ok(parsed) => return Ok(Some(Some(parsed))),
                Err(_) => println!("Please enter a valid integer."),
            }
        }
    }

    /// Re-prompts until the line parses as a score.
    pub fn score(&mut self, label: &str) -> io::Result<Option<f64>> {
        loop {
            let Some(value) = self.line(label)? else {
                return Ok(None);
            };
            match value.parse::<f64>() {
                Ok(parsed) => return Ok(Some(parsed)),
                Err(_) => println!("Please enter a valid number."),
            }
        }
    }
}
