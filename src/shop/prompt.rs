use rust_decimal::Decimal;
use std::fmt::Display;
use std::io::{BufRead, Write};

use crate::error::{ShopError, ShopResult};
use crate::inventory::{parse_price, parse_quantity};

/// Line-oriented question and answer over any reader/writer pair
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Writer for rendering tables and reports
    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    /// Print one line of output
    pub fn say(&mut self, message: impl Display) -> ShopResult<()> {
        writeln!(self.output, "{message}")?;
        Ok(())
    }

    /// Show `prompt` and read one line without its line ending
    ///
    /// Returns `None` once the input is exhausted.
    pub fn read_line(&mut self, prompt: &str) -> ShopResult<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed_len = line.trim_end_matches(|c: char| c == '\n' || c == '\r').len();
        line.truncate(trimmed_len);
        Ok(Some(line))
    }

    /// Like `read_line`, but running out of input is an error naming `what`
    pub fn ask(&mut self, prompt: &str, what: &'static str) -> ShopResult<String> {
        self.read_line(prompt)?.ok_or(ShopError::InputClosed(what))
    }

    pub fn ask_price(&mut self, prompt: &str) -> ShopResult<Decimal> {
        let answer = self.ask(prompt, "price")?;
        parse_price(&answer)
    }

    pub fn ask_quantity(&mut self, prompt: &str) -> ShopResult<i32> {
        let answer = self.ask(prompt, "quantity")?;
        parse_quantity("quantity", &answer)
    }
}
