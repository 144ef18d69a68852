//! Interactive prompts: ask, validate against a fixed set, ask again.

use std::io::{self, BufRead, Write};

use tracing::debug;

use crate::calendar::{DAY_NAMES, MONTH_NAMES};
use crate::city::City;
use crate::error::SelectorError;
use crate::filter::{DaySelector, MonthSelector};
use crate::report::Query;

/// `"all"` followed by each name, lower-cased.
fn answer_keys(names: &[&str]) -> Vec<String> {
    std::iter::once("all".to_string())
        .chain(names.iter().map(|n| n.to_lowercase()))
        .collect()
}

/// Terminal (or any reader/writer pair) used for the interactive session.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    fn read_answer(&mut self, prompt: &str) -> io::Result<String> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed while waiting for an answer",
            ));
        }
        Ok(line.trim().to_lowercase())
    }

    /// Asks `prompt`, then `reprompt` until the lower-cased answer is in `valid`.
    ///
    /// `valid` must itself be lower-case.
    pub fn choose<S: AsRef<str>>(
        &mut self,
        prompt: &str,
        reprompt: &str,
        valid: &[S],
    ) -> io::Result<String> {
        let mut answer = self.read_answer(prompt)?;
        while !valid.iter().any(|v| v.as_ref() == answer) {
            debug!(answer = %answer, "Rejected answer");
            answer = self.read_answer(reprompt)?;
        }
        Ok(answer)
    }

    /// Returns `true` only for an explicit "yes".
    pub fn confirm(&mut self, prompt: &str) -> io::Result<bool> {
        Ok(self.read_answer(prompt)? == "yes")
    }

    /// Asks for city, month and day, and returns the resulting query.
    pub fn ask_query(&mut self) -> io::Result<Query> {
        writeln!(self.output, "Hello! Let's explore some US bikeshare data!")?;

        let cities: Vec<&str> = City::ALL.iter().map(City::key).collect();
        let city = self.choose(
            "Would you like to explore Chicago, New York City, or Washington data?: ",
            "Enter Chicago, New York City, or Washington: ",
            &cities,
        )?;

        let months = answer_keys(&MONTH_NAMES);
        let month = self.choose(
            "Enter a month to filter by month or 'all' for no filter: ",
            "Enter a valid month filter: ",
            &months,
        )?;

        let days = answer_keys(&DAY_NAMES);
        let day = self.choose(
            "Enter a day to filter by day or 'all' for no filter: ",
            "Enter a valid day filter: ",
            &days,
        )?;

        writeln!(self.output, "{}", "-".repeat(40))?;

        // every answer was checked against the same tables the parsers use
        let invalid = |e: SelectorError| io::Error::new(io::ErrorKind::InvalidInput, e);
        Ok(Query::new(
            city.parse::<City>().map_err(invalid)?,
            month.parse::<MonthSelector>().map_err(invalid)?,
            day.parse::<DaySelector>().map_err(invalid)?,
        ))
    }
}
