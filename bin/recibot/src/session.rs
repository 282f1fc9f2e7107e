// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2024 Jonathan Lee
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License version 3
// as published by the Free Software Foundation.
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.
// See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see https://www.gnu.org/licenses/.

use anyhow::Result;
use sift::{Answer, Outcome, Question, Step, Survey, SurveyError, Verdict};
use std::collections::BTreeMap;
use std::io::{BufRead, Write};
use tracing::{debug, warn};

const BACK: &str = "back";
const QUIT: &str = "quit";

/// Per-session count of classified items, dropped on exit.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Tally {
    counts: BTreeMap<Outcome, u32>,
}

impl Tally {
    pub fn record(&mut self, outcome: Outcome) {
        *self.counts.entry(outcome).or_default() += 1;
    }

    pub fn count(&self, outcome: Outcome) -> u32 {
        self.counts.get(&outcome).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u32 {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Outcome, u32)> + '_ {
        self.counts.iter().map(|(outcome, count)| (*outcome, *count))
    }
}

/// Line-driven survey over any reader and writer.
pub struct Session<R, W> {
    input: R,
    output: W,
    tally: Tally,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            tally: Tally::default(),
        }
    }

    pub fn tally(&self) -> &Tally {
        &self.tally
    }

    /// Classifies items until the input ends or the user declines another.
    pub fn run(&mut self) -> Result<()> {
        loop {
            let Some(verdict) = self.classify_one()? else {
                break;
            };
            self.tally.record(verdict.outcome);
            print_verdict(&mut self.output, &verdict)?;
            if !self.confirm("Classify another item? [yes/no]")? {
                break;
            }
        }
        self.print_tally()?;
        Ok(())
    }

    fn classify_one(&mut self) -> Result<Option<Verdict>> {
        let mut survey = Survey::new();
        loop {
            let question = match survey.current() {
                Step::Resolved(verdict) => return Ok(Some(verdict)),
                Step::Ask(question) => question,
            };
            self.ask(question)?;
            let Some(line) = self.read_line()? else {
                return Ok(None);
            };
            match line.as_str() {
                "" => continue,
                QUIT => return Ok(None),
                BACK => match survey.undo() {
                    Ok(previous) => debug!(?previous, "went back"),
                    Err(SurveyError::NothingToUndo) => {
                        writeln!(self.output, "Already at the first question.")?;
                    }
                    Err(e) => return Err(e.into()),
                },
                text => match text.parse::<Answer>() {
                    Ok(answer) => {
                        if let Err(e) = survey.answer(answer) {
                            warn!(error = %e, "answer rejected");
                            writeln!(self.output, "{e}")?;
                        }
                    }
                    Err(e) => writeln!(self.output, "{e}")?,
                },
            }
        }
    }

    fn ask(&mut self, question: Question) -> Result<()> {
        let options: Vec<&str> = question.options().iter().map(Answer::label).collect();
        writeln!(self.output, "{}", question.prompt())?;
        writeln!(self.output, "  [{}]  ('{BACK}' to go back)", options.join(" / "))?;
        write!(self.output, "> ")?;
        self.output.flush()?;
        Ok(())
    }

    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        loop {
            writeln!(self.output, "{prompt}")?;
            write!(self.output, "> ")?;
            self.output.flush()?;
            let Some(line) = self.read_line()? else {
                return Ok(false);
            };
            match line.parse::<Answer>() {
                Ok(Answer::Yes) => return Ok(true),
                Ok(Answer::No) => return Ok(false),
                _ if line == QUIT => return Ok(false),
                _ => continue,
            }
        }
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_lowercase()))
    }

    fn print_tally(&mut self) -> Result<()> {
        if self.tally.total() == 0 {
            return Ok(());
        }
        writeln!(self.output, "Items classified this session:")?;
        for (outcome, count) in self.tally.iter() {
            writeln!(self.output, "  {outcome:<14} {count}")?;
        }
        Ok(())
    }
}

pub fn print_verdict(out: &mut impl Write, verdict: &Verdict) -> std::io::Result<()> {
    writeln!(out, "Outcome: {}", verdict.outcome)?;
    writeln!(out, "Put it in the {}.", verdict.outcome.container())?;
    if let Some(caveat) = verdict.caveat {
        writeln!(out, "Note: {caveat}.")?;
    }
    Ok(())
}
