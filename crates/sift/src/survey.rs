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

use crate::answer::Answer;
use crate::error::{Result, SurveyError};
use crate::graph::{Outcome, Question, Step, Verdict};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Walk through the decision graph one answer at a time.
///
/// The session keeps the trail of answered questions so a shell can resume
/// or step back. It holds no counters; tallying outcomes across sessions is
/// the caller's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Survey {
    current: Step,
    trail: Vec<(Question, Answer)>,
}

impl Survey {
    pub fn new() -> Self {
        Self {
            current: Step::Ask(Question::ROOT),
            trail: Vec::new(),
        }
    }

    pub fn current(&self) -> Step {
        self.current
    }

    /// The question awaiting an answer, or `None` once resolved.
    pub fn pending(&self) -> Option<Question> {
        match self.current {
            Step::Ask(question) => Some(question),
            Step::Resolved(_) => None,
        }
    }

    pub fn verdict(&self) -> Option<Verdict> {
        match self.current {
            Step::Resolved(verdict) => Some(verdict),
            Step::Ask(_) => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.verdict().is_some()
    }

    pub fn trail(&self) -> &[(Question, Answer)] {
        &self.trail
    }

    pub fn answer(&mut self, answer: Answer) -> Result<Step> {
        let question = match self.current {
            Step::Ask(question) => question,
            Step::Resolved(verdict) => return Err(SurveyError::AlreadyResolved(verdict.outcome)),
        };
        let next = question.next(answer)?;
        debug!(?question, %answer, ?next, "survey step");
        self.trail.push((question, answer));
        self.current = next;
        Ok(next)
    }

    /// Steps back to the previously answered question.
    pub fn undo(&mut self) -> Result<Question> {
        let (question, _) = self.trail.pop().ok_or(SurveyError::NothingToUndo)?;
        self.current = Step::Ask(question);
        Ok(question)
    }

    pub fn restart(&mut self) {
        *self = Self::new();
    }

    /// Rebuilds a session from a recorded trail of answers.
    pub fn resume<I>(answers: I) -> Result<Self>
    where
        I: IntoIterator<Item = Answer>,
    {
        let mut survey = Self::new();
        for answer in answers {
            survey.answer(answer)?;
        }
        Ok(survey)
    }
}

impl Default for Survey {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs a complete answer sequence and returns the leaf it reaches.
///
/// The sequence must end exactly on a leaf: running out early yields
/// [`SurveyError::Incomplete`], answers left after a leaf yield
/// [`SurveyError::TrailingAnswers`].
pub fn walk(answers: &[Answer]) -> Result<Verdict> {
    let mut survey = Survey::new();
    for (index, &answer) in answers.iter().enumerate() {
        if let Step::Resolved(verdict) = survey.answer(answer)? {
            let remaining = answers.len() - index - 1;
            if remaining > 0 {
                return Err(SurveyError::TrailingAnswers {
                    outcome: verdict.outcome,
                    remaining,
                });
            }
            return Ok(verdict);
        }
    }
    match survey.current() {
        Step::Ask(question) => Err(SurveyError::Incomplete { question }),
        Step::Resolved(verdict) => Ok(verdict),
    }
}

pub fn classify(answers: &[Answer]) -> Result<Outcome> {
    walk(answers).map(|verdict| verdict.outcome)
}
