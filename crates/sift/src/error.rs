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
use crate::graph::{Outcome, Question};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SurveyError {
    #[error("'{answer}' is not an option for {question:?}; expected one of {expected}")]
    InvalidAnswer {
        question: Question,
        answer: Answer,
        expected: String,
    },
    #[error("answers ran out at {question:?} before reaching a disposal outcome")]
    Incomplete { question: Question },
    #[error("survey resolved to {outcome} with {remaining} answer(s) left over")]
    TrailingAnswers { outcome: Outcome, remaining: usize },
    #[error("survey already resolved to {0}")]
    AlreadyResolved(Outcome),
    #[error("no answer to undo")]
    NothingToUndo,
    #[error("unrecognised answer '{0}'")]
    UnknownAnswer(String),
}

pub type Result<T> = std::result::Result<T, SurveyError>;
