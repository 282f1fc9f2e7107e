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

pub mod answer;
pub mod error;
pub mod graph;
pub mod survey;

pub use answer::Answer;
pub use error::{Result, SurveyError};
pub use graph::{Caveat, Outcome, Question, Step, Verdict};
pub use survey::{classify, walk, Survey};

/// Parses whitespace- or comma-separated answers, e.g. `"solid, no, yes"`.
pub fn parse_answers(input: &str) -> Result<Vec<Answer>> {
    input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(str::parse)
        .collect()
}
