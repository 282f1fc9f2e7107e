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

use crate::error::SurveyError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One selectable option. Each question accepts only a fixed subset, see
/// [`crate::Question::options`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Answer {
    Solid,
    Liquid,
    Yes,
    No,
    /// PET bottles and containers.
    Pet,
    /// Glass bottles and jars without lids.
    Glass,
    /// Aluminium cans.
    Aluminium,
    /// Hard, mixed or dirty plastic such as soiled bags.
    MixedPlastic,
}

impl Answer {
    pub const ALL: [Answer; 8] = [
        Answer::Solid,
        Answer::Liquid,
        Answer::Yes,
        Answer::No,
        Answer::Pet,
        Answer::Glass,
        Answer::Aluminium,
        Answer::MixedPlastic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Answer::Solid => "Solid",
            Answer::Liquid => "Liquid",
            Answer::Yes => "Yes",
            Answer::No => "No",
            Answer::Pet => "PET",
            Answer::Glass => "Glass",
            Answer::Aluminium => "Aluminium",
            Answer::MixedPlastic => "MixedPlastic",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Answer::Solid => "Solid",
            Answer::Liquid => "Liquid",
            Answer::Yes => "Yes",
            Answer::No => "No",
            Answer::Pet => "PET plastic (bottles, containers)",
            Answer::Glass => "Glass (bottles, jars without lids)",
            Answer::Aluminium => "Aluminium cans",
            Answer::MixedPlastic => "Hard, mixed plastic or dirty bags",
        }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Answer {
    type Err = SurveyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .flat_map(char::to_lowercase)
            .collect();
        match normalised.as_str() {
            "solid" => Ok(Answer::Solid),
            "liquid" => Ok(Answer::Liquid),
            "yes" | "y" => Ok(Answer::Yes),
            "no" | "n" => Ok(Answer::No),
            "pet" => Ok(Answer::Pet),
            "glass" => Ok(Answer::Glass),
            "aluminium" | "aluminum" => Ok(Answer::Aluminium),
            "mixedplastic" | "mixed" => Ok(Answer::MixedPlastic),
            _ => Err(SurveyError::UnknownAnswer(s.to_string())),
        }
    }
}
