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
use serde::{Deserialize, Serialize};
use std::fmt;

/// Terminal outcome of the survey.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Organic,
    Recyclable,
    NonRecyclable,
    Paper,
    /// Hazardous or special handling, taken to a clean point.
    Special,
    /// No rule matched; the item has to be disposed of manually.
    Unresolved,
}

impl Outcome {
    pub const ALL: [Outcome; 6] = [
        Outcome::Organic,
        Outcome::Recyclable,
        Outcome::NonRecyclable,
        Outcome::Paper,
        Outcome::Special,
        Outcome::Unresolved,
    ];

    pub fn is_resolved(&self) -> bool {
        !matches!(self, Outcome::Unresolved)
    }

    pub fn container(&self) -> &'static str {
        match self {
            Outcome::Organic => "organic container",
            Outcome::Recyclable => "recyclables container",
            Outcome::NonRecyclable => "non-recyclable container",
            Outcome::Paper => "paper container",
            Outcome::Special => "clean point",
            Outcome::Unresolved => "recovery centre",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Outcome::Organic => "Organic",
            Outcome::Recyclable => "Recyclable",
            Outcome::NonRecyclable => "NonRecyclable",
            Outcome::Paper => "Paper",
            Outcome::Special => "Special",
            Outcome::Unresolved => "Unresolved",
        };
        f.write_str(name)
    }
}

/// Extra handling advice attached to some leaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Caveat {
    /// Recyclable once washed and dried.
    WashFirst,
    /// Intact textiles belong at a textile recycling point.
    TextileRecyclingPoint,
    /// Electronics, batteries and bulbs go to an electronics recycler.
    ElectronicRecycling,
    /// Medicines, syringes and chemicals go to an authorised pharmacy.
    AuthorisedPharmacy,
    /// Liquids go to a specialised clean point, never the drain.
    SpecialisedCleanPoint,
    /// Seal it and take it to the nearest recovery centre.
    SealedRecoveryCentre,
}

impl fmt::Display for Caveat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Caveat::WashFirst => "unless it is washed first",
            Caveat::TextileRecyclingPoint => {
                "take it to a textile recycling point if it is still intact"
            }
            Caveat::ElectronicRecycling => {
                "never in a common container; take it to a clean point or electronics recycler"
            }
            Caveat::AuthorisedPharmacy => {
                "clean point or authorised pharmacy; never in a common container"
            }
            Caveat::SpecialisedCleanPoint => {
                "must not go in a common container; take it to a specialised clean point"
            }
            Caveat::SealedRecoveryCentre => {
                "dispose of it at the nearest recovery centre in a sealed container"
            }
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Verdict {
    pub outcome: Outcome,
    pub caveat: Option<Caveat>,
}

impl Verdict {
    const fn plain(outcome: Outcome) -> Self {
        Self {
            outcome,
            caveat: None,
        }
    }

    const fn with(outcome: Outcome, caveat: Caveat) -> Self {
        Self {
            outcome,
            caveat: Some(caveat),
        }
    }

    const fn unresolved() -> Self {
        Self::with(Outcome::Unresolved, Caveat::SealedRecoveryCentre)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.caveat {
            Some(caveat) => write!(f, "{} ({caveat})", self.outcome),
            None => write!(f, "{}", self.outcome),
        }
    }
}

/// Node of the decision graph. Every node is reachable from
/// [`Question::ROOT`] and every answer path ends in a [`Verdict`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Question {
    PhysicalState,
    NaturalOrigin,
    CookedOrGreasy,
    PeelSeedOrBone,
    PaperOrCardboard,
    WetOrGreasy,
    CleanPaper,
    CoatedPaper,
    GlassPlasticOrMetal,
    CleanAndDry,
    MaterialType,
    Hygienic,
    Textile,
    Electronic,
    Hazardous,
}

const SOLID_LIQUID: &[Answer] = &[Answer::Solid, Answer::Liquid];
const YES_NO: &[Answer] = &[Answer::Yes, Answer::No];
const MATERIAL_TYPES: &[Answer] = &[
    Answer::Pet,
    Answer::Glass,
    Answer::Aluminium,
    Answer::MixedPlastic,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Ask(Question),
    Resolved(Verdict),
}

impl Question {
    pub const ROOT: Question = Question::PhysicalState;

    pub const ALL: [Question; 15] = [
        Question::PhysicalState,
        Question::NaturalOrigin,
        Question::CookedOrGreasy,
        Question::PeelSeedOrBone,
        Question::PaperOrCardboard,
        Question::WetOrGreasy,
        Question::CleanPaper,
        Question::CoatedPaper,
        Question::GlassPlasticOrMetal,
        Question::CleanAndDry,
        Question::MaterialType,
        Question::Hygienic,
        Question::Textile,
        Question::Electronic,
        Question::Hazardous,
    ];

    pub fn options(&self) -> &'static [Answer] {
        match self {
            Question::PhysicalState => SOLID_LIQUID,
            Question::MaterialType => MATERIAL_TYPES,
            _ => YES_NO,
        }
    }

    pub fn accepts(&self, answer: Answer) -> bool {
        self.options().contains(&answer)
    }

    pub fn prompt(&self) -> &'static str {
        match self {
            Question::PhysicalState => "Is the item solid or liquid?",
            Question::NaturalOrigin => {
                "Is it food or something natural (fruit, vegetables, meat, egg, bread, flowers, leaves)?"
            }
            Question::CookedOrGreasy => "Is it cooked or greasy?",
            Question::PeelSeedOrBone => "Is it a peel, seed, bone or vegetable scrap?",
            Question::PaperOrCardboard => "Is it made mainly of paper or cardboard?",
            Question::WetOrGreasy => "Does it have food residue, or is it wet or greasy?",
            Question::CleanPaper => {
                "Is it white or printed paper, notebooks or cardboard boxes?"
            }
            Question::CoatedPaper => "Is it waxed or plastic-coated paper, or tissue?",
            Question::GlassPlasticOrMetal => "Is it glass, plastic or metal?",
            Question::CleanAndDry => "Is it clean and free of food or liquid?",
            Question::MaterialType => "Which material is it?",
            Question::Hygienic => {
                "Is it a hygienic or personal item (nappies, pads, cotton buds, cigarette ends)?"
            }
            Question::Textile => "Is it textile, old clothing or shoes?",
            Question::Electronic => "Is it an electronic device, battery or light bulb?",
            Question::Hazardous => {
                "Is it a medicine, syringe or chemical (paint, oil, etc.)?"
            }
        }
    }

    /// Follows one edge of the graph.
    pub fn next(self, answer: Answer) -> Result<Step> {
        use Answer::*;
        use Question::*;
        use Step::{Ask, Resolved};

        let step = match (self, answer) {
            (PhysicalState, Solid) => Ask(NaturalOrigin),
            (PhysicalState, Liquid) => Resolved(Verdict::with(
                Outcome::Special,
                Caveat::SpecialisedCleanPoint,
            )),

            (NaturalOrigin, Yes) => Ask(CookedOrGreasy),
            (NaturalOrigin, No) => Ask(PaperOrCardboard),
            (CookedOrGreasy, Yes) => Resolved(Verdict::plain(Outcome::Organic)),
            (CookedOrGreasy, No) => Ask(PeelSeedOrBone),
            (PeelSeedOrBone, Yes) => Resolved(Verdict::plain(Outcome::Organic)),
            (PeelSeedOrBone, No) => Resolved(Verdict::unresolved()),

            (PaperOrCardboard, Yes) => Ask(WetOrGreasy),
            (PaperOrCardboard, No) => Ask(GlassPlasticOrMetal),
            (WetOrGreasy, Yes) => Resolved(Verdict::plain(Outcome::NonRecyclable)),
            (WetOrGreasy, No) => Ask(CleanPaper),
            (CleanPaper, Yes) => Resolved(Verdict::plain(Outcome::Paper)),
            (CleanPaper, No) => Ask(CoatedPaper),
            (CoatedPaper, Yes) => Resolved(Verdict::plain(Outcome::NonRecyclable)),
            (CoatedPaper, No) => Resolved(Verdict::unresolved()),

            (GlassPlasticOrMetal, Yes) => Ask(CleanAndDry),
            (GlassPlasticOrMetal, No) => Ask(Hygienic),
            (CleanAndDry, Yes) => Ask(MaterialType),
            (CleanAndDry, No) => {
                Resolved(Verdict::with(Outcome::NonRecyclable, Caveat::WashFirst))
            }
            (MaterialType, Pet | Glass | Aluminium) => {
                Resolved(Verdict::plain(Outcome::Recyclable))
            }
            (MaterialType, MixedPlastic) => Resolved(Verdict::plain(Outcome::NonRecyclable)),

            (Hygienic, Yes) => Resolved(Verdict::plain(Outcome::NonRecyclable)),
            (Hygienic, No) => Ask(Textile),
            (Textile, Yes) => Resolved(Verdict::with(
                Outcome::NonRecyclable,
                Caveat::TextileRecyclingPoint,
            )),
            (Textile, No) => Ask(Electronic),
            (Electronic, Yes) => {
                Resolved(Verdict::with(Outcome::Special, Caveat::ElectronicRecycling))
            }
            (Electronic, No) => Ask(Hazardous),
            (Hazardous, Yes) => {
                Resolved(Verdict::with(Outcome::Special, Caveat::AuthorisedPharmacy))
            }
            (Hazardous, No) => Resolved(Verdict::unresolved()),

            (question, answer) => {
                return Err(SurveyError::InvalidAnswer {
                    question,
                    answer,
                    expected: question
                        .options()
                        .iter()
                        .map(Answer::as_str)
                        .collect::<Vec<_>>()
                        .join(", "),
                })
            }
        };
        Ok(step)
    }
}
