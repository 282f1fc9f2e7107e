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

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

/// The closed set of tracked waste materials, in column order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Material {
    Organic,
    Plastic,
    Paper,
    Glass,
    Metal,
    NonRecyclable,
}

impl Material {
    pub const COUNT: usize = 6;

    pub const ALL: [Material; Material::COUNT] = [
        Material::Organic,
        Material::Plastic,
        Material::Paper,
        Material::Glass,
        Material::Metal,
        Material::NonRecyclable,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Material::Organic => "organic",
            Material::Plastic => "plastic",
            Material::Paper => "paper",
            Material::Glass => "glass",
            Material::Metal => "metal",
            Material::NonRecyclable => "non_recyclable",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMaterial(pub String);

impl fmt::Display for UnknownMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown material '{}'", self.0)
    }
}

impl std::error::Error for UnknownMaterial {}

impl FromStr for Material {
    type Err = UnknownMaterial;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('-', "_");
        Material::ALL
            .into_iter()
            .find(|m| m.as_str() == wanted)
            .ok_or_else(|| UnknownMaterial(s.to_string()))
    }
}

/// A kilogram (or bag) figure for every material. Every material is always
/// present; untouched materials read as `0.0`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Quantities([f64; Material::COUNT]);

impl Quantities {
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (Material, f64)>,
    {
        let mut quantities = Self::zero();
        for (material, value) in pairs {
            quantities.set(material, value);
        }
        quantities
    }

    pub fn get(&self, material: Material) -> f64 {
        self.0[material.index()]
    }

    pub fn set(&mut self, material: Material, value: f64) {
        self.0[material.index()] = value;
    }

    pub fn with(mut self, material: Material, value: f64) -> Self {
        self.set(material, value);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (Material, f64)> + '_ {
        Material::ALL.into_iter().map(move |m| (m, self.get(m)))
    }

    pub fn total(&self) -> f64 {
        self.0.iter().sum()
    }

    pub fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self(self.0.map(f))
    }
}

impl Add for Quantities {
    type Output = Quantities;

    fn add(mut self, rhs: Quantities) -> Quantities {
        self += rhs;
        self
    }
}

impl AddAssign for Quantities {
    fn add_assign(&mut self, rhs: Quantities) {
        for (lhs, rhs) in self.0.iter_mut().zip(rhs.0) {
            *lhs += rhs;
        }
    }
}

impl std::iter::Sum for Quantities {
    fn sum<I: Iterator<Item = Quantities>>(iter: I) -> Self {
        iter.fold(Quantities::zero(), Add::add)
    }
}

impl Serialize for Quantities {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Material::COUNT))?;
        for (material, value) in self.iter() {
            map.serialize_entry(material.as_str(), &value)?;
        }
        map.end()
    }
}
