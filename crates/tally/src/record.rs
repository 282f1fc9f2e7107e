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

use crate::error::ValidationError;
use crate::material::Quantities;
use chrono::NaiveDate;
use serde::Serialize;

/// One day's logged waste for one user. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WasteRecord {
    user: String,
    date: NaiveDate,
    quantities: Quantities,
}

impl WasteRecord {
    /// Validates the entry: the user is trimmed and must not be empty, every
    /// quantity must be finite and non-negative.
    pub fn new(
        user: &str,
        date: NaiveDate,
        quantities: Quantities,
    ) -> Result<Self, ValidationError> {
        let user = user.trim();
        if user.is_empty() {
            return Err(ValidationError::EmptyUser);
        }
        for (material, value) in quantities.iter() {
            if !value.is_finite() {
                return Err(ValidationError::NonFiniteQuantity { material });
            }
            if value < 0.0 {
                return Err(ValidationError::NegativeQuantity { material, value });
            }
        }
        Ok(Self {
            user: user.to_string(),
            date,
            quantities,
        })
    }

    /// Rebuilds a record read back from storage without re-validating it.
    pub(crate) fn from_stored(user: String, date: NaiveDate, quantities: Quantities) -> Self {
        Self {
            user,
            date,
            quantities,
        }
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn quantities(&self) -> &Quantities {
        &self.quantities
    }
}
