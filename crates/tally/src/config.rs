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

use crate::aggregate::DEFAULT_BAG_WEIGHT_KG;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Which part of the history an entry's snapshot is aggregated over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregationScope {
    /// Every stored record, whoever logged it.
    #[default]
    All,
    /// Only the records of the user saving the entry.
    User,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    pub bag_weight_kg: f64,
    pub scope: AggregationScope,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            bag_weight_kg: DEFAULT_BAG_WEIGHT_KG,
            scope: AggregationScope::default(),
        }
    }
}

impl LedgerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.bag_weight_kg.is_finite() || self.bag_weight_kg <= 0.0 {
            return Err(ConfigError::InvalidBagWeight(self.bag_weight_kg));
        }
        Ok(())
    }

    pub fn with_bag_weight(mut self, bag_weight_kg: f64) -> Self {
        self.bag_weight_kg = bag_weight_kg;
        self
    }

    pub fn with_scope(mut self, scope: AggregationScope) -> Self {
        self.scope = scope;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_three_kilo_bags_over_all_records() {
        let config = LedgerConfig::default();
        assert_eq!(config.bag_weight_kg, 3.0);
        assert_eq!(config.scope, AggregationScope::All);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_non_positive_bag_weight() {
        for weight in [0.0, -1.0, f64::INFINITY] {
            let config = LedgerConfig::default().with_bag_weight(weight);
            assert!(matches!(
                config.validate(),
                Err(ConfigError::InvalidBagWeight(_))
            ));
        }
    }

    #[test]
    fn scope_builder_overrides_default() {
        let config = LedgerConfig::default().with_scope(AggregationScope::User);
        assert_eq!(config.scope, AggregationScope::User);
        assert_eq!(config.bag_weight_kg, 3.0);
    }
}
