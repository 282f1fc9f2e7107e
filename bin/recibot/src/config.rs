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

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tally::{CsvStore, LedgerConfig};
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub history_path: PathBuf,
    pub snapshot_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            history_path: PathBuf::from("data/waste_history.csv"),
            snapshot_path: PathBuf::from("data/datos_basura.csv"),
        }
    }
}

impl StorageConfig {
    pub fn open(&self) -> CsvStore {
        CsvStore::new(&self.history_path, &self.snapshot_path)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub ledger: LedgerConfig,
}

impl AppConfig {
    pub fn load_from_file(config_path: &Path) -> Result<Self> {
        let content = fs::read_to_string(config_path)
            .with_context(|| format!("reading config {}", config_path.display()))?;
        let config: AppConfig = toml::from_str(&content)
            .with_context(|| format!("parsing config {}", config_path.display()))?;
        Ok(config)
    }

    pub fn default_config_path() -> PathBuf {
        PathBuf::from("config/recibot.toml")
    }

    /// An explicit path must exist. Without one, a missing default file
    /// means built-in defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let config = match explicit {
            Some(path) => {
                info!(path = %path.display(), "loading config");
                Self::load_from_file(path)?
            }
            None => {
                let path = Self::default_config_path();
                if path.exists() {
                    info!(path = %path.display(), "loading config");
                    Self::load_from_file(&path)?
                } else {
                    debug!("no config file, using defaults");
                    Self::default()
                }
            }
        };
        Ok(config)
    }

    pub fn with_bag_weight(mut self, bag_weight_kg: Option<f64>) -> Self {
        if let Some(weight) = bag_weight_kg {
            self.ledger = self.ledger.with_bag_weight(weight);
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.ledger.validate().context("invalid [ledger] section")?;
        Ok(())
    }
}
