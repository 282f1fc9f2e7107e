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

use crate::material::Material;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl LedgerError {
    /// Validation failures are reported back to the user; everything else
    /// is an unrecoverable fault for the caller.
    pub fn is_validation(&self) -> bool {
        matches!(self, LedgerError::Validation(_))
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("a user name is required")]
    EmptyUser,
    #[error("quantity for {material} must not be negative, got {value}")]
    NegativeQuantity { material: Material, value: f64 },
    #[error("quantity for {material} must be a finite number")]
    NonFiniteQuantity { material: Material },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("bag weight must be a positive number of kilograms, got {0}")]
    InvalidBagWeight(f64),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Column '{column}' not found in '{path}'")]
    MissingColumn { path: PathBuf, column: String },
    #[error("Invalid value '{value}' for column '{column}' on line {line} of '{path}'")]
    Parse {
        path: PathBuf,
        line: u64,
        column: String,
        value: String,
    },
}

pub type Result<T> = std::result::Result<T, LedgerError>;
pub type StorageResult<T> = std::result::Result<T, StorageError>;
