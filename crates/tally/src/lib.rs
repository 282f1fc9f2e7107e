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

pub mod aggregate;
pub mod config;
pub mod error;
pub mod ledger;
pub mod material;
pub mod record;
pub mod row;
pub mod store;

pub use aggregate::{aggregate, round2, Aggregates, Period, DEFAULT_BAG_WEIGHT_KG};
pub use config::{AggregationScope, LedgerConfig};
pub use error::{ConfigError, LedgerError, Result, StorageError, ValidationError};
pub use ledger::Ledger;
pub use material::{Material, Quantities};
pub use record::WasteRecord;
pub use row::{snapshot_headers, ColumnGroup, PersistedRow, RowFilter};
pub use store::{CsvStore, MemoryStore, RecordStore};
