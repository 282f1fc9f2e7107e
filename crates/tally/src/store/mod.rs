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

mod atomic;
mod csv_store;

pub use atomic::atomic_write;
pub use csv_store::CsvStore;

use crate::error::StorageResult;
use crate::record::WasteRecord;
use crate::row::{PersistedRow, RowFilter};

/// Append-only backing store for the ledger: raw entries plus the frozen
/// snapshot rows written alongside each entry.
pub trait RecordStore {
    fn append_record(&mut self, record: &WasteRecord) -> StorageResult<()>;

    fn records(&self) -> StorageResult<Vec<WasteRecord>>;

    fn append_row(&mut self, row: &PersistedRow) -> StorageResult<()>;

    fn rows(&self) -> StorageResult<Vec<PersistedRow>>;

    fn query(&self, filter: &RowFilter) -> StorageResult<Vec<PersistedRow>> {
        Ok(filter.apply(self.rows()?))
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Vec<WasteRecord>,
    rows: Vec<PersistedRow>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for MemoryStore {
    fn append_record(&mut self, record: &WasteRecord) -> StorageResult<()> {
        self.records.push(record.clone());
        Ok(())
    }

    fn records(&self) -> StorageResult<Vec<WasteRecord>> {
        Ok(self.records.clone())
    }

    fn append_row(&mut self, row: &PersistedRow) -> StorageResult<()> {
        self.rows.push(row.clone());
        Ok(())
    }

    fn rows(&self) -> StorageResult<Vec<PersistedRow>> {
        Ok(self.rows.clone())
    }
}
