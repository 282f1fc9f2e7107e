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

use super::atomic::atomic_write;
use super::RecordStore;
use crate::aggregate::Aggregates;
use crate::error::{StorageError, StorageResult};
use crate::material::{Material, Quantities};
use crate::record::WasteRecord;
use crate::row::{
    history_headers, snapshot_headers, ColumnGroup, PersistedRow, DATE_COLUMN,
    DATE_FORMAT, USER_COLUMN,
};
use chrono::NaiveDate;
use csv::StringRecord;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

pub const DEFAULT_HISTORY_FILE: &str = "waste_history.csv";
pub const DEFAULT_SNAPSHOT_FILE: &str = "datos_basura.csv";

/// Flat-file store: a raw history log and the snapshot table.
///
/// Every append reads the whole file, appends in memory and rewrites it.
/// A missing file reads as an empty table.
#[derive(Debug, Clone)]
pub struct CsvStore {
    history_path: PathBuf,
    snapshot_path: PathBuf,
}

struct Table {
    headers: StringRecord,
    records: Vec<StringRecord>,
}

impl CsvStore {
    pub fn new(history_path: impl Into<PathBuf>, snapshot_path: impl Into<PathBuf>) -> Self {
        Self {
            history_path: history_path.into(),
            snapshot_path: snapshot_path.into(),
        }
    }

    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self::new(dir.join(DEFAULT_HISTORY_FILE), dir.join(DEFAULT_SNAPSHOT_FILE))
    }

    pub fn history_path(&self) -> &Path {
        &self.history_path
    }

    pub fn snapshot_path(&self) -> &Path {
        &self.snapshot_path
    }
}

impl RecordStore for CsvStore {
    #[instrument(skip(self, record), fields(path = %self.history_path.display()))]
    fn append_record(&mut self, record: &WasteRecord) -> StorageResult<()> {
        let mut fields = vec![
            record.user().to_string(),
            record.date().format(DATE_FORMAT).to_string(),
        ];
        fields.extend(record.quantities().iter().map(|(_, kg)| kg.to_string()));
        append_to_table(&self.history_path, &history_headers(), &fields)
    }

    fn records(&self) -> StorageResult<Vec<WasteRecord>> {
        let Some(table) = read_table(&self.history_path)? else {
            return Ok(Vec::new());
        };
        let columns = Columns::new(&self.history_path, &table.headers);
        let user = columns.index(USER_COLUMN)?;
        let date = columns.index(DATE_COLUMN)?;
        let materials = Material::ALL
            .iter()
            .map(|m| Ok((*m, columns.index(m.as_str())?)))
            .collect::<StorageResult<Vec<_>>>()?;

        table
            .records
            .iter()
            .map(|record| {
                let mut quantities = Quantities::zero();
                for (material, idx) in &materials {
                    quantities.set(*material, columns.number(record, *idx)?);
                }
                Ok(WasteRecord::from_stored(
                    columns.text(record, user).to_string(),
                    columns.date(record, date)?,
                    quantities,
                ))
            })
            .collect()
    }

    #[instrument(skip(self, row), fields(path = %self.snapshot_path.display()))]
    fn append_row(&mut self, row: &PersistedRow) -> StorageResult<()> {
        append_to_table(&self.snapshot_path, &snapshot_headers(), &row.to_fields())
    }

    fn rows(&self) -> StorageResult<Vec<PersistedRow>> {
        let Some(table) = read_table(&self.snapshot_path)? else {
            return Ok(Vec::new());
        };
        let columns = Columns::new(&self.snapshot_path, &table.headers);
        let user = columns.index(USER_COLUMN)?;
        let date = columns.index(DATE_COLUMN)?;
        let mut cells = Vec::with_capacity(ColumnGroup::ALL.len() * Material::COUNT);
        for group in ColumnGroup::ALL {
            for material in Material::ALL {
                cells.push((group, material, columns.index(&group.column(material))?));
            }
        }

        table
            .records
            .iter()
            .map(|record| {
                let mut aggregates = Aggregates::default();
                for (group, material, idx) in &cells {
                    let value = columns.number(record, *idx)?;
                    group.select_mut(&mut aggregates).set(*material, value);
                }
                Ok(PersistedRow {
                    user: columns.text(record, user).to_string(),
                    date: columns.date(record, date)?,
                    aggregates,
                })
            })
            .collect()
    }
}

fn read_table(path: &Path) -> StorageResult<Option<Table>> {
    if !path.exists() {
        debug!(path = %path.display(), "table not found, treating as empty");
        return Ok(None);
    }
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)?;
    let headers = reader.headers()?.clone();
    if headers.is_empty() {
        return Ok(None);
    }
    let records = reader.records().collect::<Result<Vec<_>, _>>()?;
    Ok(Some(Table { headers, records }))
}

/// Appends one row, matching the column order of an existing file.
fn append_to_table(path: &Path, headers: &[String], fields: &[String]) -> StorageResult<()> {
    let (headers, records) = match read_table(path)? {
        Some(table) => {
            let columns = Columns::new(path, &table.headers);
            let mut ordered = vec![String::new(); table.headers.len()];
            for (name, value) in headers.iter().zip(fields) {
                ordered[columns.index(name)?] = value.clone();
            }
            let mut records = table.records;
            records.push(StringRecord::from(ordered));
            (table.headers, records)
        }
        None => (
            StringRecord::from(headers.to_vec()),
            vec![StringRecord::from(fields.to_vec())],
        ),
    };

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(&headers)?;
    for record in &records {
        writer.write_record(record)?;
    }
    let bytes = writer.into_inner().map_err(|e| StorageError::Io {
        path: path.to_path_buf(),
        source: e.into_error(),
    })?;
    atomic_write(path, &bytes).map_err(|source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), rows = records.len(), "table rewritten");
    Ok(())
}

struct Columns<'a> {
    path: &'a Path,
    headers: &'a StringRecord,
}

impl<'a> Columns<'a> {
    fn new(path: &'a Path, headers: &'a StringRecord) -> Self {
        Self { path, headers }
    }

    fn index(&self, name: &str) -> StorageResult<usize> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| StorageError::MissingColumn {
                path: self.path.to_path_buf(),
                column: name.to_string(),
            })
    }

    fn text<'r>(&self, record: &'r StringRecord, idx: usize) -> &'r str {
        record.get(idx).unwrap_or_default()
    }

    fn parse_error(&self, record: &StringRecord, idx: usize) -> StorageError {
        StorageError::Parse {
            path: self.path.to_path_buf(),
            line: record.position().map_or(0, |p| p.line()),
            column: self.headers.get(idx).unwrap_or_default().to_string(),
            value: self.text(record, idx).to_string(),
        }
    }

    /// Blank cells read as zero.
    fn number(&self, record: &StringRecord, idx: usize) -> StorageResult<f64> {
        let raw = self.text(record, idx);
        if raw.is_empty() {
            return Ok(0.0);
        }
        raw.parse::<f64>().map_err(|_| self.parse_error(record, idx))
    }

    fn date(&self, record: &StringRecord, idx: usize) -> StorageResult<NaiveDate> {
        NaiveDate::parse_from_str(self.text(record, idx), DATE_FORMAT)
            .map_err(|_| self.parse_error(record, idx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
    }

    #[test]
    fn missing_files_read_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvStore::in_dir(dir.path());
        assert!(store.records().unwrap().is_empty());
        assert!(store.rows().unwrap().is_empty());
    }

    #[test]
    fn snapshot_file_uses_the_documented_header() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = CsvStore::in_dir(dir.path());
        let mut row = PersistedRow {
            user: "Ana".to_string(),
            date: day(3),
            aggregates: Aggregates::default(),
        };
        row.aggregates.bags.set(Material::Plastic, 2.0);
        store.append_row(&row).unwrap();

        let text = fs::read_to_string(store.snapshot_path()).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next().unwrap(), snapshot_headers().join(","));
        assert!(lines.next().unwrap().starts_with("Ana,2025-06-03,0.00,2.00,"));
        assert_eq!(store.rows().unwrap(), vec![row]);
    }

    #[test]
    fn appends_follow_an_existing_column_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.csv");
        fs::write(
            &path,
            "Fecha,Usuario,plastic,organic,paper,glass,metal,non_recyclable\n\
             2025-06-01,Luis,1,2,0,0,0,0\n",
        )
        .unwrap();
        let mut store = CsvStore::new(&path, dir.path().join("rows.csv"));
        let record = WasteRecord::new("Ana", day(2), Quantities::zero().with(Material::Plastic, 6.0))
            .unwrap();
        store.append_record(&record).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("Fecha,Usuario,plastic,organic"));
        assert!(text.contains("2025-06-02,Ana,6,0,"));

        let records = store.records().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].quantities().get(Material::Organic), 2.0);
        assert_eq!(records[1], record);
    }

    #[test]
    fn missing_column_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.csv");
        fs::write(&path, "Usuario,Fecha,organic\nAna,2025-06-01,1\n").unwrap();
        let store = CsvStore::new(&path, dir.path().join("rows.csv"));
        match store.records() {
            Err(StorageError::MissingColumn { column, .. }) => assert_eq!(column, "plastic"),
            other => panic!("expected missing column, got {other:?}"),
        }
    }

    #[test]
    fn malformed_numbers_name_line_and_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.csv");
        let mut text = history_headers().join(",");
        text.push_str("\nAna,2025-06-01,1,lots,0,0,0,0\n");
        fs::write(&path, text).unwrap();
        let store = CsvStore::new(&path, dir.path().join("rows.csv"));
        match store.records() {
            Err(StorageError::Parse {
                line, column, value, ..
            }) => {
                assert_eq!(line, 2);
                assert_eq!(column, "plastic");
                assert_eq!(value, "lots");
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn blank_cells_read_as_zero() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.csv");
        let mut text = history_headers().join(",");
        text.push_str("\nAna,2025-06-01,,1.5,,,,\n");
        fs::write(&path, text).unwrap();
        let store = CsvStore::new(&path, dir.path().join("rows.csv"));
        let records = store.records().unwrap();
        assert_eq!(records[0].quantities().get(Material::Organic), 0.0);
        assert_eq!(records[0].quantities().get(Material::Plastic), 1.5);
    }
}
