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

use crate::aggregate::{aggregate, Aggregates};
use crate::config::{AggregationScope, LedgerConfig};
use crate::error::Result;
use crate::material::Quantities;
use crate::record::WasteRecord;
use crate::row::{PersistedRow, RowFilter};
use crate::store::RecordStore;
use chrono::NaiveDate;
use tracing::{info, instrument, warn};

/// Records entries and snapshots aggregates into a [`RecordStore`].
#[derive(Debug)]
pub struct Ledger<S> {
    store: S,
    config: LedgerConfig,
}

impl<S: RecordStore> Ledger<S> {
    pub fn new(store: S, config: LedgerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { store, config })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Validates and appends an entry, then writes the snapshot of the
    /// aggregates anchored at `date`. A rejected entry writes nothing, and
    /// neither does one whose snapshot table cannot be read.
    #[instrument(skip(self, quantities), fields(scope = ?self.config.scope))]
    pub fn record_entry(
        &mut self,
        user: &str,
        date: NaiveDate,
        quantities: Quantities,
    ) -> Result<PersistedRow> {
        let record = WasteRecord::new(user, date, quantities).map_err(|e| {
            warn!(error = %e, "entry rejected");
            e
        })?;
        // An unreadable snapshot table must fail before the history grows.
        self.store.rows()?;
        self.store.append_record(&record)?;

        let history = self.history_for(record.user())?;
        let aggregates = aggregate(&history, date, self.config.bag_weight_kg);
        let row = PersistedRow {
            user: record.user().to_string(),
            date,
            aggregates,
        };
        self.store.append_row(&row)?;
        info!(
            user = %row.user,
            %date,
            weekly_kg = row.aggregates.weekly.total(),
            bags = row.aggregates.bags.total(),
            "entry recorded"
        );
        Ok(row)
    }

    fn history_for(&self, user: &str) -> Result<Vec<WasteRecord>> {
        let mut history = self.store.records()?;
        if self.config.scope == AggregationScope::User {
            history.retain(|record| record.user() == user);
        }
        Ok(history)
    }

    /// Fresh aggregates over the whole stored history, not persisted.
    pub fn aggregate_at(&self, reference: NaiveDate) -> Result<Aggregates> {
        let history = self.store.records()?;
        Ok(aggregate(&history, reference, self.config.bag_weight_kg))
    }

    pub fn rows(&self) -> Result<Vec<PersistedRow>> {
        Ok(self.store.rows()?)
    }

    pub fn query(&self, filter: &RowFilter) -> Result<Vec<PersistedRow>> {
        Ok(self.store.query(filter)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{LedgerError, ValidationError};
    use crate::material::Material;
    use crate::store::MemoryStore;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn ledger(config: LedgerConfig) -> Ledger<MemoryStore> {
        Ledger::new(MemoryStore::new(), config).unwrap()
    }

    #[test]
    fn records_an_entry_and_snapshots_aggregates() {
        let mut ledger = ledger(LedgerConfig::default());
        let row = ledger
            .record_entry(
                "Ana",
                date(2025, 6, 2),
                Quantities::zero().with(Material::Plastic, 6.0),
            )
            .unwrap();
        assert_eq!(row.user, "Ana");
        assert_eq!(row.aggregates.bags.get(Material::Plastic), 2.0);
        assert_eq!(ledger.store().records().unwrap().len(), 1);
        assert_eq!(ledger.rows().unwrap(), vec![row]);
    }

    #[test]
    fn empty_user_writes_nothing() {
        let mut ledger = ledger(LedgerConfig::default());
        let err = ledger
            .record_entry("  ", date(2025, 6, 2), Quantities::zero())
            .unwrap_err();
        assert!(err.is_validation());
        assert!(matches!(
            err,
            LedgerError::Validation(ValidationError::EmptyUser)
        ));
        assert!(ledger.store().records().unwrap().is_empty());
        assert!(ledger.rows().unwrap().is_empty());
    }

    #[test]
    fn earlier_rows_stay_frozen() {
        let mut ledger = ledger(LedgerConfig::default());
        let plastic = |kg| Quantities::zero().with(Material::Plastic, kg);
        let first = ledger
            .record_entry("Ana", date(2025, 6, 2), plastic(3.0))
            .unwrap();
        ledger
            .record_entry("Ana", date(2025, 6, 3), plastic(3.0))
            .unwrap();

        let rows = ledger.rows().unwrap();
        assert_eq!(rows[0], first);
        assert_eq!(rows[0].aggregates.weekly.get(Material::Plastic), 3.0);
        assert_eq!(rows[1].aggregates.weekly.get(Material::Plastic), 6.0);
        // A fresh recomputation sees both entries.
        let now = ledger.aggregate_at(date(2025, 6, 2)).unwrap();
        assert_eq!(now.weekly.get(Material::Plastic), 6.0);
    }

    #[test]
    fn user_scope_ignores_other_users() {
        let mut ledger = ledger(LedgerConfig::default().with_scope(AggregationScope::User));
        let paper = Quantities::zero().with(Material::Paper, 2.0);
        ledger.record_entry("Ana", date(2025, 6, 2), paper).unwrap();
        let row = ledger.record_entry("Luis", date(2025, 6, 2), paper).unwrap();
        assert_eq!(row.aggregates.weekly.get(Material::Paper), 2.0);
    }

    #[test]
    fn all_scope_sums_every_user() {
        let mut ledger = ledger(LedgerConfig::default());
        let paper = Quantities::zero().with(Material::Paper, 2.0);
        ledger.record_entry("Ana", date(2025, 6, 2), paper).unwrap();
        let row = ledger.record_entry("Luis", date(2025, 6, 2), paper).unwrap();
        assert_eq!(row.aggregates.weekly.get(Material::Paper), 4.0);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let result = Ledger::new(
            MemoryStore::new(),
            LedgerConfig::default().with_bag_weight(0.0),
        );
        assert!(matches!(result, Err(LedgerError::Config(_))));
    }

    #[test]
    fn query_filters_rows() {
        let mut ledger = ledger(LedgerConfig::default());
        ledger
            .record_entry("Ana", date(2025, 6, 2), Quantities::zero())
            .unwrap();
        ledger
            .record_entry("Luis", date(2025, 6, 3), Quantities::zero())
            .unwrap();
        let rows = ledger.query(&RowFilter::new().with_user("lu")).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].user, "Luis");
    }
}
