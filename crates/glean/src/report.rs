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

use crate::chart::{bag_totals, period_distribution, user_comparison, ChartSpec};
use crate::error::{ReportError, Result};
use serde::Serialize;
use std::path::Path;
use tally::store::atomic_write;
use tally::{Period, PersistedRow, RowFilter};
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// Rows that passed the filter, in storage order.
    pub rows: Vec<PersistedRow>,
    pub bags: ChartSpec,
    /// One pie per period with a non-zero total, weekly first.
    pub distributions: Vec<ChartSpec>,
    /// Always computed over every stored row, regardless of the filter.
    pub comparison: ChartSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ReportOutcome {
    /// Nothing has been stored yet.
    NoData,
    /// The filter matched no rows; the user comparison is still available.
    NoMatches { comparison: ChartSpec },
    Ready(Report),
}

impl Report {
    pub fn build(all_rows: &[PersistedRow], filter: &RowFilter) -> ReportOutcome {
        if all_rows.is_empty() {
            debug!("no stored rows");
            return ReportOutcome::NoData;
        }
        let comparison = user_comparison(all_rows);
        let rows: Vec<PersistedRow> = all_rows
            .iter()
            .filter(|row| filter.matches(row))
            .cloned()
            .collect();
        if rows.is_empty() {
            debug!(?filter, "filter matched no rows");
            return ReportOutcome::NoMatches { comparison };
        }

        let distributions = Period::ALL
            .iter()
            .filter_map(|period| period_distribution(&rows, *period))
            .collect();
        ReportOutcome::Ready(Report {
            bags: bag_totals(&rows),
            distributions,
            comparison,
            rows,
        })
    }
}

impl ReportOutcome {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        atomic_write(path, json.as_bytes()).map_err(|source| ReportError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), "report written");
        Ok(())
    }
}
