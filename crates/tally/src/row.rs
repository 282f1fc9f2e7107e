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

use crate::aggregate::{Aggregates, Period};
use crate::material::{Material, Quantities};
use chrono::NaiveDate;
use serde::Serialize;

pub const USER_COLUMN: &str = "Usuario";
pub const DATE_COLUMN: &str = "Fecha";
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Column groups of the snapshot table, in file order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnGroup {
    Bags,
    Period(Period),
}

impl ColumnGroup {
    pub const ALL: [ColumnGroup; 4] = [
        ColumnGroup::Bags,
        ColumnGroup::Period(Period::Weekly),
        ColumnGroup::Period(Period::Monthly),
        ColumnGroup::Period(Period::Annual),
    ];

    pub fn prefix(&self) -> &'static str {
        match self {
            ColumnGroup::Bags => "Bolsas",
            ColumnGroup::Period(Period::Weekly) => "Semanal",
            ColumnGroup::Period(Period::Monthly) => "Mensual",
            ColumnGroup::Period(Period::Annual) => "Anual",
        }
    }

    pub fn column(&self, material: Material) -> String {
        format!("{}_{}", self.prefix(), material.as_str())
    }

    pub fn select<'a>(&self, aggregates: &'a Aggregates) -> &'a Quantities {
        match self {
            ColumnGroup::Bags => &aggregates.bags,
            ColumnGroup::Period(period) => aggregates.period(*period),
        }
    }

    pub(crate) fn select_mut<'a>(&self, aggregates: &'a mut Aggregates) -> &'a mut Quantities {
        match self {
            ColumnGroup::Bags => &mut aggregates.bags,
            ColumnGroup::Period(Period::Weekly) => &mut aggregates.weekly,
            ColumnGroup::Period(Period::Monthly) => &mut aggregates.monthly,
            ColumnGroup::Period(Period::Annual) => &mut aggregates.annual,
        }
    }
}

/// Header of the snapshot table: user, date, then 24 aggregate columns.
pub fn snapshot_headers() -> Vec<String> {
    let mut headers = vec![USER_COLUMN.to_string(), DATE_COLUMN.to_string()];
    for group in ColumnGroup::ALL {
        headers.extend(Material::ALL.iter().map(|m| group.column(*m)));
    }
    headers
}

/// Header of the raw history log: user, date, one column per material.
pub fn history_headers() -> Vec<String> {
    let mut headers = vec![USER_COLUMN.to_string(), DATE_COLUMN.to_string()];
    headers.extend(Material::ALL.iter().map(|m| m.as_str().to_string()));
    headers
}

/// One saved snapshot. The aggregates are frozen as of the save: later
/// entries never rewrite earlier rows, so old rows can be stale relative to
/// a fresh recomputation over the full history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersistedRow {
    pub user: String,
    pub date: NaiveDate,
    #[serde(flatten)]
    pub aggregates: Aggregates,
}

impl PersistedRow {
    /// Values in [`snapshot_headers`] order.
    pub fn to_fields(&self) -> Vec<String> {
        let mut fields = vec![self.user.clone(), self.date.format(DATE_FORMAT).to_string()];
        for group in ColumnGroup::ALL {
            fields.extend(
                group
                    .select(&self.aggregates)
                    .iter()
                    .map(|(_, value)| format_quantity(value)),
            );
        }
        fields
    }
}

pub fn format_quantity(value: f64) -> String {
    format!("{value:.2}")
}

/// Row selection for reports: case-insensitive user substring and exact date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowFilter {
    pub user: Option<String>,
    pub date: Option<NaiveDate>,
}

impl RowFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.user_needle().is_none() && self.date.is_none()
    }

    fn user_needle(&self) -> Option<String> {
        self.user
            .as_deref()
            .filter(|u| !u.is_empty())
            .map(str::to_lowercase)
    }

    pub fn matches(&self, row: &PersistedRow) -> bool {
        let user_ok = self
            .user_needle()
            .map_or(true, |needle| row.user.to_lowercase().contains(&needle));
        let date_ok = self.date.map_or(true, |date| row.date == date);
        user_ok && date_ok
    }

    pub fn apply(&self, rows: Vec<PersistedRow>) -> Vec<PersistedRow> {
        rows.into_iter().filter(|row| self.matches(row)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(user: &str, day: u32) -> PersistedRow {
        PersistedRow {
            user: user.to_string(),
            date: NaiveDate::from_ymd_opt(2025, 6, day).unwrap(),
            aggregates: Aggregates::default(),
        }
    }

    #[test]
    fn snapshot_header_layout() {
        let headers = snapshot_headers();
        assert_eq!(headers.len(), 26);
        assert_eq!(headers[0], "Usuario");
        assert_eq!(headers[1], "Fecha");
        assert_eq!(headers[2], "Bolsas_organic");
        assert_eq!(headers[7], "Bolsas_non_recyclable");
        assert_eq!(headers[8], "Semanal_organic");
        assert_eq!(headers[14], "Mensual_organic");
        assert_eq!(headers[25], "Anual_non_recyclable");
    }

    #[test]
    fn fields_follow_header_order() {
        let mut r = row("Ana", 3);
        r.aggregates.bags.set(Material::Plastic, 2.0);
        r.aggregates.annual.set(Material::NonRecyclable, 12.5);
        let fields = r.to_fields();
        assert_eq!(fields.len(), snapshot_headers().len());
        assert_eq!(fields[1], "2025-06-03");
        assert_eq!(fields[3], "2.00");
        assert_eq!(fields[25], "12.50");
    }

    #[test]
    fn user_filter_is_case_insensitive_substring() {
        let filter = RowFilter::new().with_user("AN");
        assert!(filter.matches(&row("ana", 3)));
        assert!(filter.matches(&row("Juan", 3)));
        assert!(!filter.matches(&row("Luis", 3)));
    }

    #[test]
    fn blank_user_filter_matches_everything() {
        let filter = RowFilter::new().with_user("");
        assert!(filter.is_empty());
        assert!(filter.matches(&row("Luis", 3)));
    }

    #[test]
    fn date_filter_is_exact() {
        let filter = RowFilter::new().with_date(NaiveDate::from_ymd_opt(2025, 6, 3).unwrap());
        let kept = filter.apply(vec![row("a", 3), row("b", 4), row("c", 3)]);
        let users: Vec<_> = kept.iter().map(|r| r.user.as_str()).collect();
        assert_eq!(users, ["a", "c"]);
    }
}
