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

use serde::Serialize;
use std::collections::BTreeMap;
use tally::{round2, Material, Period, PersistedRow, Quantities};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Bar,
    Pie,
    GroupedBar,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    pub values: Vec<f64>,
}

/// Renderer-agnostic description of one chart: the categories on the
/// x axis (or pie slices) and one value per category in every series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_label: Option<String>,
    pub categories: Vec<String>,
    pub series: Vec<Series>,
    /// Slice shares in percent, pie charts only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentages: Option<Vec<f64>>,
}

impl ChartSpec {
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

fn material_names() -> Vec<String> {
    Material::ALL.iter().map(|m| m.as_str().to_string()).collect()
}

fn rounded(quantities: &Quantities) -> Vec<f64> {
    quantities.iter().map(|(_, v)| round2(v)).collect()
}

/// Bar chart of bag counts summed per material.
pub fn bag_totals(rows: &[PersistedRow]) -> ChartSpec {
    let totals: Quantities = rows.iter().map(|r| r.aggregates.bags).sum();
    ChartSpec {
        kind: ChartKind::Bar,
        title: "Total bags by waste type".to_string(),
        x_label: Some("Waste type".to_string()),
        y_label: Some("Bags".to_string()),
        categories: material_names(),
        series: vec![Series {
            name: "bags".to_string(),
            values: rounded(&totals),
        }],
        percentages: None,
    }
}

/// Pie chart of how one period's kilograms split across materials. `None`
/// when there is nothing to divide.
pub fn period_distribution(rows: &[PersistedRow], period: Period) -> Option<ChartSpec> {
    let totals: Quantities = rows.iter().map(|r| *r.aggregates.period(period)).sum();
    let total = totals.total();
    if rows.is_empty() || total <= 0.0 {
        return None;
    }
    let percentages = totals
        .iter()
        .map(|(_, v)| (v / total * 1000.0).round() / 10.0)
        .collect();
    Some(ChartSpec {
        kind: ChartKind::Pie,
        title: format!("{period} waste distribution"),
        x_label: None,
        y_label: None,
        categories: material_names(),
        series: vec![Series {
            name: period.to_string(),
            values: rounded(&totals),
        }],
        percentages: Some(percentages),
    })
}

/// Grouped bars: one group per user (sorted), one bar per material.
pub fn user_comparison(rows: &[PersistedRow]) -> ChartSpec {
    let mut per_user: BTreeMap<&str, Quantities> = BTreeMap::new();
    for row in rows {
        *per_user.entry(row.user.as_str()).or_default() += row.aggregates.bags;
    }
    let series = Material::ALL
        .iter()
        .map(|material| Series {
            name: material.as_str().to_string(),
            values: per_user.values().map(|q| round2(q.get(*material))).collect(),
        })
        .collect();
    ChartSpec {
        kind: ChartKind::GroupedBar,
        title: "Bags by user and waste type".to_string(),
        x_label: Some("User".to_string()),
        y_label: Some("Bags".to_string()),
        categories: per_user.keys().map(|u| u.to_string()).collect(),
        series,
        percentages: None,
    }
}
