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

//! Plain-text views of aggregates, snapshot rows and chart specs.

use glean::{ChartKind, ChartSpec};
use std::io::{self, Write};
use tally::{Aggregates, ColumnGroup, Material, PersistedRow};

const BAR_WIDTH: f64 = 30.0;

/// One line per material with its bags and period totals.
pub fn aggregates(out: &mut impl Write, aggregates: &Aggregates) -> io::Result<()> {
    write!(out, "{:<16}", "material")?;
    for group in ColumnGroup::ALL {
        write!(out, "{:>10}", group.prefix())?;
    }
    writeln!(out)?;
    for material in Material::ALL {
        write!(out, "{:<16}", material.as_str())?;
        for group in ColumnGroup::ALL {
            write!(out, "{:>10.2}", group.select(aggregates).get(material))?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Compact listing of stored snapshots: user, date and bag total.
pub fn rows(out: &mut impl Write, rows: &[PersistedRow]) -> io::Result<()> {
    writeln!(out, "{:<20}{:<12}{:>8}{:>10}", "user", "date", "bags", "week kg")?;
    for row in rows {
        writeln!(
            out,
            "{:<20}{:<12}{:>8.2}{:>10.2}",
            row.user,
            row.date,
            row.aggregates.bags.total(),
            row.aggregates.weekly.total()
        )?;
    }
    Ok(())
}

pub fn chart(out: &mut impl Write, chart: &ChartSpec) -> io::Result<()> {
    writeln!(out, "{}", chart.title)?;
    if chart.is_empty() {
        return writeln!(out, "  (no data)");
    }
    match chart.kind {
        ChartKind::Pie => pie(out, chart),
        ChartKind::Bar | ChartKind::GroupedBar => bars(out, chart),
    }
}

fn pie(out: &mut impl Write, chart: &ChartSpec) -> io::Result<()> {
    let shares = chart.percentages.as_deref().unwrap_or_default();
    for (category, share) in chart.categories.iter().zip(shares) {
        writeln!(out, "  {category:<16}{share:>6.1}%  {}", bar(*share, 100.0))?;
    }
    Ok(())
}

fn bars(out: &mut impl Write, chart: &ChartSpec) -> io::Result<()> {
    let max = chart
        .series
        .iter()
        .flat_map(|s| s.values.iter().copied())
        .fold(0.0_f64, f64::max);
    for (index, category) in chart.categories.iter().enumerate() {
        if chart.series.len() > 1 {
            writeln!(out, "  {category}")?;
        }
        for series in &chart.series {
            let value = series.values.get(index).copied().unwrap_or(0.0);
            let label = if chart.series.len() > 1 { &series.name } else { category };
            writeln!(out, "  {label:<16}{value:>8.2}  {}", bar(value, max))?;
        }
    }
    Ok(())
}

fn bar(value: f64, max: f64) -> String {
    if max <= 0.0 || value <= 0.0 {
        return String::new();
    }
    "#".repeat((value / max * BAR_WIDTH).round() as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally::{aggregate, Quantities, WasteRecord};

    fn text(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn aggregates_table_lists_every_material() {
        let date = "2025-06-02".parse().unwrap();
        let record = WasteRecord::new(
            "Ana",
            date,
            Quantities::zero().with(Material::Plastic, 6.0),
        )
        .unwrap();
        let totals = aggregate(&[record], date, 3.0);
        let out = text(|buf| aggregates(buf, &totals));
        assert_eq!(out.lines().count(), 1 + Material::COUNT);
        let plastic = out.lines().find(|l| l.starts_with("plastic")).unwrap();
        assert!(plastic.contains("2.00"));
        assert!(plastic.contains("6.00"));
    }

    #[test]
    fn bar_scales_to_the_largest_value() {
        assert_eq!(bar(10.0, 10.0).len(), 30);
        assert_eq!(bar(5.0, 10.0).len(), 15);
        assert!(bar(0.0, 10.0).is_empty());
        assert!(bar(1.0, 0.0).is_empty());
    }

    #[test]
    fn empty_chart_says_so() {
        let chart = glean::user_comparison(&[]);
        let out = text(|buf| super::chart(buf, &chart));
        assert!(out.contains("(no data)"));
    }
}
