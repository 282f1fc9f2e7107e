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

use crate::material::Quantities;
use crate::record::WasteRecord;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::fmt;
use tracing::debug;

pub const DEFAULT_BAG_WEIGHT_KG: f64 = 3.0;

/// A reporting window anchored on a reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    /// The ISO-8601 week (Monday start) containing the reference date.
    Weekly,
    /// The calendar month of the reference date.
    Monthly,
    /// The calendar year of the reference date.
    Annual,
}

impl Period {
    pub const ALL: [Period; 3] = [Period::Weekly, Period::Monthly, Period::Annual];

    pub fn contains(&self, date: NaiveDate, reference: NaiveDate) -> bool {
        match self {
            Period::Weekly => date.iso_week() == reference.iso_week(),
            Period::Monthly => date.year() == reference.year() && date.month() == reference.month(),
            Period::Annual => date.year() == reference.year(),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Period::Weekly => "weekly",
            Period::Monthly => "monthly",
            Period::Annual => "annual",
        };
        f.write_str(name)
    }
}

/// Aggregates for one reference date, rounded to two decimals.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Aggregates {
    /// Estimated bag count, derived from the weekly bucket only.
    pub bags: Quantities,
    pub weekly: Quantities,
    pub monthly: Quantities,
    pub annual: Quantities,
}

impl Aggregates {
    pub fn period(&self, period: Period) -> &Quantities {
        match period {
            Period::Weekly => &self.weekly,
            Period::Monthly => &self.monthly,
            Period::Annual => &self.annual,
        }
    }
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Buckets `history` into the week, month and year of `reference`.
///
/// Each bucket test is independent. Near a year boundary the ISO week can
/// belong to a different calendar year than the date, so a record may land
/// in the weekly bucket without landing in the annual one.
pub fn aggregate(
    history: &[WasteRecord],
    reference: NaiveDate,
    bag_weight_kg: f64,
) -> Aggregates {
    debug_assert!(bag_weight_kg > 0.0, "bag weight must be positive");
    let mut weekly = Quantities::zero();
    let mut monthly = Quantities::zero();
    let mut annual = Quantities::zero();

    for record in history {
        let date = record.date();
        if Period::Annual.contains(date, reference) {
            annual += *record.quantities();
        }
        if Period::Monthly.contains(date, reference) {
            monthly += *record.quantities();
        }
        if Period::Weekly.contains(date, reference) {
            weekly += *record.quantities();
        }
    }

    let aggregates = Aggregates {
        bags: weekly.map(|kg| round2(kg / bag_weight_kg)),
        weekly: weekly.map(round2),
        monthly: monthly.map(round2),
        annual: annual.map(round2),
    };
    debug!(
        records = history.len(),
        %reference,
        weekly_kg = aggregates.weekly.total(),
        monthly_kg = aggregates.monthly.total(),
        annual_kg = aggregates.annual.total(),
        "aggregated history"
    );
    aggregates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Material;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(on: NaiveDate, material: Material, kg: f64) -> WasteRecord {
        WasteRecord::new("tester", on, Quantities::zero().with(material, kg)).unwrap()
    }

    #[test]
    fn same_iso_week_fills_every_bucket() {
        let history = [record(date(2025, 6, 2), Material::Plastic, 6.0)];
        let agg = aggregate(&history, date(2025, 6, 3), DEFAULT_BAG_WEIGHT_KG);
        assert_eq!(agg.weekly.get(Material::Plastic), 6.0);
        assert_eq!(agg.bags.get(Material::Plastic), 2.0);
        assert_eq!(agg.monthly.get(Material::Plastic), 6.0);
        assert_eq!(agg.annual.get(Material::Plastic), 6.0);
    }

    #[test]
    fn new_years_day_counts_toward_annual_only() {
        let history = [record(date(2025, 1, 1), Material::Glass, 4.0)];
        let agg = aggregate(&history, date(2025, 6, 3), DEFAULT_BAG_WEIGHT_KG);
        assert_eq!(agg.annual.get(Material::Glass), 4.0);
        assert_eq!(agg.monthly.get(Material::Glass), 0.0);
        assert_eq!(agg.weekly.get(Material::Glass), 0.0);
        assert_eq!(agg.bags.get(Material::Glass), 0.0);
    }

    #[test]
    fn same_month_other_week_skips_weekly() {
        // 2025-06-09 is the Monday of ISO week 24.
        let history = [record(date(2025, 6, 9), Material::Paper, 1.5)];
        let agg = aggregate(&history, date(2025, 6, 3), DEFAULT_BAG_WEIGHT_KG);
        assert_eq!(agg.monthly.get(Material::Paper), 1.5);
        assert_eq!(agg.weekly.get(Material::Paper), 0.0);
    }

    #[test]
    fn week_is_monday_to_sunday() {
        let reference = date(2025, 6, 3);
        assert!(Period::Weekly.contains(date(2025, 6, 2), reference));
        assert!(Period::Weekly.contains(date(2025, 6, 8), reference));
        assert!(!Period::Weekly.contains(date(2025, 6, 1), reference));
        assert!(!Period::Weekly.contains(date(2025, 6, 9), reference));
    }

    #[test]
    fn iso_week_can_cross_the_calendar_year() {
        // 2024-12-30 falls in ISO week 1 of 2025.
        let history = [record(date(2024, 12, 30), Material::Metal, 3.0)];
        let agg = aggregate(&history, date(2025, 1, 2), DEFAULT_BAG_WEIGHT_KG);
        assert_eq!(agg.weekly.get(Material::Metal), 3.0);
        assert_eq!(agg.annual.get(Material::Metal), 0.0);
    }

    #[test]
    fn sums_are_rounded_to_two_decimals() {
        let on = date(2025, 6, 3);
        let history = [
            record(on, Material::Organic, 0.1),
            record(on, Material::Organic, 0.2),
            record(on, Material::Organic, 1.0),
        ];
        let agg = aggregate(&history, on, DEFAULT_BAG_WEIGHT_KG);
        assert_eq!(agg.weekly.get(Material::Organic), 1.3);
        assert_eq!(agg.bags.get(Material::Organic), 0.43);
    }

    #[test]
    fn custom_bag_weight_changes_only_bags() {
        let on = date(2025, 6, 3);
        let history = [record(on, Material::Plastic, 5.0)];
        let agg = aggregate(&history, on, 2.0);
        assert_eq!(agg.bags.get(Material::Plastic), 2.5);
        assert_eq!(agg.weekly.get(Material::Plastic), 5.0);
    }

    #[test]
    fn empty_history_yields_all_zero_buckets() {
        let agg = aggregate(&[], date(2025, 6, 3), DEFAULT_BAG_WEIGHT_KG);
        for period in Period::ALL {
            assert!(agg.period(period).iter().all(|(_, v)| v == 0.0));
        }
        assert_eq!(agg, Aggregates::default());
    }
}
