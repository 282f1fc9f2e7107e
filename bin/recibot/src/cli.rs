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

use chrono::NaiveDate;
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::env;
use std::path::PathBuf;
use tally::{Material, Quantities};

pub const CONFIG_ENV: &str = "RECIBOT_CONFIG";

#[derive(Parser, Debug)]
#[command(name = "recibot", version)]
#[command(about = "Waste sorting survey and household waste ledger")]
pub struct Args {
    #[arg(short, long, global = true, help = "Path to a TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Override the bag weight in kilograms")]
    pub bag_weight: Option<f64>,

    #[arg(short, long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    pub fn config_path(&self) -> Option<PathBuf> {
        self.config
            .clone()
            .or_else(|| env::var(CONFIG_ENV).ok().map(PathBuf::from))
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Classify an item. Without answers the survey runs interactively.
    Classify {
        #[arg(help = "Answers in order, e.g. solid no yes")]
        answers: Vec<String>,
    },
    /// Log one day's waste and save the aggregate snapshot.
    Record(RecordArgs),
    /// Show saved snapshots and the chart series built from them.
    Report {
        #[arg(short, long, help = "Case-insensitive part of a user name")]
        user: Option<String>,
        #[arg(long, help = "Exact date, YYYY-MM-DD")]
        date: Option<NaiveDate>,
        #[arg(long, help = "Write the report as JSON to this path")]
        json: Option<PathBuf>,
    },
    /// Recompute weekly, monthly and annual totals over the full history.
    Totals {
        #[arg(long, help = "Reference date, defaults to today")]
        date: Option<NaiveDate>,
    },
}

#[derive(ClapArgs, Debug)]
pub struct RecordArgs {
    #[arg(short, long)]
    pub user: String,
    #[arg(long, help = "Entry date, defaults to today")]
    pub date: Option<NaiveDate>,
    #[arg(long, default_value_t = 0.0)]
    pub organic: f64,
    #[arg(long, default_value_t = 0.0)]
    pub plastic: f64,
    #[arg(long, default_value_t = 0.0)]
    pub paper: f64,
    #[arg(long, default_value_t = 0.0)]
    pub glass: f64,
    #[arg(long, default_value_t = 0.0)]
    pub metal: f64,
    #[arg(long, default_value_t = 0.0)]
    pub non_recyclable: f64,
}

impl RecordArgs {
    pub fn quantities(&self) -> Quantities {
        Quantities::from_pairs([
            (Material::Organic, self.organic),
            (Material::Plastic, self.plastic),
            (Material::Paper, self.paper),
            (Material::Glass, self.glass),
            (Material::Metal, self.metal),
            (Material::NonRecyclable, self.non_recyclable),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_record_flags() {
        let args = Args::parse_from([
            "recibot",
            "record",
            "--user",
            "Ana",
            "--date",
            "2025-06-02",
            "--plastic",
            "6",
            "--non-recyclable",
            "0.5",
        ]);
        let Command::Record(record) = args.command else {
            panic!("expected record");
        };
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2025, 6, 2));
        let q = record.quantities();
        assert_eq!(q.get(Material::Plastic), 6.0);
        assert_eq!(q.get(Material::NonRecyclable), 0.5);
        assert_eq!(q.get(Material::Organic), 0.0);
    }

    #[test]
    fn classify_takes_free_answers() {
        let args = Args::parse_from(["recibot", "classify", "solid", "yes", "yes"]);
        match args.command {
            Command::Classify { answers } => assert_eq!(answers, ["solid", "yes", "yes"]),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn global_flags_follow_the_subcommand() {
        let args = Args::parse_from(["recibot", "totals", "--bag-weight", "5", "--debug"]);
        assert_eq!(args.bag_weight, Some(5.0));
        assert!(args.debug);
    }
}
