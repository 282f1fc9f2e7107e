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

mod cli;
mod config;
mod render;
mod session;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use cli::{Args, Command, RecordArgs};
use config::AppConfig;
use glean::{Report, ReportOutcome};
use session::Session;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tally::{CsvStore, Ledger, LedgerError, RowFilter};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

/// Exit status for rejected input, as opposed to runtime failures.
const EXIT_INVALID: u8 = 2;

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let default_level = if args.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            if is_invalid_input(&e) {
                ExitCode::from(EXIT_INVALID)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

fn is_invalid_input(e: &anyhow::Error) -> bool {
    e.chain().any(|cause| {
        cause.is::<sift::SurveyError>()
            || cause
                .downcast_ref::<LedgerError>()
                .is_some_and(LedgerError::is_validation)
    })
}

fn run(args: Args) -> Result<()> {
    if let Command::Classify { answers } = &args.command {
        return classify(answers);
    }

    let config = AppConfig::load(args.config_path().as_deref())?.with_bag_weight(args.bag_weight);
    config.validate()?;
    debug!(?config, "configuration resolved");
    let mut ledger = Ledger::new(config.storage.open(), config.ledger.clone())?;

    match args.command {
        Command::Classify { .. } => Ok(()),
        Command::Record(record) => record_entry(&mut ledger, &record),
        Command::Report { user, date, json } => report(&ledger, user, date, json),
        Command::Totals { date } => totals(&ledger, date),
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn classify(answers: &[String]) -> Result<()> {
    let stdout = io::stdout();
    if answers.is_empty() {
        let mut session = Session::new(io::stdin().lock(), stdout.lock());
        return session.run();
    }
    let parsed = sift::parse_answers(&answers.join(" "))?;
    let verdict = sift::walk(&parsed)?;
    session::print_verdict(&mut stdout.lock(), &verdict)?;
    Ok(())
}

fn record_entry(ledger: &mut Ledger<CsvStore>, args: &RecordArgs) -> Result<()> {
    let date = args.date.unwrap_or_else(today);
    let row = ledger
        .record_entry(&args.user, date, args.quantities())
        .context("saving entry")?;
    let mut out = io::stdout().lock();
    writeln!(out, "Saved entry for {} on {}", row.user, row.date)?;
    render::aggregates(&mut out, &row.aggregates)?;
    Ok(())
}

fn report(
    ledger: &Ledger<CsvStore>,
    user: Option<String>,
    date: Option<NaiveDate>,
    json: Option<PathBuf>,
) -> Result<()> {
    let mut filter = RowFilter::new();
    if let Some(user) = user {
        filter = filter.with_user(user);
    }
    if let Some(date) = date {
        filter = filter.with_date(date);
    }

    let rows = ledger.rows()?;
    let outcome = Report::build(&rows, &filter);
    if let Some(path) = json {
        outcome.write_json(&path)?;
    }

    let mut out = io::stdout().lock();
    match &outcome {
        ReportOutcome::NoData => writeln!(out, "No data has been saved yet.")?,
        ReportOutcome::NoMatches { comparison } => {
            writeln!(out, "No rows match the filter.")?;
            writeln!(out)?;
            render::chart(&mut out, comparison)?;
        }
        ReportOutcome::Ready(report) => {
            render::rows(&mut out, &report.rows)?;
            for chart in std::iter::once(&report.bags)
                .chain(&report.distributions)
                .chain(std::iter::once(&report.comparison))
            {
                writeln!(out)?;
                render::chart(&mut out, chart)?;
            }
        }
    }
    Ok(())
}

fn totals(ledger: &Ledger<CsvStore>, date: Option<NaiveDate>) -> Result<()> {
    let reference = date.unwrap_or_else(today);
    let aggregates = ledger.aggregate_at(reference)?;
    let mut out = io::stdout().lock();
    writeln!(out, "Totals over the full history as of {reference}")?;
    render::aggregates(&mut out, &aggregates)?;
    Ok(())
}
