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

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn write_config(dir: &Path) -> std::path::PathBuf {
    let config = dir.join("recibot.toml");
    fs::write(
        &config,
        format!(
            "[storage]\nhistory_path = {:?}\nsnapshot_path = {:?}\n\n[ledger]\nbag_weight_kg = 3.0\n",
            dir.join("history.csv"),
            dir.join("snapshots.csv"),
        ),
    )
    .unwrap();
    config
}

fn recibot(config: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_recibot"))
        .arg("--config")
        .arg(config)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn record_then_report() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path());

    let saved = recibot(
        &config,
        &["record", "--user", "Ana", "--date", "2025-06-02", "--plastic", "6"],
    );
    assert!(saved.status.success(), "{saved:?}");
    assert!(stdout(&saved).contains("Saved entry for Ana on 2025-06-02"));

    let snapshot = fs::read_to_string(dir.path().join("snapshots.csv")).unwrap();
    assert!(snapshot.starts_with("Usuario,Fecha,"));
    assert_eq!(snapshot.lines().count(), 2);

    let json = dir.path().join("report.json");
    let report = recibot(
        &config,
        &["report", "--user", "an", "--json", json.to_str().unwrap()],
    );
    assert!(report.status.success(), "{report:?}");
    assert!(stdout(&report).contains("Total bags by waste type"));
    assert!(fs::read_to_string(&json).unwrap().contains("\"status\": \"ready\""));
}

#[test]
fn report_without_data() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path());
    let output = recibot(&config, &["report"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("No data has been saved yet."));
}

#[test]
fn rejected_entry_exits_with_invalid_status() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path());
    let output = recibot(&config, &["record", "--user", "  ", "--organic", "1"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(!dir.path().join("history.csv").exists());
}

#[test]
fn classify_with_answers() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path());
    let output = recibot(&config, &["classify", "solid,no,no,yes,yes,pet"]);
    assert!(output.status.success(), "{output:?}");
    assert!(stdout(&output).contains("Outcome: Recyclable"));

    let output = recibot(&config, &["classify", "solid", "no"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn totals_recompute_the_history() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path());
    for (date, kg) in [("2025-06-02", "2"), ("2025-06-04", "4")] {
        let out = recibot(&config, &["record", "--user", "Ana", "--date", date, "--glass", kg]);
        assert!(out.status.success());
    }
    let output = recibot(&config, &["totals", "--date", "2025-06-05"]);
    assert!(output.status.success());
    let text = stdout(&output);
    let glass = text.lines().find(|l| l.starts_with("glass")).unwrap();
    assert!(glass.contains("6.00"));
    assert!(glass.contains("2.00"));
}
