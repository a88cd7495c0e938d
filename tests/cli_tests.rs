// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use kassenbuch::commands::{Session, records, reports};
use kassenbuch::config::Settings;
use kassenbuch::store::{MemoryStore, RecordSource};
use kassenbuch::{cli, models::Entry};
use rust_decimal::Decimal;
use std::str::FromStr;
use tempfile::tempdir;

fn session() -> Session {
    let (income, expenses) = MemoryStore::seeded().unwrap().load().unwrap();
    Session::new(income, expenses, NaiveDate::from_ymd_opt(2023, 9, 15).unwrap())
}

fn sub_matches(args: &[&str]) -> clap::ArgMatches {
    let mut argv = vec!["kassenbuch"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    let (_, group) = matches.subcommand().expect("command");
    let (_, leaf) = group.subcommand().expect("subcommand");
    leaf.clone()
}

#[test]
fn monthly_report_honours_period() {
    let s = session();
    let all = reports::monthly_rows(&s, &sub_matches(&["report", "monthly"])).unwrap();
    assert_eq!(all.len(), 4);

    let this_year =
        reports::monthly_rows(&s, &sub_matches(&["report", "monthly", "--period", "this-year"]))
            .unwrap();
    let labels: Vec<String> = this_year.iter().map(|b| b.label()).collect();
    assert_eq!(labels, vec!["September 2023", "März 2023"]);
    assert_eq!(
        this_year[1].balance(),
        Decimal::from_str("1000.00").unwrap()
    );
}

#[test]
fn category_report_sorts_by_amount() {
    let s = session();
    let shares = reports::category_rows(
        &s,
        &sub_matches(&["report", "categories", "--kind", "expense"]),
    )
    .unwrap();
    assert_eq!(shares[0].category, "Büromiete");
    assert_eq!(shares[0].amount, Decimal::from(2900));
    assert_eq!(shares.last().unwrap().category, "Büromaterial");
}

#[test]
fn bad_period_is_an_error() {
    let s = session();
    assert!(
        reports::monthly_rows(&s, &sub_matches(&["report", "monthly", "--period", "gestern"]))
            .is_err()
    );
}

#[test]
fn stats_report_uses_session_today() {
    let report = reports::stats_report(&session()).unwrap();
    assert_eq!(report.statistics.current_month.label(), "September 2023");
    assert_eq!(
        report.statistics.current_month.total_expenses(),
        Decimal::from(1528)
    );
    assert_eq!(report.overall.balance, Decimal::from(44));
}

#[test]
fn list_income_is_newest_first() {
    let rows = records::income_rows(&session(), &sub_matches(&["list", "income"])).unwrap();
    let ids: Vec<&str> = rows.iter().map(|e| e.record().id.as_str()).collect();
    assert_eq!(ids, vec!["253", "2", "1"]);
    assert!(rows.iter().all(|e| matches!(e, Entry::Income(_))));
}

#[test]
fn global_flags_reach_the_session() {
    let dir = tempdir().unwrap();
    let data = dir.path().join("records.json");
    std::fs::write(
        &data,
        r#"{"income": [{"id": "x", "date": "2022-02-02", "amount": "5", "client": "C"}]}"#,
    )
    .unwrap();
    let config = dir.path().join("settings.json");
    std::fs::write(&config, r#"{"export_format": "csv"}"#).unwrap();

    let matches = cli::build_cli().get_matches_from([
        "kassenbuch",
        "report",
        "monthly",
        "--data",
        data.to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
        "--today",
        "2022-02-10",
    ]);
    let s = Session::open(&matches).unwrap();
    assert_eq!(s.income.len(), 1);
    assert!(s.expenses.is_empty());
    assert_eq!(s.today, NaiveDate::from_ymd_opt(2022, 2, 10).unwrap());
    assert_eq!(s.settings.export_format(), "csv");
}

#[test]
fn missing_settings_file_means_defaults() {
    let dir = tempdir().unwrap();
    let s = Settings::load_from(&dir.path().join("absent.json")).unwrap();
    assert_eq!(s, Settings::default());
    assert_eq!(s.export_format(), "xlsx");
}
