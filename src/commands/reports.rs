// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::Datelike;
use serde::Serialize;

use super::{period_arg, Session};
use crate::aggregate::{
    bucket_by_category, bucket_by_month, filter_period, monthly_series, overall_totals,
    statistics, yearly_totals, CategoryShare,
};
use crate::models::{FinancialStatistics, MonthBucket, YearlyTotals};
use crate::utils::{fmt_eur, fmt_percent, maybe_print_json, pretty_table};

pub fn handle(session: &Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("monthly", sub)) => monthly(session, sub)?,
        Some(("categories", sub)) => categories(session, sub)?,
        Some(("yearly", sub)) => yearly(session, sub)?,
        Some(("series", sub)) => series(session, sub)?,
        Some(("stats", sub)) => stats(session, sub)?,
        _ => {}
    }
    Ok(())
}

fn month_table_rows(buckets: &[MonthBucket]) -> Vec<Vec<String>> {
    buckets
        .iter()
        .map(|b| {
            vec![
                b.label(),
                fmt_eur(&b.total_income()),
                fmt_eur(&b.total_expenses()),
                fmt_eur(&b.balance()),
            ]
        })
        .collect()
}

pub fn monthly_rows(session: &Session, sub: &clap::ArgMatches) -> Result<Vec<MonthBucket>> {
    let period = period_arg(sub)?;
    let income = filter_period(&session.income, period, session.today);
    let expenses = filter_period(&session.expenses, period, session.today);
    Ok(bucket_by_month(&income, &expenses)?)
}

fn monthly(session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let buckets = monthly_rows(session, sub)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &buckets)? {
        println!(
            "{}",
            pretty_table(
                &["Monat", "Einnahmen", "Ausgaben", "Bilanz"],
                month_table_rows(&buckets)
            )
        );
    }
    Ok(())
}

pub fn category_rows(session: &Session, sub: &clap::ArgMatches) -> Result<Vec<CategoryShare>> {
    let period = period_arg(sub)?;
    let breakdown = match sub.get_one::<String>("kind").map(String::as_str) {
        Some("expense") => {
            bucket_by_category(&filter_period(&session.expenses, period, session.today))?
        }
        _ => bucket_by_category(&filter_period(&session.income, period, session.today))?,
    };
    Ok(breakdown.sorted_by_amount())
}

fn categories(session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let shares = category_rows(session, sub)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &shares)? {
        let rows = shares
            .iter()
            .map(|s| {
                vec![
                    s.category.clone(),
                    fmt_eur(&s.amount),
                    fmt_percent(&s.percentage),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Kategorie", "Betrag", "Anteil"], rows));
    }
    Ok(())
}

fn totals_rows(label: String, t: &YearlyTotals) -> Vec<Vec<String>> {
    vec![vec![
        label,
        fmt_eur(&t.income),
        fmt_eur(&t.expenses),
        fmt_eur(&t.balance),
    ]]
}

fn year_arg(session: &Session, sub: &clap::ArgMatches) -> i32 {
    sub.get_one::<i32>("year")
        .copied()
        .unwrap_or_else(|| session.today.year())
}

fn yearly(session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let year = year_arg(session, sub);
    let totals = yearly_totals(&session.income, &session.expenses, year)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &totals)? {
        println!(
            "{}",
            pretty_table(
                &["Jahr", "Einnahmen", "Ausgaben", "Bilanz"],
                totals_rows(year.to_string(), &totals)
            )
        );
    }
    Ok(())
}

fn series(session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let year = year_arg(session, sub);
    let buckets = monthly_series(&session.income, &session.expenses, year)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &buckets)? {
        println!(
            "{}",
            pretty_table(
                &["Monat", "Einnahmen", "Ausgaben", "Bilanz"],
                month_table_rows(&buckets)
            )
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct StatsReport {
    #[serde(flatten)]
    pub statistics: FinancialStatistics,
    pub overall: YearlyTotals,
}

pub fn stats_report(session: &Session) -> Result<StatsReport> {
    Ok(StatsReport {
        statistics: statistics(&session.income, &session.expenses, session.today)?,
        overall: overall_totals(&session.income, &session.expenses)?,
    })
}

fn stats(session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let report = stats_report(session)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &report)? {
        let s = &report.statistics;
        let current = YearlyTotals::from_sums(
            s.current_month.total_income(),
            s.current_month.total_expenses(),
        );
        let mut rows = totals_rows(s.current_month.label(), &current);
        rows.extend(totals_rows(
            format!("{} bis {}", session.today.year(), session.today.format("%d.%m.")),
            &s.year_to_date,
        ));
        rows.extend(totals_rows("Gesamt".to_string(), &report.overall));
        println!(
            "{}",
            pretty_table(&["Zeitraum", "Einnahmen", "Ausgaben", "Bilanz"], rows)
        );
    }
    Ok(())
}
