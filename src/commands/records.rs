// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use super::{period_arg, Session};
use crate::aggregate::filter_period;
use crate::models::{Entry, Expense, Income};
use crate::utils::{fmt_date_de, fmt_eur, maybe_print_json, pretty_table, yes_no};

pub fn handle(session: &Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("income", sub)) => {
            let rows = income_rows(session, sub)?;
            print_entries(sub, &rows, "Mandant", "Rechnungsnr.")?;
        }
        Some(("expenses", sub)) => {
            let rows = expense_rows(session, sub)?;
            print_entries(sub, &rows, "Lieferant", "Belegnr.")?;
        }
        _ => {}
    }
    Ok(())
}

/// Income in the requested period, newest first.
pub fn income_rows(session: &Session, sub: &clap::ArgMatches) -> Result<Vec<Entry>> {
    let mut income: Vec<Income> = filter_period(&session.income, period_arg(sub)?, session.today);
    income.sort_by(|a, b| b.record.date.cmp(&a.record.date));
    Ok(income.into_iter().map(Entry::from).collect())
}

/// Expenses in the requested period, newest first.
pub fn expense_rows(session: &Session, sub: &clap::ArgMatches) -> Result<Vec<Entry>> {
    let mut expenses: Vec<Expense> =
        filter_period(&session.expenses, period_arg(sub)?, session.today);
    expenses.sort_by(|a, b| b.record.date.cmp(&a.record.date));
    Ok(expenses.into_iter().map(Entry::from).collect())
}

fn print_entries(
    sub: &clap::ArgMatches,
    entries: &[Entry],
    party_header: &str,
    ref_header: &str,
) -> Result<()> {
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &entries)? {
        return Ok(());
    }
    let rows = entries
        .iter()
        .map(|e| {
            let rec = e.record();
            let mut row = vec![
                fmt_date_de(rec.date),
                fmt_eur(&rec.amount),
                rec.category.clone(),
                e.counterparty().to_string(),
                e.reference().unwrap_or_default().to_string(),
                rec.description.clone(),
            ];
            if let Entry::Expense(x) = e {
                row.push(yes_no(x.tax_deductible).to_string());
            }
            row
        })
        .collect();
    let mut headers = vec![
        "Datum",
        "Betrag",
        "Kategorie",
        party_header,
        ref_header,
        "Beschreibung",
    ];
    if entries.first().is_some_and(|e| matches!(e, Entry::Expense(_))) {
        headers.push("Absetzbar");
    }
    println!("{}", pretty_table(&headers, rows));
    Ok(())
}
