// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;

use super::{Cell, Sheet};
use crate::aggregate::bucket_by_month;
use crate::error::EngineError;
use crate::models::{Expense, Income, Ledgered};
use crate::utils::{fmt_date_de, yes_no};

/// Label of the synthetic last row of the summary sheet.
pub const TOTAL_LABEL: &str = "GESAMT";

const SUMMARY_HEADERS: &[&str] = &["Monat", "Einnahmen (€)", "Ausgaben (€)", "Bilanz (€)"];

/// A record type that knows its export columns.
pub trait ExportRecord: Ledgered {
    const HEADERS: &'static [&'static str];

    fn cells(&self) -> Vec<Cell>;
}

impl ExportRecord for Income {
    const HEADERS: &'static [&'static str] = &[
        "Datum",
        "Betrag (€)",
        "Kategorie",
        "Mandant",
        "Rechnungsnummer",
        "Beschreibung",
    ];

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::text(fmt_date_de(self.record.date)),
            Cell::Amount(self.record.amount),
            Cell::text(&self.record.category),
            Cell::text(&self.client),
            Cell::text(self.invoice_number.clone().unwrap_or_default()),
            Cell::text(&self.record.description),
        ]
    }
}

impl ExportRecord for Expense {
    const HEADERS: &'static [&'static str] = &[
        "Datum",
        "Betrag (€)",
        "Kategorie",
        "Lieferant",
        "Belegnummer",
        "Beschreibung",
        "Steuerlich absetzbar",
    ];

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::text(fmt_date_de(self.record.date)),
            Cell::Amount(self.record.amount),
            Cell::text(&self.record.category),
            Cell::text(&self.vendor),
            Cell::text(self.receipt_number.clone().unwrap_or_default()),
            Cell::text(&self.record.description),
            Cell::text(yes_no(self.tax_deductible)),
        ]
    }
}

/// One row per record, in input order.
pub fn shape_for_export<R: ExportRecord>(records: &[R]) -> Sheet {
    let mut sheet = Sheet::new(R::KIND.label(), R::HEADERS);
    for r in records {
        sheet.push(r.cells());
    }
    sheet
}

/// One row per month (newest first) followed by the GESAMT row.
pub fn shape_summary(income: &[Income], expenses: &[Expense]) -> Result<Sheet, EngineError> {
    let buckets = bucket_by_month(income, expenses)?;

    let mut sheet = Sheet::new("Übersicht", SUMMARY_HEADERS);
    let mut total_income = Decimal::ZERO;
    let mut total_expenses = Decimal::ZERO;
    for b in &buckets {
        total_income += b.total_income();
        total_expenses += b.total_expenses();
        sheet.push(vec![
            Cell::text(b.label()),
            Cell::Amount(b.total_income()),
            Cell::Amount(b.total_expenses()),
            Cell::Amount(b.balance()),
        ]);
    }
    sheet.push(vec![
        Cell::text(TOTAL_LABEL),
        Cell::Amount(total_income),
        Cell::Amount(total_expenses),
        Cell::Amount(total_income - total_expenses),
    ]);
    Ok(sheet)
}
