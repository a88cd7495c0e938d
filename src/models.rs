// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use crate::utils::month_name_de;

/// Fields shared by every income and expense entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialRecord {
    pub id: String,
    pub date: NaiveDate,
    pub amount: Decimal,
    pub category: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Income {
    #[serde(flatten)]
    pub record: FinancialRecord,
    pub client: String,
    pub invoice_number: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    #[serde(flatten)]
    pub record: FinancialRecord,
    pub vendor: String,
    pub receipt_number: Option<String>,
    pub tax_deductible: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Income,
    Expense,
}

impl RecordKind {
    pub fn label(&self) -> &'static str {
        match self {
            RecordKind::Income => "Einnahmen",
            RecordKind::Expense => "Ausgaben",
        }
    }
}

/// Access to the shared base of a typed record.
pub trait Ledgered {
    const KIND: RecordKind;

    fn record(&self) -> &FinancialRecord;
}

impl Ledgered for Income {
    const KIND: RecordKind = RecordKind::Income;

    fn record(&self) -> &FinancialRecord {
        &self.record
    }
}

impl Ledgered for Expense {
    const KIND: RecordKind = RecordKind::Expense;

    fn record(&self) -> &FinancialRecord {
        &self.record
    }
}

/// Either kind of entry, discriminated by `type` when serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Entry {
    Income(Income),
    Expense(Expense),
}

impl Entry {
    pub fn kind(&self) -> RecordKind {
        match self {
            Entry::Income(_) => RecordKind::Income,
            Entry::Expense(_) => RecordKind::Expense,
        }
    }

    pub fn record(&self) -> &FinancialRecord {
        match self {
            Entry::Income(i) => &i.record,
            Entry::Expense(e) => &e.record,
        }
    }

    /// Client for income, vendor for expenses.
    pub fn counterparty(&self) -> &str {
        match self {
            Entry::Income(i) => &i.client,
            Entry::Expense(e) => &e.vendor,
        }
    }

    /// Invoice number for income, receipt number for expenses.
    pub fn reference(&self) -> Option<&str> {
        match self {
            Entry::Income(i) => i.invoice_number.as_deref(),
            Entry::Expense(e) => e.receipt_number.as_deref(),
        }
    }
}

impl From<Income> for Entry {
    fn from(i: Income) -> Self {
        Entry::Income(i)
    }
}

impl From<Expense> for Entry {
    fn from(e: Expense) -> Self {
        Entry::Expense(e)
    }
}

/// Totals for one calendar month. The balance is derived on every read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthBucket {
    year: i32,
    month: u32,
    total_income: Decimal,
    total_expenses: Decimal,
}

impl MonthBucket {
    pub fn new(year: i32, month: u32) -> Self {
        Self {
            year,
            month,
            total_income: Decimal::ZERO,
            total_expenses: Decimal::ZERO,
        }
    }

    pub fn containing(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn month_name(&self) -> &'static str {
        month_name_de(self.month)
    }

    /// "März 2023"
    pub fn label(&self) -> String {
        format!("{} {}", self.month_name(), self.year)
    }

    pub fn total_income(&self) -> Decimal {
        self.total_income
    }

    pub fn total_expenses(&self) -> Decimal {
        self.total_expenses
    }

    pub fn balance(&self) -> Decimal {
        self.total_income - self.total_expenses
    }

    pub(crate) fn add_income(&mut self, amount: Decimal) {
        self.total_income += amount;
    }

    pub(crate) fn add_expense(&mut self, amount: Decimal) {
        self.total_expenses += amount;
    }
}

impl Serialize for MonthBucket {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("MonthBucket", 6)?;
        s.serialize_field("year", &self.year)?;
        s.serialize_field("month", &self.month)?;
        s.serialize_field("month_name", self.month_name())?;
        s.serialize_field("total_income", &self.total_income)?;
        s.serialize_field("total_expenses", &self.total_expenses)?;
        s.serialize_field("balance", &self.balance())?;
        s.end()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryBucket {
    pub category: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearlyTotals {
    pub income: Decimal,
    pub expenses: Decimal,
    pub balance: Decimal,
}

impl YearlyTotals {
    pub fn from_sums(income: Decimal, expenses: Decimal) -> Self {
        Self {
            income,
            expenses,
            balance: income - expenses,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FinancialStatistics {
    pub monthly: Vec<MonthBucket>,
    pub current_month: MonthBucket,
    pub year_to_date: YearlyTotals,
}
