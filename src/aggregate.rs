// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Month and category aggregation over income and expense collections.
//!
//! Every function here is pure: records go in, freshly allocated buckets come
//! out. Nothing is cached between calls, so a changed record collection is
//! simply aggregated again.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use crate::error::EngineError;
use crate::models::{
    CategoryBucket, Expense, FinancialStatistics, Income, Ledgered, MonthBucket, RecordKind,
    YearlyTotals,
};

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

fn check_amounts<R: Ledgered>(records: &[R]) -> Result<(), EngineError> {
    for r in records {
        let rec = r.record();
        if rec.amount.is_sign_negative() && !rec.amount.is_zero() {
            return Err(EngineError::NegativeAmount {
                kind: R::KIND,
                id: rec.id.clone(),
                amount: rec.amount,
            });
        }
    }
    Ok(())
}

fn sum<R: Ledgered>(records: &[R]) -> Decimal {
    records.iter().map(|r| r.record().amount).sum()
}

/// Groups both collections by calendar month, newest month first.
pub fn bucket_by_month(
    income: &[Income],
    expenses: &[Expense],
) -> Result<Vec<MonthBucket>, EngineError> {
    check_amounts(income)?;
    check_amounts(expenses)?;

    let mut map: BTreeMap<(i32, u32), MonthBucket> = BTreeMap::new();
    for i in income {
        let d = i.record.date;
        map.entry((d.year(), d.month()))
            .or_insert_with(|| MonthBucket::containing(d))
            .add_income(i.record.amount);
    }
    for e in expenses {
        let d = e.record.date;
        map.entry((d.year(), d.month()))
            .or_insert_with(|| MonthBucket::containing(d))
            .add_expense(e.record.amount);
    }

    debug!(
        income = income.len(),
        expenses = expenses.len(),
        buckets = map.len(),
        "bucketed records by month"
    );
    Ok(map.into_values().rev().collect())
}

/// Twelve buckets, January to December of `year`, zero months included.
pub fn monthly_series(
    income: &[Income],
    expenses: &[Expense],
    year: i32,
) -> Result<Vec<MonthBucket>, EngineError> {
    let mut series: Vec<MonthBucket> = (1..=12).map(|m| MonthBucket::new(year, m)).collect();
    for b in bucket_by_month(income, expenses)? {
        if b.year() == year {
            let slot = &mut series[(b.month() - 1) as usize];
            slot.add_income(b.total_income());
            slot.add_expense(b.total_expenses());
        }
    }
    Ok(series)
}

/// Per-category sums for one kind of record, in first-encountered order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryBreakdown {
    pub kind: RecordKind,
    pub buckets: Vec<CategoryBucket>,
    pub total: Decimal,
}

/// A category with its share of the breakdown total, for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: String,
    pub amount: Decimal,
    pub percentage: Decimal,
}

impl CategoryBreakdown {
    pub fn amount(&self, category: &str) -> Option<Decimal> {
        self.buckets
            .iter()
            .find(|b| b.category == category)
            .map(|b| b.amount)
    }

    /// Unrounded share of the total. A zero total gives 0 for every category.
    pub fn percentage_of(&self, amount: Decimal) -> Decimal {
        if self.total.is_zero() {
            return Decimal::ZERO;
        }
        amount / self.total * HUNDRED
    }

    pub fn percentage(&self, category: &str) -> Decimal {
        self.amount(category)
            .map(|a| self.percentage_of(a))
            .unwrap_or(Decimal::ZERO)
    }

    /// Largest amount first; equal amounts keep their first-encountered order.
    pub fn sorted_by_amount(&self) -> Vec<CategoryShare> {
        let mut shares: Vec<CategoryShare> = self
            .buckets
            .iter()
            .map(|b| CategoryShare {
                category: b.category.clone(),
                amount: b.amount,
                percentage: self.percentage_of(b.amount),
            })
            .collect();
        shares.sort_by(|a, b| b.amount.cmp(&a.amount));
        shares
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

/// Sums amounts per exact category string.
pub fn bucket_by_category<R: Ledgered>(records: &[R]) -> Result<CategoryBreakdown, EngineError> {
    check_amounts(records)?;

    let mut buckets: Vec<CategoryBucket> = Vec::new();
    for r in records {
        let rec = r.record();
        match buckets.iter_mut().find(|b| b.category == rec.category) {
            Some(b) => b.amount += rec.amount,
            None => buckets.push(CategoryBucket {
                category: rec.category.clone(),
                amount: rec.amount,
            }),
        }
    }
    let total = buckets.iter().map(|b| b.amount).sum();

    debug!(kind = ?R::KIND, categories = buckets.len(), "bucketed records by category");
    Ok(CategoryBreakdown {
        kind: R::KIND,
        buckets,
        total,
    })
}

pub fn yearly_totals(
    income: &[Income],
    expenses: &[Expense],
    year: i32,
) -> Result<YearlyTotals, EngineError> {
    check_amounts(income)?;
    check_amounts(expenses)?;
    let inc: Decimal = income
        .iter()
        .filter(|i| i.record.date.year() == year)
        .map(|i| i.record.amount)
        .sum();
    let exp: Decimal = expenses
        .iter()
        .filter(|e| e.record.date.year() == year)
        .map(|e| e.record.amount)
        .sum();
    Ok(YearlyTotals::from_sums(inc, exp))
}

/// All-time totals, as shown in the dashboard header.
pub fn overall_totals(income: &[Income], expenses: &[Expense]) -> Result<YearlyTotals, EngineError> {
    check_amounts(income)?;
    check_amounts(expenses)?;
    Ok(YearlyTotals::from_sums(sum(income), sum(expenses)))
}

/// Reporting window. The relative variants are resolved against a caller-supplied date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    All,
    ThisMonth,
    ThisYear,
    Year(i32),
    Month(i32, u32),
}

impl Period {
    pub fn contains(&self, date: NaiveDate, today: NaiveDate) -> bool {
        match *self {
            Period::All => true,
            Period::ThisMonth => date.year() == today.year() && date.month() == today.month(),
            Period::ThisYear => date.year() == today.year(),
            Period::Year(y) => date.year() == y,
            Period::Month(y, m) => date.year() == y && date.month() == m,
        }
    }

    /// `all`, `this-month`, `this-year`, `YYYY` or `YYYY-MM`.
    pub fn parse(s: &str) -> Result<Self, EngineError> {
        let s = s.trim();
        match s {
            "all" => return Ok(Period::All),
            "this-month" => return Ok(Period::ThisMonth),
            "this-year" => return Ok(Period::ThisYear),
            _ => {}
        }
        let invalid = || EngineError::InvalidPeriod(s.to_string());
        if let Some((y, m)) = s.split_once('-') {
            let year = y.parse::<i32>().map_err(|_| invalid())?;
            let month = m.parse::<u32>().map_err(|_| invalid())?;
            if !(1..=12).contains(&month) {
                return Err(EngineError::InvalidMonth(month));
            }
            return Ok(Period::Month(year, month));
        }
        s.parse::<i32>().map(Period::Year).map_err(|_| invalid())
    }
}

/// Records whose date falls inside `period`, cloned in input order.
pub fn filter_period<R: Ledgered + Clone>(records: &[R], period: Period, today: NaiveDate) -> Vec<R> {
    records
        .iter()
        .filter(|r| period.contains(r.record().date, today))
        .cloned()
        .collect()
}

/// Month buckets, the bucket for `today`'s month, and year-to-date totals.
pub fn statistics(
    income: &[Income],
    expenses: &[Expense],
    today: NaiveDate,
) -> Result<FinancialStatistics, EngineError> {
    let monthly = bucket_by_month(income, expenses)?;
    let current_month = monthly
        .iter()
        .find(|b| b.year() == today.year() && b.month() == today.month())
        .cloned()
        .unwrap_or_else(|| MonthBucket::containing(today));

    let ytd = |d: NaiveDate| d.year() == today.year() && d <= today;
    let inc: Decimal = income
        .iter()
        .filter(|i| ytd(i.record.date))
        .map(|i| i.record.amount)
        .sum();
    let exp: Decimal = expenses
        .iter()
        .filter(|e| ytd(e.record.date))
        .map(|e| e.record.amount)
        .sum();

    Ok(FinancialStatistics {
        monthly,
        current_month,
        year_to_date: YearlyTotals::from_sums(inc, exp),
    })
}
