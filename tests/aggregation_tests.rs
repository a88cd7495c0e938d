// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, NaiveDate, Utc};
use kassenbuch::aggregate::{
    Period, bucket_by_category, bucket_by_month, filter_period, monthly_series, overall_totals,
    statistics, yearly_totals,
};
use kassenbuch::draft::{ExpenseDraft, IncomeDraft, RecordDraft};
use kassenbuch::error::EngineError;
use kassenbuch::models::{Expense, Income};
use rust_decimal::Decimal;
use std::str::FromStr;

fn now() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z")
        .unwrap()
        .with_timezone(&Utc)
}

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn base(date: &str, amount: &str, category: &str) -> RecordDraft {
    RecordDraft {
        date: Some(date.into()),
        amount: Some(amount.into()),
        category: Some(category.into()),
        description: None,
    }
}

fn income(id: &str, date: &str, amount: &str, category: &str) -> Income {
    IncomeDraft {
        base: base(date, amount, category),
        client: Some("Schmidt GmbH".into()),
        invoice_number: None,
    }
    .build(id, now())
    .unwrap()
}

fn expense(id: &str, date: &str, amount: &str, category: &str) -> Expense {
    ExpenseDraft {
        base: base(date, amount, category),
        vendor: Some("Office Supplies GmbH".into()),
        receipt_number: None,
        tax_deductible: Some(true),
    }
    .build(id, now())
    .unwrap()
}

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn single_month_bucket_nets_income_and_expenses() {
    let inc = vec![income("1", "2023-03-10", "1500.00", "A")];
    let exp = vec![expense("2", "2023-03-05", "450.00", "Büromiete")];

    let buckets = bucket_by_month(&inc, &exp).unwrap();
    assert_eq!(buckets.len(), 1);
    let b = &buckets[0];
    assert_eq!(b.label(), "März 2023");
    assert_eq!(b.total_income(), dec("1500.00"));
    assert_eq!(b.total_expenses(), dec("450.00"));
    assert_eq!(b.balance(), dec("1050.00"));
}

#[test]
fn category_shares_round_to_one_decimal() {
    let inc = vec![
        income("1", "2023-03-10", "1500.00", "A"),
        income("2", "2023-03-15", "950.00", "B"),
    ];
    let breakdown = bucket_by_category(&inc).unwrap();
    assert_eq!(breakdown.amount("A"), Some(dec("1500.00")));
    assert_eq!(breakdown.amount("B"), Some(dec("950.00")));
    assert_eq!(breakdown.percentage("A").round_dp(1), dec("61.2"));
    assert_eq!(breakdown.percentage("B").round_dp(1), dec("38.8"));

    let total: Decimal = breakdown
        .sorted_by_amount()
        .iter()
        .map(|s| s.percentage)
        .sum();
    assert!((total - Decimal::ONE_HUNDRED).abs() < dec("0.1"));
}

#[test]
fn newer_year_comes_first() {
    let inc = vec![income("1", "2023-12-20", "100", "A")];
    let exp = vec![expense("2", "2024-01-02", "40", "B")];
    let buckets = bucket_by_month(&inc, &exp).unwrap();
    assert_eq!(buckets.len(), 2);
    assert_eq!((buckets[0].year(), buckets[0].month()), (2024, 1));
    assert_eq!((buckets[1].year(), buckets[1].month()), (2023, 12));
}

#[test]
fn empty_collections_give_empty_buckets_and_zero_totals() {
    assert!(bucket_by_month(&[], &[]).unwrap().is_empty());
    let totals = yearly_totals(&[], &[], 2023).unwrap();
    assert_eq!(totals.income, Decimal::ZERO);
    assert_eq!(totals.expenses, Decimal::ZERO);
    assert_eq!(totals.balance, Decimal::ZERO);
}

#[test]
fn bucket_totals_conserve_input_sums() {
    let inc = vec![
        income("1", "2023-03-10", "1500.00", "Druckaufträge"),
        income("2", "2023-03-15", "950.00", "Digitaldruck"),
        income("3", "2024-08-03", "670.00", "Großformatdruck"),
        income("4", "2023-09-30", "0.10", "Digitaldruck"),
    ];
    let exp = vec![
        expense("5", "2023-03-01", "1450.00", "Büromiete"),
        expense("6", "2023-09-01", "1450.00", "Büromiete"),
        expense("7", "2023-09-04", "78.00", "Büromaterial"),
        expense("8", "2024-03-13", "98.00", "Telekommunikation"),
    ];
    let buckets = bucket_by_month(&inc, &exp).unwrap();

    let income_sum: Decimal = inc.iter().map(|i| i.record.amount).sum();
    let expense_sum: Decimal = exp.iter().map(|e| e.record.amount).sum();
    assert_eq!(buckets.iter().map(|b| b.total_income()).sum::<Decimal>(), income_sum);
    assert_eq!(buckets.iter().map(|b| b.total_expenses()).sum::<Decimal>(), expense_sum);
    for b in &buckets {
        assert_eq!(b.balance(), b.total_income() - b.total_expenses());
    }
    let keys: Vec<(i32, u32)> = buckets.iter().map(|b| (b.year(), b.month())).collect();
    assert_eq!(keys, vec![(2024, 8), (2024, 3), (2023, 9), (2023, 3)]);
}

#[test]
fn ordering_does_not_depend_on_input_order() {
    let mut inc = vec![
        income("1", "2023-03-10", "10", "A"),
        income("2", "2024-02-01", "20", "A"),
        income("3", "2023-11-05", "30", "A"),
    ];
    let first = bucket_by_month(&inc, &[]).unwrap();
    inc.reverse();
    let second = bucket_by_month(&inc, &[]).unwrap();
    assert_eq!(first, second);
}

#[test]
fn day_of_month_does_not_split_buckets() {
    let inc = vec![
        income("1", "2023-05-01", "10", "A"),
        income("2", "2023-05-31", "15", "A"),
    ];
    let buckets = bucket_by_month(&inc, &[]).unwrap();
    assert_eq!(buckets.len(), 1);
    assert_eq!(buckets[0].total_income(), dec("25"));
}

#[test]
fn negative_amount_fails_the_whole_call() {
    let mut bad = income("9", "2023-03-10", "10", "A");
    bad.record.amount = dec("-10");
    let inc = vec![income("1", "2023-03-10", "100", "A"), bad];
    let err = bucket_by_month(&inc, &[]).unwrap_err();
    assert!(matches!(err, EngineError::NegativeAmount { ref id, .. } if id == "9"));
    assert!(bucket_by_category(&inc).is_err());
    assert!(yearly_totals(&inc, &[], 2023).is_err());
}

#[test]
fn zero_total_categories_have_zero_share() {
    let inc = vec![
        income("1", "2023-03-10", "0", "A"),
        income("2", "2023-03-11", "0.00", "B"),
    ];
    let breakdown = bucket_by_category(&inc).unwrap();
    for share in breakdown.sorted_by_amount() {
        assert_eq!(share.percentage, Decimal::ZERO);
    }
    assert_eq!(breakdown.percentage("missing"), Decimal::ZERO);
}

#[test]
fn categories_match_exactly_and_sort_stably() {
    let exp = vec![
        expense("1", "2023-03-01", "50", "Porto"),
        expense("2", "2023-03-02", "50", "porto"),
        expense("3", "2023-03-03", "80", "Büromaterial"),
        expense("4", "2023-03-04", "50", "Porto "),
    ];
    let breakdown = bucket_by_category(&exp).unwrap();
    assert_eq!(breakdown.buckets.len(), 4);
    let order: Vec<String> = breakdown
        .sorted_by_amount()
        .into_iter()
        .map(|s| s.category)
        .collect();
    assert_eq!(order, vec!["Büromaterial", "Porto", "porto", "Porto "]);
}

#[test]
fn yearly_totals_filter_by_calendar_year() {
    let inc = vec![
        income("1", "2023-12-31", "100", "A"),
        income("2", "2024-01-01", "200", "A"),
    ];
    let exp = vec![expense("3", "2024-06-30", "50", "B")];
    let t = yearly_totals(&inc, &exp, 2024).unwrap();
    assert_eq!(t.income, dec("200"));
    assert_eq!(t.expenses, dec("50"));
    assert_eq!(t.balance, dec("150"));

    let all = overall_totals(&inc, &exp).unwrap();
    assert_eq!(all.balance, dec("250"));
}

#[test]
fn monthly_series_covers_all_twelve_months() {
    let inc = vec![
        income("1", "2023-03-10", "1500", "A"),
        income("2", "2024-03-10", "999", "A"),
    ];
    let exp = vec![expense("3", "2023-09-01", "1450", "B")];
    let series = monthly_series(&inc, &exp, 2023).unwrap();
    assert_eq!(series.len(), 12);
    assert_eq!(series[0].month_name(), "Januar");
    assert_eq!(series[2].total_income(), dec("1500"));
    assert_eq!(series[8].balance(), dec("-1450"));
    assert_eq!(series[11].balance(), Decimal::ZERO);
}

#[test]
fn periods_resolve_against_today() {
    let inc = vec![
        income("1", "2024-08-03", "670", "A"),
        income("2", "2024-03-10", "100", "A"),
        income("3", "2023-08-10", "50", "A"),
    ];
    let today = ymd(2024, 8, 20);
    assert_eq!(filter_period(&inc, Period::ThisMonth, today).len(), 1);
    assert_eq!(filter_period(&inc, Period::ThisYear, today).len(), 2);
    assert_eq!(filter_period(&inc, Period::All, today).len(), 3);
    assert_eq!(filter_period(&inc, Period::Month(2023, 8), today).len(), 1);

    assert_eq!(Period::parse("2024-03").unwrap(), Period::Month(2024, 3));
    assert_eq!(Period::parse("2023").unwrap(), Period::Year(2023));
    assert_eq!(Period::parse("this-month").unwrap(), Period::ThisMonth);
    assert!(matches!(Period::parse("2024-13"), Err(EngineError::InvalidMonth(13))));
    assert!(Period::parse("letztes Jahr").is_err());
}

#[test]
fn statistics_zero_fill_current_month_and_stop_ytd_at_today() {
    let inc = vec![
        income("1", "2024-03-10", "300", "A"),
        income("2", "2024-08-25", "500", "A"),
    ];
    let exp = vec![expense("3", "2024-01-15", "100", "B")];

    let stats = statistics(&inc, &exp, ymd(2024, 8, 20)).unwrap();
    assert_eq!(stats.monthly.len(), 3);
    assert_eq!(stats.current_month.total_income(), dec("500"));
    assert_eq!(stats.year_to_date.income, dec("300"));
    assert_eq!(stats.year_to_date.balance, dec("200"));

    let quiet = statistics(&inc, &exp, ymd(2024, 5, 1)).unwrap();
    assert_eq!(quiet.current_month.label(), "Mai 2024");
    assert_eq!(quiet.current_month.balance(), Decimal::ZERO);
}

#[test]
fn month_bucket_serializes_derived_balance() {
    let inc = vec![income("1", "2023-03-10", "1500.00", "A")];
    let exp = vec![expense("2", "2023-03-05", "450.00", "B")];
    let buckets = bucket_by_month(&inc, &exp).unwrap();
    let v = serde_json::to_value(&buckets[0]).unwrap();
    assert_eq!(v["month_name"], "März");
    assert_eq!(v["balance"], "1050.00");
}
