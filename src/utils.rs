// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::sync::Once;

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use rust_decimal::Decimal;

use crate::error::DraftError;

static TRACING_INIT: Once = Once::new();

/// Installs the global fmt subscriber. `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("kassenbuch=info"));

        fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
    });
}

const MONTHS_DE: [&str; 12] = [
    "Januar",
    "Februar",
    "März",
    "April",
    "Mai",
    "Juni",
    "Juli",
    "August",
    "September",
    "Oktober",
    "November",
    "Dezember",
];

/// German month name for a 1-based month number; out of range yields "".
pub fn month_name_de(month: u32) -> &'static str {
    month
        .checked_sub(1)
        .and_then(|i| MONTHS_DE.get(i as usize))
        .copied()
        .unwrap_or("")
}

pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Accepts `YYYY-MM-DD`, or an RFC 3339 timestamp which is reduced to its UTC date.
pub fn parse_date(s: &str) -> Result<NaiveDate, DraftError> {
    let s = s.trim();
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(d);
    }
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc).date_naive())
        .map_err(|_| DraftError::InvalidDate(s.to_string()))
}

/// Parses "1500.00" as well as the German "1.500,00".
pub fn parse_decimal(s: &str) -> Result<Decimal, DraftError> {
    let s = s.trim();
    let normalized = if s.contains(',') {
        s.replace('.', "").replace(',', ".")
    } else {
        s.to_string()
    };
    normalized
        .parse::<Decimal>()
        .map_err(|_| DraftError::InvalidAmount(s.to_string()))
}

/// `dd.MM.yyyy`
pub fn fmt_date_de(d: NaiveDate) -> String {
    d.format("%d.%m.%Y").to_string()
}

/// German currency display: "1.500,00 €".
pub fn fmt_eur(d: &Decimal) -> String {
    let fixed = format!("{:.2}", d.abs().round_dp(2));
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let sign = if d.is_sign_negative() && !d.round_dp(2).is_zero() {
        "-"
    } else {
        ""
    };
    format!("{}{},{} €", sign, grouped, frac_part)
}

/// One decimal place, German separator: "61,2 %".
pub fn fmt_percent(p: &Decimal) -> String {
    format!("{:.1} %", p.round_dp(1)).replace('.', ",")
}

pub fn yes_no(flag: bool) -> &'static str {
    if flag { "Ja" } else { "Nein" }
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}
