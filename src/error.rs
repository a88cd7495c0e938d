// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::RecordKind;

/// Rejections raised by the aggregation functions. Any of these fails the whole call.
#[derive(Debug, Error, PartialEq)]
pub enum EngineError {
    #[error("{kind:?} record '{id}' has negative amount {amount}")]
    NegativeAmount {
        kind: RecordKind,
        id: String,
        amount: Decimal,
    },
    #[error("invalid month {0}, expected 1-12")]
    InvalidMonth(u32),
    #[error("invalid period '{0}' (use all|this-month|this-year|YYYY|YYYY-MM)")]
    InvalidPeriod(String),
}

/// Problems turning form or file input into a record.
#[derive(Debug, Error, PartialEq)]
pub enum DraftError {
    #[error("required field '{0}' is missing")]
    MissingField(&'static str),
    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("invalid amount '{0}'")]
    InvalidAmount(String),
    #[error("amount must not be negative, got {0}")]
    NegativeAmount(Decimal),
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("unknown export format '{0}' (use xlsx|csv)")]
    UnknownFormat(String),
    #[error("xlsx write failed: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
    #[error("csv write failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no record with id '{0}'")]
    NotFound(String),
    #[error("duplicate record id '{0}'")]
    DuplicateId(String),
    #[error("record '{id}' is invalid")]
    InvalidRecord {
        id: String,
        #[source]
        source: DraftError,
    },
    #[error(transparent)]
    Draft(#[from] DraftError),
    #[error("cannot read records file {path}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed records file {path}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
