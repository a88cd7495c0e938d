// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Spreadsheet export: shaping records into sheets and writing them out.

mod delimited;
pub mod rows;
mod xlsx;

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;

use crate::error::ExportError;

pub use rows::{shape_for_export, shape_summary, ExportRecord, TOTAL_LABEL};

/// One spreadsheet cell. Amounts stay unrounded numbers; everything human-readable is text.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Text(String),
    Amount(Decimal),
}

impl Cell {
    pub fn text(s: impl Into<String>) -> Self {
        Cell::Text(s.into())
    }

    /// What the cell shows, used for csv output and column sizing.
    pub fn display(&self) -> String {
        match self {
            Cell::Text(s) => s.clone(),
            Cell::Amount(d) => d.to_string(),
        }
    }
}

/// A named sheet of uniform rows, columns in `headers` order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sheet {
    pub name: String,
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<Cell>>,
}

impl Sheet {
    pub fn new(name: impl Into<String>, headers: &[&'static str]) -> Self {
        Self {
            name: name.into(),
            headers: headers.to_vec(),
            rows: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, row: Vec<Cell>) {
        debug_assert_eq!(row.len(), self.headers.len());
        self.rows.push(row);
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Widest header or value per column plus two, capped at 30.
    pub fn column_widths(&self) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .map(|(i, h)| {
                let widest = self
                    .rows
                    .iter()
                    .filter_map(|r| r.get(i))
                    .map(|c| c.display().chars().count())
                    .fold(h.chars().count(), usize::max);
                (widest + 2).min(30)
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Xlsx,
    Csv,
}

impl ExportFormat {
    pub fn parse(s: &str) -> Result<Self, ExportError> {
        match s.trim().to_lowercase().as_str() {
            "xlsx" => Ok(ExportFormat::Xlsx),
            "csv" => Ok(ExportFormat::Csv),
            other => Err(ExportError::UnknownFormat(other.to_string())),
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Csv => "csv",
        }
    }
}

/// The three downloadable reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Report {
    Income,
    Expenses,
    Summary,
}

impl Report {
    pub fn default_sheet_name(&self) -> &'static str {
        match self {
            Report::Income => "Einnahmen",
            Report::Expenses => "Ausgaben",
            Report::Summary => "Übersicht",
        }
    }

    fn file_stem(&self) -> &'static str {
        match self {
            Report::Income => "Einnahmen",
            Report::Expenses => "Ausgaben",
            Report::Summary => "Finanzübersicht",
        }
    }

    /// `Einnahmen_2024-08-03.xlsx`
    pub fn default_file_name(&self, today: NaiveDate, format: ExportFormat) -> PathBuf {
        PathBuf::from(format!(
            "{}_{}.{}",
            self.file_stem(),
            today.format("%Y-%m-%d"),
            format.extension()
        ))
    }
}

/// Writes `sheet` to `path`. Shaping is already done, so a failure here can be retried as is.
pub fn write(sheet: &Sheet, format: ExportFormat, path: &Path) -> Result<(), ExportError> {
    match format {
        ExportFormat::Xlsx => xlsx::write(sheet, path)?,
        ExportFormat::Csv => delimited::write(sheet, path)?,
    }
    info!(
        path = %path.display(),
        sheet = %sheet.name,
        rows = sheet.rows.len(),
        "exported sheet"
    );
    Ok(())
}
