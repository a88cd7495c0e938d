// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::PathBuf;

use anyhow::{Context, Result};

use super::Session;
use crate::export::{self, shape_for_export, shape_summary, ExportFormat, Report, Sheet};

/// Shapes and writes the requested report; returns the path written.
pub fn handle(session: &Session, m: &clap::ArgMatches) -> Result<PathBuf> {
    let (report, sub) = match m.subcommand() {
        Some(("income", sub)) => (Report::Income, sub),
        Some(("expenses", sub)) => (Report::Expenses, sub),
        Some(("summary", sub)) => (Report::Summary, sub),
        _ => anyhow::bail!("Unknown export (use income|expenses|summary)"),
    };

    let fmt = sub
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or_else(|| session.settings.export_format());
    let format = ExportFormat::parse(fmt)?;

    let sheet: Sheet = match report {
        Report::Income => shape_for_export(&session.income),
        Report::Expenses => shape_for_export(&session.expenses),
        Report::Summary => shape_summary(&session.income, &session.expenses)?,
    };
    let sheet = match sub.get_one::<String>("sheet") {
        Some(name) => sheet.with_name(name.trim()),
        None => sheet.with_name(report.default_sheet_name()),
    };

    let out = match sub.get_one::<String>("out") {
        Some(p) => PathBuf::from(p),
        None => {
            let file = report.default_file_name(session.today, format);
            match &session.settings.export_dir {
                Some(dir) => dir.join(file),
                None => file,
            }
        }
    };

    export::write(&sheet, format, &out)
        .with_context(|| format!("Export {} to {}", sheet.name, out.display()))?;
    println!("Exported {} rows to {}", sheet.rows.len(), out.display());
    Ok(out)
}
