// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::Path;

use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::Workbook;

use super::{Cell, Sheet};
use crate::error::ExportError;

pub(super) fn write(sheet: &Sheet, path: &Path) -> Result<(), ExportError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(&sheet.name)?;

    for (col, header) in sheet.headers.iter().enumerate() {
        worksheet.write_string(0, col as u16, *header)?;
    }
    for (i, row) in sheet.rows.iter().enumerate() {
        let r = (i + 1) as u32;
        for (col, cell) in row.iter().enumerate() {
            match cell {
                Cell::Text(s) => worksheet.write_string(r, col as u16, s.as_str())?,
                // xlsx stores doubles; the decimal is only narrowed here
                Cell::Amount(d) => match d.to_f64() {
                    Some(f) => worksheet.write_number(r, col as u16, f)?,
                    None => worksheet.write_string(r, col as u16, d.to_string())?,
                },
            };
        }
    }
    for (col, width) in sheet.column_widths().into_iter().enumerate() {
        worksheet.set_column_width(col as u16, width as f64)?;
    }

    workbook.save(path)?;
    Ok(())
}
