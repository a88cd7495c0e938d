// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::Path;

use csv::Writer;

use super::Sheet;
use crate::error::ExportError;

pub(super) fn write(sheet: &Sheet, path: &Path) -> Result<(), ExportError> {
    let mut wtr = Writer::from_path(path)?;
    wtr.write_record(&sheet.headers)?;
    for row in &sheet.rows {
        wtr.write_record(row.iter().map(|c| c.display()))?;
    }
    wtr.flush()?;
    Ok(())
}
