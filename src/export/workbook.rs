use std::path::Path;

use rust_xlsxwriter::{Workbook, XlsxError};

use crate::data::model::{ExportRow, EXPORT_COLUMNS, EXPORT_SHEET};

/// Write table rows to a single-sheet workbook.
///
/// Values are written as the text shown in the table. The "Current (A)"
/// column has a header but no row data.
pub fn write_workbook(rows: &[ExportRow], path: &Path) -> Result<(), XlsxError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(EXPORT_SHEET)?;

    for (col, (header, width)) in EXPORT_COLUMNS.iter().enumerate() {
        let col = col as u16;
        sheet.write_string(0, col, *header)?;
        sheet.set_column_width(col, *width)?;
    }

    for (i, row) in rows.iter().enumerate() {
        let r = i as u32 + 1;
        sheet.write_string(r, 0, row.time.as_str())?;
        sheet.write_string(r, 1, row.temp1.as_str())?;
        sheet.write_string(r, 2, row.temp3.as_str())?;
        sheet.write_string(r, 4, row.chamber_temp.as_str())?;
    }

    workbook.save(path)
}
