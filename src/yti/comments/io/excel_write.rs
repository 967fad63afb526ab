use std::path::Path;

use rust_xlsxwriter::{Format, FormatAlign, Workbook};

use crate::yti::comments::error::Result;
use crate::yti::comments::export::{RowStyle, WorkbookData};

/// Writes the provided workbook data to the given path.
pub fn write_workbook(path: &Path, workbook: &WorkbookData) -> Result<()> {
    let mut workbook_writer = populate(workbook)?;
    workbook_writer.save(path)?;
    Ok(())
}

/// Serialises the workbook data into xlsx bytes, e.g. for a response body.
pub fn workbook_to_bytes(workbook: &WorkbookData) -> Result<Vec<u8>> {
    let mut workbook_writer = populate(workbook)?;
    Ok(workbook_writer.save_to_buffer()?)
}

fn populate(workbook: &WorkbookData) -> Result<Workbook> {
    let mut workbook_writer = Workbook::new();
    let cell_format = Format::new().set_text_wrap().set_align(FormatAlign::Top);
    let group_format = cell_format.clone().set_bold();

    for table in &workbook.tables {
        let worksheet = workbook_writer.add_worksheet();
        worksheet.set_name(&table.sheet_name)?;

        for (col_idx, header) in table.columns.iter().enumerate() {
            worksheet.write_string_with_format(0, col_idx as u16, header, &cell_format)?;
        }

        for (row_idx, row) in table.rows.iter().enumerate() {
            for (col_idx, cell) in row.cells.iter().enumerate() {
                if cell.is_empty() {
                    continue;
                }
                let format = if row.style == RowStyle::GroupHeader && col_idx == 0 {
                    &group_format
                } else {
                    &cell_format
                };
                worksheet.write_string_with_format(
                    (row_idx + 1) as u32,
                    col_idx as u16,
                    cell,
                    format,
                )?;
            }
        }

        for (col_idx, width) in table.column_widths.iter().enumerate() {
            worksheet.set_column_width(col_idx as u16, *width)?;
        }
    }

    Ok(workbook_writer)
}
