use std::path::Path;

use calamine::{DataType, Reader, Xlsx, open_workbook};

use crate::yti::comments::error::{CommentsError, Result};
use crate::yti::comments::export::{RowStyle, SheetRow, SheetTable};

/// Reads every sheet of an exported workbook back as plain text tables, in
/// workbook order. The first row of each sheet is taken as its header; data
/// rows are padded or cut to the header width. Cell styles and column widths
/// are not recovered.
pub fn read_tables(path: &Path) -> Result<Vec<SheetTable>> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let sheet_names = workbook.sheet_names().to_vec();

    let mut tables = Vec::with_capacity(sheet_names.len());
    for name in sheet_names {
        let range = read_required_sheet(&mut workbook, &name)?;
        tables.push(range_to_table(name, &range));
    }
    Ok(tables)
}

fn read_required_sheet<R: std::io::Read + std::io::Seek>(
    workbook: &mut Xlsx<R>,
    name: &str,
) -> Result<calamine::Range<DataType>> {
    let range_result = workbook
        .worksheet_range(name)
        .ok_or_else(|| CommentsError::InvalidWorkbook(format!("missing sheet '{name}'")))?;
    let range = range_result.map_err(CommentsError::from)?;
    Ok(range)
}

fn range_to_table(sheet_name: String, range: &calamine::Range<DataType>) -> SheetTable {
    let mut rows = range.rows();
    let mut columns: Vec<String> = rows
        .next()
        .map(|header| header.iter().map(|cell| cell_to_string(Some(cell))).collect())
        .unwrap_or_default();
    while columns.last().is_some_and(String::is_empty) {
        columns.pop();
    }

    let rows = rows
        .map(|row| {
            let cells = (0..columns.len())
                .map(|col_idx| cell_to_string(row.get(col_idx)))
                .collect();
            SheetRow {
                cells,
                style: RowStyle::Normal,
            }
        })
        .collect();

    SheetTable {
        sheet_name,
        columns,
        rows,
        column_widths: Vec::new(),
    }
}

fn cell_to_string(cell: Option<&DataType>) -> String {
    match cell {
        Some(DataType::String(value)) => value.clone(),
        Some(DataType::Float(value)) => value.to_string(),
        Some(DataType::Int(value)) => value.to_string(),
        Some(DataType::Bool(value)) => value.to_string(),
        Some(DataType::Empty) | None => String::new(),
        Some(other) => other.to_string(),
    }
}
