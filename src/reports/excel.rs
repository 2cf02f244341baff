use super::LOG_TARGET;
use crate::Result;
use crate::tables::{Cell, Table};
use rust_xlsxwriter::{DocProperties, Format, Workbook};
use std::io::Write;

#[expect(unused_results, reason = "rust_xlsxwriter methods return &mut Worksheet for chaining")]
pub fn generate<W: Write>(table: &Table, sheet_name: &str, writer: &mut W) -> Result<()> {
    let mut workbook = Workbook::new();

    let properties = DocProperties::new().set_author("qc-metrics");
    workbook.set_properties(&properties);

    let worksheet = workbook.add_worksheet().set_name(sheet_name)?;
    let bold_format = Format::new().set_bold();

    for (col_idx, name) in table.columns().iter().enumerate() {
        worksheet.write_string_with_format(0, column(col_idx), name.as_str(), &bold_format)?;
    }
    worksheet.set_freeze_panes(1, 0)?;

    for (row_idx, row) in table.rows().iter().enumerate() {
        #[expect(clippy::cast_possible_truncation, reason = "Row count limited by Excel's row limit")]
        let xl_row = (row_idx + 1) as u32;

        for (col_idx, cell) in row.iter().enumerate() {
            match cell {
                Some(Cell::Text(s)) => {
                    worksheet.write_string(xl_row, column(col_idx), s.as_str())?;
                }
                Some(Cell::Number(n)) => {
                    worksheet.write_number(xl_row, column(col_idx), *n)?;
                }
                None => {}
            }
        }
    }

    worksheet.autofit();

    let data = workbook.save_to_buffer()?;
    writer.write_all(&data)?;

    log::debug!(target: LOG_TARGET, "Wrote sheet '{sheet_name}' with {} row(s), {} byte(s)", table.len(), data.len());
    Ok(())
}

#[expect(clippy::cast_possible_truncation, reason = "Column index limited by Excel's u16 column limit")]
const fn column(idx: usize) -> u16 {
    idx as u16
}
