use super::LOG_TARGET;
use crate::Result;
use crate::tables::Table;
use std::io::Write;

pub fn generate<W: Write>(table: &Table, writer: &mut W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record(table.columns().iter().map(|c| c.as_str()))?;
    for row in table.rows() {
        csv_writer.write_record(row.iter().map(|cell| cell.as_ref().map(ToString::to_string).unwrap_or_default()))?;
    }
    csv_writer.flush()?;

    log::debug!(target: LOG_TARGET, "Wrote {} CSV row(s)", table.len());
    Ok(())
}
