//! Reader for the laboratory metadata worksheets that accompany a run.

use super::{Cell, LOG_TARGET, Table};
use crate::Result;
use crate::metrics::{METADATA_COLUMNS, SAMPLE_ID, SAMPLE_ID_ALIASES};
use calamine::{Data, Reader, Xlsx, open_workbook};
use camino::{Utf8Path, Utf8PathBuf};
use ohno::IntoAppError;
use std::io::Read;

/// Read and concatenate several metadata worksheets.
///
/// The result always has exactly the [`METADATA_COLUMNS`], even when no worksheet is given.
#[must_use]
pub fn read_worksheets(paths: &[Utf8PathBuf], sheet: &str) -> Table {
    let mut combined = Table::new(METADATA_COLUMNS.iter().copied());
    for path in paths {
        combined.append(read_worksheet(Some(path.as_path()), sheet));
    }

    log::info!(target: LOG_TARGET, "Loaded {} metadata row(s) from {} worksheet(s)", combined.len(), paths.len());
    combined
}

/// Read one metadata worksheet, dispatching on the file extension.
///
/// `.tsv` and `.csv` files are read as delimited text and `.xlsx` files from the named sheet. Any
/// other extension, or any failure to read or parse the file, produces an empty table. Legacy
/// sample identifier columns are folded into [`SAMPLE_ID`] and the table is narrowed to the
/// [`METADATA_COLUMNS`].
#[must_use]
pub fn read_worksheet(path: Option<&Utf8Path>, sheet: &str) -> Table {
    let raw = match path {
        None => Table::default(),
        Some(path) => load(path, sheet).unwrap_or_else(|e| {
            log::warn!(target: LOG_TARGET, "Ignoring metadata worksheet '{path}': {e:#}");
            Table::default()
        }),
    };

    normalize(raw)
}

fn load(path: &Utf8Path, sheet: &str) -> Result<Table> {
    match path.extension() {
        Some("tsv") => read_delimited(
            std::fs::File::open(path).into_app_err_with(|| format!("opening '{path}'"))?,
            b'\t',
        ),
        Some("csv") => read_delimited(
            std::fs::File::open(path).into_app_err_with(|| format!("opening '{path}'"))?,
            b',',
        ),
        Some("xlsx") => read_xlsx(path, Some(sheet)),
        _ => {
            log::warn!(target: LOG_TARGET, "Unsupported metadata worksheet format '{path}', treating it as empty");
            Ok(Table::default())
        }
    }
}

/// Read a table as it is, without any metadata normalization.
///
/// `.xlsx` files are read from their first sheet and everything else is read as CSV.
///
/// # Errors
///
/// Returns an error if the file can't be opened or parsed.
pub fn read_table(path: &Utf8Path) -> Result<Table> {
    if path.extension() == Some("xlsx") {
        read_xlsx(path, None)
    } else {
        read_delimited(
            std::fs::File::open(path).into_app_err_with(|| format!("opening '{path}'"))?,
            b',',
        )
    }
}

fn read_delimited(input: impl Read, delimiter: u8) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new().delimiter(delimiter).flexible(true).from_reader(input);

    let headers = reader.headers()?.clone();
    let mut table = Table::new(headers.iter());

    for record in reader.records() {
        let record = record?;
        table.push_row(record.iter().map(Cell::text).collect());
    }

    Ok(table)
}

fn read_xlsx(path: &Utf8Path, sheet: Option<&str>) -> Result<Table> {
    let mut workbook = open_workbook::<Xlsx<_>, _>(path).into_app_err_with(|| format!("opening workbook '{path}'"))?;
    let range = match sheet {
        Some(sheet) => workbook
            .worksheet_range(sheet)
            .into_app_err_with(|| format!("reading sheet '{sheet}' of '{path}'"))?,
        None => match workbook.worksheet_range_at(0) {
            Some(range) => range.into_app_err_with(|| format!("reading the first sheet of '{path}'"))?,
            None => return Ok(Table::default()),
        },
    };

    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Ok(Table::default());
    };

    let mut table = Table::new(header.iter().map(|cell| cell.to_string()));
    for row in rows {
        table.push_row(row.iter().map(xlsx_cell).collect());
    }

    Ok(table)
}

#[expect(clippy::cast_precision_loss, reason = "Worksheet integers are small quantities and identifiers")]
fn xlsx_cell(data: &Data) -> Option<Cell> {
    match data {
        Data::Empty => None,
        Data::Float(f) => Some(Cell::Number(*f)),
        Data::Int(i) => Some(Cell::Number(*i as f64)),
        Data::String(s) => Cell::text(s),
        other => Cell::text(&other.to_string()),
    }
}

/// Fold legacy identifier columns into [`SAMPLE_ID`], narrow to the metadata columns, and type the values.
fn normalize(mut table: Table) -> Table {
    if let Some(alias) = SAMPLE_ID_ALIASES.iter().find(|alias| table.has_column(alias)) {
        if !table.has_column(SAMPLE_ID) {
            log::debug!(target: LOG_TARGET, "Using worksheet column '{alias}' as '{SAMPLE_ID}'");
            let _ = table.rename_column(alias, SAMPLE_ID);
        } else if table.column_is_blank(SAMPLE_ID) {
            log::debug!(target: LOG_TARGET, "Worksheet column '{SAMPLE_ID}' is empty, filling it from '{alias}'");
            table.copy_column(alias, SAMPLE_ID);
        }
    }

    let mut table = table.reindex(METADATA_COLUMNS);

    // Sample identifiers stay textual so that "0012" doesn't turn into 12
    table.map_column(SAMPLE_ID, |cell| match cell {
        Cell::Number(n) => Some(Cell::Text(n.to_string().into())),
        text @ Cell::Text(_) => Some(text),
    });
    table.map_cells_except(SAMPLE_ID, |cell| match cell {
        Cell::Text(s) => Cell::inferred(&s),
        number @ Cell::Number(_) => Some(number),
    });

    table
}
