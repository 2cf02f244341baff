//! Export of summary tables
//!
//! Two sinks are provided, each accessed through a `generate` function taking a [`Table`](crate::tables::Table)
//! and any [`Write`](std::io::Write) destination:
//! - **Excel**: a single-sheet .xlsx workbook with a bold frozen header row
//! - **CSV**: comma-separated text with a header row
//!
//! Text cells are written as text and number cells as numbers. Absent cells stay blank in
//! both formats.

mod csv;
mod excel;

pub use csv::generate as generate_csv;
pub use excel::generate as generate_xlsx;

const LOG_TARGET: &str = "   reports";
