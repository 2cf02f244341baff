//! Sample-keyed tables and the operations the merge recipes are built from
//!
//! # Implementation Model
//!
//! A [`Table`] is a small column-oriented-by-name, row-major store: an ordered list of
//! column names and a list of rows, each row holding one optional [`Cell`] per column.
//! An absent cell means "no value" and is kept distinct from an empty string.
//!
//! Every table that takes part in a merge carries the [`SAMPLE_ID`](crate::metrics::SAMPLE_ID)
//! column. The join primitives in `join.rs` combine two tables on that key with outer or
//! right-join semantics; duplicate keys are never collapsed, so a key present twice on
//! one side and twice on the other yields four joined rows. [`fold_outer`] chains the
//! outer join over an ordered list of tables, left to right.
//!
//! The metadata worksheet reader in `worksheet.rs` turns the optional laboratory
//! worksheets (TSV, CSV, or XLSX) into a table with a fixed set of metadata columns.
//! Any problem reading a worksheet yields an empty table rather than an error so the
//! downstream summaries still get produced.

mod cell;
mod join;
mod table;
mod worksheet;

pub use cell::Cell;
pub use join::{fold_outer, outer_join, right_join};
pub use table::{Row, Table};
pub use worksheet::{read_table, read_worksheet, read_worksheets};

const LOG_TARGET: &str = "    tables";
