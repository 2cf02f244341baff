//! The fixed merge procedures that turn per-category tables into summary tables
//!
//! # Implementation Model
//!
//! Each [`Recipe`] is an independent procedure over the same inputs: the metadata table read
//! from the laboratory worksheets and the [`CategoryTables`](crate::scan::CategoryTables)
//! produced by a scan. Recipes never modify their inputs, so they can be evaluated in any
//! order and each produces its table from scratch.
//!
//! - **MGI summary** (`mgi.rs`) outer-joins the metadata with the mapping and coverage
//!   tables, renames metrics to their short codes, and keeps a fixed column list.
//! - **Genoox subset** (`genoox.rs`) keeps the metadata rows whose sample identifier starts
//!   with the configured prefix, falling back to the mapping table's sample list when the
//!   worksheet has no usable identifiers. It may produce nothing.
//! - **All metrics** (`all_metrics.rs`) outer-joins the metadata with every category table.
//!
//! Joins are chained left to right with [`fold_outer`](crate::tables::fold_outer); the order
//! of the tables in each chain fixes the column order of the result.

mod all_metrics;
mod genoox;
mod mgi;
mod recipe;

pub use all_metrics::all_metrics;
pub use genoox::genoox_subset;
pub use mgi::mgi_summary;
pub use recipe::Recipe;

const LOG_TARGET: &str = "   recipes";
