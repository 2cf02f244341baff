//! Catalog of QC report categories and the metrics extracted from each
//!
//! This module is pure data: it describes which report files belong to which
//! category, which section of a report holds the interesting lines, and which
//! comma-separated field of a matching line carries each metric value.
//!
//! # Implementation Model
//!
//! The catalog is an ordered, immutable registry of [`CategoryDef`] values. Each
//! category owns an ordered slice of [`MetricDef`] entries pairing a metric name
//! with a field index. The order of a category's metrics is the column order of
//! the table produced for that category, and the order of the categories is the
//! order in which file suffixes are tested when classifying reports.
//!
//! Metric names beginning with [`PERCENT_PREFIX`] share a row label with their
//! non-prefixed counterpart, so a count and a percentage printed on the same
//! report line can both be captured from a single match. [`row_label`] strips
//! the prefix to produce the label a line is searched for.
//!
//! The column names used when merging tables (the sample identifier key, the
//! metadata worksheet columns, and the canonical rename table) live alongside
//! the catalog in `column_names.rs`.

mod column_names;
mod metric_category;
mod metric_def;

pub use column_names::{
    CANONICAL_RENAMES, GENOOX_COLUMNS, METADATA_COLUMNS, MGI_METADATA_COLUMNS, SAMPLE_ID, SAMPLE_ID_ALIASES, TOTAL_BASES,
    TOTAL_GIGA_BASES,
};
pub use metric_category::MetricCategory;
pub use metric_def::{CATALOG, CategoryDef, MetricDef, PERCENT_PREFIX, row_label};
