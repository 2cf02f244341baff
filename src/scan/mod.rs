//! Report discovery, classification, and metric extraction
//!
//! This module turns a directory of pipeline output into one table per report category.
//!
//! # Implementation Model
//!
//! Processing happens in three sequential steps:
//!
//! 1. **Discovery** (`discovery.rs`) walks the input directory and collects every file whose
//!    name ends in the report suffix. Walk order is whatever the filesystem yields.
//! 2. **Classification** (`classifier.rs`) buckets those paths by category, testing each
//!    category's suffix in catalog order. A path lands in at most one bucket; paths that
//!    match no category are dropped.
//! 3. **Extraction** (`extractor.rs`) reads each file of a bucket line by line and pulls the
//!    category's metrics out of matching lines, producing one [`MetricRecord`] per file.
//!    The records of a bucket become that category's [`Table`](crate::tables::Table).
//!
//! A report that can't be read is logged and skipped; it never aborts the batch.
//! [`CategoryTables`] holds the result of the whole scan for the merge recipes.

mod category_tables;
mod classifier;
mod discovery;
mod extractor;
mod metric_record;

pub use category_tables::CategoryTables;
pub use classifier::{ReportFiles, classify};
pub use discovery::discover_reports;
pub use extractor::{extract, extract_category, extract_record, sample_id_from_path};
pub use metric_record::MetricRecord;

const LOG_TARGET: &str = "      scan";
