use crate::metrics::MetricCategory;
use crate::scan::CategoryTables;
use crate::tables::{Table, fold_outer};
use strum::IntoEnumIterator;

/// Metadata joined with every category's metrics, keeping all columns under their report names.
#[must_use]
pub fn all_metrics(metadata: &Table, tables: &CategoryTables) -> Table {
    fold_outer(core::iter::once(metadata.clone()).chain(MetricCategory::iter().map(|category| tables.table(category))))
}
