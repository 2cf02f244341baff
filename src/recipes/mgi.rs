use crate::metrics::{CANONICAL_RENAMES, MGI_METADATA_COLUMNS, MetricCategory};
use crate::scan::CategoryTables;
use crate::tables::{Table, fold_outer};

/// Metadata joined with the mapping, genome coverage, and region coverage metrics.
///
/// Metrics are renamed to their short codes and only the metadata columns and the renamed
/// metrics are kept, in that order. Columns that no input provided are left out.
#[must_use]
pub fn mgi_summary(metadata: &Table, tables: &CategoryTables) -> Table {
    let mut merged = fold_outer([
        metadata.clone(),
        tables.table(MetricCategory::Mapping),
        tables.table(MetricCategory::Wgs),
        tables.table(MetricCategory::QcRegion),
    ]);

    merged.rename_columns(CANONICAL_RENAMES);

    let columns: Vec<&str> = MGI_METADATA_COLUMNS
        .iter()
        .copied()
        .chain(CANONICAL_RENAMES.iter().map(|&(_, code)| code))
        .collect();

    merged.select(&columns)
}
