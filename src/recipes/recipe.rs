use super::{LOG_TARGET, all_metrics, genoox_subset, mgi_summary};
use crate::metrics::MetricCategory;
use crate::scan::CategoryTables;
use crate::tables::Table;
use strum::{Display, EnumIter};

/// The summary tables produced for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum Recipe {
    /// Metadata with the headline mapping and coverage metrics under short codes
    MgiSummary,

    /// Metadata of the samples sent to Genoox
    GenooxSubset,

    /// Metadata with every extracted metric
    AllMetrics,
}

impl Recipe {
    /// Appended to the output prefix to name the workbook.
    #[must_use]
    pub const fn file_suffix(self) -> &'static str {
        match self {
            Self::MgiSummary => "_MGI_QC",
            Self::GenooxSubset => "_Genoox",
            Self::AllMetrics => "_All_QC",
        }
    }

    #[must_use]
    pub const fn sheet_name(self) -> &'static str {
        match self {
            Self::MgiSummary => "MGI QC metrics",
            Self::GenooxSubset => "QC Metrics - qPCR",
            Self::AllMetrics => "QC metrics",
        }
    }

    /// Produce the recipe's table, or `None` when the recipe has nothing to report.
    ///
    /// Only the Genoox subset can come up empty; the other recipes always produce a table,
    /// even one without rows.
    #[must_use]
    pub fn build(self, metadata: &Table, tables: &CategoryTables, genoox_prefix: &str) -> Option<Table> {
        let table = match self {
            Self::MgiSummary => mgi_summary(metadata, tables),
            Self::GenooxSubset => {
                let subset = genoox_subset(metadata, &tables.table(MetricCategory::Mapping), genoox_prefix);
                if subset.is_empty() {
                    log::info!(target: LOG_TARGET, "No sample identifier starts with '{genoox_prefix}', skipping {self}");
                    return None;
                }
                subset
            }
            Self::AllMetrics => all_metrics(metadata, tables),
        };

        log::info!(
            target: LOG_TARGET,
            "Built {self} table with {} row(s) and {} column(s)",
            table.len(),
            table.columns().len()
        );
        Some(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{METADATA_COLUMNS, SAMPLE_ID};
    use crate::tables::Cell;
    use strum::IntoEnumIterator;

    fn metadata(ids: &[&str]) -> Table {
        let mut table = Table::new(METADATA_COLUMNS.iter().copied());
        for id in ids {
            let mut row = vec![None; METADATA_COLUMNS.len()];
            row[2] = Cell::text(id);
            table.push_row(row);
        }
        table
    }

    #[test]
    fn test_names() {
        assert_eq!(Recipe::MgiSummary.to_string(), "mgi-summary");
        assert_eq!(Recipe::GenooxSubset.file_suffix(), "_Genoox");
        assert_eq!(Recipe::AllMetrics.sheet_name(), "QC metrics");
    }

    #[test]
    fn test_suffixes_are_distinct() {
        let suffixes: Vec<_> = Recipe::iter().map(Recipe::file_suffix).collect();
        for (i, a) in suffixes.iter().enumerate() {
            assert!(!suffixes[i + 1..].contains(a));
        }
    }

    #[test]
    fn test_genoox_is_skipped_when_empty() {
        let tables = CategoryTables::default();
        assert!(Recipe::GenooxSubset.build(&metadata(&["A200"]), &tables, "G").is_none());
    }

    #[test]
    fn test_other_recipes_always_produce() {
        let tables = CategoryTables::default();
        let empty = metadata(&[]);

        let mgi = Recipe::MgiSummary.build(&empty, &tables, "G").unwrap();
        let all = Recipe::AllMetrics.build(&empty, &tables, "G").unwrap();

        assert!(mgi.is_empty());
        assert!(all.is_empty());
        assert!(all.has_column(SAMPLE_ID));
    }

    #[test]
    fn test_genoox_keeps_prefixed_samples() {
        let tables = CategoryTables::default();
        let subset = Recipe::GenooxSubset.build(&metadata(&["G100", "A200"]), &tables, "G").unwrap();

        assert_eq!(subset.len(), 1);
        assert_eq!(subset.cell(0, SAMPLE_ID), Some(&Cell::Text("G100".into())));
    }
}
