use super::{LOG_TARGET, ReportFiles, extract_category};
use crate::HashMap;
use crate::metrics::{CATALOG, MetricCategory};
use crate::tables::Table;

/// One extracted table per report category.
#[derive(Debug, Clone, Default)]
pub struct CategoryTables {
    tables: HashMap<MetricCategory, Table>,
}

impl CategoryTables {
    /// Extract every category's reports, in catalog order.
    #[must_use]
    pub fn build(files: &ReportFiles) -> Self {
        let tables: HashMap<_, _> = CATALOG
            .iter()
            .map(|def| (def.category, extract_category(def, files.get(def.category))))
            .collect();

        log::info!(
            target: LOG_TARGET,
            "Extracted {} sample row(s) from {} classified report(s)",
            tables.values().map(Table::len).sum::<usize>(),
            files.len()
        );

        Self { tables }
    }

    /// Replace the table of a category.
    #[must_use]
    pub fn with_table(mut self, category: MetricCategory, table: Table) -> Self {
        let _ = self.tables.insert(category, table);
        self
    }

    /// The table of a category; a category with no reports yields a table with just the key column.
    #[must_use]
    pub fn table(&self, category: MetricCategory) -> Table {
        self.tables.get(&category).cloned().unwrap_or_else(Table::keyed)
    }
}
