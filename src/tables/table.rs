use super::Cell;
use crate::metrics::SAMPLE_ID;
use compact_str::CompactString;

/// One table row: an optional cell per column.
pub type Row = Vec<Option<Cell>>;

/// An ordered set of named columns over a list of rows.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<CompactString>,
    rows: Vec<Row>,
}

impl Table {
    #[must_use]
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<CompactString>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// A table with only the sample identifier column and no rows.
    #[must_use]
    pub fn keyed() -> Self {
        Self::new([SAMPLE_ID])
    }

    #[must_use]
    pub fn columns(&self) -> &[CompactString] {
        &self.columns
    }

    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of rows.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows, regardless of how many columns it declares.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    #[must_use]
    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Append a row. Short rows are padded with absent cells, long rows are truncated.
    pub fn push_row(&mut self, mut row: Row) {
        row.resize(self.columns.len(), None);
        self.rows.push(row);
    }

    #[must_use]
    pub fn cell(&self, row: usize, column: &str) -> Option<&Cell> {
        let idx = self.column_index(column)?;
        self.rows.get(row)?.get(idx)?.as_ref()
    }

    /// Every cell of a column, top to bottom, or `None` if the column doesn't exist.
    pub fn column(&self, name: &str) -> Option<impl Iterator<Item = Option<&Cell>>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(move |row| row[idx].as_ref()))
    }

    /// Whether the column is missing or holds no non-blank value.
    #[must_use]
    pub fn column_is_blank(&self, name: &str) -> bool {
        self.column(name)
            .is_none_or(|mut cells| cells.all(|cell| cell.is_none_or(Cell::is_blank)))
    }

    /// Insert a column at `position` (clamped to the column count), one value per row.
    pub fn insert_column(&mut self, position: usize, name: impl Into<CompactString>, values: Vec<Option<Cell>>) {
        debug_assert_eq!(values.len(), self.rows.len(), "one value per row");

        let position = position.min(self.columns.len());
        self.columns.insert(position, name.into());

        let mut values = values.into_iter();
        for row in &mut self.rows {
            row.insert(position, values.next().flatten());
        }
    }

    /// Rename columns through a `(from, to)` table. Names not present are ignored.
    pub fn rename_columns(&mut self, renames: &[(&str, &str)]) {
        for column in &mut self.columns {
            if let Some((_, to)) = renames.iter().find(|(from, _)| column == from) {
                *column = (*to).into();
            }
        }
    }

    /// Rename a single column, returning whether it was found.
    pub fn rename_column(&mut self, from: &str, to: &str) -> bool {
        match self.column_index(from) {
            Some(idx) => {
                self.columns[idx] = to.into();
                true
            }
            None => false,
        }
    }

    /// Keep the listed columns in the listed order, silently omitting those that don't exist.
    #[must_use]
    pub fn select(&self, names: &[&str]) -> Self {
        let indices: Vec<usize> = names.iter().filter_map(|name| self.column_index(name)).collect();
        self.project(&indices)
    }

    /// Produce exactly the listed columns in the listed order; missing columns are filled with absent cells.
    #[must_use]
    pub fn reindex(&self, names: &[&str]) -> Self {
        let indices: Vec<Option<usize>> = names.iter().map(|name| self.column_index(name)).collect();

        Self {
            columns: names.iter().map(|&name| name.into()).collect(),
            rows: self
                .rows
                .iter()
                .map(|row| indices.iter().map(|idx| idx.and_then(|i| row[i].clone())).collect())
                .collect(),
        }
    }

    /// Keep only the rows for which `keep` returns true when given the row's sample identifier.
    pub fn retain_by_sample_id(&mut self, mut keep: impl FnMut(Option<&Cell>) -> bool) {
        let Some(idx) = self.column_index(SAMPLE_ID) else {
            self.rows.clear();
            return;
        };

        self.rows.retain(|row| keep(row[idx].as_ref()));
    }

    /// Apply `f` to every present cell of a column.
    pub fn map_column(&mut self, name: &str, mut f: impl FnMut(Cell) -> Option<Cell>) {
        if let Some(idx) = self.column_index(name) {
            for row in &mut self.rows {
                row[idx] = row[idx].take().and_then(&mut f);
            }
        }
    }

    /// Overwrite every cell of `target` with the value of `source` in the same row.
    pub fn copy_column(&mut self, source: &str, target: &str) {
        if let (Some(from), Some(to)) = (self.column_index(source), self.column_index(target)) {
            for row in &mut self.rows {
                row[to] = row[from].clone();
            }
        }
    }

    /// Apply `f` to every present cell outside the named column.
    pub fn map_cells_except(&mut self, except: &str, mut f: impl FnMut(Cell) -> Option<Cell>) {
        let skip = self.column_index(except);
        for row in &mut self.rows {
            for (idx, cell) in row.iter_mut().enumerate() {
                if Some(idx) != skip {
                    *cell = cell.take().and_then(&mut f);
                }
            }
        }
    }

    /// Stack another table's rows underneath this one, matching columns by name.
    ///
    /// Columns only `other` has are appended, so the result holds the union of both column sets.
    pub fn append(&mut self, other: Self) {
        for column in &other.columns {
            if !self.has_column(column) {
                self.columns.push(column.clone());
                for row in &mut self.rows {
                    row.push(None);
                }
            }
        }

        let targets: Vec<usize> = other
            .columns
            .iter()
            .filter_map(|column| self.column_index(column))
            .collect();

        for row in other.rows {
            let mut merged = vec![None; self.columns.len()];
            for (cell, &target) in row.into_iter().zip(&targets) {
                merged[target] = cell;
            }
            self.rows.push(merged);
        }
    }

    fn project(&self, indices: &[usize]) -> Self {
        Self {
            columns: indices.iter().map(|&i| self.columns[i].clone()).collect(),
            rows: self
                .rows
                .iter()
                .map(|row| indices.iter().map(|&i| row[i].clone()).collect())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Option<Cell> {
        Some(Cell::Text(s.into()))
    }

    fn sample_table() -> Table {
        let mut table = Table::new([SAMPLE_ID, "a", "b"]);
        table.push_row(vec![text("S1"), text("1"), text("2")]);
        table.push_row(vec![text("S2"), None, text("4")]);
        table
    }

    #[test]
    fn test_keyed_has_only_sample_id() {
        let table = Table::keyed();
        assert_eq!(table.columns(), [SAMPLE_ID]);
        assert!(table.is_empty());
    }

    #[test]
    fn test_push_row_pads_short_rows() {
        let mut table = Table::new([SAMPLE_ID, "a", "b"]);
        table.push_row(vec![text("S1")]);
        assert_eq!(table.rows()[0].len(), 3);
        assert_eq!(table.cell(0, "b"), None);
    }

    #[test]
    fn test_select_omits_missing_columns() {
        let selected = sample_table().select(&["b", "missing", SAMPLE_ID]);
        assert_eq!(selected.columns(), ["b", SAMPLE_ID]);
        assert_eq!(selected.rows()[1], vec![text("4"), text("S2")]);
    }

    #[test]
    fn test_reindex_fills_missing_columns() {
        let reindexed = sample_table().reindex(&[SAMPLE_ID, "c"]);
        assert_eq!(reindexed.columns(), [SAMPLE_ID, "c"]);
        assert_eq!(reindexed.rows()[0], vec![text("S1"), None]);
    }

    #[test]
    fn test_insert_column_at_position() {
        let mut table = sample_table();
        table.insert_column(2, "mid", vec![text("x"), text("y")]);
        assert_eq!(table.columns(), [SAMPLE_ID, "a", "mid", "b"]);
        assert_eq!(table.cell(1, "mid"), Some(&Cell::Text("y".into())));
    }

    #[test]
    fn test_insert_column_clamps_position() {
        let mut table = Table::keyed();
        table.insert_column(3, "late", Vec::new());
        assert_eq!(table.columns(), [SAMPLE_ID, "late"]);
    }

    #[test]
    fn test_rename_columns_ignores_unknown() {
        let mut table = sample_table();
        table.rename_columns(&[("a", "A"), ("zzz", "Z")]);
        assert_eq!(table.columns(), [SAMPLE_ID, "A", "b"]);
    }

    #[test]
    fn test_column_is_blank() {
        let mut table = sample_table();
        assert!(!table.column_is_blank("a"));
        assert!(table.column_is_blank("missing"));
        table.push_row(vec![None, None, None]);
        table.map_column("a", |_| None);
        assert!(table.column_is_blank("a"));
    }

    #[test]
    fn test_retain_by_sample_id() {
        let mut table = sample_table();
        table.retain_by_sample_id(|id| id.is_some_and(|c| c.to_key() == "S2"));
        assert_eq!(table.len(), 1);
        assert_eq!(table.cell(0, "b"), Some(&Cell::Text("4".into())));
    }

    #[test]
    fn test_copy_column() {
        let mut table = sample_table();
        table.copy_column("b", "a");
        assert_eq!(table.cell(1, "a"), Some(&Cell::Text("4".into())));
        table.copy_column("missing", "a");
        assert_eq!(table.cell(0, "a"), Some(&Cell::Text("2".into())));
    }

    #[test]
    fn test_append_unions_columns() {
        let mut table = sample_table();
        let mut other = Table::new(["c", SAMPLE_ID]);
        other.push_row(vec![text("z"), text("S3")]);
        table.append(other);

        assert_eq!(table.columns(), [SAMPLE_ID, "a", "b", "c"]);
        assert_eq!(table.len(), 3);
        assert_eq!(table.rows()[0][3], None);
        assert_eq!(table.rows()[2], vec![text("S3"), None, None, text("z")]);
    }
}
