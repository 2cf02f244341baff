use super::{Cell, LOG_TARGET, Row, Table};
use crate::HashMap;
use crate::metrics::SAMPLE_ID;
use compact_str::{CompactString, format_compact};
use std::collections::BTreeMap;

/// Join key of a row. Absent identifiers match each other and sort after every present one.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
enum JoinKey {
    Present(CompactString),
    Absent,
}

impl JoinKey {
    fn of(row: &Row, key_idx: Option<usize>) -> Self {
        key_idx
            .and_then(|idx| row[idx].as_ref())
            .map_or(Self::Absent, |cell| Self::Present(cell.to_key()))
    }
}

/// Column arrangement shared by both join flavors: the left columns followed by the right's non-key columns.
struct JoinLayout {
    columns: Vec<CompactString>,
    left_width: usize,
    left_key: usize,
    right_key: Option<usize>,
    right_extra: Vec<usize>,
}

impl JoinLayout {
    fn new(left: &Table, right: &Table) -> (Self, Option<usize>) {
        let mut columns: Vec<CompactString> = left.columns().to_vec();
        let left_key_idx = left.column_index(SAMPLE_ID);

        // A left table without the key still needs a place to put keys from the right
        let left_key = left_key_idx.unwrap_or_else(|| {
            columns.push(SAMPLE_ID.into());
            columns.len() - 1
        });
        let left_width = columns.len();

        let right_key = right.column_index(SAMPLE_ID);
        let right_extra: Vec<usize> = (0..right.columns().len()).filter(|&i| Some(i) != right_key).collect();

        for &i in &right_extra {
            let name = &right.columns()[i];
            if let Some(clash) = columns[..left_width].iter().position(|c| c == name) {
                log::debug!(target: LOG_TARGET, "Column '{name}' exists on both sides of a join, suffixing with _x/_y");
                columns[clash] = format_compact!("{name}_x");
                columns.push(format_compact!("{name}_y"));
            } else {
                columns.push(name.clone());
            }
        }

        (
            Self {
                columns,
                left_width,
                left_key,
                right_key,
                right_extra,
            },
            left_key_idx,
        )
    }

    fn combine(&self, left: Option<&Row>, right: Option<&Row>) -> Row {
        let mut row: Row = Vec::with_capacity(self.columns.len());

        match left {
            Some(cells) => {
                row.extend(cells.iter().cloned());
                row.resize(self.left_width, None);
            }
            None => {
                row.resize(self.left_width, None);
                row[self.left_key] = right.and_then(|cells| self.right_key.and_then(|k| cells[k].clone()));
            }
        }

        for &i in &self.right_extra {
            row.push(right.and_then(|cells| cells[i].clone()));
        }

        row
    }

    fn into_table(self, rows: Vec<Row>) -> Table {
        let mut table = Table::new(self.columns);
        for row in rows {
            table.push_row(row);
        }
        table
    }
}

/// Full outer join of two tables on the sample identifier.
///
/// A right table without rows contributes nothing, not even columns, and `left` is returned as is.
/// Otherwise every pair of rows sharing a key is emitted (duplicate keys multiply), and rows whose
/// key appears on one side only are kept with absent cells for the other side. Output rows are
/// grouped by key in lexicographic order with absent keys last; within a key, left rows come first
/// in their original order, each paired with the right rows in theirs.
#[must_use]
pub fn outer_join(left: Table, right: &Table) -> Table {
    if right.is_empty() {
        return left;
    }

    let (layout, left_key_idx) = JoinLayout::new(&left, right);

    let mut groups: BTreeMap<JoinKey, (Vec<&Row>, Vec<&Row>)> = BTreeMap::new();
    for row in left.rows() {
        groups.entry(JoinKey::of(row, left_key_idx)).or_default().0.push(row);
    }
    for row in right.rows() {
        groups.entry(JoinKey::of(row, layout.right_key)).or_default().1.push(row);
    }

    let mut rows = Vec::new();
    for (left_rows, right_rows) in groups.values() {
        match (left_rows.is_empty(), right_rows.is_empty()) {
            (false, true) => rows.extend(left_rows.iter().map(|&l| layout.combine(Some(l), None))),
            (true, false) => rows.extend(right_rows.iter().map(|&r| layout.combine(None, Some(r)))),
            _ => {
                for &l in left_rows {
                    rows.extend(right_rows.iter().map(|&r| layout.combine(Some(l), Some(r))));
                }
            }
        }
    }

    log::debug!(target: LOG_TARGET, "Outer join of {} and {} rows produced {} rows", left.len(), right.len(), rows.len());
    layout.into_table(rows)
}

/// Right join of two tables on the sample identifier.
///
/// Output rows follow the order of `right`. Each right row is paired with every left row sharing its
/// key, or kept once with absent left cells when no left row matches.
#[must_use]
pub fn right_join(left: &Table, right: &Table) -> Table {
    let (layout, left_key_idx) = JoinLayout::new(left, right);

    let mut left_by_key: HashMap<JoinKey, Vec<&Row>> = HashMap::default();
    for row in left.rows() {
        left_by_key.entry(JoinKey::of(row, left_key_idx)).or_default().push(row);
    }

    let mut rows = Vec::new();
    for r in right.rows() {
        match left_by_key.get(&JoinKey::of(r, layout.right_key)) {
            Some(matches) => rows.extend(matches.iter().map(|&l| layout.combine(Some(l), Some(r)))),
            None => rows.push(layout.combine(None, Some(r))),
        }
    }

    layout.into_table(rows)
}

/// Outer-join an ordered list of tables from left to right.
///
/// Each join's result becomes the left side of the next. An empty list yields a table with only the
/// sample identifier column.
#[must_use]
pub fn fold_outer(tables: impl IntoIterator<Item = Table>) -> Table {
    tables
        .into_iter()
        .reduce(|merged, next| outer_join(merged, &next))
        .unwrap_or_else(Table::keyed)
}

/// The sample identifier of every row, in row order.
#[cfg(test)]
pub(crate) fn sample_ids(table: &Table) -> Vec<Option<String>> {
    table
        .column(SAMPLE_ID)
        .map(|cells| cells.map(|c| c.map(Cell::to_string)).collect())
        .unwrap_or_default()
}
