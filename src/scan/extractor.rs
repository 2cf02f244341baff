use super::MetricRecord;
use crate::Result;
use crate::metrics::{CategoryDef, MetricCategory, MetricDef, PERCENT_PREFIX, SAMPLE_ID, TOTAL_BASES, TOTAL_GIGA_BASES, row_label};
use crate::tables::{Cell, Table};
use camino::{Utf8Path, Utf8PathBuf};
use compact_str::CompactString;
use ohno::IntoAppError;
use std::fs::File;
use std::io::{BufRead, BufReader};

const LOG_TARGET: &str = "   extract";

/// Column position of the derived giga-bases metric in the mapping table.
const GIGA_BASES_POSITION: usize = 3;

/// Metrics sharing a row label, so that one matching line fills all of them.
#[derive(Debug)]
struct SearchGroup {
    label: &'static str,
    metrics: Vec<MetricDef>,
}

impl SearchGroup {
    /// Group metrics by row label, keeping the order in which labels first appear.
    fn build(metrics: &[MetricDef]) -> Vec<Self> {
        let mut groups: Vec<Self> = Vec::new();
        for metric in metrics {
            let label = row_label(metric.name);
            match groups.iter_mut().find(|g| g.label == label) {
                Some(group) => group.metrics.push(*metric),
                None => groups.push(Self {
                    label,
                    metrics: vec![*metric],
                }),
            }
        }
        groups
    }

    fn matches(&self, field: &str) -> bool {
        field == self.label || field.strip_prefix(PERCENT_PREFIX) == Some(self.label)
    }
}

/// Outcome of testing one report line against the search groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineMatch {
    NoMatch,
    Matched(usize),
}

/// Find the first group, in group order, with a field naming its label.
fn match_line(fields: &[&str], groups: &[SearchGroup]) -> LineMatch {
    for (idx, group) in groups.iter().enumerate() {
        if fields.iter().any(|field| group.matches(field.trim())) {
            return LineMatch::Matched(idx);
        }
    }

    LineMatch::NoMatch
}

/// The sample identifier encoded in a report file name: everything before the first `.`.
#[must_use]
pub fn sample_id_from_path(path: &Utf8Path) -> CompactString {
    let name = path.file_name().unwrap_or_default();
    name.split_once('.').map_or(name, |(head, _)| head).into()
}

/// Pull the given metrics out of a single report.
///
/// # Errors
///
/// Fails if the report can't be opened or read to the end, including when it isn't valid UTF-8.
pub fn extract_record(path: &Utf8Path, metrics: &[MetricDef], anchor: &str) -> Result<MetricRecord> {
    let file = File::open(path).into_app_err_with(|| format!("opening report '{path}'"))?;
    scan_lines(BufReader::new(file), sample_id_from_path(path), metrics, anchor)
        .into_app_err_with(|| format!("reading report '{path}'"))
}

fn scan_lines(reader: impl BufRead, sample_id: CompactString, metrics: &[MetricDef], anchor: &str) -> std::io::Result<MetricRecord> {
    let groups = SearchGroup::build(metrics);
    let mut record = MetricRecord::new(sample_id);

    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if !anchor.is_empty() && !line.contains(anchor) {
            continue;
        }

        let fields: Vec<&str> = line.split(',').collect();
        if let LineMatch::Matched(idx) = match_line(&fields, &groups) {
            for metric in &groups[idx].metrics {
                if let Some(value) = fields.get(metric.field_index) {
                    let _ = record.values.insert(metric.name, (*value).into());
                }
            }
        }
    }

    Ok(record)
}

/// Build the table of one batch of reports.
///
/// Reports that can't be read are logged and contribute no row. The columns are the sample
/// identifier followed by every metric extracted from at least one report, in the order the
/// metrics are listed.
#[must_use]
pub fn extract(files: &[Utf8PathBuf], metrics: &[MetricDef], anchor: &str) -> Table {
    let records: Vec<MetricRecord> = files
        .iter()
        .filter_map(|path| match extract_record(path, metrics, anchor) {
            Ok(record) => {
                log::debug!(target: LOG_TARGET, "Extracted {} metric(s) from '{path}'", record.values.len());
                Some(record)
            }
            Err(e) => {
                log::warn!(target: LOG_TARGET, "Skipping report: {e:#}");
                None
            }
        })
        .collect();

    let emitted: Vec<&'static str> = metrics
        .iter()
        .map(|metric| metric.name)
        .filter(|name| records.iter().any(|record| record.values.contains_key(name)))
        .collect();

    let mut table = Table::new(core::iter::once(SAMPLE_ID).chain(emitted.iter().copied()));
    for record in &records {
        let mut row = Vec::with_capacity(emitted.len() + 1);
        row.push(Cell::text(&record.sample_id));
        row.extend(emitted.iter().map(|name| record.values.get(name).map(|value| Cell::Text(value.clone()))));
        table.push_row(row);
    }

    table
}

/// Build the table of one category, adding the metrics derived for that category.
#[must_use]
pub fn extract_category(def: &CategoryDef, files: &[Utf8PathBuf]) -> Table {
    let mut table = extract(files, def.metrics, def.anchor);
    if def.category == MetricCategory::Mapping {
        add_giga_bases(&mut table);
    }

    log::info!(
        target: LOG_TARGET,
        "Built {} table with {} row(s) and {} column(s)",
        def.category,
        table.len(),
        table.columns().len()
    );
    table
}

fn add_giga_bases(table: &mut Table) {
    let Some(bases) = table.column(TOTAL_BASES) else {
        return;
    };

    let giga: Vec<Option<Cell>> = bases
        .map(|cell| {
            cell.and_then(Cell::as_number)
                .map(|n| Cell::Number((n / 1e9 * 100.0).round_ties_even() / 100.0))
        })
        .collect();

    table.insert_column(GIGA_BASES_POSITION, TOTAL_GIGA_BASES, giga);
}
