use super::LOG_TARGET;
use crate::HashMap;
use crate::metrics::{CATALOG, MetricCategory};
use camino::{Utf8Path, Utf8PathBuf};
use strum::IntoEnumIterator;

/// Report paths bucketed by category.
///
/// Every category has a bucket, possibly empty, and each path lives in at most one bucket.
#[derive(Debug, Clone, Default)]
pub struct ReportFiles {
    buckets: HashMap<MetricCategory, Vec<Utf8PathBuf>>,
}

impl ReportFiles {
    /// The reports of one category, in the order they were classified.
    #[must_use]
    pub fn get(&self, category: MetricCategory) -> &[Utf8PathBuf] {
        self.buckets.get(&category).map_or(&[], Vec::as_slice)
    }

    /// Total number of classified reports.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Bucket report paths by category, testing suffixes in catalog order.
///
/// Surrounding whitespace is trimmed from each path before matching. A path is assigned to the
/// first category whose suffix it ends with; paths matching no category are dropped.
#[must_use]
pub fn classify<P: AsRef<Utf8Path>>(paths: &[P]) -> ReportFiles {
    let mut buckets: HashMap<MetricCategory, Vec<Utf8PathBuf>> = MetricCategory::iter().map(|c| (c, Vec::new())).collect();

    for path in paths {
        let trimmed = path.as_ref().as_str().trim();

        match CATALOG.iter().find(|def| def.matches(trimmed)) {
            Some(def) => {
                log::trace!(target: LOG_TARGET, "Classified '{trimmed}' as {}", def.category);
                buckets.entry(def.category).or_default().push(Utf8PathBuf::from(trimmed));
            }
            None => log::debug!(target: LOG_TARGET, "Ignoring '{trimmed}', it matches no report category"),
        }
    }

    for category in MetricCategory::iter() {
        log::debug!(
            target: LOG_TARGET,
            "{} {category} report(s)",
            buckets.get(&category).map_or(0, Vec::len)
        );
    }

    ReportFiles { buckets }
}
