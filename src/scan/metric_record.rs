use crate::HashMap;
use compact_str::CompactString;

/// The metric values extracted from one report file.
///
/// Values are kept exactly as they appeared in the report. A metric that was never matched
/// has no entry, which is different from a matched metric whose field was empty.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MetricRecord {
    pub sample_id: CompactString,
    pub values: HashMap<&'static str, CompactString>,
}

impl MetricRecord {
    #[must_use]
    pub fn new(sample_id: impl Into<CompactString>) -> Self {
        Self {
            sample_id: sample_id.into(),
            values: HashMap::default(),
        }
    }

    #[must_use]
    pub fn get(&self, metric: &str) -> Option<&str> {
        self.values.get(metric).map(CompactString::as_str)
    }
}
