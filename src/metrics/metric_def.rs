use super::MetricCategory;

/// Marker that distinguishes a percentage metric from the count printed on the same report row.
pub const PERCENT_PREFIX: &str = "PCT ";

/// A single metric pulled out of a report line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricDef {
    /// Column name of the metric in the output tables
    pub name: &'static str,

    /// Zero-based position of the value in the comma-split report line
    pub field_index: usize,
}

/// Everything needed to find and read one category of report.
#[derive(Debug)]
pub struct CategoryDef {
    pub category: MetricCategory,

    /// File name ending that identifies reports of this category
    pub suffix: &'static str,

    /// Only lines starting with or containing this text are searched; empty means every line
    pub anchor: &'static str,

    pub metrics: &'static [MetricDef],
}

macro_rules! metric_def {
    ($name:expr, $field_index:expr) => {
        MetricDef {
            name: $name,
            field_index: $field_index,
        }
    };
}

impl CategoryDef {
    /// Look up the catalog entry for a category.
    #[must_use]
    pub fn of(category: MetricCategory) -> &'static Self {
        CATALOG
            .iter()
            .find(|def| def.category == category)
            .expect("every category has a catalog entry")
    }

    /// Whether a report file path belongs to this category.
    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        path.ends_with(self.suffix)
    }
}

/// Strip the percentage marker from a metric name, yielding the text the report row is labeled with.
#[must_use]
pub fn row_label(metric_name: &str) -> &str {
    metric_name.strip_prefix(PERCENT_PREFIX).unwrap_or(metric_name)
}

pub const CATALOG: &[CategoryDef] = &[
    CategoryDef {
        category: MetricCategory::Mapping,
        suffix: ".mapping_metrics.csv",
        anchor: "MAPPING/ALIGNING SUMMARY",
        metrics: &[
            metric_def!("Total input reads", 3),
            metric_def!("Total bases", 3),
            metric_def!("Mapped reads", 3),
            metric_def!("PCT Mapped reads", 4),
            metric_def!("Number of unique reads (excl. duplicate marked reads)", 3),
            metric_def!("PCT Number of unique reads (excl. duplicate marked reads)", 4),
            metric_def!("Number of duplicate marked reads", 3),
            metric_def!("PCT Number of duplicate marked reads", 4),
            metric_def!("Paired reads (itself & mate mapped)", 4),
            metric_def!("Not properly paired reads (discordant)", 4),
            metric_def!("PCT Mismatched bases R1", 4),
            metric_def!("PCT Mismatched bases R2", 4),
            metric_def!("Q30 bases R1", 4),
            metric_def!("PCT Q30 bases R1", 4),
            metric_def!("Q30 bases R2", 4),
            metric_def!("PCT Q30 bases R2", 4),
            metric_def!("Insert length: median", 3),
            metric_def!("Insert length: mean", 3),
            metric_def!("Estimated sample contamination", 3),
        ],
    },
    CategoryDef {
        category: MetricCategory::Wgs,
        suffix: ".wgs_coverage_metrics.csv",
        anchor: "COVERAGE SUMMARY",
        metrics: &[
            metric_def!("Average alignment coverage over genome", 3),
            metric_def!("Average autosomal coverage over genome", 3),
            metric_def!("PCT of genome with coverage [  20x: inf)", 3),
            metric_def!("PCT of genome with coverage [  10x: inf)", 3),
            metric_def!("PCT Aligned reads in genome", 4),
            metric_def!("Uniformity of coverage (PCT > 0.2*mean) over genome", 3),
        ],
    },
    CategoryDef {
        category: MetricCategory::QcRegion,
        suffix: ".qc-coverage-region-1_coverage_metrics.csv",
        anchor: "COVERAGE SUMMARY",
        metrics: &[
            metric_def!("Average alignment coverage over QC coverage region", 3),
            metric_def!("Average autosomal coverage over QC coverage region", 3),
            metric_def!("PCT of QC coverage region with coverage [  20x: inf)", 3),
            metric_def!("PCT of QC coverage region with coverage [  10x: inf)", 3),
            metric_def!("Uniformity of coverage (PCT > 0.2*mean) over QC coverage region", 3),
        ],
    },
    CategoryDef {
        category: MetricCategory::Vc,
        suffix: ".vc_metrics.csv",
        anchor: "CALLER POSTFILTER",
        metrics: &[
            metric_def!("Het/Hom ratio", 3),
            metric_def!("Ti/Tv ratio", 3),
            metric_def!("Percent Autosome Callability", 3),
        ],
    },
    CategoryDef {
        category: MetricCategory::Cnv,
        suffix: ".cnv_metrics.csv",
        anchor: "",
        metrics: &[metric_def!("SEX GENOTYPER", 3), metric_def!("Coverage uniformity", 3)],
    },
];
