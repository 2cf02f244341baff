//! Column names shared by the metadata worksheet and the merged tables.

/// Join key shared by every table.
pub const SAMPLE_ID: &str = "SAMPLE ID";

/// Legacy names for the sample identifier column found in older worksheets, in order of preference.
pub const SAMPLE_ID_ALIASES: &[&str] = &["Content_Desc", "Sample_ID"];

pub const TOTAL_BASES: &str = "Total bases";

/// Derived from [`TOTAL_BASES`] for mapping reports.
pub const TOTAL_GIGA_BASES: &str = "Total giga bases";

/// Columns kept from a metadata worksheet.
pub const METADATA_COLUMNS: &[&str] = &[
    "ACCESSION NUMBER",
    "RUN ID",
    SAMPLE_ID,
    "Total DNA yield (ng)",
    "260/280",
    "Library Input (ng)",
    "Capture Input (ng)",
];

/// Metadata columns leading the MGI summary table.
pub const MGI_METADATA_COLUMNS: &[&str] = METADATA_COLUMNS;

/// Columns of the Genoox subset table.
pub const GENOOX_COLUMNS: &[&str] = &[
    "ACCESSION NUMBER",
    "RUN ID",
    SAMPLE_ID,
    "Total DNA yield (ng)",
    "260/280",
    "Library Input (ng)",
];

/// Raw metric names and the short codes the MGI summary reports them under.
///
/// The order of this table is also the order of the metric columns in that summary.
pub const CANONICAL_RENAMES: &[(&str, &str)] = &[
    ("Total input reads", "TOTAL_READS"),
    ("PCT Number of duplicate marked reads", "PCT_DUPLICATE_READS"),
    ("PCT Mapped reads", "PCT_MAPPED_READS"),
    (TOTAL_BASES, "TOTAL_BASES"),
    (TOTAL_GIGA_BASES, "TOTAL_GIGA_BASES"),
    ("PCT Mismatched bases R1", "MISMATCHED_RATE_R1"),
    ("PCT Mismatched bases R2", "MISMATCHED_RATE_R2"),
    ("PCT Q30 bases R1", "PCT_Q30_BASES_1"),
    ("PCT Q30 bases R2", "PCT_Q30_BASES_2"),
    ("Insert length: mean", "MEAN_INS_SIZE"),
    ("Average alignment coverage over genome", "AVG_ALIGN_GENOME_COVERAGE"),
    ("Average autosomal coverage over genome", "AVG_AUTOSOMAL_GENOME_COVERAGE"),
    ("PCT of genome with coverage [  20x: inf)", "PCT_GENOME_20x"),
    ("PCT of genome with coverage [  10x: inf)", "PCT_GENOME_10x"),
    ("Average autosomal coverage over QC coverage region", "AVG_AUTOSOMAL_EXOME_COVERAGE"),
    ("PCT of QC coverage region with coverage [  20x: inf)", "PCT_EXOME_20x"),
    ("Uniformity of coverage (PCT > 0.2*mean) over genome", "PCT_UNIFORM_COVERAGE"),
    ("PCT Aligned reads in genome", "PCT_GENOME_ALIGNED_READS"),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::CATALOG;

    #[test]
    fn test_renames_refer_to_known_metrics() {
        for (raw, _) in CANONICAL_RENAMES {
            let known = *raw == TOTAL_GIGA_BASES || CATALOG.iter().flat_map(|def| def.metrics).any(|m| m.name == *raw);
            assert!(known, "rename source '{raw}' is not a catalog metric");
        }
    }

    #[test]
    fn test_genoox_columns_are_metadata_columns() {
        for column in GENOOX_COLUMNS {
            assert!(METADATA_COLUMNS.contains(column));
        }
    }

    #[test]
    fn test_sample_id_is_a_metadata_column() {
        assert!(METADATA_COLUMNS.contains(&SAMPLE_ID));
    }
}
