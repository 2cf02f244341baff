use super::LOG_TARGET;
use crate::metrics::{GENOOX_COLUMNS, SAMPLE_ID};
use crate::tables::{Table, right_join};

/// The metadata rows of samples whose identifier starts with `prefix`.
///
/// When the metadata has no rows or no usable sample identifiers, the samples of the mapping
/// table are used instead, carrying whatever metadata matches them. Rows without an identifier
/// never match the prefix.
#[must_use]
pub fn genoox_subset(metadata: &Table, mapping: &Table, prefix: &str) -> Table {
    let mut subset = metadata.select(GENOOX_COLUMNS);

    if subset.is_empty() || subset.column_is_blank(SAMPLE_ID) {
        log::debug!(target: LOG_TARGET, "Metadata has no sample identifiers, taking samples from the mapping reports");
        subset = right_join(&subset, mapping).select(GENOOX_COLUMNS);
    }

    subset.retain_by_sample_id(|id| id.is_some_and(|cell| cell.to_key().starts_with(prefix)));
    subset
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::METADATA_COLUMNS;
    use crate::tables::Cell;

    fn metadata(rows: &[(&str, &str)]) -> Table {
        let mut table = Table::new(METADATA_COLUMNS.iter().copied());
        for (accession, id) in rows {
            let mut row = vec![None; METADATA_COLUMNS.len()];
            row[0] = Cell::text(accession);
            row[2] = Cell::text(id);
            table.push_row(row);
        }
        table
    }

    fn mapping(ids: &[&str]) -> Table {
        let mut table = Table::new([SAMPLE_ID, "Mapped reads"]);
        for id in ids {
            table.push_row(vec![Cell::text(id), Cell::text("100")]);
        }
        table
    }

    fn ids(table: &Table) -> Vec<String> {
        table
            .column(SAMPLE_ID)
            .unwrap()
            .map(|cell| cell.map(Cell::to_string).unwrap_or_default())
            .collect()
    }

    #[test]
    fn test_filters_metadata_by_prefix() {
        let subset = genoox_subset(&metadata(&[("ACC1", "G100"), ("ACC2", "A200")]), &mapping(&["G999"]), "G");

        assert_eq!(subset.columns(), GENOOX_COLUMNS);
        assert_eq!(ids(&subset), ["G100"]);
        assert_eq!(subset.cell(0, "ACCESSION NUMBER"), Some(&Cell::Text("ACC1".into())));
    }

    #[test]
    fn test_falls_back_to_mapping_samples() {
        let subset = genoox_subset(&metadata(&[]), &mapping(&["G1", "S2", "G3"]), "G");

        assert_eq!(subset.columns(), GENOOX_COLUMNS);
        assert_eq!(ids(&subset), ["G1", "G3"]);
        assert_eq!(subset.cell(0, "ACCESSION NUMBER"), None);
    }

    #[test]
    fn test_blank_identifiers_fall_back_to_mapping_samples() {
        let mut meta = Table::new(METADATA_COLUMNS.iter().copied());
        let mut row = vec![None; METADATA_COLUMNS.len()];
        row[0] = Cell::text("ACC1");
        meta.push_row(row);

        let subset = genoox_subset(&meta, &mapping(&["G7"]), "G");

        assert_eq!(ids(&subset), ["G7"]);
    }

    #[test]
    fn test_no_match_is_empty() {
        let subset = genoox_subset(&metadata(&[("ACC2", "A200")]), &mapping(&[]), "G");
        assert!(subset.is_empty());

        let subset = genoox_subset(&metadata(&[]), &Table::keyed(), "G");
        assert!(subset.is_empty());
    }

    #[test]
    fn test_custom_prefix() {
        let subset = genoox_subset(&metadata(&[("A", "GX1"), ("B", "G2")]), &mapping(&[]), "GX");
        assert_eq!(ids(&subset), ["GX1"]);
    }
}
