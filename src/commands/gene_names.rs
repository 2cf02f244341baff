use super::Host;
use super::common::write_file;
use crate::{HashMap, HashSet, Result};
use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use ohno::{IntoAppError, bail};
use std::fs::File;
use std::io::Write;

/// Expression columns copied to the output after the identifier and name.
const VALUE_COLUMNS: [&str; 4] = ["Length", "EffectiveLength", "TPM", "NumReads"];

#[derive(Parser, Debug)]
pub struct GeneNamesArgs {
    /// Expression table (TSV with a `Name` column)
    #[arg(long, short = 'i', value_name = "FILE")]
    pub input: Utf8PathBuf,

    /// Annotation table (TSV with gene and transcript identifiers and names)
    #[arg(long, short = 'd', value_name = "FILE")]
    pub database: Utf8PathBuf,

    /// Name transcripts instead of genes
    #[arg(long, short = 't')]
    pub transcripts: bool,

    /// Output TSV file
    #[arg(long, short = 'o', value_name = "FILE")]
    pub outfile: Utf8PathBuf,
}

fn tsv_reader(path: &Utf8Path) -> Result<csv::Reader<File>> {
    let file = File::open(path).into_app_err_with(|| format!("opening '{path}'"))?;
    Ok(csv::ReaderBuilder::new().delimiter(b'\t').flexible(true).from_reader(file))
}

fn required_column(headers: &csv::StringRecord, name: &str, path: &Utf8Path) -> Result<usize> {
    match headers.iter().position(|h| h == name) {
        Some(idx) => Ok(idx),
        None => bail!("'{path}' has no '{name}' column"),
    }
}

/// Map each identifier to its distinct names, in the order they first appear.
///
/// A blank name stands for the identifier itself.
fn load_names(path: &Utf8Path, id_column: &str, name_column: &str) -> Result<HashMap<String, Vec<String>>> {
    let mut reader = tsv_reader(path)?;
    let headers = reader.headers()?.clone();
    let id_idx = required_column(&headers, id_column, path)?;
    let name_idx = required_column(&headers, name_column, path)?;

    let mut seen: HashSet<(String, String)> = HashSet::default();
    let mut names: HashMap<String, Vec<String>> = HashMap::default();
    for record in reader.records() {
        let record = record?;
        let id = record.get(id_idx).unwrap_or_default();
        let name = match record.get(name_idx).map(str::trim) {
            Some(name) if !name.is_empty() => name,
            _ => id,
        };
        if seen.insert((id.to_owned(), name.to_owned())) {
            names.entry(id.to_owned()).or_default().push(name.to_owned());
        }
    }

    Ok(names)
}

/// Attach gene or transcript names to an expression table.
///
/// Each expression row is emitted once per name its identifier maps to. Identifiers with no
/// name keep the identifier itself as the name.
///
/// # Errors
///
/// Returns an error if an input can't be read or lacks a required column, or the output can't be written
pub fn add_gene_names<H: Host>(host: &mut H, args: &GeneNamesArgs) -> Result<()> {
    let (id_column, name_column) = if args.transcripts {
        ("transcript_id", "transcript_name")
    } else {
        ("gene_id", "gene_name")
    };

    let names = load_names(&args.database, id_column, name_column)?;

    let mut reader = tsv_reader(&args.input)?;
    let headers = reader.headers()?.clone();
    let id_idx = required_column(&headers, "Name", &args.input)?;
    let value_idx = VALUE_COLUMNS
        .iter()
        .map(|column| required_column(&headers, column, &args.input))
        .collect::<Result<Vec<_>>>()?;

    let mut rows = 0_usize;
    let mut unnamed = 0_usize;

    write_file(&args.outfile, |w| {
        let mut writer = csv::WriterBuilder::new().delimiter(b'\t').from_writer(w);
        writer.write_record(["Id", "Name"].into_iter().chain(VALUE_COLUMNS))?;

        for record in reader.records() {
            let record = record?;
            let id = record.get(id_idx).unwrap_or_default();
            let values: Vec<&str> = value_idx.iter().map(|&i| record.get(i).unwrap_or_default()).collect();

            let fallback = [id.to_owned()];
            let row_names = match names.get(id) {
                Some(found) => found.as_slice(),
                None => {
                    unnamed += 1;
                    fallback.as_slice()
                }
            };

            for name in row_names {
                writer.write_record([id, name.as_str()].into_iter().chain(values.iter().copied()))?;
                rows += 1;
            }
        }

        writer.flush()?;
        Ok(())
    })?;

    let _ = writeln!(
        host.output(),
        "Wrote {} ({rows} rows, {unnamed} without a {name_column})",
        args.outfile
    );
    Ok(())
}
