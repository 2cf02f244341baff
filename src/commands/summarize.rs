use super::Host;
use super::common::write_file;
use super::config::Config;
use crate::Result;
use crate::recipes::Recipe;
use crate::reports::{generate_csv, generate_xlsx};
use crate::scan::{CategoryTables, classify, discover_reports};
use crate::tables::read_worksheets;
use camino::{Utf8Path, Utf8PathBuf};
use chrono::Local;
use clap::Parser;
use ohno::IntoAppError;
use std::fs;
use std::io::Write;
use strum::IntoEnumIterator;

#[derive(Parser, Debug)]
pub struct SummarizeArgs {
    /// Directory searched recursively for QC report files
    #[arg(long, short = 'i', value_name = "DIR")]
    pub input_dir: Utf8PathBuf,

    /// Laboratory metadata worksheets (.tsv, .csv, or .xlsx)
    #[arg(long, short = 'm', value_name = "FILE", num_args = 1..)]
    pub mgi_worksheet: Vec<Utf8PathBuf>,

    /// Directory where the workbooks are written, created if missing
    #[arg(long, short = 'o', value_name = "DIR", default_value = ".")]
    pub output_dir: Utf8PathBuf,

    /// Prefix of the output file names (default is today's date followed by the configured tag)
    #[arg(long, short = 'p', value_name = "PREFIX")]
    pub prefix: Option<String>,

    /// Also write each table as a CSV file next to its workbook
    #[arg(long)]
    pub csv: bool,

    /// Path to configuration file (default is `qc-metrics.toml`)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,
}

/// Scan the input directory, merge the metrics, and write one workbook per recipe.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the input directory can't be walked, or an
/// output file can't be written
pub fn summarize<H: Host>(host: &mut H, args: &SummarizeArgs) -> Result<()> {
    let config = Config::load(Utf8Path::new("."), args.config.as_ref())?;
    let prefix = args
        .prefix
        .clone()
        .unwrap_or_else(|| config.default_prefix(Local::now().date_naive()));

    let reports = discover_reports(&args.input_dir, &config.report_suffix)?;
    let tables = CategoryTables::build(&classify(reports.as_slice()));
    let metadata = read_worksheets(&args.mgi_worksheet, &config.worksheet_sheet);

    fs::create_dir_all(&args.output_dir).into_app_err_with(|| format!("creating output directory '{}'", args.output_dir))?;

    for recipe in Recipe::iter() {
        let stem = format!("{prefix}{}", recipe.file_suffix());

        let Some(table) = recipe.build(&metadata, &tables, &config.genoox_prefix) else {
            let _ = writeln!(
                host.output(),
                "Skipped {stem}.xlsx: no sample identifier starts with '{}'",
                config.genoox_prefix
            );
            continue;
        };

        let xlsx_path = args.output_dir.join(format!("{stem}.xlsx"));
        write_file(&xlsx_path, |w| generate_xlsx(&table, recipe.sheet_name(), w))?;
        let _ = writeln!(host.output(), "Wrote {xlsx_path} ({} rows)", table.len());

        if args.csv {
            let csv_path = args.output_dir.join(format!("{stem}.csv"));
            write_file(&csv_path, |w| generate_csv(&table, w))?;
            let _ = writeln!(host.output(), "Wrote {csv_path} ({} rows)", table.len());
        }
    }

    Ok(())
}
