//! Command dispatch logic for qc-metrics

use super::common::{LogLevel, init_logging};
use super::{
    DemuxArgs, FastqInfoArgs, GeneNamesArgs, InitArgs, SamplesheetArgs, SummarizeArgs, ValidateArgs, add_gene_names,
    check_samplesheet, fastq_info, init_config, prepare_demux, summarize, validate_config,
};
use crate::{Host, Result};
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, Subcommand};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "qc-metrics", version, author, long_about = None)]
#[command(about = "Collect sequencing QC metrics into summary workbooks")]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(subcommand)]
    command: QcSubcommand,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none", global = true)]
    log_level: LogLevel,
}

#[derive(Subcommand, Debug)]
enum QcSubcommand {
    /// Merge the QC reports of a run into summary workbooks
    Summarize(Box<SummarizeArgs>),
    /// Record flowcell, lane, and index of a FASTQ read pair
    FastqInfo(FastqInfoArgs),
    /// Add gene or transcript names to an expression table
    GeneNames(GeneNamesArgs),
    /// Check a sample sheet and copy it to its validated location
    Samplesheet(SamplesheetArgs),
    /// Prepare a BCL Convert sample sheet for an Illumina run folder
    Demux(DemuxArgs),
    /// Generate a default configuration file
    Init(InitArgs),
    /// Validate a configuration file
    Validate(ValidateArgs),
}

/// Dispatch command-line arguments to the appropriate handler
///
/// This function parses the command-line arguments and executes the corresponding
/// subcommand. It's designed to be called from main.rs with the program arguments.
///
/// # Errors
///
/// Returns an error if command parsing fails or if the executed command fails
pub fn run<I, T, H>(host: &mut H, args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
    H: Host,
{
    let cli = Cli::parse_from(args);
    init_logging(cli.log_level);

    match &cli.command {
        QcSubcommand::Summarize(summarize_args) => summarize(host, summarize_args),
        QcSubcommand::FastqInfo(fastq_args) => fastq_info(host, fastq_args),
        QcSubcommand::GeneNames(gene_args) => add_gene_names(host, gene_args),
        QcSubcommand::Samplesheet(samplesheet_args) => check_samplesheet(host, samplesheet_args),
        QcSubcommand::Demux(demux_args) => prepare_demux(host, demux_args),
        QcSubcommand::Init(init_args) => init_config(host, init_args),
        QcSubcommand::Validate(validate_args) => validate_config(host, validate_args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_summarize_arguments() {
        let cli = Cli::try_parse_from([
            "qc-metrics",
            "summarize",
            "-i",
            "run",
            "-m",
            "a.xlsx",
            "-m",
            "b.tsv",
            "--csv",
            "--log-level",
            "debug",
        ])
        .unwrap();

        assert_eq!(cli.log_level, LogLevel::Debug);
        let QcSubcommand::Summarize(args) = cli.command else {
            panic!("expected summarize");
        };
        assert_eq!(args.input_dir, "run");
        assert_eq!(args.mgi_worksheet, ["a.xlsx", "b.tsv"]);
        assert_eq!(args.output_dir, ".");
        assert!(args.csv);
        assert_eq!(args.prefix, None);
    }

    #[test]
    fn test_worksheets_follow_one_flag() {
        let cli = Cli::try_parse_from(["qc-metrics", "summarize", "-m", "a.xlsx", "b.tsv", "-i", "run", "-m", "c.csv"]).unwrap();

        let QcSubcommand::Summarize(args) = cli.command else {
            panic!("expected summarize");
        };
        assert_eq!(args.mgi_worksheet, ["a.xlsx", "b.tsv", "c.csv"]);
        assert_eq!(args.input_dir, "run");
    }

    #[test]
    fn test_parses_demux_arguments() {
        let cli = Cli::try_parse_from(["qc-metrics", "demux", "-r", "run", "-s", "sheet.xlsx", "-c"]).unwrap();

        let QcSubcommand::Demux(args) = cli.command else {
            panic!("expected demux");
        };
        assert_eq!(args.rundir, "run");
        assert_eq!(args.samplesheet, "sheet.xlsx");
        assert!(args.check_indexes);
        assert_eq!(args.output_dir, ".");
    }

    #[test]
    fn test_summarize_requires_input_dir() {
        assert!(Cli::try_parse_from(["qc-metrics", "summarize"]).is_err());
    }
}
