use super::Host;
use super::common::{reverse_complement, write_file};
use crate::Result;
use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use compact_str::CompactString;
use flate2::read::MultiGzDecoder;
use ohno::{IntoAppError, app_err, bail};
use std::fs::File;
use std::io::{BufRead, BufReader, Write};

#[derive(Parser, Debug)]
pub struct FastqInfoArgs {
    /// Sample identifier recorded in the output
    #[arg(value_name = "SAMPLE")]
    pub sample: String,

    /// Gzip-compressed FASTQ with the first reads of the pair
    #[arg(value_name = "R1")]
    pub read1: Utf8PathBuf,

    /// Gzip-compressed FASTQ with the second reads of the pair
    #[arg(value_name = "R2")]
    pub read2: Utf8PathBuf,

    /// Output CSV file
    #[arg(long, short = 'o', value_name = "PATH", default_value = "fastq_info.csv")]
    pub output: Utf8PathBuf,
}

/// Run details carried by the header of an Illumina-style FASTQ record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadHeader {
    pub flowcell: CompactString,
    pub lane: CompactString,

    /// The first index followed by the reverse complement of the second, joined by `-`
    pub index: String,
}

/// Parse a header line such as `@A00123:8:HFLWDDSXX:2:1101:1000:1000 1:N:0:ACGTACGT+TTGCAAGG`.
///
/// # Errors
///
/// Fails when the line has too few `:` separated fields or no `+` between the two indexes.
pub fn parse_header(line: &str) -> Result<ReadHeader> {
    let parts: Vec<&str> = line.trim().split(':').collect();
    if parts.len() < 4 {
        bail!("FASTQ header '{line}' has too few fields");
    }

    let last = parts[parts.len() - 1];
    let Some((index1, index2)) = last.split_once('+') else {
        bail!("FASTQ header '{line}' doesn't carry a dual index");
    };

    Ok(ReadHeader {
        flowcell: parts[2].into(),
        lane: parts[3].into(),
        index: format!("{index1}-{}", reverse_complement(index2)),
    })
}

fn read_first_header(path: &Utf8Path) -> Result<ReadHeader> {
    let file = File::open(path).into_app_err_with(|| format!("opening '{path}'"))?;

    let mut line = String::new();
    let _ = BufReader::new(MultiGzDecoder::new(file))
        .read_line(&mut line)
        .into_app_err_with(|| format!("reading FASTQ '{path}'"))?;

    parse_header(&line)
}

fn absolute(path: &Utf8Path) -> Result<Utf8PathBuf> {
    let abs = std::path::absolute(path).into_app_err_with(|| format!("resolving '{path}'"))?;
    Utf8PathBuf::from_path_buf(abs).map_err(|p| app_err!("path '{}' is not valid UTF-8", p.display()))
}

/// Record the flowcell, lane, and index of a read pair.
///
/// # Errors
///
/// Returns an error if either file can't be read or the two files disagree on flowcell or lane
pub fn fastq_info<H: Host>(host: &mut H, args: &FastqInfoArgs) -> Result<()> {
    let first = read_first_header(&args.read1)?;
    let second = read_first_header(&args.read2)?;

    if first.flowcell != second.flowcell || first.lane != second.lane {
        let _ = writeln!(host.error(), "Error: FASTQ files have different flowcell ID or lane number.");
        bail!(
            "'{}' is from flowcell {} lane {} but '{}' is from flowcell {} lane {}",
            args.read1,
            first.flowcell,
            first.lane,
            args.read2,
            second.flowcell,
            second.lane
        );
    }

    let read1 = absolute(&args.read1)?;
    let read2 = absolute(&args.read2)?;

    write_file(&args.output, |w| {
        let mut writer = csv::Writer::from_writer(w);
        writer.write_record(["sample_id", "flowcell_id", "lane_number", "index_sequence", "read1", "read2"])?;
        writer.write_record([
            args.sample.as_str(),
            first.flowcell.as_str(),
            first.lane.as_str(),
            first.index.as_str(),
            read1.as_str(),
            read2.as_str(),
        ])?;
        writer.flush()?;
        Ok(())
    })?;

    let _ = writeln!(host.output(), "FASTQ information written to {}", args.output);
    Ok(())
}
