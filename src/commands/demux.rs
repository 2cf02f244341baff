//! BCL Convert sample sheet preparation for an Illumina run folder.

use super::Host;
use super::common::{reverse_complement, write_file};
use crate::Result;
use crate::tables::{Cell, Table, read_table};
use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use ohno::{IntoAppError, app_err, bail};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;

const LOG_TARGET: &str = "     demux";

const RUN_PARAMETERS_FILE: &str = "RunParameters.xml";
const RUN_INFO_FILE: &str = "RunInfo.xml";

const ADAPTER_READ1: &str = "AGATCGGAAGAGCACACGTCTGAAC";
const ADAPTER_READ2: &str = "AGATCGGAAGAGCGTCGTGTAGGGA";

/// The first index read carries a 10-base index followed by a 9-base UMI.
const INDEX_CYCLES: u32 = 10;
const UMI_CYCLES: u32 = 9;
const MIN_INDEX1_CYCLES: u32 = INDEX_CYCLES + UMI_CYCLES;

const SAMPLE_ID_COLUMN: &str = "Sample_ID";
const CONTENT_DESC_COLUMN: &str = "Content_Desc";
const INDEX_COLUMN: &str = "Index";
const LANE_COLUMN: &str = "Lane";

const UNKNOWN: &str = "UNKNOWN";

#[derive(Parser, Debug)]
pub struct DemuxArgs {
    /// Illumina run folder holding RunParameters.xml and RunInfo.xml
    #[arg(long, short = 'r', value_name = "DIR")]
    pub rundir: Utf8PathBuf,

    /// Sample sheet to demultiplex (.xlsx, anything else is read as CSV)
    #[arg(long, short = 's', value_name = "FILE")]
    pub samplesheet: Utf8PathBuf,

    /// Reverse complement the indexes as RunInfo.xml asks
    #[arg(long, short = 'c')]
    pub check_indexes: bool,

    /// Directory where the sample sheet and run summary are written, created if missing
    #[arg(long, short = 'o', value_name = "DIR", default_value = ".")]
    pub output_dir: Utf8PathBuf,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RunParametersXml {
    run_id: Option<String>,
    side: Option<String>,
    flow_cell_type: Option<String>,
    instrument_type: Option<String>,
    instrument_serial_number: Option<String>,
    planned_reads: Option<PlannedReadsXml>,
    consumable_info: Option<ConsumablesXml>,

    read1_number_of_cycles: Option<u32>,
    read2_number_of_cycles: Option<u32>,
    index_read1_number_of_cycles: Option<u32>,
    index_read2_number_of_cycles: Option<u32>,
    flow_cell_serial_barcode: Option<String>,
    rfids_info: Option<RfidsInfoXml>,
}

#[derive(Debug, Default, Deserialize)]
struct PlannedReadsXml {
    #[serde(rename = "Read", default)]
    reads: Vec<PlannedReadXml>,
}

#[derive(Debug, Default, Deserialize)]
struct PlannedReadXml {
    #[serde(rename = "ReadName", default)]
    read_name: String,
    #[serde(rename = "Cycles")]
    cycles: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ConsumablesXml {
    #[serde(rename = "ConsumableInfo", default)]
    items: Vec<ConsumableXml>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ConsumableXml {
    #[serde(rename = "Type")]
    kind: Option<String>,
    mode: Option<String>,
    serial_number: Option<String>,
    lot_number: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RfidsInfoXml {
    flow_cell_serial_barcode: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RunInfoXml {
    #[serde(rename = "Run")]
    run: Option<RunXml>,
}

#[derive(Debug, Default, Deserialize)]
struct RunXml {
    #[serde(rename = "Reads")]
    reads: Option<RunReadsXml>,
}

#[derive(Debug, Default, Deserialize)]
struct RunReadsXml {
    #[serde(rename = "Read", default)]
    reads: Vec<RunReadXml>,
}

#[derive(Debug, Default, Deserialize)]
struct RunReadXml {
    #[serde(rename = "IsReverseComplement")]
    is_reverse_complement: Option<String>,
}

/// What the run folder says about the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunInfo {
    pub run_id: String,
    pub flowcell: String,
    pub flowcell_type: String,
    pub instrument_type: String,
    pub instrument: String,
    pub side: String,
    pub flowcell_lot_number: Option<String>,
    pub reagent_lot_number: Option<String>,

    /// Planned cycles keyed by read name (`Read1`, `Index1`, `Index2`, `Read2`).
    pub cycles: BTreeMap<String, u32>,

    pub index1_reverse: bool,
    pub index2_reverse: bool,
}

impl RunInfo {
    fn cycles_of(&self, read: &str) -> Result<u32> {
        self.cycles
            .get(read)
            .copied()
            .ok_or_else(|| app_err!("run {} has no cycle count for {read}", self.run_id))
    }

    /// Every recorded property, keyed by its name in the run summary.
    #[must_use]
    pub fn entries(&self) -> BTreeMap<String, String> {
        let flag = |reverse: bool| (if reverse { "Y" } else { "N" }).to_owned();

        let mut entries = BTreeMap::from([
            ("RunID".to_owned(), self.run_id.clone()),
            ("Flowcell".to_owned(), self.flowcell.clone()),
            ("FlowCellType".to_owned(), self.flowcell_type.clone()),
            ("InstrumentType".to_owned(), self.instrument_type.clone()),
            ("Instrument".to_owned(), self.instrument.clone()),
            ("Side".to_owned(), self.side.clone()),
            ("Index1Reverse".to_owned(), flag(self.index1_reverse)),
            ("Index2Reverse".to_owned(), flag(self.index2_reverse)),
        ]);

        if let Some(lot) = &self.flowcell_lot_number {
            let _ = entries.insert("FlowCellLotNumber".to_owned(), lot.clone());
        }
        if let Some(lot) = &self.reagent_lot_number {
            let _ = entries.insert("ReagentLotNumber".to_owned(), lot.clone());
        }
        for (read, cycles) in &self.cycles {
            let _ = entries.insert(format!("{read}Cycles"), cycles.to_string());
        }

        entries
    }
}

/// One line of the BCL Convert data section.
///
/// Fields are in sort order: lane, then sample, then both indexes.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct DemuxRow {
    pub lane: u32,
    pub sample_id: String,
    pub index: String,
    pub index2: String,
}

fn read_xml<T: DeserializeOwned>(path: &Utf8Path) -> Result<T> {
    let text = fs::read_to_string(path).into_app_err_with(|| format!("reading '{path}'"))?;
    serde_xml_rs::from_str(&text).map_err(|e| app_err!("parsing '{path}': {e}"))
}

fn required(value: Option<String>, tag: &str) -> Result<String> {
    match value.as_deref().map(str::trim) {
        Some(text) if !text.is_empty() => Ok(text.to_owned()),
        _ => bail!("tag '{tag}' is missing or empty in {RUN_PARAMETERS_FILE}"),
    }
}

/// Read the run parameters, telling NovaSeq X Plus folders from older NovaSeq ones by their planned reads.
///
/// # Errors
///
/// Returns an error if a run file is missing, can't be parsed, or lacks a required value
pub fn parse_run_info(run_dir: &Utf8Path) -> Result<RunInfo> {
    let params_path = run_dir.join(RUN_PARAMETERS_FILE);
    if !params_path.is_file() {
        bail!("{RUN_PARAMETERS_FILE} not found in '{run_dir}'");
    }

    let mut params: RunParametersXml = read_xml(&params_path)?;
    let run_id = required(params.run_id.take(), "RunId")?;

    if params.planned_reads.is_some() {
        log::debug!(target: LOG_TARGET, "Reading {run_id} as a NovaSeq X Plus run");
        parse_novaseq_x(params, run_id, run_dir)
    } else {
        log::debug!(target: LOG_TARGET, "Reading {run_id} as a legacy NovaSeq run");
        parse_legacy(params, run_id)
    }
}

fn parse_novaseq_x(params: RunParametersXml, run_id: String, run_dir: &Utf8Path) -> Result<RunInfo> {
    let mut cycles = BTreeMap::new();
    for read in params.planned_reads.map(|p| p.reads).unwrap_or_default() {
        let count = read.cycles.as_deref().map_or(Ok(0), |c| {
            c.trim()
                .parse::<u32>()
                .map_err(|e| app_err!("read {} has an invalid cycle count '{c}': {e}", read.read_name))
        })?;
        let _ = cycles.insert(read.read_name, count);
    }

    let mut flowcell_type = required(params.flow_cell_type, "FlowCellType")?;
    let instrument_type = required(params.instrument_type, "InstrumentType")?;
    let instrument = required(params.instrument_serial_number, "InstrumentSerialNumber")?;
    let side = required(params.side, "Side")?;

    let mut flowcell = None;
    let mut flowcell_lot_number = None;
    let mut reagent_lot_number = None;
    for consumable in params.consumable_info.map(|c| c.items).unwrap_or_default() {
        match consumable.kind.as_deref().map(str::trim) {
            Some("FlowCell") => {
                flowcell_type = required(consumable.mode, "Mode")?;
                flowcell = Some(required(consumable.serial_number, "SerialNumber")?);
                flowcell_lot_number = Some(required(consumable.lot_number, "LotNumber")?);
            }
            Some("Reagent") => reagent_lot_number = Some(required(consumable.lot_number, "LotNumber")?),
            _ => {}
        }
    }

    let Some(flowcell) = flowcell else {
        bail!("{RUN_PARAMETERS_FILE} of run {run_id} lists no flow cell");
    };

    let run_info_path = run_dir.join(RUN_INFO_FILE);
    if !run_info_path.is_file() {
        bail!("{RUN_INFO_FILE} not found in '{run_dir}'");
    }

    let run_info: RunInfoXml = read_xml(&run_info_path)?;
    let reads = run_info.run.and_then(|r| r.reads).map(|r| r.reads).unwrap_or_default();
    let is_reverse = |idx: usize| reads.get(idx).and_then(|r| r.is_reverse_complement.as_deref()).map(str::trim) == Some("Y");

    Ok(RunInfo {
        index1_reverse: is_reverse(1),
        index2_reverse: is_reverse(2),
        run_id,
        flowcell,
        flowcell_type,
        instrument_type,
        instrument,
        side,
        flowcell_lot_number,
        reagent_lot_number,
        cycles,
    })
}

fn parse_legacy(params: RunParametersXml, run_id: String) -> Result<RunInfo> {
    let count = |value: Option<u32>, tag: &str| value.ok_or_else(|| app_err!("tag '{tag}' is missing or empty in {RUN_PARAMETERS_FILE}"));

    let cycles = BTreeMap::from([
        ("Read1".to_owned(), count(params.read1_number_of_cycles, "Read1NumberOfCycles")?),
        ("Read2".to_owned(), count(params.read2_number_of_cycles, "Read2NumberOfCycles")?),
        ("Index1".to_owned(), count(params.index_read1_number_of_cycles, "IndexRead1NumberOfCycles")?),
        ("Index2".to_owned(), count(params.index_read2_number_of_cycles, "IndexRead2NumberOfCycles")?),
    ]);

    let barcode = params
        .flow_cell_serial_barcode
        .or_else(|| params.rfids_info.and_then(|r| r.flow_cell_serial_barcode));

    // Older instruments always read the second index in reverse
    Ok(RunInfo {
        run_id,
        flowcell: required(barcode, "FlowCellSerialBarcode")?,
        flowcell_type: UNKNOWN.to_owned(),
        instrument_type: UNKNOWN.to_owned(),
        instrument: UNKNOWN.to_owned(),
        side: UNKNOWN.to_owned(),
        flowcell_lot_number: None,
        reagent_lot_number: None,
        cycles,
        index1_reverse: false,
        index2_reverse: true,
    })
}

/// Build the `OverrideCycles` setting: read 1, a 10-base index plus 9-base UMI, a 10-base second index, read 2.
///
/// # Errors
///
/// Returns an error if the first index read has fewer than 19 cycles or a read's cycle count is unknown
pub fn override_cycles(run: &RunInfo) -> Result<String> {
    let index1 = run.cycles_of("Index1")?;
    if index1 < MIN_INDEX1_CYCLES {
        bail!("the first index read needs at least {MIN_INDEX1_CYCLES} cycles, run {} has {index1}", run.run_id);
    }

    let read1 = run.cycles_of("Read1")?;
    let index2 = run.cycles_of("Index2")?;
    let read2 = run.cycles_of("Read2")?;

    let mut cycles = format!("Y{read1};I{INDEX_CYCLES}U{UMI_CYCLES}");
    if index1 > MIN_INDEX1_CYCLES {
        cycles.push_str(&format!("N{}", index1 - MIN_INDEX1_CYCLES));
    }

    cycles.push_str(&format!(";I{INDEX_CYCLES}"));
    if index2 > INDEX_CYCLES {
        cycles.push_str(&format!("N{}", index2 - INDEX_CYCLES));
    }

    cycles.push_str(&format!(";Y{read2}"));
    Ok(cycles)
}

fn text_of(row: &[Option<Cell>], idx: usize) -> String {
    row.get(idx)
        .and_then(Option::as_ref)
        .map(|cell| cell.to_key().to_string())
        .unwrap_or_default()
}

/// Turn the sample sheet into demultiplexing rows, one per sample and lane, sorted.
///
/// `Content_Desc` names the sample when present. A dual index `AAAA-CCCC` is split in two and,
/// with `check_indexes`, each half is reverse complemented when the run reads it in reverse.
///
/// # Errors
///
/// Returns an error if a required column is missing or a lane isn't a whole number
pub fn demux_rows(samples: &Table, run: &RunInfo, check_indexes: bool) -> Result<Vec<DemuxRow>> {
    let sample_idx = samples
        .column_index(CONTENT_DESC_COLUMN)
        .or_else(|| samples.column_index(SAMPLE_ID_COLUMN))
        .ok_or_else(|| app_err!("the sample sheet has neither a '{CONTENT_DESC_COLUMN}' nor a '{SAMPLE_ID_COLUMN}' column"))?;
    let Some(lane_idx) = samples.column_index(LANE_COLUMN) else {
        bail!("the sample sheet has no '{LANE_COLUMN}' column");
    };
    let Some(index_idx) = samples.column_index(INDEX_COLUMN) else {
        bail!("the sample sheet has no '{INDEX_COLUMN}' column");
    };

    let mut rows = Vec::new();
    for row in samples.rows() {
        let sample_id = text_of(row, sample_idx);
        let combined = text_of(row, index_idx);
        let (mut index, mut index2) = combined
            .split_once('-')
            .map_or_else(|| (combined.clone(), String::new()), |(first, second)| (first.to_owned(), second.to_owned()));

        if check_indexes {
            if run.index1_reverse {
                index = reverse_complement(&index);
            }
            if run.index2_reverse {
                index2 = reverse_complement(&index2);
            }
        }

        for lane in text_of(row, lane_idx).split(',') {
            let lane = lane
                .trim()
                .parse::<u32>()
                .map_err(|e| app_err!("sample '{sample_id}' has an invalid lane '{lane}': {e}"))?;
            rows.push(DemuxRow {
                lane,
                sample_id: sample_id.clone(),
                index: index.clone(),
                index2: index2.clone(),
            });
        }
    }

    rows.sort();
    Ok(rows)
}

/// Write a BCL Convert v2 sample sheet.
///
/// # Errors
///
/// Returns an error if writing fails
pub fn write_demux_sheet<W: Write>(mut writer: W, rows: &[DemuxRow], override_cycles: &str) -> Result<()> {
    write!(writer, "[Header]\nFileFormatVersion,2\n\n")?;
    write!(
        writer,
        "[BCLConvert_Settings]\nAdapterBehavior,trim\nAdapterRead1,{ADAPTER_READ1}\nAdapterRead2,{ADAPTER_READ2}\nOverrideCycles,{override_cycles}\n\n"
    )?;
    writeln!(writer, "[BCLConvert_Data]")?;

    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record([LANE_COLUMN, SAMPLE_ID_COLUMN, INDEX_COLUMN, "Index2"])?;
    for row in rows {
        csv.write_record([row.lane.to_string().as_str(), row.sample_id.as_str(), row.index.as_str(), row.index2.as_str()])?;
    }

    csv.flush()?;
    Ok(())
}

/// Write the run properties as a two-line CSV, names sorted.
///
/// # Errors
///
/// Returns an error if writing fails
pub fn write_run_summary<W: Write>(writer: W, run: &RunInfo) -> Result<()> {
    let entries = run.entries();
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(entries.keys())?;
    csv.write_record(entries.values())?;
    csv.flush()?;
    Ok(())
}

/// Prepare the BCL Convert sample sheet and run summary for a run folder.
///
/// # Errors
///
/// Returns an error if an input is missing or malformed, the first index read is too short,
/// or an output file can't be written
pub fn prepare_demux<H: Host>(host: &mut H, args: &DemuxArgs) -> Result<()> {
    if !args.rundir.is_dir() {
        bail!("the run folder '{}' does not exist", args.rundir);
    }
    if !args.samplesheet.is_file() {
        bail!("the sample sheet '{}' does not exist", args.samplesheet);
    }

    let run = parse_run_info(&args.rundir)?;
    let samples = read_table(&args.samplesheet)?;
    let rows = demux_rows(&samples, &run, args.check_indexes)?;
    let cycles = override_cycles(&run)?;

    log::info!(
        target: LOG_TARGET,
        "Run {} on flow cell {}: {} sample lane(s), OverrideCycles {cycles}",
        run.run_id,
        run.flowcell,
        rows.len()
    );

    fs::create_dir_all(&args.output_dir).into_app_err_with(|| format!("creating output directory '{}'", args.output_dir))?;

    let sheet_path = args.output_dir.join(format!("{}.demux_samplesheet.csv", run.run_id));
    write_file(&sheet_path, |w| write_demux_sheet(w, &rows, &cycles))?;
    let _ = writeln!(host.output(), "Wrote {sheet_path} ({} rows)", rows.len());

    let summary_path = args.output_dir.join(format!("{}.runinfo.csv", run.flowcell));
    write_file(&summary_path, |w| write_run_summary(w, &run))?;
    let _ = writeln!(host.output(), "Wrote {summary_path}");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::host::TestHost;

    const NOVASEQ_X_PARAMETERS: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<RunParameters>
  <Side>B</Side>
  <FlowCellType>Unset</FlowCellType>
  <InstrumentType>NovaSeqXPlus</InstrumentType>
  <InstrumentSerialNumber>LH00123</InstrumentSerialNumber>
  <RunId>20240105_LH00123_0042_B22ABCDLT3</RunId>
  <PlannedReads>
    <Read ReadName="Read1" Cycles="151" />
    <Read ReadName="Index1" Cycles="19" />
    <Read ReadName="Index2" Cycles="10" />
    <Read ReadName="Read2" Cycles="151" />
  </PlannedReads>
  <ConsumableInfo>
    <ConsumableInfo>
      <SerialNumber>22ABCDLT3</SerialNumber>
      <LotNumber>20812345</LotNumber>
      <Type>FlowCell</Type>
      <Mode>10B</Mode>
    </ConsumableInfo>
    <ConsumableInfo>
      <SerialNumber>RG0001</SerialNumber>
      <LotNumber>LOT77</LotNumber>
      <Type>Reagent</Type>
      <Mode>300</Mode>
    </ConsumableInfo>
  </ConsumableInfo>
</RunParameters>
"#;

    const NOVASEQ_X_RUN_INFO: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<RunInfo Version="6">
  <Run Id="20240105_LH00123_0042_B22ABCDLT3" Number="42">
    <Flowcell>22ABCDLT3</Flowcell>
    <Reads>
      <Read Number="1" NumCycles="151" IsIndexedRead="N" IsReverseComplement="N" />
      <Read Number="2" NumCycles="19" IsIndexedRead="Y" IsReverseComplement="N" />
      <Read Number="3" NumCycles="10" IsIndexedRead="Y" IsReverseComplement="Y" />
      <Read Number="4" NumCycles="151" IsIndexedRead="N" IsReverseComplement="N" />
    </Reads>
  </Run>
</RunInfo>
"#;

    const LEGACY_PARAMETERS: &str = r#"<?xml version="1.0"?>
<RunParameters>
  <RunId>200101_A00123_0042_BHFLWDDSXX</RunId>
  <RfidsInfo>
    <FlowCellSerialBarcode>HFLWDDSXX</FlowCellSerialBarcode>
  </RfidsInfo>
  <Read1NumberOfCycles>101</Read1NumberOfCycles>
  <Read2NumberOfCycles>101</Read2NumberOfCycles>
  <IndexRead1NumberOfCycles>24</IndexRead1NumberOfCycles>
  <IndexRead2NumberOfCycles>12</IndexRead2NumberOfCycles>
</RunParameters>
"#;

    const SAMPLESHEET: &str = "\
Lane,Content_Desc,Index
\"2,1\",S2,AAAACCCC-GGGGTTTT
1,S1,ACGTACGT-TTGCAAGG
1,S0,CCCCAAAA
";

    fn run_folder(parameters: &str, run_info: Option<&str>) -> (tempfile::TempDir, Utf8PathBuf) {
        let tmp = tempfile::tempdir().unwrap();
        let dir = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();
        fs::write(dir.join(RUN_PARAMETERS_FILE), parameters).unwrap();
        if let Some(run_info) = run_info {
            fs::write(dir.join(RUN_INFO_FILE), run_info).unwrap();
        }
        (tmp, dir)
    }

    fn samples(csv: &str) -> Table {
        let tmp = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::try_from(tmp.path().join("samples.csv")).unwrap();
        fs::write(&path, csv).unwrap();
        read_table(&path).unwrap()
    }

    fn legacy_run() -> RunInfo {
        RunInfo {
            run_id: "RUN".to_owned(),
            flowcell: "FC".to_owned(),
            flowcell_type: UNKNOWN.to_owned(),
            instrument_type: UNKNOWN.to_owned(),
            instrument: UNKNOWN.to_owned(),
            side: UNKNOWN.to_owned(),
            flowcell_lot_number: None,
            reagent_lot_number: None,
            cycles: BTreeMap::from([
                ("Read1".to_owned(), 151),
                ("Index1".to_owned(), 19),
                ("Index2".to_owned(), 10),
                ("Read2".to_owned(), 151),
            ]),
            index1_reverse: false,
            index2_reverse: true,
        }
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_parses_novaseq_x_run() {
        let (_tmp, dir) = run_folder(NOVASEQ_X_PARAMETERS, Some(NOVASEQ_X_RUN_INFO));

        let run = parse_run_info(&dir).unwrap();

        assert_eq!(run.run_id, "20240105_LH00123_0042_B22ABCDLT3");
        assert_eq!(run.flowcell, "22ABCDLT3");
        assert_eq!(run.flowcell_type, "10B");
        assert_eq!(run.instrument_type, "NovaSeqXPlus");
        assert_eq!(run.instrument, "LH00123");
        assert_eq!(run.side, "B");
        assert_eq!(run.flowcell_lot_number.as_deref(), Some("20812345"));
        assert_eq!(run.reagent_lot_number.as_deref(), Some("LOT77"));
        assert_eq!(run.cycles.get("Index1"), Some(&19));
        assert_eq!(run.cycles.get("Read2"), Some(&151));
        assert!(!run.index1_reverse);
        assert!(run.index2_reverse);
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_novaseq_x_requires_run_info() {
        let (_tmp, dir) = run_folder(NOVASEQ_X_PARAMETERS, None);
        assert!(parse_run_info(&dir).is_err());
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_parses_legacy_run() {
        let (_tmp, dir) = run_folder(LEGACY_PARAMETERS, None);

        let run = parse_run_info(&dir).unwrap();

        assert_eq!(run.flowcell, "HFLWDDSXX");
        assert_eq!(run.instrument, UNKNOWN);
        assert_eq!(run.cycles.get("Index1"), Some(&24));
        assert!(!run.index1_reverse);
        assert!(run.index2_reverse);
        assert_eq!(override_cycles(&run).unwrap(), "Y101;I10U9N5;I10N2;Y101");
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_missing_run_parameters_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();
        assert!(parse_run_info(&dir).is_err());
    }

    #[test]
    fn test_override_cycles() {
        assert_eq!(override_cycles(&legacy_run()).unwrap(), "Y151;I10U9;I10;Y151");
    }

    #[test]
    fn test_short_first_index_is_rejected() {
        let mut run = legacy_run();
        let _ = run.cycles.insert("Index1".to_owned(), 18);
        assert!(override_cycles(&run).is_err());

        let _ = run.cycles.remove("Index1");
        assert!(override_cycles(&run).is_err());
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_rows_explode_lanes_and_sort() {
        let rows = demux_rows(&samples(SAMPLESHEET), &legacy_run(), false).unwrap();

        let lines: Vec<(u32, &str, &str, &str)> = rows
            .iter()
            .map(|r| (r.lane, r.sample_id.as_str(), r.index.as_str(), r.index2.as_str()))
            .collect();
        assert_eq!(
            lines,
            [
                (1, "S0", "CCCCAAAA", ""),
                (1, "S1", "ACGTACGT", "TTGCAAGG"),
                (1, "S2", "AAAACCCC", "GGGGTTTT"),
                (2, "S2", "AAAACCCC", "GGGGTTTT"),
            ]
        );
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_indexes_reverse_complemented_on_request() {
        let mut run = legacy_run();
        run.index1_reverse = true;

        let rows = demux_rows(&samples(SAMPLESHEET), &run, true).unwrap();

        assert_eq!(rows[1].index, "ACGTACGT");
        assert_eq!(rows[1].index2, "CCTTGCAA");
        assert_eq!(rows[2].index, "GGGGTTTT");
        assert_eq!(rows[0].index2, "");
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_invalid_lane_and_missing_columns_are_errors() {
        let run = legacy_run();
        assert!(demux_rows(&samples("Lane,Sample_ID,Index\nx,S1,ACGT\n"), &run, false).is_err());
        assert!(demux_rows(&samples("Lane,Index\n1,ACGT\n"), &run, false).is_err());
        assert!(demux_rows(&samples("Sample_ID,Index\nS1,ACGT\n"), &run, false).is_err());
    }

    #[test]
    fn test_write_demux_sheet() {
        let rows = [DemuxRow {
            lane: 1,
            sample_id: "S1".to_owned(),
            index: "ACGT".to_owned(),
            index2: String::new(),
        }];
        let mut buf = Vec::new();

        write_demux_sheet(&mut buf, &rows, "Y151;I10U9;I10;Y151").unwrap();

        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "[Header]\nFileFormatVersion,2\n\n\
             [BCLConvert_Settings]\nAdapterBehavior,trim\n\
             AdapterRead1,AGATCGGAAGAGCACACGTCTGAAC\nAdapterRead2,AGATCGGAAGAGCGTCGTGTAGGGA\n\
             OverrideCycles,Y151;I10U9;I10;Y151\n\n\
             [BCLConvert_Data]\nLane,Sample_ID,Index,Index2\n1,S1,ACGT,\n"
        );
    }

    #[test]
    fn test_run_summary_is_sorted() {
        let mut buf = Vec::new();

        write_run_summary(&mut buf, &legacy_run()).unwrap();

        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "FlowCellType,Flowcell,Index1Cycles,Index1Reverse,Index2Cycles,Index2Reverse,Instrument,InstrumentType,Read1Cycles,Read2Cycles,RunID,Side\n\
             UNKNOWN,FC,19,N,10,Y,UNKNOWN,UNKNOWN,151,151,RUN,UNKNOWN\n"
        );
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_prepare_demux_writes_both_files() {
        let (_tmp, dir) = run_folder(NOVASEQ_X_PARAMETERS, Some(NOVASEQ_X_RUN_INFO));
        let samplesheet = dir.join("samples.csv");
        fs::write(&samplesheet, SAMPLESHEET).unwrap();
        let args = DemuxArgs {
            rundir: dir.clone(),
            samplesheet,
            check_indexes: true,
            output_dir: dir.join("out"),
        };
        let mut host = TestHost::new();

        prepare_demux(&mut host, &args).unwrap();

        let sheet = fs::read_to_string(dir.join("out/20240105_LH00123_0042_B22ABCDLT3.demux_samplesheet.csv")).unwrap();
        assert!(sheet.contains("OverrideCycles,Y151;I10U9;I10;Y151\n"));
        assert!(sheet.ends_with("1,S0,CCCCAAAA,\n1,S1,ACGTACGT,CCTTGCAA\n1,S2,AAAACCCC,AAAACCCC\n2,S2,AAAACCCC,AAAACCCC\n"));

        let summary = fs::read_to_string(dir.join("out/22ABCDLT3.runinfo.csv")).unwrap();
        let mut lines = summary.lines();
        assert_eq!(
            lines.next(),
            Some("FlowCellLotNumber,FlowCellType,Flowcell,Index1Cycles,Index1Reverse,Index2Cycles,Index2Reverse,Instrument,InstrumentType,Read1Cycles,Read2Cycles,ReagentLotNumber,RunID,Side")
        );
        assert_eq!(
            lines.next(),
            Some("20812345,10B,22ABCDLT3,19,N,10,Y,LH00123,NovaSeqXPlus,151,151,LOT77,20240105_LH00123_0042_B22ABCDLT3,B")
        );
        assert!(host.output_str().contains("(4 rows)"));
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_missing_samplesheet_is_an_error() {
        let (_tmp, dir) = run_folder(LEGACY_PARAMETERS, None);
        let args = DemuxArgs {
            rundir: dir.clone(),
            samplesheet: dir.join("missing.csv"),
            check_indexes: false,
            output_dir: dir.clone(),
        };

        assert!(prepare_demux(&mut TestHost::new(), &args).is_err());
    }
}
