//! Command-line interface and orchestration for qc-metrics
//!
//! This module implements the CLI commands and wires the scanning, merging, and export
//! modules together into end-to-end workflows.
//!
//! # Implementation Model
//!
//! ## Commands
//!
//! - **summarize**: Discover the QC reports under a directory, extract their metrics,
//!   merge them with the laboratory worksheets, and write one workbook per recipe
//! - **fastq-info**: Record flowcell, lane, and index of a FASTQ read pair as CSV
//! - **gene-names**: Attach gene or transcript names to an expression table
//! - **demux**: Prepare the BCL Convert sample sheet and run summary of an Illumina run folder
//! - **samplesheet**: Copy a sample sheet to its validated location
//! - **init**: Generate a default configuration file
//! - **validate**: Check configuration file syntax and values
//!
//! ## Execution Flow
//!
//! The `run` function parses command-line arguments using clap, sets up logging, and
//! routes to the appropriate command handler. Every handler writes its user-facing
//! messages through the [`Host`] so tests can capture them.
//!
//! Configuration is managed through an optional `qc-metrics.toml` file; see `config.rs`.

mod common;
mod config;
mod demux;
mod fastq_info;
mod gene_names;
mod host;
mod init;
mod run;
mod samplesheet;
mod summarize;
mod validate;

#[cfg(debug_assertions)]
pub use config::Config;

pub use demux::{DemuxArgs, prepare_demux};
pub use fastq_info::{FastqInfoArgs, fastq_info};
pub use gene_names::{GeneNamesArgs, add_gene_names};
pub use host::Host;
pub use init::{InitArgs, init_config};
pub use run::run;
pub use samplesheet::{SamplesheetArgs, check_samplesheet};
pub use summarize::{SummarizeArgs, summarize};
pub use validate::{ValidateArgs, validate_config};
