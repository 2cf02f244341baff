use super::Host;
use crate::Result;
use camino::Utf8PathBuf;
use clap::Parser;
use ohno::IntoAppError;
use std::fs;
use std::io::Write;

#[derive(Parser, Debug)]
pub struct SamplesheetArgs {
    /// Sample sheet to check
    #[arg(value_name = "INPUT")]
    pub input: Utf8PathBuf,

    /// Where the checked sample sheet is written
    #[arg(long, short = 'o', value_name = "PATH", default_value = "samplesheet.valid.csv")]
    pub output: Utf8PathBuf,
}

/// Copy a sample sheet to its validated location.
pub fn check_samplesheet<H: Host>(host: &mut H, args: &SamplesheetArgs) -> Result<()> {
    let bytes = fs::copy(&args.input, &args.output).into_app_err_with(|| format!("copying '{}' to '{}'", args.input, args.output))?;
    let _ = writeln!(host.output(), "Wrote {} ({bytes} bytes)", args.output);
    Ok(())
}
