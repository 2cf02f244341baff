use crate::Result;
use camino::{Utf8Path, Utf8PathBuf};
use chrono::NaiveDate;
use ohno::{IntoAppError, app_err};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;

/// The default configuration TOML content, embedded from `default_config.toml`
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../default_config.toml");

/// Name of the configuration file looked up in the current directory
pub const CONFIG_FILE_NAME: &str = "qc-metrics.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// File name ending that marks a QC report
    #[serde(default = "default_report_suffix")]
    pub report_suffix: String,

    /// Sample identifier prefix selecting the Genoox subset
    #[serde(default = "default_genoox_prefix")]
    pub genoox_prefix: String,

    /// Sheet holding the metadata in .xlsx worksheets
    #[serde(default = "default_worksheet_sheet")]
    pub worksheet_sheet: String,

    /// Tag following the date in the default output prefix
    #[serde(default = "default_prefix_tag")]
    pub prefix_tag: String,
}

fn default_report_suffix() -> String {
    "metrics.csv".into()
}

fn default_genoox_prefix() -> String {
    "G".into()
}

fn default_worksheet_sheet() -> String {
    "QC Metrics".into()
}

fn default_prefix_tag() -> String {
    "CGS".into()
}

impl Config {
    /// Load configuration from a file or use defaults
    ///
    /// Without an explicit path, `qc-metrics.toml` is looked up in `base_dir` and the defaults are
    /// used when it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or fails validation
    pub fn load(base_dir: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<Self> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading qc-metrics configuration file '{path}'"))?;
            (path.clone(), text)
        } else {
            let path = base_dir.join(CONFIG_FILE_NAME);
            match fs::read_to_string(&path) {
                Ok(text) => (path, text),
                Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
                Err(e) => return Err(e).into_app_err_with(|| format!("reading qc-metrics configuration file '{path}'")),
            }
        };

        let config: Self = toml::from_str(&text).into_app_err_with(|| format!("parsing configuration file '{final_path}'"))?;
        config.validate()?;

        Ok(config)
    }

    /// Save the default configuration to a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn save_default(output_path: &Utf8Path) -> Result<()> {
        fs::write(output_path, DEFAULT_CONFIG_TOML).into_app_err_with(|| format!("writing default configuration to {output_path}"))?;
        Ok(())
    }

    /// The output prefix used when none is given: the run date followed by the prefix tag.
    #[must_use]
    pub fn default_prefix(&self, date: NaiveDate) -> String {
        format!("{}_{}", date.format("%Y%m%d"), self.prefix_tag)
    }

    fn validate(&self) -> Result<()> {
        if self.report_suffix.trim().is_empty() {
            return Err(app_err!("report_suffix must not be empty"));
        }

        if self.genoox_prefix.is_empty() {
            return Err(app_err!("genoox_prefix must not be empty"));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_TOML).expect("default_config.toml should be valid TOML that deserializes to Config")
    }
}
