use super::LOG_TARGET;
use crate::Result;
use camino::{Utf8Path, Utf8PathBuf};
use ohno::bail;

/// Recursively collect the files under `input_dir` whose name ends in `suffix`.
///
/// Entries that can't be visited are logged and skipped, as are paths that aren't valid UTF-8.
/// The order of the result follows the directory walk and is not sorted.
pub fn discover_reports(input_dir: &Utf8Path, suffix: &str) -> Result<Vec<Utf8PathBuf>> {
    if !input_dir.is_dir() {
        bail!("input directory '{input_dir}' does not exist or is not a directory");
    }

    let mut reports = Vec::new();

    for entry_result in walkdir::WalkDir::new(input_dir).follow_links(true) {
        let entry = match entry_result {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!(target: LOG_TARGET, "Skipping unreadable directory entry: {e}");
                continue;
            }
        };

        if entry.file_type().is_dir() {
            continue;
        }

        let is_report = entry.file_name().to_str().is_some_and(|name| name.ends_with(suffix));
        if !is_report {
            continue;
        }

        match Utf8PathBuf::from_path_buf(entry.into_path()) {
            Ok(path) => reports.push(path),
            Err(path) => log::warn!(target: LOG_TARGET, "Skipping report with non UTF-8 path '{}'", path.display()),
        }
    }

    log::info!(target: LOG_TARGET, "Found {} report file(s) under '{input_dir}'", reports.len());
    Ok(reports)
}
