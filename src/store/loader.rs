use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info};

use super::catalog::ReportStore;
use crate::errors::SpotcheckError;
use crate::models::report::{RawSpotCheckReport, SpotCheckReport};

/// A report file holds either one report or an array of them.
#[derive(Deserialize)]
#[serde(untagged)]
enum ReportFile {
    One(RawSpotCheckReport),
    Many(Vec<RawSpotCheckReport>),
}

/// Load reports from a `.json` file or from every `*.json` file in a
/// directory. Returns the number of reports admitted.
///
/// Loading stops at the first invalid report; reports from earlier files stay
/// in the store.
pub fn load_path(store: &ReportStore, path: &Path) -> Result<usize, SpotcheckError> {
    if !path.exists() {
        return Err(SpotcheckError::NotFound(format!(
            "Report path not found: {}",
            path.display()
        )));
    }

    let files = if path.is_dir() {
        report_files(path)?
    } else {
        vec![path.to_path_buf()]
    };

    let mut loaded = 0;
    for file in &files {
        loaded += load_file(store, file)?;
    }
    info!(path = %path.display(), files = files.len(), reports = loaded, "Reports loaded");
    Ok(loaded)
}

fn report_files(dir: &Path) -> Result<Vec<PathBuf>, SpotcheckError> {
    let pattern = dir.join("*.json");
    let pattern = pattern.to_string_lossy();
    let entries = glob::glob(&pattern)
        .map_err(|e| SpotcheckError::Config(format!("Bad report path pattern: {}", e)))?;
    let mut files = Vec::new();
    for entry in entries {
        let file = entry.map_err(|e| SpotcheckError::Io(e.into_error()))?;
        if file.is_file() {
            files.push(file);
        }
    }
    files.sort();
    Ok(files)
}

fn load_file(store: &ReportStore, file: &Path) -> Result<usize, SpotcheckError> {
    let content = std::fs::read_to_string(file)?;
    let raw_reports = match serde_json::from_str::<ReportFile>(&content) {
        Ok(ReportFile::One(raw)) => vec![raw],
        Ok(ReportFile::Many(raws)) => raws,
        Err(e) => {
            return Err(SpotcheckError::InvalidRecord(format!(
                "{}: not a report or report array: {}",
                file.display(),
                e
            )))
        }
    };

    let count = raw_reports.len();
    for (idx, raw) in raw_reports.into_iter().enumerate() {
        let report = SpotCheckReport::try_from(raw).map_err(|e| match e {
            SpotcheckError::InvalidRecord(msg) => {
                SpotcheckError::InvalidRecord(format!("{} (report #{}): {}", file.display(), idx, msg))
            }
            other => other,
        })?;
        store.insert(report)?;
    }
    debug!(file = %file.display(), reports = count, "Report file loaded");
    Ok(count)
}
