use std::path::Path;

use anyhow::Result;

use crate::errors::PapirunError;
use crate::types::ReportCandidate;

/// Locate the report file the benchmark wrote into `report_dir`.
///
/// PAPI's high-level API writes one file per run into its output directory
/// (file name varies by PAPI version, e.g. `rank_000000` or a timestamped
/// name), so the directory is resolved to a single explicit path here and the
/// parser never has to guess. When more than one file is present the most
/// recently modified one wins; symlinks and subdirectories are skipped.
pub fn locate_report(report_dir: &Path) -> Result<ReportCandidate> {
    if !report_dir.is_dir() {
        return Err(PapirunError::ReportDirNotFound {
            path: report_dir.to_path_buf(),
        }
        .into());
    }

    let entries = std::fs::read_dir(report_dir).map_err(|source| PapirunError::ReportReadError {
        path: report_dir.to_path_buf(),
        source,
    })?;

    let mut newest: Option<ReportCandidate> = None;

    for entry in entries {
        let entry = match entry {
            Ok(e) => e,
            Err(_) => continue,
        };

        let file_path = entry.path();

        let metadata = match file_path.symlink_metadata() {
            Ok(m) => m,
            Err(_) => continue,
        };

        if metadata.file_type().is_symlink() || !metadata.is_file() {
            continue;
        }

        let mtime = match metadata.modified() {
            Ok(t) => t,
            Err(_) => continue,
        };

        let newer = match &newest {
            Some(current) => mtime > current.mtime,
            None => true,
        };

        if newer {
            newest = Some(ReportCandidate {
                path: file_path,
                mtime,
            });
        }
    }

    newest.ok_or_else(|| {
        PapirunError::NoReportFound {
            path: report_dir.to_path_buf(),
        }
        .into()
    })
}
