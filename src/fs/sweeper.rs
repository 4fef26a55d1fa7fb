//! Cleanup Sweeper: purges stale artifacts from a stage's backup directory.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::{PipelineError, Result};
use crate::models::Extension;

/// A file the sweeper could not delete.
#[derive(Debug)]
pub struct PurgeFailure {
    pub path: PathBuf,
    pub error: io::Error,
}

/// Outcome of a single [`purge`] call.
#[derive(Debug, Default)]
pub struct PurgeReport {
    pub deleted: Vec<PathBuf>,
    pub failed: Vec<PurgeFailure>,
}

impl PurgeReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Delete every `*.<extension>` file (case-insensitive) at the top level of `directory`.
///
/// A missing directory is a no-op. Deletion is best-effort: a file that cannot
/// be removed is recorded in the report and the remaining files are still
/// attempted. Failing to list the directory is an error.
pub fn purge(directory: &Path, extension: Extension) -> Result<PurgeReport> {
    purge_with(directory, extension, |path| fs::remove_file(path))
}

/// [`purge`] with a caller-supplied `remove` for each matching file.
pub fn purge_with(
    directory: &Path,
    extension: Extension,
    mut remove: impl FnMut(&Path) -> io::Result<()>,
) -> Result<PurgeReport> {
    let mut report = PurgeReport::default();
    if !directory.is_dir() {
        debug!(directory = %directory.display(), "Nothing to purge, directory absent");
        return Ok(report);
    }

    let entries = fs::read_dir(directory)
        .map_err(|e| PipelineError::io("read directory", directory, e))?;

    let mut targets = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| PipelineError::io("read directory", directory, e))?;
        let path = entry.path();
        if path.is_dir() {
            continue;
        }
        if extension.matches_file_name(entry.file_name()) {
            targets.push(path);
        }
    }
    targets.sort();

    for path in targets {
        match remove(&path) {
            Ok(()) => {
                debug!(path = %path.display(), "Purged stale artifact");
                report.deleted.push(path);
            }
            Err(error) => {
                warn!(path = %path.display(), %error, "Failed to purge stale artifact");
                report.failed.push(PurgeFailure { path, error });
            }
        }
    }

    if !report.deleted.is_empty() {
        info!(
            directory = %directory.display(),
            extension = %extension,
            count = report.deleted.len(),
            "Purged stale artifacts"
        );
    }

    Ok(report)
}
