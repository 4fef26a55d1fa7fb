//! Stage Mover: relocates one predecessor's artifacts between stage directories.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::error::{PipelineError, Result};
use crate::models::{Extension, PatternRegistry, Stage};

/// Outcome of a single [`move_artifacts`] call.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MoveReport {
    /// Destination paths of the relocated files, in name order.
    pub moved: Vec<PathBuf>,
}

impl MoveReport {
    pub fn count(&self) -> usize {
        self.moved.len()
    }
}

/// Move every artifact in `source` produced by `predecessor` into `destination`.
///
/// Only the top level of `source` is scanned. A missing source directory, or a
/// predecessor without a registered pattern, moves nothing and is not an
/// error. Files already at the destination are replaced.
///
/// An I/O failure aborts the scan; files moved before the failure stay moved.
pub fn move_artifacts(
    source: &Path,
    destination: &Path,
    extension: Extension,
    predecessor: Stage,
    registry: &PatternRegistry,
) -> Result<MoveReport> {
    if !source.is_dir() {
        debug!(source = %source.display(), "Source directory absent, nothing to move");
        return Ok(MoveReport::default());
    }

    fs::create_dir_all(destination)
        .map_err(|e| PipelineError::io("create directory", destination, e))?;

    let Some(pattern) = registry.lookup(predecessor) else {
        warn!(
            predecessor = %predecessor,
            source = %source.display(),
            "No file pattern registered for predecessor stage, skipping move"
        );
        return Ok(MoveReport::default());
    };
    let matcher = pattern.matcher(extension);

    let entries =
        fs::read_dir(source).map_err(|e| PipelineError::io("read directory", source, e))?;

    let mut candidates = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| PipelineError::io("read directory", source, e))?;
        let file_type = entry
            .file_type()
            .map_err(|e| PipelineError::io("inspect", entry.path(), e))?;
        if file_type.is_dir() {
            continue;
        }
        let name = entry.file_name();
        if matcher.is_match(&name) {
            candidates.push(name);
        }
    }
    candidates.sort();

    let mut report = MoveReport::default();
    for name in candidates {
        let from = source.join(&name);
        let to = destination.join(&name);
        relocate(&from, &to)?;
        debug!(from = %from.display(), to = %to.display(), "Moved artifact");
        report.moved.push(to);
    }

    if report.moved.is_empty() {
        info!(
            source = %source.display(),
            predecessor = %predecessor,
            extension = %extension,
            "No matching artifacts to move"
        );
    } else {
        info!(
            source = %source.display(),
            destination = %destination.display(),
            count = report.count(),
            "Staged artifacts"
        );
    }

    Ok(report)
}

/// Rename `from` onto `to`, falling back to copy-and-delete across file systems.
fn relocate(from: &Path, to: &Path) -> Result<()> {
    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(e) if is_cross_device(&e) => copy_across_devices(from, to),
        Err(e) => Err(PipelineError::io("move", from, e)),
    }
}

#[cfg(unix)]
fn is_cross_device(err: &io::Error) -> bool {
    err.raw_os_error() == Some(libc::EXDEV)
}

#[cfg(not(unix))]
fn is_cross_device(_err: &io::Error) -> bool {
    false
}

/// Copy into a temp file beside `to`, persist it over `to`, then remove `from`.
fn copy_across_devices(from: &Path, to: &Path) -> Result<()> {
    let dest_dir = to.parent().unwrap_or_else(|| Path::new("."));

    let mut staged = NamedTempFile::new_in(dest_dir)
        .map_err(|e| PipelineError::io("create staging file in", dest_dir, e))?;
    let mut input = File::open(from).map_err(|e| PipelineError::io("open", from, e))?;
    io::copy(&mut input, staged.as_file_mut()).map_err(|e| PipelineError::io("copy", from, e))?;
    staged
        .as_file()
        .sync_all()
        .map_err(|e| PipelineError::io("sync", staged.path().to_path_buf(), e))?;

    let permissions = input
        .metadata()
        .map_err(|e| PipelineError::io("inspect", from, e))?
        .permissions();
    fs::set_permissions(staged.path(), permissions)
        .map_err(|e| PipelineError::io("set permissions on", staged.path().to_path_buf(), e))?;

    staged
        .persist(to)
        .map_err(|e| PipelineError::io("replace", to, e.error))?;
    fs::remove_file(from).map_err(|e| PipelineError::io("remove", from, e))?;

    debug!(from = %from.display(), to = %to.display(), "Copied artifact across file systems");
    Ok(())
}
