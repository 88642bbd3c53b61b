//! First-seen backups of documents before they are rewritten.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::storage::ensure_dir;

/// What [`backup_document`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackupOutcome {
    /// A new copy was written.
    Created(PathBuf),
    /// A backup with this name already existed and was left alone.
    AlreadyPresent(PathBuf),
}

impl BackupOutcome {
    pub fn path(&self) -> &Path {
        match self {
            BackupOutcome::Created(p) | BackupOutcome::AlreadyPresent(p) => p,
        }
    }
}

/// Copies `document` into `backup_dir` under its own file name unless a
/// backup of that name already exists. An existing backup is never
/// overwritten, so it keeps the original from the first run.
pub fn backup_document(document: &Path, backup_dir: &Path) -> Result<BackupOutcome> {
    let file_name = document
        .file_name()
        .with_context(|| format!("{} has no file name", document.display()))?;
    ensure_dir(backup_dir)?;

    let backup_path = backup_dir.join(file_name);
    if backup_path.symlink_metadata().is_ok() {
        return Ok(BackupOutcome::AlreadyPresent(backup_path));
    }

    // fs::copy carries permissions over; mtime is copied separately.
    fs::copy(document, &backup_path).with_context(|| {
        format!(
            "copy {} to {}",
            document.display(),
            backup_path.display()
        )
    })?;
    if let Err(e) = copy_modified_time(document, &backup_path) {
        tracing::debug!("could not keep mtime on {}: {}", backup_path.display(), e);
    }
    Ok(BackupOutcome::Created(backup_path))
}

fn copy_modified_time(from: &Path, to: &Path) -> std::io::Result<()> {
    let modified = fs::metadata(from)?.modified()?;
    fs::File::options().write(true).open(to)?.set_modified(modified)
}
