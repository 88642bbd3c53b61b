//! Disk writes for downloaded images and rewritten documents.
//!
//! Bytes go to `<name>.part` first and are renamed into place, so an
//! interrupted write never leaves a partial file under the final name.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Creates `dir` and its parents if missing.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("create directory {}", dir.display()))
}

/// Writes `bytes` to `dir/<file_name>`, replacing any existing file of that name.
pub fn write_image(dir: &Path, file_name: &str, bytes: &[u8]) -> Result<PathBuf> {
    let final_path = dir.join(file_name);
    write_atomic(&final_path, bytes)?;
    Ok(final_path)
}

/// Replaces `path` with `bytes` via a sibling `.part` file and a rename.
///
/// Until the rename succeeds the previous content of `path` is untouched.
/// An existing file's permissions carry over to the replacement.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let temp_path = temp_path_for(path);

    if let Err(e) = fs::write(&temp_path, bytes) {
        let _ = fs::remove_file(&temp_path);
        return Err(e).with_context(|| format!("write {}", temp_path.display()));
    }
    if let Ok(meta) = fs::metadata(path) {
        let _ = fs::set_permissions(&temp_path, meta.permissions());
    }
    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(e).with_context(|| format!("rename to {}", path.display()));
    }
    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(TEMP_SUFFIX);
    path.with_file_name(name)
}
