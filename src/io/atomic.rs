//! Atomic file replacement using the write-rename pattern
//!
//! Data is written to a sibling staging file, flushed with `sync_all`, then
//! renamed over the target. A failure at any step leaves an existing file at
//! the target path untouched.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::io::configuration::TEMP_FILE_SUFFIX;

/// Staging path used while writing `path`: the file name plus `.tmp`
///
/// # Errors
///
/// Returns `InvalidInput` if `path` has no file name component
pub fn staging_path(path: &Path) -> io::Result<PathBuf> {
    let file_name = path.file_name().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("'{}' does not name a file", path.display()),
        )
    })?;

    let mut staged = OsString::from(file_name);
    staged.push(".");
    staged.push(TEMP_FILE_SUFFIX);
    Ok(path.with_file_name(staged))
}

/// Atomically replace the contents of `path` with `data`
///
/// The parent directory must already exist. The staging file is removed if
/// any step fails.
///
/// # Errors
///
/// Returns the underlying I/O error if the staging file cannot be created,
/// written, flushed or renamed into place
pub fn atomic_write(path: &Path, data: &[u8]) -> io::Result<()> {
    let tmp_path = staging_path(path)?;

    let result = write_and_rename(&tmp_path, path, data);
    if result.is_err() && tmp_path.exists() {
        if let Err(cleanup) = fs::remove_file(&tmp_path) {
            log::warn!(
                "Could not remove staging file '{}': {cleanup}",
                tmp_path.display()
            );
        }
    }
    result
}

fn write_and_rename(tmp_path: &Path, final_path: &Path, data: &[u8]) -> io::Result<()> {
    let mut file = File::create(tmp_path)?;
    file.write_all(data)?;
    file.sync_all()?;
    drop(file);

    fs::rename(tmp_path, final_path)
}
