//! Filesystem utilities

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Identity of a file's contents as far as cheap metadata can tell
///
/// Two fingerprints compare equal when path, modification time and length
/// all match, which is what the workbook cache keys on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFingerprint {
    pub path: PathBuf,
    pub modified: Option<SystemTime>,
    pub len: u64,
}

/// Read the fingerprint of `path`
pub fn file_fingerprint(path: &Path) -> std::io::Result<FileFingerprint> {
    let meta = fs::metadata(path)?;
    Ok(FileFingerprint {
        path: path.to_path_buf(),
        modified: meta.modified().ok(),
        len: meta.len(),
    })
}

/// Check if a path exists
pub fn path_exists(path: &Path) -> bool {
    path.exists()
}

/// Check if a path is a regular file
pub fn is_file(path: &Path) -> bool {
    path.is_file()
}
