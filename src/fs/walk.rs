//! Recursive discovery of regular files
//!
//! Symbolic links are not followed while descending, but a link whose
//! target is a regular file is reported like the file itself.

use crate::error::{HasherError, IoResultExt, Result};
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Iterate every regular file strictly below `root`
///
/// Fails up front with `NotFound` when `root` does not exist. Errors met
/// during the walk are yielded in place so the caller decides whether to stop.
pub fn regular_files(root: &Path) -> Result<impl Iterator<Item = Result<PathBuf>>> {
    std::fs::metadata(root).with_path(root)?;

    let walker = WalkDir::new(root).min_depth(1).follow_links(false);

    Ok(walker.into_iter().filter_map(|entry| match entry {
        Ok(entry) if is_regular_file(&entry) => Some(Ok(entry.into_path())),
        Ok(_) => None,
        Err(e) => Some(Err(HasherError::from(e))),
    }))
}

fn is_regular_file(entry: &DirEntry) -> bool {
    let file_type = entry.file_type();
    if file_type.is_file() {
        return true;
    }
    // Dangling links resolve to nothing and are skipped.
    file_type.is_symlink()
        && std::fs::metadata(entry.path())
            .map(|m| m.is_file())
            .unwrap_or(false)
}
