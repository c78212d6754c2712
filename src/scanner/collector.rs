use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow};
use log::debug;
use walkdir::WalkDir;

use crate::types::ScanConfig;

/// Check if a file has one of the allowed extensions, ignoring case
pub fn has_allowed_extension(path: &Path, allowed_extensions: &[String]) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| allowed_extensions.iter().any(|allowed| allowed.eq_ignore_ascii_case(&ext)))
}

/// Collect resource files from a directory, sorted by path
pub fn collect_resource_files(dir: &Path, config: &ScanConfig) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(anyhow!("Not a directory: {}", dir.display()));
    }

    let walker = WalkDir::new(dir)
        .max_depth(if config.recursive { usize::MAX } else { 1 })
        .sort_by_file_name();

    let mut files = Vec::new();
    for entry in walker.into_iter().filter_map(|e| e.ok()) {
        let path = entry.path();
        if entry.file_type().is_file() && has_allowed_extension(path, &config.extensions) {
            files.push(path.to_path_buf());
        }
    }

    debug!("Collected {} resource files from {}", files.len(), dir.display());
    Ok(files)
}
