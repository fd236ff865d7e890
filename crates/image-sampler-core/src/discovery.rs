use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{Error, Result};

/// List supported images directly inside `directory`, sorted by file name.
///
/// Subdirectories are not descended into. Entries that cannot be read are
/// skipped.
pub fn list_images(directory: &Path, extensions: &[&str]) -> Result<Vec<PathBuf>> {
    // Check if directory exists
    if !directory.exists() {
        return Err(Error::FileNotFound(directory.to_path_buf()));
    }
    if !directory.is_dir() {
        return Err(Error::NotADirectory(directory.to_path_buf()));
    }

    let mut image_files: Vec<PathBuf> = WalkDir::new(directory)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|path| has_supported_extension(path, extensions))
        .collect();

    image_files.sort();
    log::debug!(
        "Found {} images in {}",
        image_files.len(),
        directory.display()
    );

    Ok(image_files)
}

/// Returns if the given path ends in one of `extensions` (case-insensitive)
pub fn has_supported_extension(path: &Path, extensions: &[&str]) -> bool {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => extensions
            .iter()
            .any(|supported| supported.eq_ignore_ascii_case(ext)),
        None => false,
    }
}

/// File extension including the leading dot, in its original case
pub fn dotted_extension(path: &Path) -> String {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default()
}

// -- Tests --
