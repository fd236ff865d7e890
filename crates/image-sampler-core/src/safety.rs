use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::logging::log_fs_modification;

/// Make sure `dest_dir` exists as a directory, creating it and its parents
/// when absent
pub fn ensure_destination_dir(dest_dir: &Path) -> Result<()> {
    if dest_dir.exists() {
        if !dest_dir.is_dir() {
            return Err(Error::NotADirectory(dest_dir.to_path_buf()));
        }
        return Ok(());
    }

    fs::create_dir_all(dest_dir)?;
    log_fs_modification("create_dir", dest_dir, None);
    Ok(())
}

/// Refuse to write over anything already at `destination`
pub fn check_not_overwriting(destination: &Path) -> Result<()> {
    if fs::symlink_metadata(destination).is_ok() {
        return Err(Error::SafetyCheck(format!(
            "destination already exists: {}",
            destination.display()
        )));
    }
    Ok(())
}
