use std::fs::{self, File, FileTimes};
use std::io;
use std::path::{Path, PathBuf};

use log::info;

use crate::discovery::dotted_extension;
use crate::error::{Error, Result};
use crate::logging::{log_file_error, log_fs_modification};
use crate::naming;
use crate::safety;
use crate::types::{CopyReport, PlannedCopy};

/// Extension used for an empty batch, where there is no first file to take it from
const DEFAULT_EXTENSION: &str = ".jpg";

/// Work out destination names for `selection` without writing anything.
///
/// Every output takes the extension of the first selected file.
pub fn plan_copies(selection: &[PathBuf], dest_dir: &Path, base_name: &str) -> Result<CopyReport> {
    let extension = selection
        .first()
        .map(|first| dotted_extension(first))
        .unwrap_or_else(|| DEFAULT_EXTENSION.to_string());

    let state = naming::allocate(dest_dir, base_name, &extension, selection.len())?;

    // from_existing checked next_index + len - 1 against u64::MAX
    let copies = selection
        .iter()
        .enumerate()
        .map(|(offset, source)| {
            let index = state.next_index + offset as u64;
            PlannedCopy {
                source: source.clone(),
                destination: dest_dir.join(state.file_name(base_name, index, &extension)),
                index,
            }
        })
        .collect();

    Ok(CopyReport {
        dest_dir: dest_dir.to_path_buf(),
        base_name: base_name.to_string(),
        required_digits: state.required_digits,
        copies,
        dry_run: true,
    })
}

/// Carry out a plan produced by [`plan_copies`].
///
/// Stops at the first failure; files already copied stay in place.
pub fn execute(mut plan: CopyReport) -> Result<CopyReport> {
    safety::ensure_destination_dir(&plan.dest_dir)?;

    for copy in &plan.copies {
        safety::check_not_overwriting(&copy.destination)?;
        copy_file(&copy.source, &copy.destination).map_err(|e| {
            log_file_error(&copy.source, "copy", &e);
            Error::CopyFailed {
                from: copy.source.clone(),
                to: copy.destination.clone(),
                source: e,
            }
        })?;
        log_fs_modification(
            "copy",
            &copy.destination,
            Some(&format!("from {}", copy.source.display())),
        );
    }

    plan.dry_run = false;
    info!(
        "Copied {} images to {}",
        plan.copies.len(),
        plan.dest_dir.display()
    );
    Ok(plan)
}

/// Copy `selection` into `dest_dir` as `{base_name}_{index}{extension}`,
/// creating the destination directory first if needed
pub fn copy_and_rename(
    selection: &[PathBuf],
    dest_dir: &Path,
    base_name: &str,
) -> Result<CopyReport> {
    safety::ensure_destination_dir(dest_dir)?;
    let plan = plan_copies(selection, dest_dir, base_name)?;
    execute(plan)
}

/// Copy file bytes, then carry over the modification and access times
fn copy_file(from: &Path, to: &Path) -> io::Result<()> {
    fs::copy(from, to)?;

    let metadata = fs::metadata(from)?;
    let mut times = FileTimes::new().set_modified(metadata.modified()?);
    if let Ok(accessed) = metadata.accessed() {
        times = times.set_accessed(accessed);
    }
    File::options().write(true).open(to)?.set_times(times)
}
