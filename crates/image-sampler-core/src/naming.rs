//! Sequential output names.
//!
//! The destination directory is the only record of which sequence numbers are
//! taken, so the state is recomputed from a fresh listing on every call.
//! Concurrent writers to the same destination are not supported.

use log::{debug, trace};
use std::fs;
use std::path::Path;

use crate::discovery::list_images;
use crate::error::{Error, Result};

/// Minimum zero-padding width of a sequence number
pub const MIN_DIGITS: usize = 4;

/// Base name used when the source directory holds no images
pub const FALLBACK_BASE_NAME: &str = "image";

/// Numbering state for one `(base name, extension)` pair in a destination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamingState {
    /// Zero-padding width for this batch
    pub required_digits: usize,

    /// First unused sequence number
    pub next_index: u64,
}

impl NamingState {
    /// Compute the state from the sequence numbers already present and the
    /// size of the batch about to be written.
    ///
    /// Fails when the batch would need a number past `u64::MAX`.
    pub fn from_existing(existing: &[u64], count_to_add: usize) -> Result<Self> {
        let max_num = existing.iter().copied().max().unwrap_or(0);
        let exhausted = || {
            Error::SafetyCheck(format!(
                "Sequence numbers exhausted: cannot add {} after {}",
                count_to_add, max_num
            ))
        };
        let next_index = max_num.checked_add(1).ok_or_else(exhausted)?;
        let highest_assigned = max_num
            .checked_add(count_to_add as u64)
            .ok_or_else(exhausted)?;

        Ok(Self {
            required_digits: digit_count(highest_assigned).max(MIN_DIGITS),
            next_index,
        })
    }

    /// Output file name for `index` under this state
    pub fn file_name(&self, base_name: &str, index: u64, extension: &str) -> String {
        format!(
            "{}_{:0width$}{}",
            base_name,
            index,
            extension,
            width = self.required_digits
        )
    }
}

/// Read `dest_dir` and compute the numbering state for a batch of
/// `count_to_add` files named `{base_name}_N{extension}`.
///
/// A missing destination directory counts as empty.
pub fn allocate(
    dest_dir: &Path,
    base_name: &str,
    extension: &str,
    count_to_add: usize,
) -> Result<NamingState> {
    let existing = existing_sequence_numbers(dest_dir, base_name, extension)?;
    let state = NamingState::from_existing(&existing, count_to_add)?;

    debug!(
        "{}: {} existing '{}_*{}' files, next index {}, {} digits",
        dest_dir.display(),
        existing.len(),
        base_name,
        extension,
        state.next_index,
        state.required_digits
    );
    Ok(state)
}

/// Sequence numbers of entries in `dest_dir` matching `{base_name}_*{extension}`.
///
/// Matching entries whose suffix is not a number are skipped.
pub fn existing_sequence_numbers(
    dest_dir: &Path,
    base_name: &str,
    extension: &str,
) -> Result<Vec<u64>> {
    if !dest_dir.exists() {
        return Ok(Vec::new());
    }

    let mut numbers = Vec::new();
    for entry in fs::read_dir(dest_dir)? {
        let file_name = entry?.file_name();
        let Some(file_name) = file_name.to_str() else {
            continue;
        };
        if !matches_pattern(file_name, base_name, extension) {
            continue;
        }
        match sequence_number(file_name) {
            Some(number) => numbers.push(number),
            None => trace!("Skipping '{}': no numeric suffix", file_name),
        }
    }

    Ok(numbers)
}

/// Glob-style `{base_name}_*{extension}` match on a file name
fn matches_pattern(file_name: &str, base_name: &str, extension: &str) -> bool {
    let prefix_len = base_name.len() + 1;
    file_name.len() >= prefix_len + extension.len()
        && file_name.starts_with(base_name)
        && file_name[base_name.len()..].starts_with('_')
        && file_name.ends_with(extension)
}

/// Number after the last underscore of the file stem, if it is one
fn sequence_number(file_name: &str) -> Option<u64> {
    let stem = Path::new(file_name).file_stem()?.to_str()?;
    let (_, suffix) = stem.rsplit_once('_')?;
    if suffix.is_empty() || !suffix.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    suffix.parse().ok()
}

fn digit_count(mut n: u64) -> usize {
    let mut digits = 1;
    while n >= 10 {
        n /= 10;
        digits += 1;
    }
    digits
}

/// Default output base name, derived from the first image (by file name) in
/// `source_dir`. Falls back to [`FALLBACK_BASE_NAME`] when there is none.
pub fn default_base_name(source_dir: &Path, extensions: &[&str]) -> Result<String> {
    let images = list_images(source_dir, extensions)?;
    let base_name = images
        .first()
        .and_then(|first| first.file_stem())
        .map(|stem| base_name_from_stem(&stem.to_string_lossy()))
        .unwrap_or_else(|| FALLBACK_BASE_NAME.to_string());

    debug!("Derived base name '{}'", base_name);
    Ok(base_name)
}

/// Drop the trailing `_<suffix>` segment and replace `CO` with `SM`
pub fn base_name_from_stem(stem: &str) -> String {
    let stem = match stem.rsplit_once('_') {
        Some((head, _)) => head,
        None => stem,
    };
    stem.replace("CO", "SM")
}
