//! Sampling policies over a directory of images.
//!
//! The `*_of` functions are pure: they work on paths or resolved
//! [`ImageFile`]s and never touch the file system. The directory-level
//! functions list the source directory, resolve capture times when the
//! policy needs them, and delegate.

use chrono::{NaiveDate, NaiveTime, Timelike};
use log::{debug, info};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::discovery::list_images;
use crate::error::{Error, Result};
use crate::policy::SamplingPolicy;
use crate::timestamp;
use crate::types::ImageFile;

/// Select images from `source_dir` according to `policy`
pub fn select(
    source_dir: &Path,
    policy: &SamplingPolicy,
    extensions: &[&str],
) -> Result<Vec<PathBuf>> {
    policy.validate()?;

    let selected = match *policy {
        SamplingPolicy::EveryNth(n) => sample_every_nth(source_dir, n, extensions)?,
        SamplingPolicy::ClosestToTimeOfDay(target) => {
            sample_closest_to_time_of_day(source_dir, target, extensions)?
        }
        SamplingPolicy::EveryNthInRange { n, start, end } => {
            sample_every_nth_in_range(source_dir, n, start, end, extensions)?
        }
    };

    info!(
        "Selected {} images from {} ({:?})",
        selected.len(),
        source_dir.display(),
        policy
    );
    Ok(selected)
}

/// Every `n`th supported image in `source_dir`, by file name
pub fn sample_every_nth(source_dir: &Path, n: usize, extensions: &[&str]) -> Result<Vec<PathBuf>> {
    let files = list_images(source_dir, extensions)?;
    every_nth_of(&files, n)
}

/// Per calendar day, the image captured closest to `target`
pub fn sample_closest_to_time_of_day(
    source_dir: &Path,
    target: NaiveTime,
    extensions: &[&str],
) -> Result<Vec<PathBuf>> {
    let images = resolve_directory(source_dir, extensions)?;
    Ok(closest_to_time_of_day_of(&images, target))
}

/// Every `n`th image, by path, among those captured within `[start, end]`
pub fn sample_every_nth_in_range(
    source_dir: &Path,
    n: usize,
    start: NaiveTime,
    end: NaiveTime,
    extensions: &[&str],
) -> Result<Vec<PathBuf>> {
    if n == 0 {
        return Err(Error::InvalidStride(n));
    }
    let images = resolve_directory(source_dir, extensions)?;
    every_nth_in_range_of(&images, n, start, end)
}

fn resolve_directory(source_dir: &Path, extensions: &[&str]) -> Result<Vec<ImageFile>> {
    let files = list_images(source_dir, extensions)?;
    Ok(timestamp::resolve_all(&files)?)
}

/// Stride selection: elements at positions 0, n, 2n, ...
pub fn every_nth_of<T: Clone>(items: &[T], n: usize) -> Result<Vec<T>> {
    if n == 0 {
        return Err(Error::InvalidStride(n));
    }
    Ok(items.iter().step_by(n).cloned().collect())
}

/// One image per calendar date, the one with the smallest minute-of-day
/// distance to `target`.
///
/// Distance is linear, not circular: 23:50 and 00:05 are 1425 minutes apart.
/// Ties go to the earliest capture time, then to the smallest path. The
/// result is sorted by path.
pub fn closest_to_time_of_day_of(images: &[ImageFile], target: NaiveTime) -> Vec<PathBuf> {
    let mut by_date: BTreeMap<NaiveDate, Vec<&ImageFile>> = BTreeMap::new();
    for image in images {
        by_date
            .entry(image.capture_time.date())
            .or_default()
            .push(image);
    }

    let target_minute = minute_of_day(target);
    let mut selected: Vec<PathBuf> = by_date
        .into_iter()
        .filter_map(|(date, day_images)| {
            let closest = day_images.into_iter().min_by_key(|&image| {
                (
                    minute_of_day(image.capture_time.time()).abs_diff(target_minute),
                    image.capture_time,
                    &image.path,
                )
            })?;
            debug!(
                "{}: closest to {} is {}",
                date,
                target.format("%H:%M"),
                closest.path.display()
            );
            Some(closest.path.clone())
        })
        .collect();

    selected.sort();
    selected
}

/// Keep images whose time of day is in `[start, end]`, sort by path, then
/// apply stride `n`.
///
/// When `start > end` the window wraps past midnight.
pub fn every_nth_in_range_of(
    images: &[ImageFile],
    n: usize,
    start: NaiveTime,
    end: NaiveTime,
) -> Result<Vec<PathBuf>> {
    let mut in_range: Vec<PathBuf> = images
        .iter()
        .filter(|image| is_within_time_range(image.capture_time.time(), start, end))
        .map(|image| image.path.clone())
        .collect();
    in_range.sort();

    debug!(
        "{} of {} images between {} and {}",
        in_range.len(),
        images.len(),
        start.format("%H:%M"),
        end.format("%H:%M")
    );
    every_nth_of(&in_range, n)
}

/// Inclusive time-of-day window, wrapping past midnight when `start > end`
pub fn is_within_time_range(time: NaiveTime, start: NaiveTime, end: NaiveTime) -> bool {
    if start <= end {
        start <= time && time <= end
    } else {
        time >= start || time <= end
    }
}

fn minute_of_day(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}
