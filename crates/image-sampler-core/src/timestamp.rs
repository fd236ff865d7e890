//! Capture-time resolution.
//!
//! Priority: EXIF `DateTimeOriginal`, then EXIF `DateTime`, then the file
//! system modification time. Metadata that is missing, unreadable or
//! unparseable falls through to the next source without an error.

use chrono::{DateTime, Local, NaiveDateTime};
use exif::{In, Reader, Tag, Value};
use log::{debug, trace};
use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::Path;

use crate::types::{ImageFile, ImageFormat, TimeSource};

const EXIF_DATE_FORMATS: &[&str] = &["%Y:%m:%d %H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y:%m:%d %H:%M"];

/// Resolve the capture time of an image.
///
/// Only the final file system fallback can fail, and only when the file
/// itself cannot be stat'ed.
pub fn resolve(path: &Path) -> io::Result<ImageFile> {
    if let Some((capture_time, time_source)) = read_exif_time(path) {
        trace!("{}: {:?} {}", path.display(), time_source, capture_time);
        return Ok(ImageFile::new(path.to_path_buf(), capture_time, time_source));
    }

    let capture_time = modified_time(path)?;
    debug!(
        "{}: no usable EXIF date, using modification time {}",
        path.display(),
        capture_time
    );
    Ok(ImageFile::new(
        path.to_path_buf(),
        capture_time,
        TimeSource::FileModified,
    ))
}

/// Resolve capture times for every path, in order
pub fn resolve_all(paths: &[impl AsRef<Path>]) -> io::Result<Vec<ImageFile>> {
    paths.iter().map(|path| resolve(path.as_ref())).collect()
}

/// File system modification time as a local wall-clock time
pub fn modified_time(path: &Path) -> io::Result<NaiveDateTime> {
    let modified = fs::metadata(path)?.modified()?;
    Ok(DateTime::<Local>::from(modified).naive_local())
}

fn read_exif_time(path: &Path) -> Option<(NaiveDateTime, TimeSource)> {
    let format = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(ImageFormat::from_extension)?;
    if !format.may_carry_exif() {
        return None;
    }

    let file = File::open(path).ok()?;
    let mut reader = BufReader::new(file);
    let exif = match Reader::new().read_from_container(&mut reader) {
        Ok(exif) => exif,
        Err(e) => {
            trace!("{}: no EXIF data ({})", path.display(), e);
            return None;
        }
    };

    [
        (Tag::DateTimeOriginal, TimeSource::ExifOriginal),
        (Tag::DateTime, TimeSource::ExifModified),
    ]
    .into_iter()
    .find_map(|(tag, source)| {
        let field = exif.get_field(tag, In::PRIMARY)?;
        match &field.value {
            Value::Ascii(values) => values
                .first()
                .and_then(|raw| std::str::from_utf8(raw).ok())
                .and_then(parse_exif_datetime)
                .map(|time| (time, source)),
            _ => None,
        }
    })
}

/// Parse an EXIF date string such as `2024:01:01 09:00:00`
pub fn parse_exif_datetime(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim().trim_matches(char::from(0));
    EXIF_DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
}
