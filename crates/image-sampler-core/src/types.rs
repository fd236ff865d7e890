use chrono::NaiveDateTime;
use serde::Serialize;
use std::path::PathBuf;

/// File extensions (lowercase, without the dot) that are treated as images
pub const SUPPORTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif"];

/// Image formats known to the sampler
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum ImageFormat {
    Jpeg,
    Png,
    Gif,
    Other(String),
}

impl ImageFormat {
    /// Determine format from file extension
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "jpg" | "jpeg" => Self::Jpeg,
            "png" => Self::Png,
            "gif" => Self::Gif,
            other => Self::Other(other.to_string()),
        }
    }

    /// Whether embedded EXIF data can be present in this format
    pub fn may_carry_exif(&self) -> bool {
        matches!(self, Self::Jpeg | Self::Png)
    }
}

/// Where a capture time was read from, in resolution priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TimeSource {
    /// EXIF `DateTimeOriginal`
    ExifOriginal,

    /// EXIF `DateTime` (last modified tag)
    ExifModified,

    /// File system modification time
    FileModified,
}

/// An image together with its resolved capture time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    /// Full path to the image file
    pub path: PathBuf,

    /// Local wall-clock time the image was captured
    pub capture_time: NaiveDateTime,

    /// Which source the capture time came from
    pub time_source: TimeSource,
}

impl ImageFile {
    pub fn new(path: PathBuf, capture_time: NaiveDateTime, time_source: TimeSource) -> Self {
        Self {
            path,
            capture_time,
            time_source,
        }
    }
}

/// A single source-to-destination copy
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedCopy {
    /// Selected source image
    pub source: PathBuf,

    /// Destination path with the allocated sequential name
    pub destination: PathBuf,

    /// Sequence number encoded in the destination name
    pub index: u64,
}

/// Outcome of a sampling run
#[derive(Debug, Clone, Serialize)]
pub struct CopyReport {
    /// Destination directory
    pub dest_dir: PathBuf,

    /// Base name used for the output files
    pub base_name: String,

    /// Zero-padding width of the sequence numbers
    pub required_digits: usize,

    /// Copies in the order they were (or would be) made
    pub copies: Vec<PlannedCopy>,

    /// Whether nothing was written
    pub dry_run: bool,
}

impl CopyReport {
    /// Number of images copied (or planned for a dry run)
    pub fn count(&self) -> usize {
        self.copies.len()
    }

    /// Render the report as pretty-printed JSON
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
