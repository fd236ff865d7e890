#![allow(dead_code)]

use chrono::{Local, NaiveDate, NaiveDateTime, TimeZone};
use std::fs::{self, File};
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Source and destination directories inside one temporary root
pub struct TempDirs {
    pub root: TempDir,
    pub source: PathBuf,
    pub dest: PathBuf,
}

/// Create empty `source` and `dest` directories
pub fn temp_dirs() -> TempDirs {
    let root = tempfile::tempdir().unwrap();
    let source = root.path().join("source");
    let dest = root.path().join("dest");
    fs::create_dir(&source).unwrap();
    fs::create_dir(&dest).unwrap();
    TempDirs { root, source, dest }
}

/// Local date-time on the hour
pub fn at_hour(year: i32, month: u32, day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

/// Set a file's modification time from a local wall-clock time
pub fn set_modified(path: &Path, taken: NaiveDateTime) {
    let time = Local.from_local_datetime(&taken).earliest().unwrap();
    let file = File::options().write(true).open(path).unwrap();
    file.set_modified(time.into()).unwrap();
}

/// Write a real 100x100 red JPEG without EXIF data
pub fn create_jpeg(dir: &Path, file_name: &str, taken: NaiveDateTime) -> PathBuf {
    let path = dir.join(file_name);
    image::RgbImage::from_pixel(100, 100, image::Rgb([255, 0, 0]))
        .save(&path)
        .unwrap();
    set_modified(&path, taken);
    path
}

/// Images `CO_009.jpg` .. `CO_015.jpg` taken on 2024-01-01 at 9, 11, 13 and 15 o'clock
pub fn sample_images(source: &Path) -> Vec<PathBuf> {
    [9, 11, 13, 15]
        .into_iter()
        .map(|hour| create_jpeg(source, &format!("CO_{:03}.jpg", hour), at_hour(2024, 1, 1, hour)))
        .collect()
}

/// Sorted file names in `dir`
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
