use chrono::{Local, NaiveDate, NaiveDateTime, TimeZone};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Create a test image with dummy data
pub fn create_test_image(dir: &Path, file_name: &str) -> PathBuf {
    // Ensure the directory exists before creating the file
    fs::create_dir_all(dir).unwrap();

    let file_path = dir.join(file_name);
    let mut file = File::create(&file_path).unwrap();
    // Write some dummy data to simulate an image
    file.write_all(b"DUMMY IMAGE DATA").unwrap();
    file_path
}

/// Create a test image whose modification time is the given local time
pub fn create_test_image_at(dir: &Path, file_name: &str, taken: NaiveDateTime) -> PathBuf {
    let file_path = create_test_image(dir, file_name);
    set_modified(&file_path, taken);
    file_path
}

/// Set a file's modification time from a local wall-clock time
pub fn set_modified(path: &Path, taken: NaiveDateTime) {
    let file = File::options().write(true).open(path).unwrap();
    file.set_modified(local_system_time(taken)).unwrap();
}

pub fn local_system_time(taken: NaiveDateTime) -> SystemTime {
    Local.from_local_datetime(&taken).earliest().unwrap().into()
}

/// Shorthand for a local date-time on the minute
pub fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

/// Bytes of a minimal JPEG holding only an EXIF APP1 segment with the
/// given `DateTime` and `DateTimeOriginal` values
pub fn exif_jpeg_bytes(date_time: Option<&str>, date_time_original: Option<&str>) -> Vec<u8> {
    const ASCII: u16 = 2;
    const LONG: u16 = 4;

    let ifd0_count = date_time.is_some() as usize + date_time_original.is_some() as usize;
    let exif_ifd_offset = 8 + 2 + 12 * ifd0_count + 4;
    let exif_ifd_len = if date_time_original.is_some() { 2 + 12 + 4 } else { 0 };
    let mut data_offset = exif_ifd_offset + exif_ifd_len;
    let mut data = Vec::new();

    // Little-endian TIFF header, IFD0 right after it
    let mut tiff = b"II*\0".to_vec();
    tiff.extend_from_slice(&8u32.to_le_bytes());

    tiff.extend_from_slice(&(ifd0_count as u16).to_le_bytes());
    if let Some(value) = date_time {
        let ascii = nul_terminated(value);
        ifd_entry(&mut tiff, 0x0132, ASCII, ascii.len() as u32, data_offset as u32);
        data_offset += ascii.len();
        data.extend(ascii);
    }
    if date_time_original.is_some() {
        ifd_entry(&mut tiff, 0x8769, LONG, 1, exif_ifd_offset as u32);
    }
    tiff.extend_from_slice(&0u32.to_le_bytes());

    if let Some(value) = date_time_original {
        let ascii = nul_terminated(value);
        tiff.extend_from_slice(&1u16.to_le_bytes());
        ifd_entry(&mut tiff, 0x9003, ASCII, ascii.len() as u32, data_offset as u32);
        tiff.extend_from_slice(&0u32.to_le_bytes());
        data.extend(ascii);
    }
    tiff.extend(data);

    let mut jpeg = vec![0xFF, 0xD8, 0xFF, 0xE1];
    jpeg.extend_from_slice(&((2 + 6 + tiff.len()) as u16).to_be_bytes());
    jpeg.extend_from_slice(b"Exif\0\0");
    jpeg.extend(tiff);
    jpeg.extend_from_slice(&[0xFF, 0xD9]);
    jpeg
}

/// Write an EXIF-tagged JPEG into `dir`
pub fn create_exif_image(
    dir: &Path,
    file_name: &str,
    date_time: Option<&str>,
    date_time_original: Option<&str>,
) -> PathBuf {
    fs::create_dir_all(dir).unwrap();
    let file_path = dir.join(file_name);
    fs::write(&file_path, exif_jpeg_bytes(date_time, date_time_original)).unwrap();
    file_path
}

fn nul_terminated(value: &str) -> Vec<u8> {
    let mut bytes = value.as_bytes().to_vec();
    bytes.push(0);
    bytes
}

fn ifd_entry(out: &mut Vec<u8>, tag: u16, field_type: u16, count: u32, value: u32) {
    out.extend_from_slice(&tag.to_le_bytes());
    out.extend_from_slice(&field_type.to_le_bytes());
    out.extend_from_slice(&count.to_le_bytes());
    out.extend_from_slice(&value.to_le_bytes());
}
