//! Sampling policies and time-of-day parsing.

use chrono::NaiveTime;

use crate::error::{Error, Result};

/// How images are picked from the source directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplingPolicy {
    /// Every Nth image by file name, starting with the first
    EveryNth(usize),

    /// Per calendar day, the image whose time of day is closest to the target
    ClosestToTimeOfDay(NaiveTime),

    /// Every Nth image among those captured between `start` and `end`
    EveryNthInRange {
        n: usize,
        start: NaiveTime,
        end: NaiveTime,
    },
}

impl SamplingPolicy {
    /// Reject strides below 1
    pub fn validate(&self) -> Result<()> {
        match *self {
            Self::EveryNth(n) | Self::EveryNthInRange { n, .. } if n == 0 => {
                Err(Error::InvalidStride(n))
            }
            _ => Ok(()),
        }
    }
}

/// Parse a 24-hour `HH:MM` time of day; zero padding is optional.
///
/// Each part takes one or two digits, so over-padded input such as `"009:00"`
/// is rejected.
pub fn parse_time_of_day(value: &str) -> Result<NaiveTime> {
    let invalid = || Error::InvalidTime(value.to_string());

    let (hour, minute) = value.split_once(':').ok_or_else(invalid)?;
    let hour = parse_component(hour).ok_or_else(invalid)?;
    let minute = parse_component(minute).ok_or_else(invalid)?;

    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(invalid)
}

fn parse_component(part: &str) -> Option<u32> {
    if part.is_empty() || part.len() > 2 || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}
