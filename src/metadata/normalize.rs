use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::Serialize;

use super::{Orientation, TagMapping, TagValue, CREATE_DATE, DATE_TIME, ORIENTATION};

/// Textual EXIF date/time layout (CIPA DC-008-2012, section 4.6.4).
const EXIF_DATETIME_FORMAT: &str = "%Y:%m:%d %H:%M:%S";

/// Capture timestamp split into components, so consumers never have to guess
/// which timezone an opaque string was rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CaptureDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    pub millisecond: u32,
}

impl From<NaiveDateTime> for CaptureDate {
    fn from(dt: NaiveDateTime) -> Self {
        Self {
            year: dt.year(),
            month: dt.month(),
            day: dt.day(),
            hour: dt.hour(),
            minute: dt.minute(),
            second: dt.second(),
            millisecond: dt.nanosecond() / 1_000_000,
        }
    }
}

/// Body of the `/exif/{imageName}` response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExifSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<CaptureDate>,
    pub orientation: u8,
}

/// Reduce a tag mapping to its capture date and orientation code.
///
/// Never fails: a missing or unusable date is `None`, and a missing or
/// unrecognised orientation label is code 1.
pub fn normalize(tags: &TagMapping) -> ExifSummary {
    ExifSummary {
        date: capture_date(tags).map(CaptureDate::from),
        orientation: orientation_code(tags),
    }
}

/// `CreateDate` wins when it holds a real date/time; otherwise tag 306 is
/// parsed strictly.
fn capture_date(tags: &TagMapping) -> Option<NaiveDateTime> {
    if let Some(TagValue::DateTime(dt)) = tags.get(CREATE_DATE) {
        if !is_leap_second(dt) {
            return Some(*dt);
        }
    }
    tags.text(DATE_TIME).and_then(parse_exif_datetime)
}

/// chrono represents `:60` as second 59 with nanoseconds >= 1e9.
fn is_leap_second(dt: &NaiveDateTime) -> bool {
    dt.nanosecond() >= 1_000_000_000
}

fn orientation_code(tags: &TagMapping) -> u8 {
    tags.text(ORIENTATION)
        .and_then(Orientation::from_label)
        .unwrap_or_default()
        .code()
}

/// Parse `YYYY:MM:DD HH:mm:ss` exactly: fixed widths, fixed separators, a
/// real calendar date and seconds in 00..=59. Anything else is `None`.
pub(crate) fn parse_exif_datetime(s: &str) -> Option<NaiveDateTime> {
    const SEPARATORS: [(usize, u8); 5] = [(4, b':'), (7, b':'), (10, b' '), (13, b':'), (16, b':')];

    let bytes = s.as_bytes();
    if bytes.len() != 19 {
        return None;
    }
    for (i, b) in bytes.iter().enumerate() {
        let ok = match SEPARATORS.iter().find(|(pos, _)| *pos == i) {
            Some((_, sep)) => b == sep,
            None => b.is_ascii_digit(),
        };
        if !ok {
            return None;
        }
    }
    NaiveDateTime::parse_from_str(s, EXIF_DATETIME_FORMAT)
        .ok()
        .filter(|dt| !is_leap_second(dt))
}
