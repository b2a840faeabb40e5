use std::io::Cursor;

use chrono::{NaiveDate, NaiveDateTime};
use exif::{Exif, In, Tag, Value};

use super::{MetadataError, Orientation, TagMapping, TagValue, CREATE_DATE, DATE_TIME, ORIENTATION};

/// Decode the EXIF block of an in-memory image (JPEG, TIFF, HEIF, PNG, WebP).
///
/// An image without an EXIF block decodes to an empty mapping. Unknown
/// containers and corrupt EXIF data are errors.
pub fn decode_tags(buf: &[u8]) -> Result<TagMapping, MetadataError> {
    let mut cursor = Cursor::new(buf);
    let exif = match exif::Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => exif,
        Err(exif::Error::NotFound(container)) => {
            tracing::debug!("No EXIF block in {} image", container);
            return Ok(TagMapping::new());
        }
        Err(e) => return Err(e.into()),
    };

    let tags = tags_from_exif(&exif);
    tracing::debug!(tags = tags.len(), "Decoded EXIF tags");
    Ok(tags)
}

fn tags_from_exif(exif: &Exif) -> TagMapping {
    let mut tags = TagMapping::new();

    if let Some(raw) = first_ascii(exif, Tag::DateTimeDigitized) {
        let subsec = first_ascii(exif, Tag::SubSecTimeDigitized);
        let value = match revive_datetime(raw, subsec) {
            Some(dt) => TagValue::DateTime(dt),
            None => TagValue::Text(String::from_utf8_lossy(raw).into_owned()),
        };
        tags.insert(CREATE_DATE, value);
    }

    if let Some(raw) = first_ascii(exif, Tag::DateTime) {
        tags.insert(
            DATE_TIME,
            TagValue::Text(String::from_utf8_lossy(raw).into_owned()),
        );
    }

    if let Some(code) = exif
        .get_field(Tag::Orientation, In::PRIMARY)
        .and_then(|f| f.value.get_uint(0))
    {
        let label = match Orientation::from_code(code) {
            Some(o) => o.label().to_string(),
            None => code.to_string(),
        };
        tags.insert(ORIENTATION, TagValue::Text(label));
    }

    tags
}

fn first_ascii(exif: &Exif, tag: Tag) -> Option<&[u8]> {
    match exif.get_field(tag, In::PRIMARY)?.value {
        Value::Ascii(ref vec) => vec.first().map(Vec::as_slice),
        _ => None,
    }
}

/// Turn an EXIF date string into a date/time, or `None` when it does not
/// name a real instant (blank `0000:00:00` placeholders, 31st of February).
fn revive_datetime(raw: &[u8], subsec: Option<&[u8]>) -> Option<NaiveDateTime> {
    let mut dt = exif::DateTime::from_ascii(raw).ok()?;
    if let Some(subsec) = subsec {
        if let Err(e) = dt.parse_subsec(subsec) {
            tracing::debug!("Ignoring malformed SubSecTimeDigitized: {}", e);
        }
    }
    NaiveDate::from_ymd_opt(dt.year.into(), dt.month.into(), dt.day.into())?.and_hms_nano_opt(
        dt.hour.into(),
        dt.minute.into(),
        dt.second.into(),
        dt.nanosecond.unwrap_or(0),
    )
}
