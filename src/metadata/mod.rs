//! EXIF metadata: decoding an image buffer into a tag mapping, and
//! normalizing that mapping into the capture date and orientation code the
//! HTTP API reports.

pub mod decode;
pub mod error;
pub mod normalize;
pub mod orientation;

use std::collections::HashMap;

use chrono::NaiveDateTime;

pub use decode::decode_tags;
pub use error::MetadataError;
pub use normalize::normalize;
pub use orientation::Orientation;

/// Digitization timestamp (EXIF `DateTimeDigitized`), decoded to a date/time.
pub const CREATE_DATE: &str = "CreateDate";
/// IFD0 `DateTime` (tag 306), kept as the raw EXIF string.
pub const DATE_TIME: &str = "306";
pub const ORIENTATION: &str = "Orientation";

/// A decoded tag value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagValue {
    DateTime(NaiveDateTime),
    Text(String),
}

/// Decoded view of an image's EXIF block, keyed by tag name or numeric code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagMapping {
    tags: HashMap<String, TagValue>,
}

impl TagMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: TagValue) {
        self.tags.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&TagValue> {
        self.tags.get(key)
    }

    /// The value under `key` if it is textual.
    pub fn text(&self, key: &str) -> Option<&str> {
        match self.tags.get(key) {
            Some(TagValue::Text(s)) => Some(s),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }
}

impl<K: Into<String>> FromIterator<(K, TagValue)> for TagMapping {
    fn from_iter<I: IntoIterator<Item = (K, TagValue)>>(iter: I) -> Self {
        Self {
            tags: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
