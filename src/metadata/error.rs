use thiserror::Error;

/// Failure to read an EXIF block out of an image buffer.
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("Unrecognized image container or corrupt EXIF data: {0}")]
    InvalidFormat(String),

    #[error("EXIF data uses an unsupported feature: {0}")]
    Unsupported(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<exif::Error> for MetadataError {
    fn from(e: exif::Error) -> Self {
        match e {
            exif::Error::Io(io) => MetadataError::Io(io),
            exif::Error::NotSupported(msg) => MetadataError::Unsupported(msg.to_string()),
            other => MetadataError::InvalidFormat(other.to_string()),
        }
    }
}
