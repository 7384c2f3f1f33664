use std::path::PathBuf;

use thiserror::Error;

/// Errors reported by the photo-utility library.
#[derive(Debug, Error)]
pub enum PhotoUtilityError {
    /// The photo file could not be opened or read.
    #[error("failed to read photo file {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The data does not contain a parseable Exif segment.
    #[error("failed to parse Exif metadata: {0}")]
    Metadata(#[from] exif::Error),

    /// The photo has no `DateTimeOriginal` tag but the caller required one.
    #[error("the photo does not contain capture date and time information")]
    MissingCaptureTime,

    /// `DateTimeOriginal` or `OffsetTimeOriginal` carries a malformed value.
    #[error("invalid date format in Exif metadata: {0}")]
    InvalidCaptureTime(String),

    /// The image buffer could not be decoded.
    #[error("failed to decode image: {0}")]
    ImageDecode(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, PhotoUtilityError>;
