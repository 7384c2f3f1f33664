use std::fs;
use std::io::Cursor;
use std::path::Path;

use exif::{Exif, Field, In, Rational, Tag, Value};
use tracing::debug;

use crate::error::{PhotoUtilityError, Result};

/// Parsed Exif metadata of a single photo.
///
/// Parsing happens once, at construction; the capture-time, location,
/// camera-settings, and orientation readers all borrow the parsed block.
///
/// A photo can be read either from a file on disk or from an in-memory
/// buffer (e.g. an upload that never touches the filesystem):
///
/// ```no_run
/// use photo_utility::PhotoMetadata;
/// use std::path::Path;
///
/// # fn main() -> photo_utility::Result<()> {
/// let metadata = PhotoMetadata::from_path(Path::new("photo.jpg"))?;
/// # Ok(())
/// # }
/// ```
pub struct PhotoMetadata {
    exif: Exif,
}

/// One parsed Exif tag with its display-formatted value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataEntry {
    pub tag: String,
    pub value: String,
}

impl PhotoMetadata {
    /// Read the photo file at `path` and parse its Exif segment.
    pub fn from_path(path: &Path) -> Result<Self> {
        let data = fs::read(path).map_err(|source| PhotoUtilityError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;

        let metadata = Self::from_bytes(&data)?;
        debug!(path = %path.display(), "Exif metadata read from file");
        Ok(metadata)
    }

    /// Parse the Exif segment of an in-memory image buffer.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let mut cursor = Cursor::new(data);
        let exif = exif::Reader::new().read_from_container(&mut cursor)?;

        debug!(fields = exif.fields().len(), "Exif metadata parsed");
        Ok(Self { exif })
    }

    /// Every parsed tag, with values formatted for display.
    pub fn entries(&self) -> Vec<MetadataEntry> {
        self.exif
            .fields()
            .map(|field| MetadataEntry {
                tag: field.tag.to_string(),
                value: field.display_value().to_string(),
            })
            .collect()
    }

    pub(crate) fn field(&self, tag: Tag) -> Option<&Field> {
        self.exif.get_field(tag, In::PRIMARY)
    }

    /// ASCII tag value with trailing NULs and surrounding whitespace trimmed.
    pub(crate) fn ascii_value(&self, tag: Tag) -> Option<String> {
        match &self.field(tag)?.value {
            Value::Ascii(components) => components.first().map(|bytes| {
                String::from_utf8_lossy(bytes)
                    .trim_matches(|c: char| c == '\0' || c.is_whitespace())
                    .to_string()
            }),
            _ => None,
        }
    }

    pub(crate) fn uint_value(&self, tag: Tag) -> Option<u32> {
        self.field(tag)?.value.get_uint(0)
    }

    /// First rational of a tag as a float. Rationals with a zero
    /// denominator are treated as absent.
    pub(crate) fn rational_value(&self, tag: Tag) -> Option<f64> {
        match &self.field(tag)?.value {
            Value::Rational(values) => values
                .first()
                .filter(|rational| rational.denom != 0)
                .map(|rational| rational.to_f64()),
            _ => None,
        }
    }

    pub(crate) fn rational_values(&self, tag: Tag) -> Option<Vec<Rational>> {
        match &self.field(tag)?.value {
            Value::Rational(values) => Some(values.clone()),
            _ => None,
        }
    }
}
