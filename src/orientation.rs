use exif::Tag;
use image::DynamicImage;
use tracing::debug;

use crate::error::Result;
use crate::metadata::PhotoMetadata;

/// Stored orientation of a photo, as written by the camera.
///
/// Variant names follow the Exif convention: where the first stored row
/// and the first stored column of the image sit in the scene. `TopLeft`
/// is an upright image; `RightTop` is the common portrait case of a
/// camera rotated 90° clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    TopLeft = 1,
    TopRight = 2,
    BottomRight = 3,
    BottomLeft = 4,
    LeftTop = 5,
    RightTop = 6,
    RightBottom = 7,
    LeftBottom = 8,
}

impl Orientation {
    /// Map a raw Exif orientation value; `None` outside `1..=8`.
    pub fn from_exif_value(value: u32) -> Option<Self> {
        match value {
            1 => Some(Self::TopLeft),
            2 => Some(Self::TopRight),
            3 => Some(Self::BottomRight),
            4 => Some(Self::BottomLeft),
            5 => Some(Self::LeftTop),
            6 => Some(Self::RightTop),
            7 => Some(Self::RightBottom),
            8 => Some(Self::LeftBottom),
            _ => None,
        }
    }

    /// The raw Exif tag value of this orientation.
    pub fn exif_value(self) -> u32 {
        self as u32
    }

    /// True when making the image upright swaps its width and height.
    pub fn swaps_dimensions(self) -> bool {
        matches!(
            self,
            Self::LeftTop | Self::RightTop | Self::RightBottom | Self::LeftBottom
        )
    }

    /// Transform a stored image into the upright image.
    ///
    /// Only lossless 90°-family rotations and flips are used; pixels are
    /// moved, never resampled.
    pub fn apply(self, image: DynamicImage) -> DynamicImage {
        match self {
            Self::TopLeft => image,
            Self::TopRight => image.fliph(),
            Self::BottomRight => image.rotate180(),
            Self::BottomLeft => image.flipv(),
            Self::LeftTop => image.rotate90().fliph(),
            Self::RightTop => image.rotate90(),
            Self::RightBottom => image.rotate90().flipv(),
            Self::LeftBottom => image.rotate270(),
        }
    }
}

impl PhotoMetadata {
    /// Stored orientation of the photo; `None` when the tag is absent or
    /// carries a value outside the defined range.
    pub fn orientation(&self) -> Option<Orientation> {
        self.uint_value(Tag::Orientation)
            .and_then(Orientation::from_exif_value)
    }
}

/// Decode an image buffer and return the upright image.
///
/// Photos without an orientation tag, or with an out-of-range value, are
/// returned as decoded.
pub fn auto_orient(data: &[u8]) -> Result<DynamicImage> {
    let image = image::load_from_memory(data)?;

    let orientation = PhotoMetadata::from_bytes(data)
        .ok()
        .and_then(|metadata| metadata.orientation());

    Ok(match orientation {
        Some(orientation) => {
            debug!(value = orientation.exif_value(), "applying stored orientation");
            orientation.apply(image)
        }
        None => image,
    })
}
