use exif::Tag;

use crate::metadata::PhotoMetadata;

/// Camera settings recorded for a capture. Tags the camera did not write
/// are `None`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CameraSettings {
    /// Exposure time in seconds (0.004 for a 1/250 s shutter).
    pub exposure_time: Option<f64>,
    /// Aperture as an f-number.
    pub f_number: Option<f64>,
    /// Focal length in millimeters.
    pub focal_length: Option<f64>,
    /// ISO speed rating.
    pub iso_speed: Option<u32>,
}

impl PhotoMetadata {
    /// Camera settings read from the Exif camera tags.
    pub fn camera_settings(&self) -> CameraSettings {
        CameraSettings {
            exposure_time: self.rational_value(Tag::ExposureTime),
            f_number: self.rational_value(Tag::FNumber),
            focal_length: self.rational_value(Tag::FocalLength),
            // EXIF 2.3 renamed ISOSpeedRatings to PhotographicSensitivity
            iso_speed: self.uint_value(Tag::PhotographicSensitivity),
        }
    }
}
