//! Utility library for processing photo files.
//!
//! Photos carry Exif metadata written by the camera. This crate parses that
//! metadata once into a [`PhotoMetadata`] value and answers the usual
//! questions about a photo:
//!
//! - when it was taken, timezone-aware whenever the camera recorded a UTC
//!   offset ([`CaptureTime`])
//! - where it was taken, with accuracy, altitude, bearing and the GPS fix
//!   time ([`GeoPoint`])
//! - which camera settings were used ([`CameraSettings`])
//! - how the stored pixels are rotated, and how to get the upright image
//!   back ([`Orientation`], [`auto_orient`])
//!
//! ```no_run
//! use photo_utility::PhotoMetadata;
//! use std::path::Path;
//!
//! fn main() -> photo_utility::Result<()> {
//!     let metadata = PhotoMetadata::from_path(Path::new("photo.jpg"))?;
//!
//!     if let Some(capture_time) = metadata.capture_time()? {
//!         println!("captured at {capture_time}");
//!     }
//!     if let Some(location) = metadata.location() {
//!         println!("near {:.5}, {:.5}", location.latitude, location.longitude);
//!     }
//!     Ok(())
//! }
//! ```

pub mod camera;
pub mod capture_time;
pub mod error;
pub mod location;
pub mod metadata;
pub mod orientation;

pub use camera::CameraSettings;
pub use capture_time::CaptureTime;
pub use error::{PhotoUtilityError, Result};
pub use location::GeoPoint;
pub use metadata::{MetadataEntry, PhotoMetadata};
pub use orientation::{auto_orient, Orientation};
