use chrono::{DateTime, NaiveDate, Utc};
use exif::{Rational, Tag};
use tracing::trace;

use crate::metadata::PhotoMetadata;

/// Geographic position where a photo was captured, read from the Exif
/// GPS tags.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoPoint {
    /// Signed decimal degrees; negative in the southern hemisphere.
    pub latitude: f64,
    /// Signed decimal degrees; negative west of the prime meridian.
    pub longitude: f64,
    /// Estimated horizontal positioning error, in meters.
    pub accuracy: Option<f64>,
    /// Meters relative to sea level; negative below it.
    pub altitude: Option<f64>,
    /// Direction the camera pointed, in degrees. The destination bearing
    /// is preferred over the image direction when both are present.
    pub bearing: Option<f64>,
    /// Moment of the GPS fix, in UTC.
    pub fix_time: Option<DateTime<Utc>>,
}

impl PhotoMetadata {
    /// GPS position recorded in the photo.
    ///
    /// Latitude and longitude are mandatory: without both tags the result
    /// is `None`. Every other component is optional and simply omitted
    /// when its tags are absent or unusable.
    pub fn location(&self) -> Option<GeoPoint> {
        let latitude = self.signed_coordinate(Tag::GPSLatitude, Tag::GPSLatitudeRef, "S")?;
        let longitude = self.signed_coordinate(Tag::GPSLongitude, Tag::GPSLongitudeRef, "W")?;

        let point = GeoPoint {
            latitude,
            longitude,
            accuracy: self.rational_value(Tag::GPSHPositioningError),
            altitude: self.altitude(),
            bearing: self
                .rational_value(Tag::GPSDestBearing)
                .or_else(|| self.rational_value(Tag::GPSImgDirection)),
            fix_time: self.fix_time(),
        };

        trace!(point.latitude, point.longitude, "GPS location extracted");
        Some(point)
    }

    /// A coordinate as signed decimal degrees, negated when its reference
    /// tag carries the southern/western hemisphere marker.
    fn signed_coordinate(&self, value_tag: Tag, ref_tag: Tag, negative_ref: &str) -> Option<f64> {
        let dms = self.rational_values(value_tag)?;
        let degrees = dms_to_degrees(&dms)?;

        let negated = self
            .ascii_value(ref_tag)
            .is_some_and(|marker| marker == negative_ref);
        Some(if negated { -degrees } else { degrees })
    }

    fn altitude(&self) -> Option<f64> {
        let meters = self.rational_value(Tag::GPSAltitude)?;

        // GPSAltitudeRef value 1 marks an altitude below sea level.
        let below_sea_level = self.uint_value(Tag::GPSAltitudeRef) == Some(1);
        Some(if below_sea_level { -meters } else { meters })
    }

    fn fix_time(&self) -> Option<DateTime<Utc>> {
        let date_stamp = self.ascii_value(Tag::GPSDateStamp)?;
        let time_stamp = self.rational_values(Tag::GPSTimeStamp)?;
        if time_stamp.len() < 3 || time_stamp[..3].iter().any(|part| part.denom == 0) {
            return None;
        }

        // Date stamps are `YYYY:MM:DD`, occasionally already dashed.
        let normalized_date = date_stamp.replace(':', "-");
        let date = NaiveDate::parse_from_str(&normalized_date, "%Y-%m-%d").ok()?;

        let hours = time_stamp[0].to_f64() as u32;
        let minutes = time_stamp[1].to_f64() as u32;
        let seconds = time_stamp[2].to_f64() as u32; // fractional seconds truncated

        Some(date.and_hms_opt(hours, minutes, seconds)?.and_utc())
    }
}

/// Convert a degrees/minutes/seconds rational triple to decimal degrees.
fn dms_to_degrees(dms: &[Rational]) -> Option<f64> {
    if dms.len() < 3 {
        return None;
    }
    let (degrees, minutes, seconds) = (dms[0], dms[1], dms[2]);
    if degrees.denom == 0 || minutes.denom == 0 || seconds.denom == 0 {
        return None;
    }

    Some(degrees.to_f64() + minutes.to_f64() / 60.0 + seconds.to_f64() / 3600.0)
}
