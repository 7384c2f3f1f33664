use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};
use exif::Tag;
use regex::Regex;
use tracing::trace;

use crate::error::{PhotoUtilityError, Result};
use crate::metadata::PhotoMetadata;

/// Exif datetime layout, e.g. `2012:10:06 13:09:32`.
const EXIF_DATETIME_FORMAT: &str = "%Y:%m:%d %H:%M:%S";

static OFFSET_PATTERN: OnceLock<Regex> = OnceLock::new();

/// Matches Exif UTC offset strings such as `+07:00` or `-05:00`.
fn offset_pattern() -> &'static Regex {
    OFFSET_PATTERN
        .get_or_init(|| Regex::new(r"^([+-])(\d{2}):(\d{2})$").expect("hard-coded pattern"))
}

/// The moment a photo was captured, as recorded by the camera.
///
/// Cameras store the local wall-clock time in `DateTimeOriginal`. Some
/// additionally record the UTC offset in effect (`OffsetTimeOriginal`,
/// e.g. `+07:00`); only then is the capture time zone-aware and
/// convertible to UTC. Without the offset tag the time stays naive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureTime {
    local: NaiveDateTime,
    offset: Option<FixedOffset>,
}

impl CaptureTime {
    pub fn new(local: NaiveDateTime, offset: Option<FixedOffset>) -> Self {
        Self { local, offset }
    }

    /// The wall-clock reading of the camera, without timezone.
    pub fn local_time(&self) -> NaiveDateTime {
        self.local
    }

    /// The UTC offset in effect at capture, when the camera recorded one.
    pub fn utc_offset(&self) -> Option<FixedOffset> {
        self.offset
    }

    pub fn is_zone_aware(&self) -> bool {
        self.offset.is_some()
    }

    /// The capture moment with its UTC offset applied; `None` for a naive
    /// capture time.
    pub fn to_zoned(&self) -> Option<DateTime<FixedOffset>> {
        let offset = self.offset?;
        self.local.and_local_timezone(offset).single()
    }

    /// The capture moment in UTC; `None` for a naive capture time.
    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        self.to_zoned().map(|zoned| zoned.with_timezone(&Utc))
    }
}

impl fmt::Display for CaptureTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.local.format("%Y-%m-%d %H:%M:%S"))?;
        if let Some(offset) = self.offset {
            write!(f, " {offset}")?;
        }
        Ok(())
    }
}

impl PhotoMetadata {
    /// Capture time from the photo's Exif metadata.
    ///
    /// Returns `Ok(None)` when the photo carries no `DateTimeOriginal`
    /// tag. A present but malformed datetime or offset value is an
    /// [`PhotoUtilityError::InvalidCaptureTime`] error.
    pub fn capture_time(&self) -> Result<Option<CaptureTime>> {
        let Some(datetime) = self.ascii_value(Tag::DateTimeOriginal) else {
            return Ok(None);
        };
        let offset = self.ascii_value(Tag::OffsetTimeOriginal);

        let capture_time = parse_capture_time(&datetime, offset.as_deref())?;
        trace!(%capture_time, "capture time extracted");
        Ok(Some(capture_time))
    }

    /// Capture time of a photo that must have one.
    ///
    /// Like [`capture_time`](Self::capture_time), but an absent
    /// `DateTimeOriginal` tag is a
    /// [`PhotoUtilityError::MissingCaptureTime`] error.
    pub fn require_capture_time(&self) -> Result<CaptureTime> {
        self.capture_time()?
            .ok_or(PhotoUtilityError::MissingCaptureTime)
    }
}

/// Parse a `DateTimeOriginal` value plus an optional `OffsetTimeOriginal`
/// value into a capture time.
fn parse_capture_time(datetime: &str, offset: Option<&str>) -> Result<CaptureTime> {
    let local = NaiveDateTime::parse_from_str(datetime, EXIF_DATETIME_FORMAT)
        .map_err(|_| PhotoUtilityError::InvalidCaptureTime(datetime.to_string()))?;

    let offset = match offset {
        Some(text) => Some(parse_utc_offset(text.trim())?),
        None => None,
    };

    Ok(CaptureTime::new(local, offset))
}

/// Parse a `[+-]HH:MM` UTC offset string into a fixed offset.
fn parse_utc_offset(text: &str) -> Result<FixedOffset> {
    let invalid = || PhotoUtilityError::InvalidCaptureTime(text.to_string());

    let captures = offset_pattern().captures(text).ok_or_else(invalid)?;
    let sign: i32 = if &captures[1] == "-" { -1 } else { 1 };
    let hours: i32 = captures[2].parse().map_err(|_| invalid())?;
    let minutes: i32 = captures[3].parse().map_err(|_| invalid())?;

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60)).ok_or_else(invalid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("+07:00", 7 * 3600)]
    #[case("-05:00", -5 * 3600)]
    #[case("+00:00", 0)]
    #[case("-05:30", -(5 * 3600 + 30 * 60))]
    #[case("+13:45", 13 * 3600 + 45 * 60)]
    fn test_parse_utc_offset_valid(#[case] text: &str, #[case] seconds: i32) {
        // Act
        let offset = parse_utc_offset(text).unwrap();

        // Assert
        assert_eq!(offset, FixedOffset::east_opt(seconds).unwrap());
    }

    #[rstest]
    #[case("07:00")]
    #[case("+7:00")]
    #[case("+07:0")]
    #[case("+07-00")]
    #[case("Z")]
    #[case("")]
    fn test_parse_utc_offset_malformed(#[case] text: &str) {
        // Act
        let result = parse_utc_offset(text);

        // Assert
        assert!(matches!(
            result,
            Err(PhotoUtilityError::InvalidCaptureTime(_))
        ));
    }

    #[rstest]
    #[case("2012-10-06 13:09:32")]
    #[case("2012:10:06")]
    #[case("2012:13:40 12:00:00")]
    #[case("not a date")]
    fn test_parse_capture_time_malformed_datetime(#[case] datetime: &str) {
        // Act
        let result = parse_capture_time(datetime, None);

        // Assert
        assert!(matches!(
            result,
            Err(PhotoUtilityError::InvalidCaptureTime(_))
        ));
    }

    #[test]
    fn test_capture_time_with_offset_is_zone_aware() {
        // Arrange
        let photo_data: &[u8] = include_bytes!("../tests/fixtures/full_metadata.jpg");
        let metadata = PhotoMetadata::from_bytes(photo_data).unwrap();

        // Act
        let capture_time = metadata.capture_time().unwrap().unwrap();

        // Assert
        assert!(capture_time.is_zone_aware());
        assert_eq!(capture_time.to_string(), "2012-10-06 13:09:32 +07:00");
        let utc = capture_time.to_utc().unwrap();
        assert_eq!(utc.to_rfc3339(), "2012-10-06T06:09:32+00:00");
    }

    #[test]
    fn test_capture_time_without_offset_stays_naive() {
        // Arrange
        let photo_data: &[u8] = include_bytes!("../tests/fixtures/capture_time_only.jpg");
        let metadata = PhotoMetadata::from_bytes(photo_data).unwrap();

        // Act
        let capture_time = metadata.capture_time().unwrap().unwrap();

        // Assert
        assert!(!capture_time.is_zone_aware());
        assert_eq!(capture_time.to_string(), "2012-10-06 13:09:32");
        assert_eq!(capture_time.to_zoned(), None);
        assert_eq!(capture_time.to_utc(), None);
    }

    #[test]
    fn test_capture_time_absent_returns_none() {
        // Arrange
        let photo_data: &[u8] = include_bytes!("../tests/fixtures/no_capture_time.jpg");
        let metadata = PhotoMetadata::from_bytes(photo_data).unwrap();

        // Act
        let result = metadata.capture_time();

        // Assert
        assert!(matches!(result, Ok(None)));
    }

    #[test]
    fn test_require_capture_time_absent_is_an_error() {
        // Arrange
        let photo_data: &[u8] = include_bytes!("../tests/fixtures/no_capture_time.jpg");
        let metadata = PhotoMetadata::from_bytes(photo_data).unwrap();

        // Act
        let result = metadata.require_capture_time();

        // Assert
        assert!(matches!(
            result,
            Err(PhotoUtilityError::MissingCaptureTime)
        ));
    }

    #[test]
    fn test_local_time_matches_camera_clock() {
        // Arrange
        let photo_data: &[u8] = include_bytes!("../tests/fixtures/full_metadata.jpg");
        let metadata = PhotoMetadata::from_bytes(photo_data).unwrap();

        // Act
        let capture_time = metadata.require_capture_time().unwrap();

        // Assert: the local reading is the camera clock, not UTC
        assert_eq!(
            capture_time.local_time(),
            NaiveDateTime::parse_from_str("2012-10-06 13:09:32", "%Y-%m-%d %H:%M:%S").unwrap()
        );
    }
}
