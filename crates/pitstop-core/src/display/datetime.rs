//! Date, time and duration display utilities.

use std::fmt;

use jiff::{tz::TimeZone, Timestamp};

/// A wrapper around `Timestamp` that formats it in the system timezone.
///
/// The display format follows the pattern: `YYYY-MM-DD HH:MM:SS TZ`.
pub struct LocalDateTime<'a>(pub &'a Timestamp);

impl<'a> fmt::Display for LocalDateTime<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.0
                .to_zoned(TimeZone::system())
                .strftime("%Y-%m-%d %H:%M:%S %Z")
        )
    }
}

/// Like [`LocalDateTime`], printing `-` for an unset timestamp.
pub struct OptionalDateTime<'a>(pub Option<&'a Timestamp>);

impl<'a> fmt::Display for OptionalDateTime<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(ts) => write!(f, "{}", LocalDateTime(ts)),
            None => write!(f, "-"),
        }
    }
}

/// A duration in whole seconds shown as `HH:MM:SS`.
///
/// Hours are not wrapped at 24, so a checklist open for four days shows
/// `96:00:00`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hms(pub u64);

impl fmt::Display for Hms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hours = self.0 / 3600;
        let minutes = (self.0 % 3600) / 60;
        let seconds = self.0 % 60;
        write!(f, "{hours:02}:{minutes:02}:{seconds:02}")
    }
}

/// Format seconds as `HH:MM:SS`.
///
/// # Examples
///
/// ```rust
/// use pitstop_core::display::format_hms;
///
/// assert_eq!(format_hms(5400), "01:30:00");
/// assert_eq!(format_hms(100 * 3600 + 61), "100:01:01");
/// ```
pub fn format_hms(seconds: u64) -> String {
    Hms(seconds).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_hms() {
        assert_eq!(format_hms(0), "00:00:00");
        assert_eq!(format_hms(59), "00:00:59");
        assert_eq!(format_hms(3599), "00:59:59");
        assert_eq!(format_hms(86_400), "24:00:00");
    }

    #[test]
    fn test_optional_datetime_missing() {
        assert_eq!(OptionalDateTime(None).to_string(), "-");
    }
}
