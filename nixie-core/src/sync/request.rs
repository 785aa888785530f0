//! `hh:mm` payload parsing and formatting

use core::fmt::Write;

use heapless::String;

use crate::traits::SyncError;

/// Capacity of the read/notify text buffer
pub const TIME_TEXT_CAPACITY: usize = 8;

/// Text published on read/notify
pub type TimeText = String<TIME_TEXT_CAPACITY>;

/// Upper bounds applied to a parsed write
///
/// `Legacy` matches older phone apps that send hour 24 and minute 60; the
/// RTC driver rejects those on write. The default rejects anything outside
/// a valid time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BoundsPolicy {
    /// hour <= 23, minute <= 59
    #[default]
    Strict,
    /// hour <= 24, minute <= 60
    Legacy,
}

impl BoundsPolicy {
    /// Largest accepted hour
    pub const fn max_hour(self) -> u8 {
        match self {
            BoundsPolicy::Strict => 23,
            BoundsPolicy::Legacy => 24,
        }
    }

    /// Largest accepted minute
    pub const fn max_minute(self) -> u8 {
        match self {
            BoundsPolicy::Strict => 59,
            BoundsPolicy::Legacy => 60,
        }
    }

    /// Check a request against the bounds
    pub fn check(self, request: &TimeSyncRequest) -> Result<(), SyncError> {
        if request.hour > self.max_hour() || request.minute > self.max_minute() {
            Err(SyncError::OutOfRange)
        } else {
            Ok(())
        }
    }
}

/// A parsed time-set write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimeSyncRequest {
    pub hour: u8,
    pub minute: u8,
}

impl TimeSyncRequest {
    /// Parse an `hh:mm` payload without range checks
    ///
    /// Accepted: leading ASCII whitespace, then one or two decimal digits,
    /// `:`, one or two decimal digits, then any mix of ASCII whitespace and
    /// NUL bytes. Anything else is [`SyncError::Malformed`], including
    /// non-ASCII whitespace.
    pub fn parse(payload: &[u8]) -> Result<Self, SyncError> {
        let text = core::str::from_utf8(payload).map_err(|_| SyncError::Malformed)?;
        let text = text
            .trim_start_matches(|c: char| c.is_ascii_whitespace())
            .trim_end_matches(|c: char| c == '\0' || c.is_ascii_whitespace());

        let (hour, minute) = text.split_once(':').ok_or(SyncError::Malformed)?;

        Ok(Self {
            hour: parse_field(hour)?,
            minute: parse_field(minute)?,
        })
    }

    /// Parse and apply a bounds policy
    pub fn parse_with(payload: &[u8], policy: BoundsPolicy) -> Result<Self, SyncError> {
        let request = Self::parse(payload)?;
        policy.check(&request)?;
        Ok(request)
    }
}

/// One or two ASCII digits
fn parse_field(field: &str) -> Result<u8, SyncError> {
    let bytes = field.as_bytes();
    if bytes.is_empty() || bytes.len() > 2 || !bytes.iter().all(u8::is_ascii_digit) {
        return Err(SyncError::Malformed);
    }
    Ok(bytes.iter().fold(0, |acc, &c| acc * 10 + (c - b'0')))
}

/// Format hour and minute as zero-padded `hh:mm`
///
/// Fails with [`SyncError::Format`] if the text does not fit in `N` bytes.
pub fn format_time<const N: usize>(hour: u8, minute: u8) -> Result<String<N>, SyncError> {
    let mut text = String::new();
    write!(text, "{:02}:{:02}", hour, minute).map_err(|_| SyncError::Format)?;
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> Result<TimeSyncRequest, SyncError> {
        TimeSyncRequest::parse(s.as_bytes())
    }

    #[test]
    fn test_parse_valid() {
        assert_eq!(parse("14:07"), Ok(TimeSyncRequest { hour: 14, minute: 7 }));
        assert_eq!(parse("9:5"), Ok(TimeSyncRequest { hour: 9, minute: 5 }));
        assert_eq!(parse("00:00"), Ok(TimeSyncRequest { hour: 0, minute: 0 }));
        assert_eq!(parse(" 23:59\r\n"), Ok(TimeSyncRequest { hour: 23, minute: 59 }));
        assert_eq!(
            TimeSyncRequest::parse(b"12:30\0\0"),
            Ok(TimeSyncRequest { hour: 12, minute: 30 })
        );
    }

    #[test]
    fn test_parse_trailing_padding_mix() {
        for payload in [&b"12:30\0 "[..], b"12:30 \0", b"\t12:30\r\n\0\0", b"12:30\0\n\0"] {
            assert_eq!(
                TimeSyncRequest::parse(payload),
                Ok(TimeSyncRequest { hour: 12, minute: 30 }),
                "{payload:?}"
            );
        }
        // NUL only pads the end
        assert_eq!(TimeSyncRequest::parse(b"\012:30"), Err(SyncError::Malformed));
    }

    #[test]
    fn test_parse_rejects_unicode_whitespace() {
        for payload in ["\u{00A0}12:30\u{3000}", "\u{00A0}12:30", "12:30\u{2003}", "12:30\u{85}"] {
            assert_eq!(parse(payload), Err(SyncError::Malformed), "{payload:?}");
        }
    }

    #[test]
    fn test_parse_malformed() {
        for payload in [
            "", ":", "12", "12:", ":30", "12-30", "12.30", "ab:cd", "1a:30", "12:3b", "123:00",
            "12:345", "12:30:00", "+1:30", "-1:30", "12 :30", "12: 30", "12:30x",
        ] {
            assert_eq!(parse(payload), Err(SyncError::Malformed), "{payload:?}");
        }
        assert_eq!(
            TimeSyncRequest::parse(&[0xFF, b':', b'1']),
            Err(SyncError::Malformed)
        );
    }

    #[test]
    fn test_strict_bounds() {
        let policy = BoundsPolicy::Strict;
        assert!(TimeSyncRequest::parse_with(b"23:59", policy).is_ok());
        assert_eq!(
            TimeSyncRequest::parse_with(b"24:00", policy),
            Err(SyncError::OutOfRange)
        );
        assert_eq!(
            TimeSyncRequest::parse_with(b"12:60", policy),
            Err(SyncError::OutOfRange)
        );
    }

    #[test]
    fn test_legacy_bounds_accept_one_past() {
        let policy = BoundsPolicy::Legacy;
        assert_eq!(
            TimeSyncRequest::parse_with(b"24:00", policy),
            Ok(TimeSyncRequest { hour: 24, minute: 0 })
        );
        assert_eq!(
            TimeSyncRequest::parse_with(b"12:60", policy),
            Ok(TimeSyncRequest { hour: 12, minute: 60 })
        );
        assert_eq!(
            TimeSyncRequest::parse_with(b"25:00", policy),
            Err(SyncError::OutOfRange)
        );
        assert_eq!(
            TimeSyncRequest::parse_with(b"12:61", policy),
            Err(SyncError::OutOfRange)
        );
    }

    #[test]
    fn test_format_time() {
        let text: TimeText = format_time(9, 5).unwrap();
        assert_eq!(text.as_str(), "09:05");

        let text: TimeText = format_time(23, 59).unwrap();
        assert_eq!(text.as_str(), "23:59");
    }

    #[test]
    fn test_format_time_too_small() {
        assert_eq!(format_time::<4>(12, 34), Err(SyncError::Format));
    }
}
