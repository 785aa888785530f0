//! Wall-clock date and time
//!
//! A plain calendar value as stored by the RTC. No timezone, no DST.

/// Calendar date and time of day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WallClockTime {
    /// Full year (e.g. 2026)
    pub year: u16,
    /// Month (1-12)
    pub month: u8,
    /// Day of month (1-31)
    pub day: u8,
    /// Hour (0-23)
    pub hour: u8,
    /// Minute (0-59)
    pub minute: u8,
    /// Second (0-59)
    pub second: u8,
}

/// Day offsets for Sakamoto's weekday method, indexed by month - 1
const WEEKDAY_OFFSETS: [u16; 12] = [0, 3, 2, 5, 0, 3, 5, 1, 4, 6, 2, 4];

impl WallClockTime {
    /// 2000-01-01 00:00:00, the DS3231 register epoch
    pub const EPOCH: Self = Self::new(2000, 1, 1, 0, 0, 0);

    /// Create a time value (not validated)
    pub const fn new(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    /// Same date, new hour and minute, seconds reset to zero
    pub fn with_hour_minute(self, hour: u8, minute: u8) -> Self {
        Self {
            hour,
            minute,
            second: 0,
            ..self
        }
    }

    /// Check all fields are within calendar range
    pub fn is_valid(&self) -> bool {
        (1..=12).contains(&self.month)
            && self.day >= 1
            && self.day <= days_in_month(self.year, self.month)
            && self.hour < 24
            && self.minute < 60
            && self.second < 60
    }

    /// Day of the week, 1 = Sunday ... 7 = Saturday
    ///
    /// Matches the DS3231 day register convention.
    pub fn weekday(&self) -> u8 {
        let month_index = usize::from(self.month.clamp(1, 12) - 1);
        let y = if self.month < 3 {
            u32::from(self.year.saturating_sub(1))
        } else {
            u32::from(self.year)
        };
        let offset = u32::from(WEEKDAY_OFFSETS[month_index]);
        let dow = (y + y / 4 - y / 100 + y / 400 + offset + u32::from(self.day)) % 7;
        dow as u8 + 1
    }

    /// Parse a `YYYY-MM-DDTHH:MM:SS` timestamp
    ///
    /// This is the format the firmware build script embeds. Returns `None`
    /// for anything else, including out-of-range fields.
    pub fn parse_timestamp(s: &str) -> Option<Self> {
        let b = s.trim().as_bytes();
        if b.len() != 19 || b[4] != b'-' || b[7] != b'-' || b[13] != b':' || b[16] != b':' {
            return None;
        }
        if b[10] != b'T' && b[10] != b' ' {
            return None;
        }

        let time = Self {
            year: decimal(&b[0..4])?,
            month: decimal(&b[5..7])? as u8,
            day: decimal(&b[8..10])? as u8,
            hour: decimal(&b[11..13])? as u8,
            minute: decimal(&b[14..16])? as u8,
            second: decimal(&b[17..19])? as u8,
        };

        time.is_valid().then_some(time)
    }
}

/// Check for a Gregorian leap year
pub fn is_leap_year(year: u16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in a month (0 for an invalid month)
pub fn days_in_month(year: u16, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// Parse a fixed-width run of ASCII digits
fn decimal(digits: &[u8]) -> Option<u16> {
    digits.iter().try_fold(0u16, |acc, &c| {
        if c.is_ascii_digit() {
            Some(acc * 10 + u16::from(c - b'0'))
        } else {
            None
        }
    })
}
