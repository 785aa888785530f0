//! Digit values, tube positions and the time-to-digit decomposition

use super::DisplayError;
use crate::time::WallClockTime;

/// A value shown on one tube (0-9)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Digit(u8);

impl Digit {
    /// Zero, the blank/reset state of the multiplexers
    pub const ZERO: Self = Self(0);

    /// Create a digit, rejecting values above 9
    pub const fn new(value: u8) -> Result<Self, DisplayError> {
        if value < 10 {
            Ok(Self(value))
        } else {
            Err(DisplayError::DigitOutOfRange)
        }
    }

    /// Last decimal digit of `value`
    pub const fn ones_of(value: u8) -> Self {
        Self(value % 10)
    }

    /// Numeric value (0-9)
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Digit {
    type Error = DisplayError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Index of a tube on the board (0-3)
///
/// Positions follow the wiring of the select-line groups, not reading order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TubePosition(u8);

impl TubePosition {
    /// All four positions in wiring order
    pub const ALL: [Self; 4] = [Self(0), Self(1), Self(2), Self(3)];

    /// Create a position, rejecting values above 3
    pub const fn new(index: u8) -> Result<Self, DisplayError> {
        if index < 4 {
            Ok(Self(index))
        } else {
            Err(DisplayError::PositionOutOfRange)
        }
    }

    /// Position as an array index
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl TryFrom<u8> for TubePosition {
    type Error = DisplayError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// The four digits of an `hh:mm` time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimeDigits {
    pub hour_tens: Digit,
    pub hour_ones: Digit,
    pub minute_tens: Digit,
    pub minute_ones: Digit,
}

impl TimeDigits {
    /// Decompose hour and minute by division/modulo 10
    ///
    /// Values of 100 or more (corrupt RTC data) keep only their last two
    /// decimal digits so every digit stays in 0-9.
    pub const fn from_hour_minute(hour: u8, minute: u8) -> Self {
        Self {
            hour_tens: Digit::ones_of(hour / 10),
            hour_ones: Digit::ones_of(hour),
            minute_tens: Digit::ones_of(minute / 10),
            minute_ones: Digit::ones_of(minute),
        }
    }

    /// Decompose the hour and minute of a wall time
    pub const fn from_time(time: &WallClockTime) -> Self {
        Self::from_hour_minute(time.hour, time.minute)
    }
}

/// Which tube shows which digit
///
/// Load-bearing wiring data: the tubes are physically ordered differently
/// from their select-line groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DigitLayout {
    pub hour_tens: TubePosition,
    pub hour_ones: TubePosition,
    pub minute_tens: TubePosition,
    pub minute_ones: TubePosition,
}

impl Default for DigitLayout {
    fn default() -> Self {
        Self::REFERENCE_BOARD
    }
}

impl DigitLayout {
    /// Reference board wiring: minutes on tubes 0-1, hours on tubes 2-3
    pub const REFERENCE_BOARD: Self = Self {
        hour_tens: TubePosition(2),
        hour_ones: TubePosition(3),
        minute_tens: TubePosition(0),
        minute_ones: TubePosition(1),
    };

    /// Create a layout, rejecting two roles on one tube
    pub fn new(
        hour_tens: TubePosition,
        hour_ones: TubePosition,
        minute_tens: TubePosition,
        minute_ones: TubePosition,
    ) -> Result<Self, DisplayError> {
        let layout = Self {
            hour_tens,
            hour_ones,
            minute_tens,
            minute_ones,
        };
        layout.validate()?;
        Ok(layout)
    }

    /// Check that all four positions are distinct
    pub fn validate(&self) -> Result<(), DisplayError> {
        let positions = self.positions();
        for (i, a) in positions.iter().enumerate() {
            if positions[i + 1..].contains(a) {
                return Err(DisplayError::DuplicatePosition);
            }
        }
        Ok(())
    }

    /// Positions in digit order: hour tens, hour ones, minute tens, minute ones
    pub fn positions(&self) -> [TubePosition; 4] {
        [
            self.hour_tens,
            self.hour_ones,
            self.minute_tens,
            self.minute_ones,
        ]
    }

    /// Pair each digit with its tube, in digit order
    pub fn route(&self, digits: &TimeDigits) -> [(TubePosition, Digit); 4] {
        [
            (self.hour_tens, digits.hour_tens),
            (self.hour_ones, digits.hour_ones),
            (self.minute_tens, digits.minute_tens),
            (self.minute_ones, digits.minute_ones),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(i: u8) -> TubePosition {
        TubePosition::new(i).unwrap()
    }

    fn digit(v: u8) -> Digit {
        Digit::new(v).unwrap()
    }

    #[test]
    fn test_digit_range() {
        assert_eq!(Digit::new(0).unwrap().value(), 0);
        assert_eq!(Digit::new(9).unwrap().value(), 9);
        assert_eq!(Digit::new(10), Err(DisplayError::DigitOutOfRange));
        assert_eq!(Digit::try_from(255), Err(DisplayError::DigitOutOfRange));
    }

    #[test]
    fn test_position_range() {
        assert_eq!(pos(3).index(), 3);
        assert_eq!(TubePosition::new(4), Err(DisplayError::PositionOutOfRange));
    }

    #[test]
    fn test_decompose() {
        let d = TimeDigits::from_hour_minute(14, 7);
        assert_eq!(d.hour_tens, digit(1));
        assert_eq!(d.hour_ones, digit(4));
        assert_eq!(d.minute_tens, digit(0));
        assert_eq!(d.minute_ones, digit(7));

        let midnight = TimeDigits::from_hour_minute(0, 0);
        assert_eq!(midnight.hour_tens, Digit::ZERO);
        assert_eq!(midnight.minute_ones, Digit::ZERO);
    }

    #[test]
    fn test_decompose_corrupt_values_stay_in_range() {
        let d = TimeDigits::from_hour_minute(165, 255);
        assert_eq!(d.hour_tens, digit(6));
        assert_eq!(d.hour_ones, digit(5));
        assert_eq!(d.minute_tens, digit(5));
        assert_eq!(d.minute_ones, digit(5));
    }

    #[test]
    fn test_reference_layout_routing() {
        let layout = DigitLayout::default();
        let routed = layout.route(&TimeDigits::from_hour_minute(14, 7));

        assert_eq!(
            routed,
            [
                (pos(2), digit(1)),
                (pos(3), digit(4)),
                (pos(0), digit(0)),
                (pos(1), digit(7)),
            ]
        );
    }

    #[test]
    fn test_layout_rejects_duplicates() {
        assert!(DigitLayout::new(pos(0), pos(1), pos(2), pos(3)).is_ok());
        assert_eq!(
            DigitLayout::new(pos(0), pos(1), pos(2), pos(0)),
            Err(DisplayError::DuplicatePosition)
        );
    }
}
