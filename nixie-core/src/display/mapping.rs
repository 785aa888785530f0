//! Physical select-line table
//!
//! Each tube has a BCD-to-decimal decoder with four select inputs. Line
//! `i` of a tube carries bit `i` of the digit value; the decoder lights the
//! matching cathode.

use super::{Digit, DisplayError, TubePosition};

/// Number of tubes on the board
pub const TUBE_COUNT: usize = 4;

/// Select lines per tube multiplexer
pub const SELECT_LINES: usize = 4;

/// Reference board wiring (RP2040 GPIO numbers), tube-major
pub const REFERENCE_LINES: [[u8; SELECT_LINES]; TUBE_COUNT] = [
    [6, 7, 8, 9],
    [10, 11, 12, 13],
    [14, 15, 16, 17],
    [18, 19, 20, 21],
];

/// Select-line levels for a digit, bit `i` on line `i`
pub fn select_code(digit: Digit) -> [bool; SELECT_LINES] {
    core::array::from_fn(|bit| (digit.value() >> bit) & 0x01 == 1)
}

/// Immutable table of physical line identifiers
///
/// Built once from configuration and validated against the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NixieMapping {
    lines: [[u8; SELECT_LINES]; TUBE_COUNT],
}

impl Default for NixieMapping {
    fn default() -> Self {
        Self {
            lines: REFERENCE_LINES,
        }
    }
}

impl NixieMapping {
    /// Build a mapping without board checks
    ///
    /// Duplicates are still rejected: two tubes sharing a line can never
    /// show independent digits.
    pub fn new(lines: [[u8; SELECT_LINES]; TUBE_COUNT]) -> Result<Self, DisplayError> {
        let mapping = Self { lines };
        mapping.check_unique()?;
        Ok(mapping)
    }

    /// Check the mapping against a board
    ///
    /// - `line_count`: lines are numbered `0..line_count`
    /// - `reserved`: lines used by other peripherals
    pub fn validate(&self, line_count: u8, reserved: &[u8]) -> Result<(), DisplayError> {
        self.check_unique()?;
        for line in self.iter() {
            if line >= line_count {
                return Err(DisplayError::LineOutOfRange);
            }
            if reserved.contains(&line) {
                return Err(DisplayError::ReservedLine);
            }
        }
        Ok(())
    }

    /// Lines of one tube, in bit order
    pub fn tube(&self, tube: TubePosition) -> &[u8; SELECT_LINES] {
        &self.lines[tube.index()]
    }

    /// Whole table, tube-major
    pub fn lines(&self) -> &[[u8; SELECT_LINES]; TUBE_COUNT] {
        &self.lines
    }

    /// All sixteen lines, tube-major
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.lines.iter().flatten().copied()
    }

    fn check_unique(&self) -> Result<(), DisplayError> {
        let mut seen: u128 = 0;
        for line in self.iter() {
            // Identifiers above 127 cannot be tracked; no supported board has them
            if line > 127 {
                return Err(DisplayError::LineOutOfRange);
            }
            let bit = 1u128 << line;
            if seen & bit != 0 {
                return Err(DisplayError::DuplicateLine);
            }
            seen |= bit;
        }
        Ok(())
    }
}
