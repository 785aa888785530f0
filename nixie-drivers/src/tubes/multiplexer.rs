//! Multiplexed tube driver
//!
//! Each tube sits behind a BCD-to-decimal decoder with four select inputs.
//! Showing a digit drives the four lines of that tube's group to the
//! digit's bit pattern; no other group is touched.

use nixie_core::display::{select_code, Digit, TubePosition, SELECT_LINES, TUBE_COUNT};
use nixie_core::traits::TubeDisplay;
use nixie_hal::OutputPin;

/// Four tubes, four select lines each
pub struct NixieMultiplexer<P> {
    /// Tube-major, line `i` of a group carries bit `i`
    lines: [[P; SELECT_LINES]; TUBE_COUNT],
}

impl<P: OutputPin> NixieMultiplexer<P> {
    /// Take ownership of the select lines
    ///
    /// Lines are not driven until [`init`](Self::init) or the first
    /// [`set_digit`](TubeDisplay::set_digit).
    pub fn new(lines: [[P; SELECT_LINES]; TUBE_COUNT]) -> Self {
        Self { lines }
    }

    /// Drive every line low (all tubes show 0)
    pub fn init(&mut self) {
        for pin in self.lines.iter_mut().flatten() {
            pin.set_low();
        }
    }

    /// Digit currently selected on a tube, read back from the line levels
    pub fn shown(&self, tube: TubePosition) -> Digit {
        let value = self.lines[tube.index()]
            .iter()
            .enumerate()
            .filter(|(_, pin)| pin.is_set_high())
            .fold(0u8, |acc, (bit, _)| acc | (1 << bit));
        // Four lines can encode 10-15; decoders show nothing for those
        Digit::new(value).unwrap_or(Digit::ZERO)
    }

    /// Release the select lines
    pub fn release(self) -> [[P; SELECT_LINES]; TUBE_COUNT] {
        self.lines
    }
}

impl<P: OutputPin> TubeDisplay for NixieMultiplexer<P> {
    fn set_digit(&mut self, tube: TubePosition, digit: Digit) {
        let group = &mut self.lines[tube.index()];
        for (pin, level) in group.iter_mut().zip(select_code(digit)) {
            pin.set_state(level);
        }
    }
}
