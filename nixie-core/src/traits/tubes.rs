//! Tube display trait

use crate::display::{Digit, TubePosition};

/// A bank of four single-digit tubes
///
/// Implemented by the multiplexer driver; the render loop only talks to
/// this trait.
pub trait TubeDisplay {
    /// Show `digit` on the tube at `tube`
    fn set_digit(&mut self, tube: TubePosition, digit: Digit);

    /// Show the same digit on every tube
    fn set_all(&mut self, digit: Digit) {
        for tube in TubePosition::ALL {
            self.set_digit(tube, digit);
        }
    }
}
