//! GPIO output abstraction
//!
//! The clock only drives outputs: sixteen multiplexer select lines.

/// Digital output pin
///
/// Implementations own the underlying hardware line.
pub trait OutputPin {
    /// Drive the line high (logic 1)
    fn set_high(&mut self);

    /// Drive the line low (logic 0)
    fn set_low(&mut self);

    /// Drive the line to a specific level
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Check if the line is currently driven high
    fn is_set_high(&self) -> bool;

    /// Check if the line is currently driven low
    fn is_set_low(&self) -> bool {
        !self.is_set_high()
    }
}
