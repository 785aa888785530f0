//! Tube display logic
//!
//! Everything between a wall time and the select lines of the four tube
//! multiplexers, without touching hardware:
//!
//! - [`digits`]: digit values, tube positions, time decomposition, layout
//! - [`mapping`]: the physical line table and the digit select code
//! - [`render`]: one render tick
//! - [`sweep`]: the bounded bench sweep sequence

pub mod digits;
pub mod mapping;
pub mod render;
pub mod sweep;

pub use digits::{Digit, DigitLayout, TimeDigits, TubePosition};
pub use mapping::{select_code, NixieMapping, SELECT_LINES, TUBE_COUNT};
pub use render::RenderLoop;
pub use sweep::SweepTest;

/// Errors building display values and tables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Digit value above 9
    DigitOutOfRange,
    /// Tube position above 3
    PositionOutOfRange,
    /// Two digit roles routed to the same tube
    DuplicatePosition,
    /// A physical line used twice in the mapping
    DuplicateLine,
    /// A physical line the board does not have
    LineOutOfRange,
    /// A physical line the board reserves for another function
    ReservedLine,
}
