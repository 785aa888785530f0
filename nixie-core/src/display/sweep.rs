//! Bench sweep sequence
//!
//! Cycles every tube through 0-9 to check cathodes and decoder wiring.
//! The sequence is finite: `cycles` passes of ten digits, after which the
//! firmware returns to clock mode.

use super::Digit;

/// Finite digit sequence 0, 1, ..., 9, 0, 1, ...
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepTest {
    remaining: u32,
    next: u8,
}

impl SweepTest {
    /// Sweep `cycles` full passes
    pub fn new(cycles: u16) -> Self {
        Self {
            remaining: u32::from(cycles) * 10,
            next: 0,
        }
    }

    /// Steps left in the sweep
    pub fn remaining(&self) -> u32 {
        self.remaining
    }
}

impl Iterator for SweepTest {
    type Item = Digit;

    fn next(&mut self) -> Option<Digit> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let digit = Digit::ones_of(self.next);
        self.next = (self.next + 1) % 10;
        Some(digit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for SweepTest {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sweep_is_bounded() {
        assert_eq!(SweepTest::new(3).count(), 30);
        assert_eq!(SweepTest::new(0).count(), 0);
        assert_eq!(SweepTest::new(2).len(), 20);
    }

    #[test]
    fn test_sweep_order() {
        let values: heapless::Vec<u8, 20> = SweepTest::new(2).map(Digit::value).collect();
        assert_eq!(
            &values[..],
            &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 0, 1, 2, 3, 4, 5, 6, 7, 8, 9]
        );
    }

    #[test]
    fn test_sweep_max_cycles_terminates() {
        let sweep = SweepTest::new(u16::MAX);
        assert_eq!(sweep.remaining(), u32::from(u16::MAX) * 10);
        assert_eq!(sweep.last(), Some(Digit::new(9).unwrap()));
    }
}
