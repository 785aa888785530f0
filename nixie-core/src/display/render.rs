//! Render tick
//!
//! One tick takes a single snapshot of the time source and rewrites all
//! four tubes from it. There is no diffing against the previous tick; a
//! digit change is therefore not atomic across tubes, but every tick is
//! consistent with exactly one RTC reading.

use embassy_sync::blocking_mutex::raw::RawMutex;

use super::{DigitLayout, TimeDigits};
use crate::clock::TimeSource;
use crate::time::WallClockTime;
use crate::traits::{RtcDevice, RtcError, TubeDisplay};

/// Periodic time-to-tubes step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderLoop {
    layout: DigitLayout,
}

impl RenderLoop {
    /// Create a render loop for a tube layout
    pub const fn new(layout: DigitLayout) -> Self {
        Self { layout }
    }

    /// Layout in use
    pub fn layout(&self) -> &DigitLayout {
        &self.layout
    }

    /// Show `time` on the tubes
    ///
    /// Pushes hour tens, hour ones, minute tens, minute ones in that order,
    /// each to its wired tube. Returns the digits shown.
    pub fn render<D: TubeDisplay>(&self, time: &WallClockTime, display: &mut D) -> TimeDigits {
        let digits = TimeDigits::from_time(time);
        for (tube, digit) in self.layout.route(&digits) {
            display.set_digit(tube, digit);
        }
        digits
    }

    /// Run one tick: read the time source once, then render
    ///
    /// On an RTC error nothing is written and the tubes keep showing the
    /// previous tick.
    pub fn tick<M, R, D>(
        &self,
        source: &TimeSource<M, R>,
        display: &mut D,
    ) -> Result<TimeDigits, RtcError>
    where
        M: RawMutex,
        R: RtcDevice,
        D: TubeDisplay,
    {
        let now = source.now()?;
        Ok(self.render(&now, display))
    }
}
