//! Mutex-guarded RTC owner

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;

use crate::time::WallClockTime;
use crate::traits::{RtcDevice, RtcError};

/// What startup found in the RTC
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StartupReport {
    /// RTC kept time across the power cycle
    Running,
    /// RTC had lost backup power and was set to the given fallback
    RestoredFromBuildTime(WallClockTime),
}

/// Exclusive owner of the RTC peripheral
///
/// Every access runs inside one lock of `M`, so a reader never observes a
/// half-applied [`adjust`](Self::adjust). `M` is picked by the integrator:
/// `CriticalSectionRawMutex` when the source is shared between tasks or
/// threads, `NoopRawMutex` for single-context use.
pub struct TimeSource<M: RawMutex, R: RtcDevice> {
    rtc: Mutex<M, RefCell<R>>,
}

impl<M: RawMutex, R: RtcDevice> TimeSource<M, R> {
    /// Bring up the time source
    ///
    /// Fails with [`RtcError::NotDetected`] if the peripheral does not
    /// answer; that condition is fatal for the caller. If the RTC reports
    /// lost backup power it is set to `fallback` (the firmware build time).
    pub fn start(mut rtc: R, fallback: WallClockTime) -> Result<(Self, StartupReport), RtcError> {
        rtc.probe().map_err(|_| RtcError::NotDetected)?;

        let report = if rtc.lost_power()? {
            rtc.write_time(&fallback)?;
            StartupReport::RestoredFromBuildTime(fallback)
        } else {
            StartupReport::Running
        };

        Ok((Self::new(rtc), report))
    }

    fn new(rtc: R) -> Self {
        Self {
            rtc: Mutex::new(RefCell::new(rtc)),
        }
    }

    /// Read the current wall time
    pub fn now(&self) -> Result<WallClockTime, RtcError> {
        self.rtc.lock(|rtc| rtc.borrow_mut().read_time())
    }

    /// Set hour and minute, keeping the date
    ///
    /// Reads the date, builds the new timestamp (seconds zeroed) and writes
    /// it back under a single lock. Hour and minute are not range checked
    /// here; the sync service applies its bounds policy first.
    ///
    /// Returns the timestamp that was written.
    pub fn adjust(&self, hour: u8, minute: u8) -> Result<WallClockTime, RtcError> {
        self.rtc.lock(|rtc| {
            let mut rtc = rtc.borrow_mut();
            let next = rtc.read_time()?.with_hour_minute(hour, minute);
            rtc.write_time(&next)?;
            Ok(next)
        })
    }

    /// Release the RTC peripheral
    pub fn into_inner(self) -> R {
        self.rtc.into_inner().into_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;

    /// Mock RTC backed by a plain value
    struct MockRtc {
        time: WallClockTime,
        present: bool,
        lost_power: bool,
        fail_reads: bool,
        writes: u32,
    }

    impl MockRtc {
        fn new(time: WallClockTime) -> Self {
            Self {
                time,
                present: true,
                lost_power: false,
                fail_reads: false,
                writes: 0,
            }
        }
    }

    impl RtcDevice for MockRtc {
        fn probe(&mut self) -> Result<(), RtcError> {
            if self.present {
                Ok(())
            } else {
                Err(RtcError::Bus)
            }
        }

        fn read_time(&mut self) -> Result<WallClockTime, RtcError> {
            if self.fail_reads {
                return Err(RtcError::Bus);
            }
            Ok(self.time)
        }

        fn write_time(&mut self, time: &WallClockTime) -> Result<(), RtcError> {
            self.time = *time;
            self.lost_power = false;
            self.writes += 1;
            Ok(())
        }

        fn lost_power(&mut self) -> Result<bool, RtcError> {
            Ok(self.lost_power)
        }
    }

    const BUILD_TIME: WallClockTime = WallClockTime::new(2026, 10, 16, 9, 30, 0);

    #[test]
    fn test_start_running() {
        let rtc = MockRtc::new(WallClockTime::new(2025, 6, 1, 12, 0, 5));
        let (source, report) = TimeSource::<NoopRawMutex, _>::start(rtc, BUILD_TIME).unwrap();

        assert_eq!(report, StartupReport::Running);
        assert_eq!(source.now().unwrap(), WallClockTime::new(2025, 6, 1, 12, 0, 5));
        assert_eq!(source.into_inner().writes, 0);
    }

    #[test]
    fn test_start_lost_power_uses_fallback() {
        let mut rtc = MockRtc::new(WallClockTime::EPOCH);
        rtc.lost_power = true;

        let (source, report) = TimeSource::<NoopRawMutex, _>::start(rtc, BUILD_TIME).unwrap();

        assert_eq!(report, StartupReport::RestoredFromBuildTime(BUILD_TIME));
        assert_eq!(source.now().unwrap(), BUILD_TIME);

        let rtc = source.into_inner();
        assert!(!rtc.lost_power);
        assert_eq!(rtc.writes, 1);
    }

    #[test]
    fn test_start_not_detected() {
        let mut rtc = MockRtc::new(WallClockTime::EPOCH);
        rtc.present = false;

        let result = TimeSource::<NoopRawMutex, _>::start(rtc, BUILD_TIME);
        assert!(matches!(result, Err(RtcError::NotDetected)));
    }

    #[test]
    fn test_adjust_keeps_date_and_zeroes_seconds() {
        let rtc = MockRtc::new(WallClockTime::new(2025, 12, 31, 23, 59, 58));
        let (source, _) = TimeSource::<NoopRawMutex, _>::start(rtc, BUILD_TIME).unwrap();

        let written = source.adjust(7, 5).unwrap();

        assert_eq!(written, WallClockTime::new(2025, 12, 31, 7, 5, 0));
        assert_eq!(source.now().unwrap(), written);
    }

    #[test]
    fn test_adjust_read_failure_leaves_time() {
        let rtc = MockRtc::new(WallClockTime::new(2025, 1, 1, 10, 10, 0));
        let (source, _) = TimeSource::<NoopRawMutex, _>::start(rtc, BUILD_TIME).unwrap();

        let mut rtc = source.into_inner();
        rtc.fail_reads = true;
        let (source, _) = TimeSource::<NoopRawMutex, _>::start(rtc, BUILD_TIME).unwrap();

        assert_eq!(source.adjust(3, 3), Err(RtcError::Bus));
        assert_eq!(source.now(), Err(RtcError::Bus));
        assert_eq!(source.into_inner().writes, 0);
    }
}
