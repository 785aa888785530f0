//! Time-sync characteristic handler

use embassy_sync::blocking_mutex::raw::RawMutex;

use super::request::{format_time, BoundsPolicy, TimeSyncRequest, TimeText};
use crate::clock::TimeSource;
use crate::traits::{
    Characteristic, CharacteristicHandler, ReadOutcome, RtcDevice, SyncError, WriteOutcome,
};

/// Counters for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SyncStats {
    pub writes_applied: u32,
    pub writes_discarded: u32,
    pub writes_failed: u32,
    pub reads_notified: u32,
    pub reads_unnotified: u32,
    pub reads_abandoned: u32,
}

/// Read/write/notify handler for the time characteristic
///
/// Writes of `hh:mm` adjust the time source; reads publish the current
/// `hh:mm` and notify subscribers. Rejected writes are dropped without a
/// reply. Connection events are tracked but never touch the clock.
pub struct TimeSyncService<'a, M: RawMutex, R: RtcDevice> {
    source: &'a TimeSource<M, R>,
    policy: BoundsPolicy,
    connected: bool,
    stats: SyncStats,
}

impl<'a, M: RawMutex, R: RtcDevice> TimeSyncService<'a, M, R> {
    /// Create a handler over a shared time source
    pub fn new(source: &'a TimeSource<M, R>, policy: BoundsPolicy) -> Self {
        Self {
            source,
            policy,
            connected: false,
            stats: SyncStats::default(),
        }
    }

    /// Whether a peer is currently connected
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Diagnostic counters
    pub fn stats(&self) -> SyncStats {
        self.stats
    }

    /// Set the characteristic to the current `hh:mm`
    fn publish<C: Characteristic>(&self, characteristic: &mut C) -> Result<(u8, u8), SyncError> {
        let now = self.source.now()?;
        let text: TimeText = format_time(now.hour, now.minute)?;
        characteristic.set_value(text.as_bytes())?;
        Ok((now.hour, now.minute))
    }
}

impl<M: RawMutex, R: RtcDevice> CharacteristicHandler for TimeSyncService<'_, M, R> {
    fn on_connect(&mut self) {
        self.connected = true;
    }

    fn on_disconnect(&mut self) {
        self.connected = false;
    }

    fn on_write(&mut self, value: &[u8]) -> WriteOutcome {
        let request = match TimeSyncRequest::parse_with(value, self.policy) {
            Ok(request) => request,
            Err(e) => {
                self.stats.writes_discarded += 1;
                return WriteOutcome::Discarded(e);
            }
        };

        match self.source.adjust(request.hour, request.minute) {
            Ok(written) => {
                self.stats.writes_applied += 1;
                WriteOutcome::Applied(written)
            }
            Err(e) => {
                self.stats.writes_failed += 1;
                WriteOutcome::Failed(e)
            }
        }
    }

    fn on_read<C: Characteristic>(&mut self, characteristic: &mut C) -> ReadOutcome {
        let (hour, minute) = match self.publish(characteristic) {
            Ok(published) => published,
            Err(e) => {
                self.stats.reads_abandoned += 1;
                return ReadOutcome::Abandoned(e);
            }
        };

        // The value stays set even when the notification is lost
        match characteristic.notify() {
            Ok(()) => {
                self.stats.reads_notified += 1;
                ReadOutcome::Notified { hour, minute }
            }
            Err(error) => {
                self.stats.reads_unnotified += 1;
                ReadOutcome::NotifyFailed {
                    hour,
                    minute,
                    error,
                }
            }
        }
    }
}
