//! Time sync task
//!
//! Feeds peer events into the time sync service. Outcomes are only logged;
//! the peer never gets an error response.

use defmt::*;

use nixie_core::sync::{dispatch, BoundsPolicy, GattEvent, HandlerOutcome, TimeSyncService};
use nixie_core::traits::{ReadOutcome, WriteOutcome};
use nixie_protocol::RadioEvent;

use crate::channels::{OUTBOUND, RADIO_EVENTS};
use crate::link::LinkCharacteristic;
use crate::ClockSource;

/// Sync task - handles connects, writes and reads of the time characteristic
#[embassy_executor::task]
pub async fn sync_task(source: &'static ClockSource, policy: BoundsPolicy) {
    info!("Sync task started ({} bounds)", policy);

    let mut service = TimeSyncService::new(source, policy);
    let mut characteristic = LinkCharacteristic::new(&OUTBOUND);

    loop {
        let event = RADIO_EVENTS.receive().await;

        let gatt_event = match &event {
            RadioEvent::Connected => GattEvent::Connected,
            RadioEvent::Disconnected => GattEvent::Disconnected,
            RadioEvent::Write(value) => GattEvent::Write(value.as_slice()),
            RadioEvent::ReadRequest => GattEvent::Read,
        };

        let outcome = dispatch(&mut service, gatt_event, &mut characteristic);
        log_outcome(outcome);
        trace!("Sync stats: {}", service.stats());
    }
}

fn log_outcome(outcome: HandlerOutcome) {
    match outcome {
        HandlerOutcome::Connected => info!("Peer connected"),
        HandlerOutcome::Disconnected => info!("Peer disconnected"),
        HandlerOutcome::Write(WriteOutcome::Applied(time)) => info!("Time set: {}", time),
        HandlerOutcome::Write(WriteOutcome::Discarded(e)) => debug!("Write discarded: {}", e),
        HandlerOutcome::Write(WriteOutcome::Failed(e)) => warn!("RTC write failed: {}", e),
        HandlerOutcome::Read(ReadOutcome::Notified { hour, minute }) => {
            debug!("Read answered: {}:{}", hour, minute)
        }
        HandlerOutcome::Read(ReadOutcome::NotifyFailed {
            hour,
            minute,
            error,
        }) => warn!("Read value {}:{} set, notify failed: {}", hour, minute, error),
        HandlerOutcome::Read(ReadOutcome::Abandoned(e)) => warn!("Read abandoned: {}", e),
    }
}
