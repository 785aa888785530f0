//! End-to-end time-set and time-read through the sync handler

mod common;

use common::{MockRtc, RecordingCharacteristic};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use nixie_core::sync::{dispatch, BoundsPolicy, GattEvent, HandlerOutcome, TimeSyncService};
use nixie_core::traits::{CharacteristicHandler, ReadOutcome, SyncError, WriteOutcome};
use nixie_core::{TimeSource, WallClockTime};
use proptest::prelude::*;

type Source = TimeSource<CriticalSectionRawMutex, MockRtc>;

const START: WallClockTime = WallClockTime::new(2031, 7, 19, 18, 42, 33);

fn source() -> Source {
    let (source, _) = Source::start(MockRtc::running(START), WallClockTime::EPOCH).unwrap();
    source
}

proptest! {
    /// A valid write followed by a read reports the written time, date kept
    #[test]
    fn prop_write_then_read_round_trip(hour in 0u8..24, minute in 0u8..60, padded in any::<bool>()) {
        let source = source();
        let mut service = TimeSyncService::new(&source, BoundsPolicy::Strict);
        let mut characteristic = RecordingCharacteristic::default();

        let payload = if padded {
            format!("{hour:02}:{minute:02}")
        } else {
            format!("{hour}:{minute}")
        };

        let written = service.on_write(payload.as_bytes());
        prop_assert!(matches!(written, WriteOutcome::Applied(_)));

        let read = service.on_read(&mut characteristic);
        prop_assert_eq!(read, ReadOutcome::Notified { hour, minute });
        prop_assert_eq!(characteristic.value, format!("{hour:02}:{minute:02}").into_bytes());
        prop_assert_eq!(characteristic.notifications, 1);

        let now = source.now().unwrap();
        prop_assert_eq!((now.year, now.month, now.day), (START.year, START.month, START.day));
        prop_assert_eq!(now.second, 0);
    }

    /// Payloads without digits never parse and never touch the clock
    #[test]
    fn prop_non_numeric_payload_discarded(payload in "[a-zA-Z:;. \\-]{0,12}") {
        let source = source();
        let mut service = TimeSyncService::new(&source, BoundsPolicy::Strict);

        let outcome = service.on_write(payload.as_bytes());

        prop_assert_eq!(outcome, WriteOutcome::Discarded(SyncError::Malformed));
        prop_assert_eq!(source.now().unwrap(), START);
    }

    /// Whatever the bytes, a discarded write leaves the clock unchanged
    #[test]
    fn prop_discarded_write_leaves_clock(payload in prop::collection::vec(any::<u8>(), 0..16)) {
        let source = source();
        let mut service = TimeSyncService::new(&source, BoundsPolicy::Strict);

        if let WriteOutcome::Discarded(_) = service.on_write(&payload) {
            prop_assert_eq!(source.now().unwrap(), START);
            prop_assert!(source.into_inner().writes.is_empty());
        }
    }

    /// Hours 24-99 are out of range under the default policy
    #[test]
    fn prop_strict_rejects_large_hours(hour in 24u8..100, minute in 0u8..60) {
        let source = source();
        let mut service = TimeSyncService::new(&source, BoundsPolicy::default());

        let outcome = service.on_write(format!("{hour}:{minute:02}").as_bytes());

        prop_assert_eq!(outcome, WriteOutcome::Discarded(SyncError::OutOfRange));
        prop_assert_eq!(source.now().unwrap(), START);
    }
}

#[test]
fn boundary_writes_per_policy() {
    let cases: [(&[u8], bool, bool); 5] = [
        // payload, strict accepts, legacy accepts
        (b"23:59", true, true),
        (b"24:00", false, true),
        (b"12:60", false, true),
        (b"25:00", false, false),
        (b"12:61", false, false),
    ];

    for (payload, strict, legacy) in cases {
        for (policy, accepted) in [(BoundsPolicy::Strict, strict), (BoundsPolicy::Legacy, legacy)] {
            let source = source();
            let mut service = TimeSyncService::new(&source, policy);

            let outcome = service.on_write(payload);

            if accepted {
                // The parser accepted it; an RTC may still refuse 24:00, the mock does not
                assert!(
                    matches!(outcome, WriteOutcome::Applied(_)),
                    "{policy:?} {payload:?}: {outcome:?}"
                );
            } else {
                assert_eq!(
                    outcome,
                    WriteOutcome::Discarded(SyncError::OutOfRange),
                    "{policy:?} {payload:?}"
                );
                assert_eq!(source.now().unwrap(), START);
            }
        }
    }
}

#[test]
fn radio_session_through_dispatch() {
    let source = source();
    let mut service = TimeSyncService::new(&source, BoundsPolicy::Strict);
    let mut characteristic = RecordingCharacteristic::default();

    let events = [
        GattEvent::Connected,
        GattEvent::Read,
        GattEvent::Write(b"garbage"),
        GattEvent::Write(b"06:30"),
        GattEvent::Read,
        GattEvent::Disconnected,
    ];
    let outcomes: Vec<HandlerOutcome> = events
        .into_iter()
        .map(|event| dispatch(&mut service, event, &mut characteristic))
        .collect();

    assert_eq!(outcomes[0], HandlerOutcome::Connected);
    assert_eq!(
        outcomes[1],
        HandlerOutcome::Read(ReadOutcome::Notified { hour: 18, minute: 42 })
    );
    assert_eq!(
        outcomes[2],
        HandlerOutcome::Write(WriteOutcome::Discarded(SyncError::Malformed))
    );
    assert!(matches!(
        outcomes[3],
        HandlerOutcome::Write(WriteOutcome::Applied(_))
    ));
    assert_eq!(
        outcomes[4],
        HandlerOutcome::Read(ReadOutcome::Notified { hour: 6, minute: 30 })
    );
    assert_eq!(outcomes[5], HandlerOutcome::Disconnected);

    assert_eq!(characteristic.value, b"06:30");
    assert_eq!(characteristic.notifications, 2);
    assert!(!service.is_connected());

    let stats = service.stats();
    assert_eq!(stats.writes_applied, 1);
    assert_eq!(stats.writes_discarded, 1);
    assert_eq!(stats.reads_notified, 2);
}
