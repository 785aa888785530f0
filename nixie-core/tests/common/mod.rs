//! Shared test doubles for the integration tests

#![allow(dead_code)]

use nixie_core::display::{Digit, TubePosition};
use nixie_core::traits::{Characteristic, GattError, RtcDevice, RtcError, TubeDisplay};
use nixie_core::WallClockTime;

/// In-memory RTC
///
/// `write_time` updates the registers one field at a time and yields
/// between hour and minute, like a register-by-register bus write.
pub struct MockRtc {
    pub registers: WallClockTime,
    pub present: bool,
    pub lost_power: bool,
    pub writes: Vec<WallClockTime>,
}

impl MockRtc {
    pub fn running(time: WallClockTime) -> Self {
        Self {
            registers: time,
            present: true,
            lost_power: false,
            writes: Vec::new(),
        }
    }

    pub fn lost_power() -> Self {
        Self {
            lost_power: true,
            ..Self::running(WallClockTime::EPOCH)
        }
    }

    pub fn absent() -> Self {
        Self {
            present: false,
            ..Self::running(WallClockTime::EPOCH)
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
        if !self.present {
            return Err(RtcError::Bus);
        }
        Ok(self.registers)
    }

    fn write_time(&mut self, time: &WallClockTime) -> Result<(), RtcError> {
        self.registers.second = time.second;
        self.registers.hour = time.hour;
        std::thread::yield_now();
        self.registers.minute = time.minute;
        self.registers.day = time.day;
        self.registers.month = time.month;
        self.registers.year = time.year;

        self.lost_power = false;
        self.writes.push(*time);
        Ok(())
    }

    fn lost_power(&mut self) -> Result<bool, RtcError> {
        Ok(self.lost_power)
    }
}

/// Characteristic recording the value and notification count
#[derive(Default)]
pub struct RecordingCharacteristic {
    pub value: Vec<u8>,
    pub notifications: usize,
}

impl Characteristic for RecordingCharacteristic {
    fn set_value(&mut self, value: &[u8]) -> Result<(), GattError> {
        self.value = value.to_vec();
        Ok(())
    }

    fn notify(&mut self) -> Result<(), GattError> {
        self.notifications += 1;
        Ok(())
    }
}

/// Tubes recording the digit currently shown at each position
#[derive(Default)]
pub struct ShownTubes {
    pub shown: [u8; 4],
}

impl TubeDisplay for ShownTubes {
    fn set_digit(&mut self, tube: TubePosition, digit: Digit) {
        self.shown[tube.index()] = digit.value();
    }
}
