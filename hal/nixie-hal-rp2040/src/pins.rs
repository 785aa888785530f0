//! GPIO bank for config-driven tube wiring
//!
//! Tube select lines come from `clock.toml` as GPIO numbers, so pins are
//! handed out by number at runtime. Lines wired to the radio UART and the
//! RTC bus are split off first and can never be taken from the bank.

use embassy_rp::gpio::{AnyPin, Level, Output};
use embassy_rp::peripherals::{I2C0, PIN_0, PIN_1, PIN_4, PIN_5, UART0};
use embassy_rp::{Peri, Peripherals};
use nixie_core::display::{NixieMapping, SELECT_LINES, TUBE_COUNT};

use crate::gpio::RpOutput;

/// GPIO lines on the RP2040 (GPIO0-GPIO29)
pub const GPIO_COUNT: u8 = 30;

/// Lines owned by other peripherals on the clock board
///
/// - GPIO0/1: UART0 TX/RX to the radio coprocessor
/// - GPIO4/5: I2C0 SDA/SCL to the DS3231
pub const RESERVED_PINS: [u8; 4] = [0, 1, 4, 5];

/// Error when requesting a pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinError {
    /// Pin number out of range (0-29 valid)
    InvalidPin,
    /// Pin already taken
    AlreadyTaken,
    /// Pin reserved for the radio link or the RTC bus
    Reserved,
}

/// Peripherals with a fixed role on the board
pub struct BoardPeripherals {
    pub uart0: Peri<'static, UART0>,
    pub radio_tx: Peri<'static, PIN_0>,
    pub radio_rx: Peri<'static, PIN_1>,
    pub i2c0: Peri<'static, I2C0>,
    pub rtc_sda: Peri<'static, PIN_4>,
    pub rtc_scl: Peri<'static, PIN_5>,
}

/// Free GPIO lines, taken by number
pub struct PinBank {
    pins: [Option<Peri<'static, AnyPin>>; GPIO_COUNT as usize],
}

impl PinBank {
    /// Split the chip peripherals into fixed-role peripherals and a bank
    /// of free lines
    pub fn split(p: Peripherals) -> (Self, BoardPeripherals) {
        let board = BoardPeripherals {
            uart0: p.UART0,
            radio_tx: p.PIN_0,
            radio_rx: p.PIN_1,
            i2c0: p.I2C0,
            rtc_sda: p.PIN_4,
            rtc_scl: p.PIN_5,
        };

        let bank = Self {
            pins: [
                None,
                None,
                Some(p.PIN_2.into()),
                Some(p.PIN_3.into()),
                None,
                None,
                Some(p.PIN_6.into()),
                Some(p.PIN_7.into()),
                Some(p.PIN_8.into()),
                Some(p.PIN_9.into()),
                Some(p.PIN_10.into()),
                Some(p.PIN_11.into()),
                Some(p.PIN_12.into()),
                Some(p.PIN_13.into()),
                Some(p.PIN_14.into()),
                Some(p.PIN_15.into()),
                Some(p.PIN_16.into()),
                Some(p.PIN_17.into()),
                Some(p.PIN_18.into()),
                Some(p.PIN_19.into()),
                Some(p.PIN_20.into()),
                Some(p.PIN_21.into()),
                Some(p.PIN_22.into()),
                Some(p.PIN_23.into()),
                Some(p.PIN_24.into()),
                Some(p.PIN_25.into()),
                Some(p.PIN_26.into()),
                Some(p.PIN_27.into()),
                Some(p.PIN_28.into()),
                Some(p.PIN_29.into()),
            ],
        };

        (bank, board)
    }

    /// Check a pin without taking it
    pub fn check(&self, pin_num: u8) -> Result<(), PinError> {
        if pin_num >= GPIO_COUNT {
            return Err(PinError::InvalidPin);
        }
        if RESERVED_PINS.contains(&pin_num) {
            return Err(PinError::Reserved);
        }
        if self.pins[usize::from(pin_num)].is_none() {
            return Err(PinError::AlreadyTaken);
        }
        Ok(())
    }

    /// Take a pin by number
    pub fn take(&mut self, pin_num: u8) -> Result<Peri<'static, AnyPin>, PinError> {
        self.check(pin_num)?;
        self.pins[usize::from(pin_num)]
            .take()
            .ok_or(PinError::AlreadyTaken)
    }

    /// Take a pin as a push-pull output, driven low
    pub fn output(&mut self, pin_num: u8) -> Result<RpOutput, PinError> {
        let pin = self.take(pin_num)?;
        Ok(RpOutput::new(Output::new(pin, Level::Low)))
    }

    /// Take all sixteen select lines of a tube mapping
    ///
    /// Every line is checked before any is taken, so on error the bank is
    /// left as it was.
    pub fn take_outputs(
        &mut self,
        mapping: &NixieMapping,
    ) -> Result<[[RpOutput; SELECT_LINES]; TUBE_COUNT], PinError> {
        for line in mapping.iter() {
            self.check(line)?;
        }

        let lines = mapping.lines();
        let mut group = |tube: usize| -> Result<[RpOutput; SELECT_LINES], PinError> {
            let [b0, b1, b2, b3] = lines[tube];
            Ok([
                self.output(b0)?,
                self.output(b1)?,
                self.output(b2)?,
                self.output(b3)?,
            ])
        };

        Ok([group(0)?, group(1)?, group(2)?, group(3)?])
    }
}
