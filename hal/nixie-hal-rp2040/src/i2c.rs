//! Blocking I2C master over embassy-rp
//!
//! The RTC is touched once per render tick and on time sync, both short
//! register transfers, so the blocking driver is enough and keeps the
//! bus usable from inside a mutex critical section.

use embassy_rp::i2c::{AbortReason, Blocking, Config, Error as RpI2cError, I2c, Instance, SclPin, SdaPin};
use embassy_rp::Peri;
use nixie_hal::{I2cBus, I2cBusError, I2cConfig};

/// I2C bus driver
pub struct RpI2c<'d, T: Instance> {
    i2c: I2c<'d, T, Blocking>,
}

impl<'d, T: Instance> RpI2c<'d, T> {
    /// Bring up the controller on the given pins
    pub fn new(
        peri: Peri<'d, T>,
        scl: Peri<'d, impl SclPin<T>>,
        sda: Peri<'d, impl SdaPin<T>>,
        config: I2cConfig,
    ) -> Self {
        let mut cfg = Config::default();
        cfg.frequency = config.frequency;
        Self {
            i2c: I2c::new_blocking(peri, scl, sda, cfg),
        }
    }
}

fn bus_error(e: RpI2cError) -> I2cBusError {
    match e {
        RpI2cError::Abort(AbortReason::NoAcknowledge) => I2cBusError::Nack,
        RpI2cError::Abort(AbortReason::ArbitrationLoss) => I2cBusError::ArbitrationLost,
        RpI2cError::InvalidReadBufferLength | RpI2cError::InvalidWriteBufferLength => {
            I2cBusError::InvalidLength
        }
        _ => I2cBusError::Other,
    }
}

impl<T: Instance> I2cBus for RpI2c<'_, T> {
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), I2cBusError> {
        self.i2c.blocking_write(address, data).map_err(bus_error)
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), I2cBusError> {
        self.i2c.blocking_read(address, buf).map_err(bus_error)
    }

    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), I2cBusError> {
        self.i2c
            .blocking_write_read(address, write_data, read_buf)
            .map_err(bus_error)
    }
}
