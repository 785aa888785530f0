//! I2C bus abstraction
//!
//! Blocking master operations, enough for register-mapped peripherals
//! such as the DS3231 RTC.

/// Bus-level failure, independent of the chip HAL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum I2cBusError {
    /// Address or data byte not acknowledged (device absent or busy)
    Nack,
    /// Lost arbitration to another master
    ArbitrationLost,
    /// Buffer length rejected by the controller
    InvalidLength,
    /// Any other controller error
    Other,
}

/// I2C bus master
pub trait I2cBus {
    /// Write data to a device at the given address
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `data` - Bytes to write
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), I2cBusError>;

    /// Read data from a device at the given address
    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), I2cBusError>;

    /// Write then read in a single transaction (repeated start)
    ///
    /// Used to select a register then read from it.
    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), I2cBusError>;
}

/// I2C configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct I2cConfig {
    /// Clock frequency in Hz
    pub frequency: u32,
}

/// Defaults to fast mode
impl Default for I2cConfig {
    fn default() -> Self {
        Self::FAST
    }
}

impl I2cConfig {
    /// Fast mode (400 kHz), the DS3231 maximum
    pub const FAST: Self = Self { frequency: 400_000 };
}
