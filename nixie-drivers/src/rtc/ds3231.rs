//! DS3231 real-time clock
//!
//! Timekeeping registers 0x00-0x06 hold BCD seconds, minutes, hours,
//! weekday, date, month/century and year. Reads accept both 12- and 24-hour
//! mode; writes always select 24-hour mode. The status register's OSF bit
//! flags an oscillator stop (backup power lost) and is cleared after every
//! successful time write.

use nixie_core::traits::{RtcDevice, RtcError};
use nixie_core::WallClockTime;
use nixie_hal::I2cBus;

/// Fixed bus address of the DS3231
pub const DS3231_ADDRESS: u8 = 0x68;

/// Register addresses
mod reg {
    pub const SECONDS: u8 = 0x00;
    pub const STATUS: u8 = 0x0F;
}

/// Timekeeping register count (seconds..year)
const TIME_REGISTERS: usize = 7;

/// Status: oscillator stop flag
const STATUS_OSF: u8 = 1 << 7;
/// Hours: 12-hour mode select
const HOURS_12H: u8 = 1 << 6;
/// Hours: PM flag in 12-hour mode
const HOURS_PM: u8 = 1 << 5;
/// Month: century rollover
const MONTH_CENTURY: u8 = 1 << 7;

/// Years the registers can represent
const FIRST_YEAR: u16 = 2000;
const LAST_YEAR: u16 = 2199;

/// DS3231 on an I2C bus
pub struct Ds3231<I> {
    bus: I,
    address: u8,
}

impl<I: I2cBus> Ds3231<I> {
    /// Create a driver at the standard address
    pub fn new(bus: I) -> Self {
        Self::with_address(bus, DS3231_ADDRESS)
    }

    /// Create a driver at a custom address (behind a translator, etc.)
    pub fn with_address(bus: I, address: u8) -> Self {
        Self { bus, address }
    }

    /// Bus address in use
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Release the bus
    pub fn release(self) -> I {
        self.bus
    }

    /// Read the raw status register
    pub fn status(&mut self) -> Result<u8, RtcError> {
        let mut status = [0u8; 1];
        self.read_registers(reg::STATUS, &mut status)?;
        Ok(status[0])
    }

    fn read_registers(&mut self, start: u8, buf: &mut [u8]) -> Result<(), RtcError> {
        self.bus
            .write_read(self.address, &[start], buf)
            .map_err(|_| RtcError::Bus)
    }

    fn write_register(&mut self, register: u8, value: u8) -> Result<(), RtcError> {
        self.bus
            .write(self.address, &[register, value])
            .map_err(|_| RtcError::Bus)
    }
}

impl<I: I2cBus> RtcDevice for Ds3231<I> {
    fn probe(&mut self) -> Result<(), RtcError> {
        self.status().map(|_| ()).map_err(|_| RtcError::NotDetected)
    }

    fn read_time(&mut self) -> Result<WallClockTime, RtcError> {
        let mut regs = [0u8; TIME_REGISTERS];
        self.read_registers(reg::SECONDS, &mut regs)?;
        decode_time(&regs)
    }

    fn write_time(&mut self, time: &WallClockTime) -> Result<(), RtcError> {
        let regs = encode_time(time)?;

        let mut frame = [0u8; TIME_REGISTERS + 1];
        frame[0] = reg::SECONDS;
        frame[1..].copy_from_slice(&regs);
        self.bus
            .write(self.address, &frame)
            .map_err(|_| RtcError::Bus)?;

        let status = self.status()?;
        if status & STATUS_OSF != 0 {
            self.write_register(reg::STATUS, status & !STATUS_OSF)?;
        }
        Ok(())
    }

    fn lost_power(&mut self) -> Result<bool, RtcError> {
        Ok(self.status()? & STATUS_OSF != 0)
    }
}

/// Decode timekeeping registers 0x00-0x06
pub fn decode_time(regs: &[u8; TIME_REGISTERS]) -> Result<WallClockTime, RtcError> {
    let second = bcd_to_dec(regs[0] & 0x7F)?;
    let minute = bcd_to_dec(regs[1] & 0x7F)?;
    let hour = decode_hours(regs[2])?;
    // regs[3] is the weekday; derived from the date instead
    let day = bcd_to_dec(regs[4] & 0x3F)?;
    let month = bcd_to_dec(regs[5] & 0x1F)?;
    let century = if regs[5] & MONTH_CENTURY != 0 { 100 } else { 0 };
    let year = FIRST_YEAR + century + u16::from(bcd_to_dec(regs[6])?);

    let time = WallClockTime::new(year, month, day, hour, minute, second);
    if time.is_valid() {
        Ok(time)
    } else {
        Err(RtcError::InvalidData)
    }
}

/// Encode a time for registers 0x00-0x06, hours in 24-hour mode
pub fn encode_time(time: &WallClockTime) -> Result<[u8; TIME_REGISTERS], RtcError> {
    if !time.is_valid() || !(FIRST_YEAR..=LAST_YEAR).contains(&time.year) {
        return Err(RtcError::UnsupportedTime);
    }

    let offset = time.year - FIRST_YEAR;
    let century = if offset >= 100 { MONTH_CENTURY } else { 0 };
    // < 100 after removing the century
    let year = (offset % 100) as u8;

    Ok([
        dec_to_bcd(time.second),
        dec_to_bcd(time.minute),
        dec_to_bcd(time.hour),
        time.weekday(),
        dec_to_bcd(time.day),
        dec_to_bcd(time.month) | century,
        dec_to_bcd(year),
    ])
}

fn decode_hours(raw: u8) -> Result<u8, RtcError> {
    if raw & HOURS_12H == 0 {
        return bcd_to_dec(raw & 0x3F);
    }

    let hour12 = bcd_to_dec(raw & 0x1F)?;
    if !(1..=12).contains(&hour12) {
        return Err(RtcError::InvalidData);
    }
    let pm = raw & HOURS_PM != 0;
    // 12 AM is 00, 12 PM is 12
    Ok(hour12 % 12 + if pm { 12 } else { 0 })
}

fn bcd_to_dec(bcd: u8) -> Result<u8, RtcError> {
    let tens = bcd >> 4;
    let ones = bcd & 0x0F;
    if tens > 9 || ones > 9 {
        return Err(RtcError::InvalidData);
    }
    Ok(tens * 10 + ones)
}

/// `dec` must be below 100
fn dec_to_bcd(dec: u8) -> u8 {
    ((dec / 10) << 4) | (dec % 10)
}
