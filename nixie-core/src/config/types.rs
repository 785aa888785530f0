//! Clock configuration types
//!
//! One struct per TOML section. Values are kept raw as parsed; the typed
//! display tables are built (and checked) by [`ClockConfig::validate`],
//! [`ClockConfig::mapping`] and [`ClockConfig::digit_layout`].

use heapless::String;

use crate::display::mapping::REFERENCE_LINES;
use crate::display::{
    DigitLayout, DisplayError, NixieMapping, SweepTest, TubePosition, SELECT_LINES, TUBE_COUNT,
};
use crate::sync::BoundsPolicy;

/// Maximum advertised name length (one link frame payload)
pub const MAX_NAME_LEN: usize = 20;

/// Advertised device name
pub type DeviceName = String<MAX_NAME_LEN>;

/// Name advertised when none is configured
pub const DEFAULT_DEVICE_NAME: &str = "Nixie-clock";

/// Default render period
pub const DEFAULT_RENDER_PERIOD_MS: u32 = 500;

/// Accepted render period range
pub const RENDER_PERIOD_RANGE_MS: core::ops::RangeInclusive<u32> = 10..=60_000;

/// DS3231 bus address
pub const DEFAULT_RTC_ADDRESS: u8 = 0x68;

/// Semantic configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Tube mapping or layout rejected
    Display(DisplayError),
    /// Render period outside the accepted range
    RenderPeriod,
    /// Sweep selected with zero cycles
    SweepCycles,
    /// Sweep selected with a zero step
    SweepStep,
    /// Not a 7-bit non-reserved I2C address
    RtcAddress,
    /// Empty device name
    DeviceName,
}

impl From<DisplayError> for ConfigError {
    fn from(e: DisplayError) -> Self {
        ConfigError::Display(e)
    }
}

/// What the tubes show after boot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayMode {
    /// Show the RTC time
    #[default]
    Clock,
    /// Run the bench sweep, then show the time
    Sweep,
}

/// `[display]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayConfig {
    /// Render tick period
    pub render_period_ms: u32,
    /// Boot mode
    pub mode: DisplayMode,
    /// Full 0-9 passes in sweep mode
    pub sweep_cycles: u16,
    /// Time each sweep digit is held
    pub sweep_step_ms: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            render_period_ms: DEFAULT_RENDER_PERIOD_MS,
            mode: DisplayMode::Clock,
            sweep_cycles: 3,
            sweep_step_ms: 500,
        }
    }
}

/// `[layout]`: tube position of each digit role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LayoutConfig {
    pub hour_tens: u8,
    pub hour_ones: u8,
    pub minute_tens: u8,
    pub minute_ones: u8,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            hour_tens: 2,
            hour_ones: 3,
            minute_tens: 0,
            minute_ones: 1,
        }
    }
}

/// `[rtc]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RtcConfig {
    /// 7-bit I2C address
    pub i2c_address: u8,
}

impl Default for RtcConfig {
    fn default() -> Self {
        Self {
            i2c_address: DEFAULT_RTC_ADDRESS,
        }
    }
}

/// `[sync]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SyncConfig {
    pub bounds: BoundsPolicy,
}

/// `[radio]`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RadioConfig {
    /// Advertised name
    pub name: DeviceName,
}

impl Default for RadioConfig {
    fn default() -> Self {
        let mut name = DeviceName::new();
        // Fits: DEFAULT_DEVICE_NAME is shorter than MAX_NAME_LEN
        let _ = name.push_str(DEFAULT_DEVICE_NAME);
        Self { name }
    }
}

/// Complete clock configuration
///
/// `Default` describes the reference board, so a missing or broken
/// `clock.toml` still yields a working clock.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockConfig {
    pub display: DisplayConfig,
    /// `[tubes]`: select lines per tube, bit order
    pub tubes: Tubes,
    pub layout: LayoutConfig,
    pub rtc: RtcConfig,
    pub sync: SyncConfig,
    pub radio: RadioConfig,
}

/// Raw select-line table, tube-major
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Tubes(pub [[u8; SELECT_LINES]; TUBE_COUNT]);

impl Default for Tubes {
    fn default() -> Self {
        Self(REFERENCE_LINES)
    }
}

impl ClockConfig {
    /// Check the configuration against a board
    ///
    /// `line_count` and `reserved` describe the GPIO bank the tubes are
    /// wired to.
    pub fn validate(&self, line_count: u8, reserved: &[u8]) -> Result<(), ConfigError> {
        self.mapping()?.validate(line_count, reserved)?;
        self.digit_layout()?;

        if !RENDER_PERIOD_RANGE_MS.contains(&self.display.render_period_ms) {
            return Err(ConfigError::RenderPeriod);
        }
        if self.display.mode == DisplayMode::Sweep {
            if self.display.sweep_cycles == 0 {
                return Err(ConfigError::SweepCycles);
            }
            if self.display.sweep_step_ms == 0 {
                return Err(ConfigError::SweepStep);
            }
        }
        // 0x00-0x07 and 0x78-0x7F are reserved by the I2C specification
        if !(0x08..=0x77).contains(&self.rtc.i2c_address) {
            return Err(ConfigError::RtcAddress);
        }
        if self.radio.name.is_empty() {
            return Err(ConfigError::DeviceName);
        }
        Ok(())
    }

    /// Build the line table (uniqueness checked, board limits not)
    pub fn mapping(&self) -> Result<NixieMapping, DisplayError> {
        NixieMapping::new(self.tubes.0)
    }

    /// Build the digit layout
    pub fn digit_layout(&self) -> Result<DigitLayout, DisplayError> {
        DigitLayout::new(
            TubePosition::new(self.layout.hour_tens)?,
            TubePosition::new(self.layout.hour_ones)?,
            TubePosition::new(self.layout.minute_tens)?,
            TubePosition::new(self.layout.minute_ones)?,
        )
    }

    /// Sweep to run at boot, if sweep mode is selected
    pub fn boot_sweep(&self) -> Option<SweepTest> {
        match self.display.mode {
            DisplayMode::Sweep => Some(SweepTest::new(self.display.sweep_cycles)),
            DisplayMode::Clock => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINE_COUNT: u8 = 30;
    const RESERVED: [u8; 4] = [0, 1, 4, 5];

    #[test]
    fn test_default_is_valid() {
        let config = ClockConfig::default();
        assert_eq!(config.validate(LINE_COUNT, &RESERVED), Ok(()));
        assert_eq!(config.digit_layout(), Ok(DigitLayout::REFERENCE_BOARD));
        assert_eq!(config.mapping(), Ok(NixieMapping::default()));
        assert_eq!(config.radio.name.as_str(), "Nixie-clock");
        assert!(config.boot_sweep().is_none());
    }

    #[test]
    fn test_layout_errors() {
        let mut config = ClockConfig::default();
        config.layout.minute_ones = 2;
        assert_eq!(
            config.validate(LINE_COUNT, &RESERVED),
            Err(ConfigError::Display(DisplayError::DuplicatePosition))
        );

        config.layout.minute_ones = 4;
        assert_eq!(
            config.validate(LINE_COUNT, &RESERVED),
            Err(ConfigError::Display(DisplayError::PositionOutOfRange))
        );
    }

    #[test]
    fn test_reserved_line_rejected() {
        let mut config = ClockConfig::default();
        config.tubes.0[2][1] = 5;
        assert_eq!(
            config.validate(LINE_COUNT, &RESERVED),
            Err(ConfigError::Display(DisplayError::ReservedLine))
        );
    }

    #[test]
    fn test_scalar_limits() {
        let mut config = ClockConfig::default();
        config.display.render_period_ms = 0;
        assert_eq!(
            config.validate(LINE_COUNT, &RESERVED),
            Err(ConfigError::RenderPeriod)
        );

        let mut config = ClockConfig::default();
        config.rtc.i2c_address = 0x78;
        assert_eq!(
            config.validate(LINE_COUNT, &RESERVED),
            Err(ConfigError::RtcAddress)
        );

        let mut config = ClockConfig::default();
        config.radio.name.clear();
        assert_eq!(
            config.validate(LINE_COUNT, &RESERVED),
            Err(ConfigError::DeviceName)
        );
    }

    #[test]
    fn test_sweep_mode() {
        let mut config = ClockConfig::default();
        config.display.mode = DisplayMode::Sweep;
        config.display.sweep_cycles = 2;
        assert_eq!(config.boot_sweep().map(|s| s.len()), Some(20));

        config.display.sweep_cycles = 0;
        assert_eq!(
            config.validate(LINE_COUNT, &RESERVED),
            Err(ConfigError::SweepCycles)
        );
    }
}
