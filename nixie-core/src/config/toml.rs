//! Minimal TOML parser for `clock.toml`
//!
//! Handles only the subset the clock configuration uses. It does NOT
//! support the full TOML spec, and needs no allocator.
//!
//! Supported features:
//! - `[section]` headers
//! - `key = value` pairs (string, integer, flat integer array)
//! - Decimal and `0x` hexadecimal integers
//! - Comments (`# ...`), whole-line or trailing
//!
//! Unknown sections and keys are errors so a typo cannot silently fall
//! back to a default.

use super::types::{ClockConfig, DeviceName, DisplayMode};
use crate::display::SELECT_LINES;
use crate::sync::BoundsPolicy;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Key not valid in its section
    UnknownKey,
    /// Line is neither a header nor `key = value`
    InvalidLine,
    /// Value has the wrong type or is out of range
    InvalidValue,
    /// String longer than its buffer
    TooLong,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Display,
    Tubes,
    Layout,
    Rtc,
    Sync,
    Radio,
}

/// Parse TOML text into a [`ClockConfig`]
///
/// Keys that do not appear keep their default values. The result is not
/// validated against a board; call [`ClockConfig::validate`] for that.
pub fn parse_config(input: &str) -> Result<ClockConfig, ParseError> {
    let mut config = ClockConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = strip_comment(line).trim();
        if line.is_empty() {
            continue;
        }

        if let Some(header) = line.strip_prefix('[') {
            let header = header.strip_suffix(']').ok_or(ParseError::InvalidSection)?;
            section = parse_section_header(header)?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::InvalidLine)?;
        apply_value(section, key, value, &mut config)?;
    }

    Ok(config)
}

fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    match header.trim() {
        "display" => Ok(Section::Display),
        "tubes" => Ok(Section::Tubes),
        "layout" => Ok(Section::Layout),
        "rtc" => Ok(Section::Rtc),
        "sync" => Ok(Section::Sync),
        "radio" => Ok(Section::Radio),
        _ => Err(ParseError::InvalidSection),
    }
}

/// Cut a trailing comment, ignoring `#` inside a string
fn strip_comment(line: &str) -> &str {
    let mut in_string = false;
    for (i, c) in line.char_indices() {
        match c {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..i],
            _ => {}
        }
    }
    line
}

/// Parse "key = value" line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    let value = value.trim();

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut ClockConfig,
) -> Result<(), ParseError> {
    match section {
        Section::Display => match key {
            "render_period_ms" => config.display.render_period_ms = parse_int(value)?,
            "mode" => config.display.mode = parse_mode(value)?,
            "sweep_cycles" => config.display.sweep_cycles = parse_int(value)?,
            "sweep_step_ms" => config.display.sweep_step_ms = parse_int(value)?,
            _ => return Err(ParseError::UnknownKey),
        },
        Section::Tubes => {
            let tube = match key {
                "tube0" => 0,
                "tube1" => 1,
                "tube2" => 2,
                "tube3" => 3,
                _ => return Err(ParseError::UnknownKey),
            };
            config.tubes.0[tube] = parse_lines(value)?;
        }
        Section::Layout => {
            let position = parse_int(value)?;
            match key {
                "hour_tens" => config.layout.hour_tens = position,
                "hour_ones" => config.layout.hour_ones = position,
                "minute_tens" => config.layout.minute_tens = position,
                "minute_ones" => config.layout.minute_ones = position,
                _ => return Err(ParseError::UnknownKey),
            }
        }
        Section::Rtc => match key {
            "i2c_address" | "address" => config.rtc.i2c_address = parse_int(value)?,
            _ => return Err(ParseError::UnknownKey),
        },
        Section::Sync => match key {
            "bounds" => config.sync.bounds = parse_bounds(value)?,
            _ => return Err(ParseError::UnknownKey),
        },
        Section::Radio => match key {
            "name" => config.radio.name = parse_name(value)?,
            _ => return Err(ParseError::UnknownKey),
        },
        Section::Root => return Err(ParseError::UnknownKey),
    }

    Ok(())
}

/// Parse a string value (removes quotes)
fn parse_string(value: &str) -> Result<&str, ParseError> {
    match value.strip_prefix('"') {
        Some(rest) => rest.strip_suffix('"').ok_or(ParseError::InvalidValue),
        // Allow unquoted strings for simple values
        None => Ok(value),
    }
}

fn parse_name(value: &str) -> Result<DeviceName, ParseError> {
    DeviceName::try_from(parse_string(value)?).map_err(|_| ParseError::TooLong)
}

/// Parse a decimal or `0x` hexadecimal integer
fn parse_int<T: TryFrom<u32>>(value: &str) -> Result<T, ParseError> {
    let raw = match value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
    {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => value.parse::<u32>(),
    }
    .map_err(|_| ParseError::InvalidValue)?;

    T::try_from(raw).map_err(|_| ParseError::InvalidValue)
}

/// Parse `[a, b, c, d]` into one tube's select lines
fn parse_lines(value: &str) -> Result<[u8; SELECT_LINES], ParseError> {
    let inner = value
        .strip_prefix('[')
        .and_then(|v| v.strip_suffix(']'))
        .ok_or(ParseError::InvalidValue)?;

    let mut lines = [0u8; SELECT_LINES];
    let mut count = 0;
    for item in inner.split(',').map(str::trim) {
        // Trailing comma
        if item.is_empty() && count == SELECT_LINES {
            continue;
        }
        let slot = lines.get_mut(count).ok_or(ParseError::InvalidValue)?;
        *slot = parse_int(item)?;
        count += 1;
    }

    if count != SELECT_LINES {
        return Err(ParseError::InvalidValue);
    }
    Ok(lines)
}

fn parse_mode(value: &str) -> Result<DisplayMode, ParseError> {
    match parse_string(value)? {
        "clock" => Ok(DisplayMode::Clock),
        "sweep" => Ok(DisplayMode::Sweep),
        _ => Err(ParseError::InvalidValue),
    }
}

fn parse_bounds(value: &str) -> Result<BoundsPolicy, ParseError> {
    match parse_string(value)? {
        "strict" => Ok(BoundsPolicy::Strict),
        "legacy" => Ok(BoundsPolicy::Legacy),
        _ => Err(ParseError::InvalidValue),
    }
}
