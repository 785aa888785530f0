//! Embedded configuration
//!
//! `clock.toml` is compiled in and already checked by build.rs; the same
//! checks run again here against the board, and the built-in defaults are
//! used if they fail.

use defmt::*;
use nixie_core::config::{parse_config, ClockConfig};
use nixie_hal_rp2040::{GPIO_COUNT, RESERVED_PINS};

/// Embedded configuration (edit clock.toml and rebuild to customize)
const EMBEDDED_CONFIG: &str = include_str!("../clock.toml");

/// Parse and validate the embedded configuration
pub fn load() -> ClockConfig {
    let config = match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to parse embedded config: {}", e);
            error!("Using built-in defaults");
            return ClockConfig::default();
        }
    };

    if let Err(e) = config.validate(GPIO_COUNT, &RESERVED_PINS) {
        error!("Invalid embedded config: {}", e);
        error!("Using built-in defaults");
        return ClockConfig::default();
    }

    info!(
        "Config: render every {} ms, {} mode, {} bounds, name \"{}\"",
        config.display.render_period_ms,
        config.display.mode,
        config.sync.bounds,
        config.radio.name.as_str()
    );
    config
}
