//! Build script for nixie-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates clock.toml at compile time
//! - Embeds the build timestamp used to recover the RTC after a backup-power loss

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use time::OffsetDateTime;

/// GPIO lines wired to the radio UART and the RTC bus
const RESERVED_PINS: [i64; 4] = [0, 1, 4, 5];

fn main() {
    setup_linker();
    validate_config();
    emit_build_timestamp();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Emit NIXIE_BUILD_TIMESTAMP as `YYYY-MM-DDTHH:MM:SS` (UTC)
///
/// Honours SOURCE_DATE_EPOCH for reproducible builds.
fn emit_build_timestamp() {
    println!("cargo:rerun-if-env-changed=SOURCE_DATE_EPOCH");

    let now = match env::var("SOURCE_DATE_EPOCH") {
        Ok(epoch) => {
            let secs: i64 = epoch
                .trim()
                .parse()
                .unwrap_or_else(|_| panic!("SOURCE_DATE_EPOCH is not an integer: {}", epoch));
            OffsetDateTime::from_unix_timestamp(secs)
                .unwrap_or_else(|_| panic!("SOURCE_DATE_EPOCH out of range: {}", secs))
        }
        Err(_) => OffsetDateTime::now_utc(),
    };

    println!(
        "cargo:rustc-env=NIXIE_BUILD_TIMESTAMP={:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
        now.year(),
        u8::from(now.month()),
        now.day(),
        now.hour(),
        now.minute(),
        now.second()
    );
}

/// Validate clock.toml configuration at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=clock.toml");

    let config_path = Path::new("clock.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: clock.toml not found!                                    ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a clock.toml configuration file.          ║\n\
            ║  Please create one in the nixie-firmware directory.              ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read clock.toml                                ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in clock.toml                        ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    validate_required_sections(&config, &mut errors);
    validate_display(&config, &mut errors);
    validate_tubes(&config, &mut errors);
    validate_layout(&config, &mut errors);
    validate_choices(&config, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid clock configuration                              ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=clock.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn validate_required_sections(config: &toml::Value, errors: &mut Vec<String>) {
    for section in ["tubes", "layout"] {
        if config.get(section).and_then(|s| s.as_table()).is_none() {
            errors.push(format!("Missing [{}] section", section));
        }
    }
}

fn validate_display(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(display) = config.get("display") else {
        return;
    };

    if let Some(period) = display.get("render_period_ms").and_then(|v| v.as_integer()) {
        if !(10..=60_000).contains(&period) {
            errors.push("[display] render_period_ms must be 10-60000".to_string());
        }
    }

    if let Some(mode) = display.get("mode").and_then(|v| v.as_str()) {
        if !["clock", "sweep"].contains(&mode) {
            errors.push("[display] mode must be 'clock' or 'sweep'".to_string());
        }
    }
}

fn validate_tubes(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(tubes) = config.get("tubes").and_then(|t| t.as_table()) else {
        return;
    };

    let mut seen = Vec::new();
    for tube in ["tube0", "tube1", "tube2", "tube3"] {
        let Some(lines) = tubes.get(tube).and_then(|l| l.as_array()) else {
            errors.push(format!("[tubes] missing '{}'", tube));
            continue;
        };
        if lines.len() != 4 {
            errors.push(format!("[tubes] {} must list exactly 4 GPIOs", tube));
        }
        for line in lines {
            match line.as_integer() {
                Some(gpio) if !(0..30).contains(&gpio) => {
                    errors.push(format!("[tubes] {}: GPIO{} does not exist", tube, gpio));
                }
                Some(gpio) if RESERVED_PINS.contains(&gpio) => {
                    errors.push(format!("[tubes] {}: GPIO{} is reserved", tube, gpio));
                }
                Some(gpio) if seen.contains(&gpio) => {
                    errors.push(format!("[tubes] {}: GPIO{} used twice", tube, gpio));
                }
                Some(gpio) => seen.push(gpio),
                None => errors.push(format!("[tubes] {} entries must be integers", tube)),
            }
        }
    }

    for key in tubes.keys() {
        if !key.starts_with("tube") || key.len() != 5 {
            errors.push(format!("[tubes] unknown key '{}'", key));
        }
    }
}

fn validate_layout(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(layout) = config.get("layout").and_then(|l| l.as_table()) else {
        return;
    };

    let mut seen = Vec::new();
    for role in ["hour_tens", "hour_ones", "minute_tens", "minute_ones"] {
        match layout.get(role).and_then(|v| v.as_integer()) {
            Some(tube) if !(0..4).contains(&tube) => {
                errors.push(format!("[layout] {} must be 0-3", role));
            }
            Some(tube) if seen.contains(&tube) => {
                errors.push(format!("[layout] {} shares tube {}", role, tube));
            }
            Some(tube) => seen.push(tube),
            None => errors.push(format!("[layout] missing '{}'", role)),
        }
    }
}

fn validate_choices(config: &toml::Value, errors: &mut Vec<String>) {
    if let Some(bounds) = config
        .get("sync")
        .and_then(|s| s.get("bounds"))
        .and_then(|v| v.as_str())
    {
        if !["strict", "legacy"].contains(&bounds) {
            errors.push("[sync] bounds must be 'strict' or 'legacy'".to_string());
        }
    }

    if let Some(name) = config
        .get("radio")
        .and_then(|r| r.get("name"))
        .and_then(|v| v.as_str())
    {
        if name.is_empty() || name.len() > 20 {
            errors.push("[radio] name must be 1-20 bytes".to_string());
        }
    }

    if let Some(address) = config
        .get("rtc")
        .and_then(|r| r.get("i2c_address"))
        .and_then(|v| v.as_integer())
    {
        if !(0x08..=0x77).contains(&address) {
            errors.push("[rtc] i2c_address must be 0x08-0x77".to_string());
        }
    }
}
