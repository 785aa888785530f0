//! Clock configuration
//!
//! Board wiring, render timing and sync policy, read from `clock.toml`
//! with a small no_std TOML parser.

pub mod toml;
pub mod types;

pub use toml::{parse_config, ParseError};
pub use types::*;
