//! Radio coprocessor link protocol
//!
//! This crate defines the UART protocol between the clock controller and
//! the BLE coprocessor that hosts the time characteristic. The coprocessor
//! owns the radio stack and forwards GATT activity; the controller owns
//! the clock and answers through commands.
//!
//! # Protocol Overview
//!
//! All messages use a simple binary frame format:
//! ```text
//! ┌───────┬──────┬────────┬─────────────┬───────┐
//! │ START │ KIND │ LENGTH │ PAYLOAD     │ CRC-8 │
//! │ 1B    │ 1B   │ 1B     │ 0–20B       │ 1B    │
//! └───────┴──────┴────────┴─────────────┴───────┘
//! ```
//!
//! The 20-byte payload cap is the default ATT value size, so one
//! characteristic value always fits one frame.

#![no_std]
#![deny(unsafe_code)]

pub mod frame;
pub mod messages;

pub use frame::{crc8, Frame, FrameError, FrameParser, FRAME_START, MAX_FRAME_SIZE, MAX_PAYLOAD_SIZE};
pub use messages::{ControllerCommand, RadioEvent, Value};
