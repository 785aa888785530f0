//! Message types for the coprocessor link
//!
//! Message kinds are divided into two categories:
//! - Coprocessor → Controller: GATT activity from remote peers
//! - Controller → Coprocessor: advertising and characteristic updates

use crate::frame::{Frame, FrameError, MAX_PAYLOAD_SIZE};
use heapless::Vec;

// Message kinds: Coprocessor → Controller
pub const MSG_CONNECTED: u8 = 0x01;
pub const MSG_DISCONNECTED: u8 = 0x02;
pub const MSG_WRITE: u8 = 0x03;
pub const MSG_READ_REQUEST: u8 = 0x04;

// Message kinds: Controller → Coprocessor
pub const MSG_ADVERTISE: u8 = 0x20;
pub const MSG_SET_VALUE: u8 = 0x21;
pub const MSG_NOTIFY: u8 = 0x22;

/// A characteristic value or device name, at most one frame payload
pub type Value = Vec<u8, MAX_PAYLOAD_SIZE>;

/// Events from the coprocessor on behalf of a remote peer
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RadioEvent {
    /// A peer connected
    Connected,
    /// The peer disconnected
    Disconnected,
    /// The peer wrote the characteristic
    Write(Value),
    /// The peer read the characteristic; the value must be refreshed
    ReadRequest,
}

impl RadioEvent {
    /// Parse an event from a frame
    pub fn from_frame(frame: &Frame) -> Result<Self, FrameError> {
        match frame.kind {
            MSG_CONNECTED => expect_empty(frame, RadioEvent::Connected),
            MSG_DISCONNECTED => expect_empty(frame, RadioEvent::Disconnected),
            // An empty write is valid on the air; the sync handler rejects it
            MSG_WRITE => Ok(RadioEvent::Write(frame.payload.clone())),
            MSG_READ_REQUEST => expect_empty(frame, RadioEvent::ReadRequest),
            _ => Err(FrameError::InvalidFrame),
        }
    }

    /// Encode this event into a frame (for testing or simulation)
    pub fn to_frame(&self) -> Result<Frame, FrameError> {
        match self {
            RadioEvent::Connected => Ok(Frame::empty(MSG_CONNECTED)),
            RadioEvent::Disconnected => Ok(Frame::empty(MSG_DISCONNECTED)),
            RadioEvent::Write(value) => Frame::new(MSG_WRITE, value),
            RadioEvent::ReadRequest => Ok(Frame::empty(MSG_READ_REQUEST)),
        }
    }
}

/// Commands from the controller to the coprocessor
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControllerCommand {
    /// Start advertising under this name
    Advertise(Value),
    /// Replace the characteristic value
    SetValue(Value),
    /// Notify subscribers of the current value
    Notify,
}

impl ControllerCommand {
    /// Advertise command for a device name
    pub fn advertise(name: &str) -> Result<Self, FrameError> {
        Ok(ControllerCommand::Advertise(to_value(name.as_bytes())?))
    }

    /// Set-value command
    pub fn set_value(value: &[u8]) -> Result<Self, FrameError> {
        Ok(ControllerCommand::SetValue(to_value(value)?))
    }

    /// Encode this command into a frame
    pub fn to_frame(&self) -> Result<Frame, FrameError> {
        match self {
            ControllerCommand::Advertise(name) => Frame::new(MSG_ADVERTISE, name),
            ControllerCommand::SetValue(value) => Frame::new(MSG_SET_VALUE, value),
            ControllerCommand::Notify => Ok(Frame::empty(MSG_NOTIFY)),
        }
    }

    /// Parse a command from a frame (coprocessor side, tests)
    pub fn from_frame(frame: &Frame) -> Result<Self, FrameError> {
        match frame.kind {
            MSG_ADVERTISE if frame.payload.is_empty() => Err(FrameError::InvalidFrame),
            MSG_ADVERTISE => Ok(ControllerCommand::Advertise(frame.payload.clone())),
            MSG_SET_VALUE => Ok(ControllerCommand::SetValue(frame.payload.clone())),
            MSG_NOTIFY => expect_empty(frame, ControllerCommand::Notify),
            _ => Err(FrameError::InvalidFrame),
        }
    }
}

fn to_value(bytes: &[u8]) -> Result<Value, FrameError> {
    Vec::from_slice(bytes).map_err(|_| FrameError::PayloadTooLarge)
}

fn expect_empty<T>(frame: &Frame, message: T) -> Result<T, FrameError> {
    if frame.payload.is_empty() {
        Ok(message)
    } else {
        Err(FrameError::InvalidFrame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{FrameParser, FRAME_START};

    #[test]
    fn test_radio_event_write() {
        let frame = Frame::new(MSG_WRITE, b"07:30").unwrap();
        let event = RadioEvent::from_frame(&frame).unwrap();

        match &event {
            RadioEvent::Write(value) => assert_eq!(&value[..], b"07:30"),
            other => panic!("Wrong event: {:?}", other),
        }
        assert_eq!(event.to_frame().unwrap(), frame);
    }

    #[test]
    fn test_radio_event_signals() {
        assert_eq!(
            RadioEvent::from_frame(&Frame::empty(MSG_CONNECTED)),
            Ok(RadioEvent::Connected)
        );
        assert_eq!(
            RadioEvent::from_frame(&Frame::empty(MSG_DISCONNECTED)),
            Ok(RadioEvent::Disconnected)
        );
        assert_eq!(
            RadioEvent::from_frame(&Frame::empty(MSG_READ_REQUEST)),
            Ok(RadioEvent::ReadRequest)
        );
    }

    #[test]
    fn test_radio_event_rejects() {
        // Signals carry no payload
        let frame = Frame::new(MSG_CONNECTED, &[1]).unwrap();
        assert_eq!(RadioEvent::from_frame(&frame), Err(FrameError::InvalidFrame));

        // Controller kinds are not events
        assert_eq!(
            RadioEvent::from_frame(&Frame::empty(MSG_NOTIFY)),
            Err(FrameError::InvalidFrame)
        );
    }

    #[test]
    fn test_advertise_name() {
        let cmd = ControllerCommand::advertise("Nixie-clock").unwrap();
        let frame = cmd.to_frame().unwrap();
        assert_eq!(frame.kind, MSG_ADVERTISE);
        assert_eq!(&frame.payload[..], b"Nixie-clock");

        assert_eq!(
            ControllerCommand::advertise("a name longer than twenty"),
            Err(FrameError::PayloadTooLarge)
        );
        assert_eq!(
            ControllerCommand::from_frame(&Frame::empty(MSG_ADVERTISE)),
            Err(FrameError::InvalidFrame)
        );
    }

    #[test]
    fn test_set_value_and_notify_on_the_wire() {
        let mut wire = Vec::<u8, 64>::new();
        for cmd in [
            ControllerCommand::set_value(b"14:07").unwrap(),
            ControllerCommand::Notify,
        ] {
            let encoded = cmd.to_frame().unwrap().encode_to_vec().unwrap();
            wire.extend_from_slice(&encoded).unwrap();
        }

        assert_eq!(wire[0], FRAME_START);
        assert_eq!(wire[1], MSG_SET_VALUE);

        let mut parser = FrameParser::new();
        let mut commands = Vec::<ControllerCommand, 2>::new();
        for &byte in wire.iter() {
            if let Some(frame) = parser.feed(byte).unwrap() {
                commands
                    .push(ControllerCommand::from_frame(&frame).unwrap())
                    .unwrap();
            }
        }

        assert_eq!(
            &commands[..],
            &[
                ControllerCommand::SetValue(Vec::from_slice(b"14:07").unwrap()),
                ControllerCommand::Notify,
            ]
        );
    }
}
