//! Frame encoding and decoding for the coprocessor link.
//!
//! Frame format:
//! - START (1 byte): 0x7E synchronization byte
//! - KIND (1 byte): message kind identifier
//! - LENGTH (1 byte): payload length (0-20)
//! - PAYLOAD (0-20 bytes): kind-specific data
//! - CRC (1 byte): CRC-8 (poly 0x07, init 0x00) of KIND, LENGTH and PAYLOAD

use heapless::Vec;

/// Frame synchronization byte
pub const FRAME_START: u8 = 0x7E;

/// Maximum payload size in bytes
pub const MAX_PAYLOAD_SIZE: usize = 20;

/// Maximum complete frame size (START + KIND + LENGTH + MAX_PAYLOAD + CRC)
pub const MAX_FRAME_SIZE: usize = 1 + 1 + 1 + MAX_PAYLOAD_SIZE + 1;

const CRC_POLY: u8 = 0x07;

/// Errors that can occur during frame parsing or encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Payload exceeds maximum allowed size
    PayloadTooLarge,
    /// CRC mismatch
    InvalidCrc,
    /// Invalid frame structure or unknown kind
    InvalidFrame,
    /// Buffer too small for encoding
    BufferTooSmall,
}

/// Fold bytes into a CRC-8 (poly 0x07, MSB first)
pub fn crc8(mut crc: u8, bytes: &[u8]) -> u8 {
    for &byte in bytes {
        crc ^= byte;
        for _ in 0..8 {
            crc = if crc & 0x80 != 0 {
                (crc << 1) ^ CRC_POLY
            } else {
                crc << 1
            };
        }
    }
    crc
}

/// A parsed or constructed frame
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame {
    /// Message kind identifier
    pub kind: u8,
    /// Payload data
    pub payload: Vec<u8, MAX_PAYLOAD_SIZE>,
}

impl Frame {
    /// Create a new frame with the given kind and payload
    pub fn new(kind: u8, payload: &[u8]) -> Result<Self, FrameError> {
        let payload = Vec::from_slice(payload).map_err(|_| FrameError::PayloadTooLarge)?;
        Ok(Self { kind, payload })
    }

    /// Create a frame with no payload
    pub fn empty(kind: u8) -> Self {
        Self {
            kind,
            payload: Vec::new(),
        }
    }

    fn checksum(kind: u8, length: u8, payload: &[u8]) -> u8 {
        crc8(crc8(0, &[kind, length]), payload)
    }

    /// Encode this frame into a byte buffer
    ///
    /// Returns the number of bytes written
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, FrameError> {
        let len = self.payload.len();
        let frame_len = 4 + len; // START + KIND + LENGTH + payload + CRC
        if buffer.len() < frame_len {
            return Err(FrameError::BufferTooSmall);
        }

        // Payload capacity is MAX_PAYLOAD_SIZE, well below 256
        let length = len as u8;

        buffer[0] = FRAME_START;
        buffer[1] = self.kind;
        buffer[2] = length;
        buffer[3..3 + len].copy_from_slice(&self.payload);
        buffer[3 + len] = Self::checksum(self.kind, length, &self.payload);

        Ok(frame_len)
    }

    /// Encode this frame into a heapless Vec
    pub fn encode_to_vec(&self) -> Result<Vec<u8, MAX_FRAME_SIZE>, FrameError> {
        let mut buffer = [0u8; MAX_FRAME_SIZE];
        let len = self.encode(&mut buffer)?;
        Vec::from_slice(&buffer[..len]).map_err(|_| FrameError::BufferTooSmall)
    }
}

/// State machine for parsing incoming frames
///
/// After any error the parser is back to hunting for START, so a corrupted
/// or truncated frame costs at most the bytes up to the next START.
#[derive(Debug, Clone)]
pub struct FrameParser {
    state: ParseState,
    buffer: Vec<u8, MAX_PAYLOAD_SIZE>,
    kind: u8,
    expected_length: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    /// Waiting for START byte
    WaitingForStart,
    /// Got START, waiting for KIND
    WaitingForKind,
    /// Got KIND, waiting for LENGTH
    WaitingForLength,
    /// Reading payload bytes
    ReadingPayload,
    /// Waiting for CRC
    WaitingForCrc,
}

impl Default for FrameParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameParser {
    /// Create a new frame parser
    pub fn new() -> Self {
        Self {
            state: ParseState::WaitingForStart,
            buffer: Vec::new(),
            kind: 0,
            expected_length: 0,
        }
    }

    /// Reset the parser state
    pub fn reset(&mut self) {
        self.state = ParseState::WaitingForStart;
        self.buffer.clear();
        self.kind = 0;
        self.expected_length = 0;
    }

    /// Feed a single byte to the parser
    ///
    /// Returns `Ok(Some(frame))` when a complete valid frame is parsed,
    /// `Ok(None)` when more bytes are needed, or `Err` on parse error.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Frame>, FrameError> {
        match self.state {
            ParseState::WaitingForStart => {
                if byte == FRAME_START {
                    self.state = ParseState::WaitingForKind;
                }
                // Silently ignore non-START bytes while waiting
                Ok(None)
            }
            ParseState::WaitingForKind => {
                self.kind = byte;
                self.state = ParseState::WaitingForLength;
                Ok(None)
            }
            ParseState::WaitingForLength => {
                if usize::from(byte) > MAX_PAYLOAD_SIZE {
                    self.reset();
                    return Err(FrameError::PayloadTooLarge);
                }
                self.expected_length = byte;
                self.buffer.clear();
                self.state = if byte == 0 {
                    ParseState::WaitingForCrc
                } else {
                    ParseState::ReadingPayload
                };
                Ok(None)
            }
            ParseState::ReadingPayload => {
                // Cannot overflow: expected_length <= MAX_PAYLOAD_SIZE
                let _ = self.buffer.push(byte);
                if self.buffer.len() == usize::from(self.expected_length) {
                    self.state = ParseState::WaitingForCrc;
                }
                Ok(None)
            }
            ParseState::WaitingForCrc => {
                let expected = Frame::checksum(self.kind, self.expected_length, &self.buffer);
                if byte != expected {
                    self.reset();
                    return Err(FrameError::InvalidCrc);
                }

                let frame = Frame {
                    kind: self.kind,
                    payload: self.buffer.clone(),
                };
                self.reset();
                Ok(Some(frame))
            }
        }
    }

    /// Feed multiple bytes to the parser
    ///
    /// Returns the first complete frame found, if any.
    /// Remaining bytes after a complete frame are not consumed.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> Result<Option<Frame>, FrameError> {
        for &byte in bytes {
            if let Some(frame) = self.feed(byte)? {
                return Ok(Some(frame));
            }
        }
        Ok(None)
    }
}
