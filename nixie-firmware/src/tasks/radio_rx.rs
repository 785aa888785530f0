//! Radio UART receive task
//!
//! Receives frames from the coprocessor and forwards peer events.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embedded_io_async::Read;

use nixie_protocol::{FrameParser, RadioEvent};

use crate::channels::RADIO_EVENTS;

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 64;

/// Radio RX task - receives and parses frames from the coprocessor
#[embassy_executor::task]
pub async fn radio_rx_task(mut rx: BufferedUartRx) {
    info!("Radio RX task started");

    let mut parser = FrameParser::new();
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                trace!("RX: {} bytes", n);

                for &byte in &buf[..n] {
                    match parser.feed(byte) {
                        Ok(Some(frame)) => match RadioEvent::from_frame(&frame) {
                            Ok(event) => forward(event),
                            Err(e) => {
                                warn!("Unknown radio message 0x{:02x}: {}", frame.kind, e);
                            }
                        },
                        Ok(None) => {}
                        Err(e) => {
                            // Parser is already hunting for the next START
                            warn!("Frame parse error: {}", e);
                        }
                    }
                }
            }
            Ok(_) => {}
            Err(e) => {
                warn!("UART read error: {:?}", e);
            }
        }
    }
}

fn forward(event: RadioEvent) {
    trace!("Radio event: {}", event);
    if RADIO_EVENTS.try_send(event).is_err() {
        warn!("Radio event channel full, dropping event");
    }
}
