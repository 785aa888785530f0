//! Radio UART transmit task
//!
//! Encodes queued controller commands and writes them to the coprocessor.

use defmt::*;
use embassy_rp::uart::BufferedUartTx;
use embedded_io_async::Write;

use nixie_protocol::{ControllerCommand, MAX_FRAME_SIZE};

use crate::channels::OUTBOUND;

/// Radio TX task - drains the outbound channel
#[embassy_executor::task]
pub async fn radio_tx_task(mut tx: BufferedUartTx) {
    info!("Radio TX task started");

    loop {
        let command = OUTBOUND.receive().await;
        send(&mut tx, &command).await;
    }
}

async fn send(tx: &mut BufferedUartTx, command: &ControllerCommand) {
    let frame = match command.to_frame() {
        Ok(frame) => frame,
        Err(e) => {
            warn!("Failed to frame {}: {}", command, e);
            return;
        }
    };

    let mut buf = [0u8; MAX_FRAME_SIZE];
    match frame.encode(&mut buf) {
        Ok(len) => {
            if let Err(e) = tx.write_all(&buf[..len]).await {
                warn!("Failed to send {}: {:?}", command, e);
            } else {
                trace!("Sent {}", command);
            }
        }
        Err(e) => warn!("Failed to encode {}: {}", command, e),
    }
}
