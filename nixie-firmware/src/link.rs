//! Characteristic backed by the coprocessor link
//!
//! Set-value and notify become [`ControllerCommand`]s queued for the TX
//! task. Queuing never blocks, so the sync handler stays synchronous.

use nixie_core::traits::{Characteristic, GattError};
use nixie_protocol::ControllerCommand;

use crate::channels::OutboundChannel;

/// The clock's time characteristic, as seen from the controller
pub struct LinkCharacteristic {
    outbound: &'static OutboundChannel,
}

impl LinkCharacteristic {
    pub fn new(outbound: &'static OutboundChannel) -> Self {
        Self { outbound }
    }

    fn queue(&self, command: ControllerCommand) -> Result<(), GattError> {
        self.outbound
            .try_send(command)
            .map_err(|_| GattError::QueueFull)
    }
}

impl Characteristic for LinkCharacteristic {
    fn set_value(&mut self, value: &[u8]) -> Result<(), GattError> {
        let command = ControllerCommand::set_value(value).map_err(|_| GattError::ValueTooLong)?;
        self.queue(command)
    }

    fn notify(&mut self) -> Result<(), GattError> {
        self.queue(ControllerCommand::Notify)
    }
}
