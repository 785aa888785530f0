//! Push-pull output over embassy-rp

use embassy_rp::gpio::Output;
use nixie_hal::OutputPin;

/// RP2040 output line
pub struct RpOutput {
    pin: Output<'static>,
}

impl RpOutput {
    pub fn new(pin: Output<'static>) -> Self {
        Self { pin }
    }
}

impl OutputPin for RpOutput {
    fn set_high(&mut self) {
        self.pin.set_high();
    }

    fn set_low(&mut self) {
        self.pin.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.pin.is_set_high()
    }
}
