//! Tube render task
//!
//! Runs the optional boot sweep, then rewrites all four tubes from one RTC
//! snapshot every render period.

use defmt::*;
use embassy_time::{Duration, Ticker, Timer};

use nixie_core::display::{RenderLoop, SweepTest, TimeDigits};
use nixie_core::traits::TubeDisplay;

use crate::{ClockSource, Tubes};

/// Render task parameters, resolved from the configuration
pub struct RenderSettings {
    pub render: RenderLoop,
    pub period: Duration,
    /// Bench sweep run once before the clock starts, and its step time
    pub sweep: Option<(SweepTest, Duration)>,
}

/// Render task - drives the tube multiplexers
#[embassy_executor::task]
pub async fn render_task(source: &'static ClockSource, mut tubes: Tubes, settings: RenderSettings) {
    info!("Render task started");

    if let Some((sweep, step)) = settings.sweep {
        run_sweep(&mut tubes, sweep, step).await;
    }

    let mut ticker = Ticker::every(settings.period);
    let mut shown: Option<TimeDigits> = None;

    loop {
        match settings.render.tick(source, &mut tubes) {
            Ok(digits) => {
                if shown != Some(digits) {
                    debug!("Showing {}", digits);
                    shown = Some(digits);
                }
            }
            Err(e) => {
                // Tubes keep the last good time
                warn!("RTC read failed: {}", e);
            }
        }

        ticker.next().await;
    }
}

/// Cycle every tube through 0-9 for the configured number of passes
async fn run_sweep(tubes: &mut Tubes, sweep: SweepTest, step: Duration) {
    info!("Sweep test: {} steps", sweep.remaining());

    for digit in sweep {
        tubes.set_all(digit);
        Timer::after(step).await;
    }

    info!("Sweep test done, entering clock mode");
}
