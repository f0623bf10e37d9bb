//! Paces the scanner and forwards what it produces.

use crate::{DiagnosticsSender, EventSender, board::BoardScanner};
use defmt::*;
use embassy_time::{Duration, Ticker};
use velocity_keyscan_lib::encoder::Knob;

/// Time between scan steps. Every key is visited once per [`velocity_keyscan_lib::matrix::NUM_COLS`] steps, so a
/// full sweep, and one tick of the velocity clock, takes 1ms.
const SCAN_PERIOD: Duration = Duration::from_micros(100);

/// Task responsible for scanning the matrix and polling the encoders.
///
/// Button 1 toggles debug mode; button 2 and encoder movement are only logged, and only while debug mode is on.
#[embassy_executor::task]
pub async fn scan(
    mut scanner: BoardScanner,
    events: EventSender<'static>,
    diagnostics: DiagnosticsSender<'static>,
) -> ! {
    let mut ticker = Ticker::every(SCAN_PERIOD);
    let mut published = *scanner.diagnostics();
    diagnostics.send(published);

    loop {
        ticker.next().await;

        if let Err(e) = scanner.scan_step() {
            error!("Scan step failed: {}", e);
        }

        // whatever doesn't fit in the channel waits in the scanner's queue for the next period
        scanner.forward_events(|event| events.try_send(event));

        if scanner.button_pressed(Knob::One) {
            let enabled = !scanner.debug_mode();
            scanner.set_debug_mode(enabled);
            info!("Debug mode {}", if enabled { "on" } else { "off" });
        }
        scanner.button_pressed(Knob::Two);
        scanner.encoder_delta(Knob::One);
        scanner.encoder_delta(Knob::Two);

        if *scanner.diagnostics() != published {
            published = *scanner.diagnostics();
            diagnostics.send(published);
        }
    }
}
