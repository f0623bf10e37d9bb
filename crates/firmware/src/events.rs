//! Consumes what the scan task produces. A MIDI or other transport would attach here; for now everything is logged.

use crate::{DiagnosticsReceiver, EventReceiver};
use defmt::*;
use embassy_futures::select::{Either, select};

/// Task responsible for reporting note events and changes to the scanner's diagnostics.
#[embassy_executor::task]
pub async fn events(
    events: EventReceiver<'static>,
    mut diagnostics: DiagnosticsReceiver<'static>,
) -> ! {
    loop {
        match select(events.receive(), diagnostics.changed()).await {
            Either::First(event) => {
                let (row, column, velocity): (u8, u8, u8) = event.into();
                info!("Key event: row {}, column {}, velocity {}", row, column, velocity);
            }
            Either::Second(d) => {
                if d.out_of_order > 0 || d.dropped_events > 0 {
                    warn!("Scanner diagnostics: {}", d);
                } else {
                    debug!("Scanner diagnostics: {}", d);
                }
            }
        }
    }
}
