//! Converts the interval between a key's top and bottom contact closures into a MIDI-style velocity.

use wmidi::{U7, Velocity};

/// Strike intervals at or beyond this many ticks are too slow to be meaningful and produce no note.
pub const STALE_INTERVAL: u16 = 128;

/// A key whose top contact has been closed this many ticks without the bottom contact closing is treated as if the
/// bottom contact had closed, i.e., it is soft-triggered at the slowest legal velocity.
pub const SOFT_TRIGGER_INTERVAL: u16 = 127;

/// Returns the velocity for a strike interval, or `None` if the interval is stale.
///
/// Shorter intervals (faster strikes) produce higher velocities. The result is never zero, since a zero velocity would
/// read as a note-off downstream.
pub fn velocity(interval: u16) -> Option<Velocity> {
    (interval < STALE_INTERVAL).then(|| {
        // interval < 128, so it fits in a u8
        let velocity = 127_u8.saturating_sub(interval as u8).max(1);
        U7::from_u8_lossy(velocity)
    })
}
