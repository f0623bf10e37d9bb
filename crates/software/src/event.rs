//! Note events emitted by the scanner.

use crate::matrix::KeyLocation;
use wmidi::Velocity;

/// A key which started or stopped sounding.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum KeyEvent {
    /// The key reached full travel.
    NoteOn {
        /// Which key.
        key: KeyLocation,
        /// How hard the key was struck, always at least 1.
        velocity: Velocity,
    },
    /// The key's top contact opened on release.
    NoteOff {
        /// Which key.
        key: KeyLocation,
    },
}

impl KeyEvent {
    /// Returns the location of the key the event concerns.
    pub fn key(&self) -> KeyLocation {
        match *self {
            Self::NoteOn { key, .. } | Self::NoteOff { key } => key,
        }
    }

    /// Returns the velocity as a plain integer, where 0 signals note-off and `1..=127` signals note-on.
    pub fn velocity(&self) -> u8 {
        match *self {
            Self::NoteOn { velocity, .. } => u8::from(velocity),
            Self::NoteOff { .. } => 0,
        }
    }

    /// Returns `true` for [`KeyEvent::NoteOn`].
    pub fn is_note_on(&self) -> bool {
        matches!(self, Self::NoteOn { .. })
    }
}

/// Flattens the event into a `(row, column, velocity)` triple, with a velocity of 0 for note-off.
impl From<KeyEvent> for (u8, u8, u8) {
    fn from(event: KeyEvent) -> Self {
        let key = event.key();
        (u8::from(key.row), u8::from(key.column), event.velocity())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for KeyEvent {
    fn format(&self, fmt: defmt::Formatter) {
        let key = self.key();
        match self {
            Self::NoteOn { velocity, .. } => defmt::write!(
                fmt,
                "NoteOn {{ row: {}, column: {}, velocity: {} }}",
                u8::from(key.row),
                u8::from(key.column),
                u8::from(*velocity)
            ),
            Self::NoteOff { .. } => defmt::write!(
                fmt,
                "NoteOff {{ row: {}, column: {} }}",
                u8::from(key.row),
                u8::from(key.column)
            ),
        }
    }
}
