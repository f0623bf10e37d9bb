//! The dual-contact state machine tracked for every key in the matrix.
//!
//! Each key has a shallow "top" contact which closes early in its travel and a "bottom" contact which closes at full
//! depression. Which contacts are closed, and the [`Tick`] at which each closed, is captured by [`KeyState`]. Feeding a
//! fresh [`Contacts`] reading through [`KeyState::step`] yields the next state along with the [`Trigger`]s the caller
//! must act upon.
//!
//! Note-on is gated on the bottom contact (full travel) whereas note-off is gated on the top contact opening, since a
//! released key rises through the shallow contact first. This gives a release signal that is unaffected by bottom
//! contact bounce, while velocity is measured between the two depths.

use crate::{
    tick::{Tick, wraparound_delta},
    velocity::SOFT_TRIGGER_INTERVAL,
};
use bitmask_enum::bitmask;

/// A raw reading of both contacts of a key, where `true` means the contact is closed.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Contacts {
    /// The contact which closes early in the key's travel.
    pub top: bool,
    /// The contact which closes at full depression.
    pub bottom: bool,
}

impl Contacts {
    /// Both contacts open, i.e., a key at rest.
    pub const OPEN: Self = Self {
        top: false,
        bottom: false,
    };

    /// Constructs a [`Contacts`] reading.
    pub const fn new(top: bool, bottom: bool) -> Self {
        Self { top, bottom }
    }
}

/// Actions requested by a state transition.
#[bitmask(u8)]
pub enum Trigger {
    /// The bottom contact closed (or was presumed closed); a note-on should be considered.
    NoteOn,
    /// The top contact opened; a note-off should be considered.
    NoteOff,
    /// The bottom contact closed while the top contact was open, which a correctly wired key cannot do.
    OutOfOrder,
    /// The note-on was synthesized because the top contact has been closed for [`SOFT_TRIGGER_INTERVAL`] ticks.
    SoftTrigger,
}

/// Which contacts of a key are closed and when they closed.
///
/// | state        | top    | bottom |
/// |--------------|--------|--------|
/// | `Released`   | open   | open   |
/// | `Travelling` | closed | open   |
/// | `Struck`     | closed | closed |
/// | `BottomOnly` | open   | closed |
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyState {
    /// The key is at rest.
    #[default]
    Released,
    /// The key is on its way down: the top contact has closed but the bottom has not.
    Travelling {
        /// When the top contact closed.
        top: Tick,
    },
    /// The key is fully depressed.
    Struck {
        /// When the top contact closed.
        top: Tick,
        /// When the bottom contact closed, or when the key was soft-triggered.
        bottom: Tick,
    },
    /// Only the bottom contact is closed. Seen when a top contact fails, or when a key bounces on its way back up.
    BottomOnly {
        /// When the bottom contact closed.
        bottom: Tick,
    },
}

impl KeyState {
    /// Advances the state machine given the latest contact reading taken at `now`.
    ///
    /// Transitions, where `T` is the closure tick carried over and `now` the current tick:
    ///
    /// | from             | top | bottom | to                     | triggers                       |
    /// |------------------|-----|--------|------------------------|--------------------------------|
    /// | `Released`       | -   | -      | `Released`             |                                |
    /// | `Released`       | on  | -      | `Travelling(now)`      |                                |
    /// | `Released`       | -   | on     | `BottomOnly(now)`      | NoteOn, OutOfOrder             |
    /// | `Released`       | on  | on     | `Struck(now, now)`     | NoteOn                         |
    /// | `Travelling(T)`  | -   | -      | `Released`             | NoteOff                        |
    /// | `Travelling(T)`  | on  | -      | `Travelling(T)`        |                                |
    /// | `Travelling(T)`  | -   | on     | `BottomOnly(now)`      | NoteOff, NoteOn, OutOfOrder    |
    /// | `Travelling(T)`  | on  | on     | `Struck(T, now)`       | NoteOn                         |
    /// | `Struck(T, B)`   | -   | -      | `Released`             | NoteOff                        |
    /// | `Struck(T, B)`   | on  | -      | `Travelling(T)`        |                                |
    /// | `Struck(T, B)`   | -   | on     | `BottomOnly(B)`        | NoteOff                        |
    /// | `Struck(T, B)`   | on  | on     | `Struck(T, B)`         |                                |
    /// | `BottomOnly(B)`  | -   | -      | `Released`             |                                |
    /// | `BottomOnly(B)`  | on  | -      | `Travelling(now)`      |                                |
    /// | `BottomOnly(B)`  | -   | on     | `BottomOnly(B)`        |                                |
    /// | `BottomOnly(B)`  | on  | on     | `Struck(now, B)`       |                                |
    ///
    /// Finally, a key left in `Travelling(T)` for exactly [`SOFT_TRIGGER_INTERVAL`] ticks becomes `Struck(T, now)` and
    /// raises `NoteOn | SoftTrigger`.
    pub fn step(self, contacts: Contacts, now: Tick) -> (Self, Trigger) {
        use KeyState::*;

        let (next, trigger) = match (self, contacts.top, contacts.bottom) {
            (Released, false, false) => (Released, Trigger::none()),
            (Released, true, false) => (Travelling { top: now }, Trigger::none()),
            (Released, false, true) => (
                BottomOnly { bottom: now },
                Trigger::NoteOn | Trigger::OutOfOrder,
            ),
            (Released, true, true) => (
                Struck {
                    top: now,
                    bottom: now,
                },
                Trigger::NoteOn,
            ),

            (Travelling { .. }, false, false) => (Released, Trigger::NoteOff),
            (Travelling { top }, true, false) => (Travelling { top }, Trigger::none()),
            (Travelling { .. }, false, true) => (
                BottomOnly { bottom: now },
                Trigger::NoteOff | Trigger::NoteOn | Trigger::OutOfOrder,
            ),
            (Travelling { top }, true, true) => (Struck { top, bottom: now }, Trigger::NoteOn),

            (Struck { .. }, false, false) => (Released, Trigger::NoteOff),
            (Struck { top, .. }, true, false) => (Travelling { top }, Trigger::none()),
            (Struck { bottom, .. }, false, true) => (BottomOnly { bottom }, Trigger::NoteOff),
            (Struck { top, bottom }, true, true) => (Struck { top, bottom }, Trigger::none()),

            (BottomOnly { .. }, false, false) => (Released, Trigger::none()),
            (BottomOnly { .. }, true, false) => (Travelling { top: now }, Trigger::none()),
            (BottomOnly { bottom }, false, true) => (BottomOnly { bottom }, Trigger::none()),
            (BottomOnly { bottom }, true, true) => (Struck { top: now, bottom }, Trigger::none()),
        };

        match next {
            Travelling { top } if wraparound_delta(top, now) == SOFT_TRIGGER_INTERVAL => (
                Struck { top, bottom: now },
                trigger | Trigger::NoteOn | Trigger::SoftTrigger,
            ),
            _ => (next, trigger),
        }
    }

    /// Returns the tick at which the top contact closed, if it is closed.
    pub const fn top(self) -> Option<Tick> {
        match self {
            Self::Travelling { top } | Self::Struck { top, .. } => Some(top),
            Self::Released | Self::BottomOnly { .. } => None,
        }
    }

    /// Returns the tick at which the bottom contact closed, if it is closed.
    pub const fn bottom(self) -> Option<Tick> {
        match self {
            Self::Struck { bottom, .. } | Self::BottomOnly { bottom } => Some(bottom),
            Self::Released | Self::Travelling { .. } => None,
        }
    }

    /// Returns the number of ticks between the top and bottom contact closures, or `None` while the bottom contact is
    /// open.
    ///
    /// A `BottomOnly` key is measured as though its top contact had closed on the tick before zero, so its interval is
    /// one more than the bottom closure tick. Such a key therefore only sounds if it closes within the first few ticks
    /// after the counter starts or wraps.
    pub const fn strike_interval(self) -> Option<u16> {
        match self {
            Self::Struck { top, bottom } => Some(wraparound_delta(top, bottom)),
            Self::BottomOnly { bottom } => Some(bottom.value() + 1),
            Self::Released | Self::Travelling { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NONE: Contacts = Contacts::new(false, false);
    const TOP: Contacts = Contacts::new(true, false);
    const BOTTOM: Contacts = Contacts::new(false, true);
    const BOTH: Contacts = Contacts::new(true, true);

    fn t(value: u16) -> Tick {
        Tick::from_u16_lossy(value)
    }

    #[test]
    fn released_transitions() {
        let now = t(7);
        assert_eq!(
            (KeyState::Released, Trigger::none()),
            KeyState::Released.step(NONE, now),
            "Expected left but got right"
        );
        assert_eq!(
            (KeyState::Travelling { top: now }, Trigger::none()),
            KeyState::Released.step(TOP, now),
            "Expected left but got right"
        );
        assert_eq!(
            (
                KeyState::BottomOnly { bottom: now },
                Trigger::NoteOn | Trigger::OutOfOrder
            ),
            KeyState::Released.step(BOTTOM, now),
            "Expected left but got right"
        );
        assert_eq!(
            (
                KeyState::Struck {
                    top: now,
                    bottom: now
                },
                Trigger::NoteOn
            ),
            KeyState::Released.step(BOTH, now),
            "Expected left but got right"
        );
    }

    #[test]
    fn travelling_transitions() {
        let state = KeyState::Travelling { top: t(3) };
        let now = t(13);
        assert_eq!(
            (KeyState::Released, Trigger::NoteOff),
            state.step(NONE, now),
            "Expected left but got right"
        );
        assert_eq!(
            (state, Trigger::none()),
            state.step(TOP, now),
            "Expected left but got right"
        );
        assert_eq!(
            (
                KeyState::BottomOnly { bottom: now },
                Trigger::NoteOff | Trigger::NoteOn | Trigger::OutOfOrder
            ),
            state.step(BOTTOM, now),
            "Expected left but got right"
        );
        assert_eq!(
            (
                KeyState::Struck {
                    top: t(3),
                    bottom: now
                },
                Trigger::NoteOn
            ),
            state.step(BOTH, now),
            "Expected left but got right"
        );
    }

    #[test]
    fn struck_transitions() {
        let state = KeyState::Struck {
            top: t(3),
            bottom: t(9),
        };
        let now = t(20);
        assert_eq!(
            (KeyState::Released, Trigger::NoteOff),
            state.step(NONE, now),
            "Expected left but got right"
        );
        assert_eq!(
            (KeyState::Travelling { top: t(3) }, Trigger::none()),
            state.step(TOP, now),
            "Expected left but got right"
        );
        assert_eq!(
            (KeyState::BottomOnly { bottom: t(9) }, Trigger::NoteOff),
            state.step(BOTTOM, now),
            "Expected left but got right"
        );
        assert_eq!(
            (state, Trigger::none()),
            state.step(BOTH, now),
            "Expected left but got right"
        );
    }

    #[test]
    fn bottom_only_transitions() {
        let state = KeyState::BottomOnly { bottom: t(4) };
        let now = t(6);
        assert_eq!(
            (KeyState::Released, Trigger::none()),
            state.step(NONE, now),
            "Expected left but got right"
        );
        assert_eq!(
            (KeyState::Travelling { top: now }, Trigger::none()),
            state.step(TOP, now),
            "Expected left but got right"
        );
        assert_eq!(
            (state, Trigger::none()),
            state.step(BOTTOM, now),
            "Expected left but got right"
        );
        assert_eq!(
            (
                KeyState::Struck {
                    top: now,
                    bottom: t(4)
                },
                Trigger::none()
            ),
            state.step(BOTH, now),
            "Expected left but got right"
        );
    }

    #[test]
    fn soft_trigger_fires_at_exactly_127_ticks() {
        let state = KeyState::Travelling { top: t(100) };
        assert_eq!(
            (state, Trigger::none()),
            state.step(TOP, t(226)),
            "Should not fire before 127 ticks; expected left but got right"
        );
        assert_eq!(
            (
                KeyState::Struck {
                    top: t(100),
                    bottom: t(227)
                },
                Trigger::NoteOn | Trigger::SoftTrigger
            ),
            state.step(TOP, t(227)),
            "Expected left but got right"
        );
        assert_eq!(
            (state, Trigger::none()),
            state.step(TOP, t(228)),
            "Should not fire after 127 ticks; expected left but got right"
        );
    }

    #[test]
    fn soft_trigger_across_wrap() {
        let state = KeyState::Travelling { top: t(32700) };
        let (next, trigger) = state.step(TOP, t(60));
        assert!(trigger.contains(Trigger::SoftTrigger), "Should soft-trigger");
        assert_eq!(Some(127), next.strike_interval(), "Expected left but got right");
    }

    #[test]
    fn soft_trigger_after_bottom_bounce() {
        // the bottom contact opening leaves the key travelling, where the soft trigger still applies
        let state = KeyState::Struck {
            top: t(0),
            bottom: t(5),
        };
        let (next, trigger) = state.step(TOP, t(127));
        assert_eq!(
            KeyState::Struck {
                top: t(0),
                bottom: t(127)
            },
            next,
            "Expected left but got right"
        );
        assert_eq!(
            Trigger::NoteOn | Trigger::SoftTrigger,
            trigger,
            "Expected left but got right"
        );
    }

    #[test]
    fn accessors() {
        let state = KeyState::Struck {
            top: t(1),
            bottom: t(2),
        };
        assert_eq!(Some(t(1)), state.top(), "Expected left but got right");
        assert_eq!(Some(t(2)), state.bottom(), "Expected left but got right");
        assert_eq!(None, KeyState::Released.top(), "Expected left but got right");
        assert_eq!(None, KeyState::Travelling { top: t(1) }.bottom(), "Expected left but got right");
    }

    #[test]
    fn strike_intervals() {
        assert_eq!(None, KeyState::Released.strike_interval(), "Expected left but got right");
        assert_eq!(
            None,
            KeyState::Travelling { top: t(1) }.strike_interval(),
            "Expected left but got right"
        );
        assert_eq!(
            Some(12),
            KeyState::Struck {
                top: t(32760),
                bottom: t(5)
            }
            .strike_interval(),
            "Expected left but got right"
        );
        assert_eq!(
            Some(1),
            KeyState::BottomOnly { bottom: t(0) }.strike_interval(),
            "Open top should count as the tick before zero; expected left but got right"
        );
    }
}
