//! Counters describing anomalies the scanner observed. None of them change scanning behavior.

use crate::matrix::KeyLocation;

/// Tallies of unusual events seen while scanning. Counters saturate rather than wrap.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Diagnostics {
    /// Bottom contacts which closed while the top contact of the same key was open.
    pub out_of_order: u32,
    /// The key most recently counted in [`out_of_order`][Self::out_of_order].
    pub last_out_of_order: Option<KeyLocation>,
    /// Note-ons discarded because the strike interval was too long to yield a velocity.
    pub stale_presses: u32,
    /// Note-ons synthesized because a top contact stayed closed without the bottom contact following.
    pub soft_triggers: u32,
    /// Events discarded because the event queue was full.
    pub dropped_events: u32,
}

impl Diagnostics {
    pub(crate) fn record_out_of_order(&mut self, key: KeyLocation) {
        self.out_of_order = self.out_of_order.saturating_add(1);
        self.last_out_of_order = Some(key);
    }

    pub(crate) fn record_stale_press(&mut self) {
        self.stale_presses = self.stale_presses.saturating_add(1);
    }

    pub(crate) fn record_soft_trigger(&mut self) {
        self.soft_triggers = self.soft_triggers.saturating_add(1);
    }

    pub(crate) fn record_dropped_event(&mut self) {
        self.dropped_events = self.dropped_events.saturating_add(1);
    }
}
