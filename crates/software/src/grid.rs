//! Hardware-independent half of the scanner: per-key state, the tick counter, the set of sounding keys and the queue of
//! events awaiting a consumer.
//!
//! [`KeyGrid`] knows nothing about pins. It is handed the contact readings of one column at a time, which keeps the
//! timing-sensitive logic testable without hardware.

use crate::{
    active_keys::ActiveKeys,
    diagnostics::Diagnostics,
    event::KeyEvent,
    key_state::{Contacts, KeyState, Trigger},
    matrix::{ColIndex, KeyLocation, NUM_COLS, NUM_ROWS, RowIndex},
    queue::EventQueue,
    tick::Tick,
    velocity::velocity,
};

/// Latched state of every key, plus everything derived from it.
pub struct KeyGrid {
    keys: [[KeyState; NUM_ROWS]; NUM_COLS],
    tick: Tick,
    active: ActiveKeys,
    events: EventQueue,
    diagnostics: Diagnostics,
    debug_mode: bool,
}

impl Default for KeyGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyGrid {
    /// Constructs a [`KeyGrid`] with every key released and the tick at zero.
    pub fn new() -> Self {
        Self {
            keys: [[KeyState::Released; NUM_ROWS]; NUM_COLS],
            tick: Tick::ZERO,
            active: ActiveKeys::new(),
            events: EventQueue::new(),
            diagnostics: Diagnostics::default(),
            debug_mode: false,
        }
    }

    /// Runs one edge-detection/emission cycle for every row of `column`, given the contact readings of its rows.
    pub fn scan_column(&mut self, column: ColIndex, contacts: &[Contacts; NUM_ROWS]) {
        for row in RowIndex::all() {
            let key = KeyLocation::new(row, column);
            let cell = &mut self.keys[column.index()][row.index()];
            let (next, trigger) = cell.step(contacts[row.index()], self.tick);
            *cell = next;
            self.apply(key, next, trigger);
        }
    }

    /// Advances the tick counter; called once per full sweep of the columns.
    pub fn advance_tick(&mut self) {
        self.tick = self.tick.next();
    }

    /// Getter.
    pub fn tick(&self) -> Tick {
        self.tick
    }

    /// Returns the latched state of a key.
    pub fn key_state(&self, key: KeyLocation) -> KeyState {
        self.keys[key.column.index()][key.row.index()]
    }

    /// Returns the keys currently sounding.
    pub fn active_keys(&self) -> &ActiveKeys {
        &self.active
    }

    /// Getter.
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Returns `true` if at least one event is waiting to be popped.
    pub fn has_pending_event(&self) -> bool {
        self.events.has_event()
    }

    /// Removes and returns the oldest waiting event, if any.
    pub fn pop_event(&mut self) -> Option<KeyEvent> {
        self.events.pop()
    }

    /// Returns the oldest waiting event without removing it.
    pub fn peek_event(&self) -> Option<KeyEvent> {
        self.events.peek()
    }

    /// Getter.
    pub fn debug_mode(&self) -> bool {
        self.debug_mode
    }

    /// Toggles verbose logging of note events.
    pub fn set_debug_mode(&mut self, enabled: bool) {
        self.debug_mode = enabled;
    }

    fn apply(&mut self, key: KeyLocation, state: KeyState, trigger: Trigger) {
        if trigger.contains(Trigger::OutOfOrder) {
            self.diagnostics.record_out_of_order(key);
            warn!(
                "Failure to detect top contact. Location: row {}, column {}",
                u8::from(key.row),
                u8::from(key.column)
            );
        }
        if trigger.contains(Trigger::SoftTrigger) {
            self.diagnostics.record_soft_trigger();
        }
        // note-on is evaluated first so that a key which opens its top contact and closes its bottom contact within
        // the same cycle still ends up silent
        if trigger.contains(Trigger::NoteOn) {
            self.note_on(key, state);
        }
        if trigger.contains(Trigger::NoteOff) {
            self.note_off(key);
        }
    }

    fn note_on(&mut self, key: KeyLocation, state: KeyState) {
        let Some(interval) = state.strike_interval() else {
            return;
        };
        let Some(velocity) = velocity(interval) else {
            self.diagnostics.record_stale_press();
            if self.debug_mode {
                debug!(
                    "Stale press ignored: {} : {} after {} ticks",
                    u8::from(key.row),
                    u8::from(key.column),
                    interval
                );
            }
            return;
        };
        if self.active.contains(key) {
            return;
        }
        // every sounding key holds a slot for its eventual note-off, so a note-on needs room for both
        if self.events.len() + self.active.len() + 2 > self.events.capacity() {
            self.diagnostics.record_dropped_event();
            warn!(
                "Event queue full, dropping note-on for {} : {}",
                u8::from(key.row),
                u8::from(key.column)
            );
            return;
        }
        if !self.events.push(KeyEvent::NoteOn { key, velocity }) {
            self.diagnostics.record_dropped_event();
            return;
        }
        self.active.add(key);
        if self.debug_mode {
            info!(
                "Note ON: {} : {} : {}",
                u8::from(key.row),
                u8::from(key.column),
                u8::from(velocity)
            );
        }
    }

    fn note_off(&mut self, key: KeyLocation) {
        if !self.active.contains(key) {
            return;
        }
        // the key stays sounding until its note-off is queued
        if !self.events.push(KeyEvent::NoteOff { key }) {
            self.diagnostics.record_dropped_event();
            return;
        }
        self.active.remove(key);
        if self.debug_mode {
            info!(
                "Note OFF: {} : {}",
                u8::from(key.row),
                u8::from(key.column)
            );
        }
    }
}
