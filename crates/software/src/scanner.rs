//! The complete scanner: column driver, row inputs, [`KeyGrid`] and the two encoders, advanced one column per call to
//! [`KeyScan::scan_step`].
//!
//! A host is expected to call [`KeyScan::initialize`] once and then [`KeyScan::scan_step`] on a fixed period, draining
//! events between calls. Everything is owned by the [`KeyScan`] instance, so nothing here is global.

use crate::{
    column::ColumnDriver,
    diagnostics::Diagnostics,
    encoder::{DebouncedButton, Encoder, Knob, QuadratureCounter},
    error::{Contact, ScanError},
    event::KeyEvent,
    grid::KeyGrid,
    key_state::Contacts,
    matrix::{ColIndex, NUM_COLS, NUM_ROWS, RowIndex},
    tick::Tick,
};
use embedded_hal::digital::{InputPin, OutputPin};

/// Scans a dual-contact velocity keyboard matrix and tracks two push-button rotary encoders.
///
/// Column lines are active high. Row lines read high while the contact at the energized column is closed.
pub struct KeyScan<O, I, Q, B> {
    grid: KeyGrid,
    columns: ColumnDriver<O>,
    top_rows: [I; NUM_ROWS],
    bottom_rows: [I; NUM_ROWS],
    encoders: [Encoder<Q, B>; 2],
}

impl<O, I, Q, B> KeyScan<O, I, Q, B>
where
    O: OutputPin,
    I: InputPin,
    Q: QuadratureCounter,
    B: DebouncedButton,
{
    /// Constructs a [`KeyScan`] with every key released, the tick at zero and column 0 selected.
    pub fn new(
        columns: [O; NUM_COLS],
        top_rows: [I; NUM_ROWS],
        bottom_rows: [I; NUM_ROWS],
        encoders: [Encoder<Q, B>; 2],
    ) -> Self {
        Self {
            grid: KeyGrid::new(),
            columns: ColumnDriver::new(columns),
            top_rows,
            bottom_rows,
            encoders,
        }
    }

    /// Energizes column 0 so the first scan step reads a settled column.
    pub fn initialize(&mut self) -> Result<(), ScanError> {
        self.columns.energize()
    }

    /// Reads every row of the energized column and updates its keys, then energizes the next column and samples the
    /// encoders. The tick advances each time the selection wraps back to column 0.
    ///
    /// If the next column can't be energized the selection stays put, so the following step reads the same column
    /// again rather than an unpowered one.
    pub fn scan_step(&mut self) -> Result<(), ScanError> {
        let column = self.columns.active();
        let mut contacts = [Contacts::OPEN; NUM_ROWS];
        for (row, reading) in RowIndex::all().zip(contacts.iter_mut()) {
            let top = self.top_rows[row.index()].is_high().map_err(|_| ScanError::Row {
                row,
                contact: Contact::Top,
            })?;
            let bottom = self.bottom_rows[row.index()]
                .is_high()
                .map_err(|_| ScanError::Row {
                    row,
                    contact: Contact::Bottom,
                })?;
            *reading = Contacts::new(top, bottom);
        }
        self.grid.scan_column(column, &contacts);

        if self.columns.advance()? {
            self.grid.advance_tick();
        }

        for encoder in self.encoders.iter_mut() {
            encoder.sample();
        }
        Ok(())
    }

    /// Returns `true` if at least one event is waiting to be popped.
    pub fn has_pending_event(&self) -> bool {
        self.grid.has_pending_event()
    }

    /// Removes and returns the oldest waiting event, if any.
    pub fn pop_event(&mut self) -> Option<KeyEvent> {
        self.grid.pop_event()
    }

    /// Hands waiting events to `send`, oldest first, until the queue is empty or `send` refuses one. A refused event
    /// stays at the head of the queue. Returns the number of events handed over.
    pub fn forward_events<E>(&mut self, mut send: impl FnMut(KeyEvent) -> Result<(), E>) -> usize {
        let mut sent = 0;
        while let Some(event) = self.grid.peek_event() {
            if send(event).is_err() {
                break;
            }
            self.grid.pop_event();
            sent += 1;
        }
        sent
    }

    /// Returns `true` exactly once per press of the encoder's push button.
    pub fn button_pressed(&mut self, knob: Knob) -> bool {
        let pressed = self.encoders[knob.index()].button_pressed();
        if pressed && self.grid.debug_mode() {
            info!("Button {} pressed", knob.index() + 1);
        }
        pressed
    }

    /// Returns the encoder's movement once it exceeds one count, or 0. See [`Encoder::delta`].
    pub fn encoder_delta(&mut self, knob: Knob) -> i32 {
        let delta = self.encoders[knob.index()].delta();
        if delta != 0 && self.grid.debug_mode() {
            info!("Encoder {} moved {}", knob.index() + 1, delta);
        }
        delta
    }

    /// Toggles verbose logging of notes, button presses and encoder movement.
    pub fn set_debug_mode(&mut self, enabled: bool) {
        self.grid.set_debug_mode(enabled);
    }

    /// Getter.
    pub fn debug_mode(&self) -> bool {
        self.grid.debug_mode()
    }

    /// Getter.
    pub fn diagnostics(&self) -> &Diagnostics {
        self.grid.diagnostics()
    }

    /// Getter.
    pub fn tick(&self) -> Tick {
        self.grid.tick()
    }

    /// The column the next scan step will read.
    pub fn active_column(&self) -> ColIndex {
        self.columns.active()
    }

    /// Getter.
    pub fn grid(&self) -> &KeyGrid {
        &self.grid
    }
}
