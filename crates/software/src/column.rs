//! Drives the column lines of the matrix, energizing exactly one at a time.

use crate::{
    error::ScanError,
    matrix::{ColIndex, NUM_COLS},
};
use embedded_hal::digital::OutputPin;

/// Owns the column output pins and tracks which column is active.
pub struct ColumnDriver<O> {
    pins: [O; NUM_COLS],
    active: ColIndex,
}

impl<O: OutputPin> ColumnDriver<O> {
    /// Constructs a [`ColumnDriver`] with column 0 selected. No pin is touched until [`energize`][Self::energize].
    pub fn new(pins: [O; NUM_COLS]) -> Self {
        Self {
            pins,
            active: ColIndex::FIRST,
        }
    }

    /// Getter.
    pub fn active(&self) -> ColIndex {
        self.active
    }

    /// Energizes the next column and selects it. Returns `true` if the selection wrapped back to column 0.
    ///
    /// On failure the selection is unchanged and the selected column is energized again, as far as the pins allow.
    pub fn advance(&mut self) -> Result<bool, ScanError> {
        let next = self.active.next();
        if let Err(e) = self.drive(next) {
            let _ = self.drive(self.active);
            return Err(e);
        }
        self.active = next;
        Ok(next == ColIndex::FIRST)
    }

    /// Drives the selected column high and every other column low.
    pub fn energize(&mut self) -> Result<(), ScanError> {
        self.drive(self.active)
    }

    /// The others are driven low first, so two columns are never high at once.
    fn drive(&mut self, selected: ColIndex) -> Result<(), ScanError> {
        for (column, pin) in ColIndex::all().zip(self.pins.iter_mut()) {
            if column != selected {
                pin.set_low().map_err(|_| ScanError::Column { column })?;
            }
        }
        self.pins[selected.index()]
            .set_high()
            .map_err(|_| ScanError::Column { column: selected })
    }
}
