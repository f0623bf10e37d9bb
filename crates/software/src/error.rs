//! Errors raised while driving the matrix pins.

use crate::matrix::{ColIndex, RowIndex};

/// Which of a key's two contacts a row line belongs to.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Contact {
    /// The contact that closes first as the key travels down.
    Top,
    /// The contact that closes at the bottom of the key's travel.
    Bottom,
}

/// A pin operation failed during a scan step. The underlying HAL error is not kept, so the type stays `Copy` and
/// independent of the pin types.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScanError {
    /// Driving a column line failed.
    Column {
        /// The column being driven.
        column: ColIndex,
    },
    /// Reading a row line failed.
    Row {
        /// The row being read.
        row: RowIndex,
        /// Whether the top or bottom line of the row was being read.
        contact: Contact,
    },
}
