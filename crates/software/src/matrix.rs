//! Geometry of the key matrix along with strongly-typed indices into it.
//!
//! The matrix is wired as 10 columns, each energized in turn, by 9 rows. Every row carries two sense lines, one for the
//! top contact and one for the bottom contact of the key sitting at that row/column intersection.

/// Number of columns energized in turn during a sweep of the matrix.
pub const NUM_COLS: usize = 10;
/// Number of rows read back while a column is energized.
pub const NUM_ROWS: usize = 9;
/// Number of keys the matrix can hold.
pub const NUM_KEYS: usize = NUM_COLS * NUM_ROWS;

/// Index of a row of the matrix, guaranteed to be below [`NUM_ROWS`].
#[repr(transparent)]
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RowIndex(u8);

impl RowIndex {
    /// Constructs a [`RowIndex`], returning `None` if the value lies outside the matrix.
    pub const fn new(ind: u8) -> Option<Self> {
        if (ind as usize) < NUM_ROWS {
            Some(Self(ind))
        } else {
            None
        }
    }

    /// Constructs a [`RowIndex`] in const contexts.
    ///
    /// # Panics
    /// The value lies outside the matrix.
    pub const fn from_value(ind: u8) -> Self {
        assert!(
            (ind as usize) < NUM_ROWS,
            "Tried to construct row index from a bad value"
        );
        Self(ind)
    }

    /// Position of the row, suitable for indexing arrays sized by [`NUM_ROWS`].
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns an [`Iterator`] over every row, top of the matrix first.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..NUM_ROWS as u8).map(Self)
    }
}

impl From<RowIndex> for u8 {
    fn from(value: RowIndex) -> Self {
        value.0
    }
}

/// Index of a column of the matrix, guaranteed to be below [`NUM_COLS`].
#[repr(transparent)]
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ColIndex(u8);

impl ColIndex {
    /// The column a sweep starts (and restarts) from.
    pub const FIRST: Self = Self(0);

    /// Constructs a [`ColIndex`], returning `None` if the value lies outside the matrix.
    pub const fn new(ind: u8) -> Option<Self> {
        if (ind as usize) < NUM_COLS {
            Some(Self(ind))
        } else {
            None
        }
    }

    /// Constructs a [`ColIndex`] in const contexts.
    ///
    /// # Panics
    /// The value lies outside the matrix.
    pub const fn from_value(ind: u8) -> Self {
        assert!(
            (ind as usize) < NUM_COLS,
            "Tried to construct col index from a bad value"
        );
        Self(ind)
    }

    /// Position of the column, suitable for indexing arrays sized by [`NUM_COLS`].
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The column energized after this one, wrapping back to [`ColIndex::FIRST`] after the last.
    #[inline]
    pub const fn next(self) -> Self {
        if self.index() + 1 < NUM_COLS {
            Self(self.0 + 1)
        } else {
            Self::FIRST
        }
    }

    /// Returns an [`Iterator`] over every column in sweep order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..NUM_COLS as u8).map(Self)
    }
}

impl From<ColIndex> for u8 {
    fn from(value: ColIndex) -> Self {
        value.0
    }
}

/// The position of a single key in the matrix.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyLocation {
    /// Row whose sense lines report the key.
    pub row: RowIndex,
    /// Column which must be energized for the key to be read.
    pub column: ColIndex,
}

impl KeyLocation {
    /// Constructs a [`KeyLocation`].
    pub const fn new(row: RowIndex, column: ColIndex) -> Self {
        Self { row, column }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_bounds() {
        assert_eq!(Some(RowIndex(8)), RowIndex::new(8), "Expected left but got right");
        assert_eq!(None, RowIndex::new(9), "Expected left but got right");
    }

    #[test]
    fn col_bounds() {
        assert_eq!(Some(ColIndex(9)), ColIndex::new(9), "Expected left but got right");
        assert_eq!(None, ColIndex::new(10), "Expected left but got right");
    }

    #[test]
    #[should_panic(expected = "Tried to construct row index from a bad value")]
    fn row_from_bad_value() {
        let _ = RowIndex::from_value(9);
    }

    #[test]
    fn next_column_wraps() {
        assert_eq!(ColIndex(1), ColIndex::FIRST.next(), "Expected left but got right");
        assert_eq!(
            ColIndex::FIRST,
            ColIndex::from_value(9).next(),
            "Should wrap back to the first column; expected left but got right"
        );
    }

    #[test]
    fn iterators_cover_the_matrix() {
        assert_eq!(NUM_ROWS, RowIndex::all().count(), "Expected left but got right");
        assert_eq!(NUM_COLS, ColIndex::all().count(), "Expected left but got right");
        assert_eq!(Some(ColIndex(9)), ColIndex::all().last(), "Expected left but got right");
    }
}
