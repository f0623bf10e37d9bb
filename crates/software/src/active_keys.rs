//! Provides a struct [`ActiveKeys`] for tracking which keys of the matrix are currently sounding. Here "sounding" means
//! a note-on has been emitted for the key and the matching note-off has not, regardless of what the consumer of those
//! events does with them.

use crate::matrix::{KeyLocation, NUM_KEYS};
use tinyvec::ArrayVec;

/// A set of sounding keys, kept in the order the keys were struck.
///
/// Capacity defaults to the number of keys in the matrix, so a full instance can hold every key and additions are
/// never refused for lack of room.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActiveKeys<const N: usize = NUM_KEYS> {
    data: ArrayVec<[KeyLocation; N]>,
}

impl Default for ActiveKeys {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "defmt")]
impl<const N: usize> defmt::Format for ActiveKeys<N> {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "ActiveKeys {{ data: [");
        for (i, key) in self.data.iter().enumerate() {
            if i == 0 {
                defmt::write!(fmt, " ");
            } else {
                defmt::write!(fmt, ", ");
            }
            defmt::write!(fmt, "({}, {})", u8::from(key.row), u8::from(key.column));
        }
        defmt::write!(fmt, " ] }}");
    }
}

impl<const N: usize> ActiveKeys<N> {
    /// Construct a new `ActiveKeys`.
    pub fn new() -> Self {
        Self {
            data: ArrayVec::default(),
        }
    }

    /// Marks a key as sounding. Returns `false`, leaving the set untouched, if the key was already sounding or no room
    /// is left.
    pub fn add(&mut self, key: KeyLocation) -> bool {
        if self.data.len() == self.data.capacity() || self.data.contains(&key) {
            return false;
        }
        self.data.push(key);
        true
    }

    /// Marks a key as silent. Returns `true` if the key had been sounding.
    pub fn remove(&mut self, key: KeyLocation) -> bool {
        let before = self.data.len();
        self.data.retain(|&k| k != key);
        self.data.len() != before
    }

    /// Determine whether a key is sounding.
    pub fn contains(&self, key: KeyLocation) -> bool {
        self.data.contains(&key)
    }

    /// Determine if any keys are sounding.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Number of sounding keys.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns an [`Iterator`] over the sounding keys, earliest struck first.
    pub fn iter(&self) -> impl Iterator<Item = KeyLocation> + '_ {
        self.data.iter().copied()
    }
}
