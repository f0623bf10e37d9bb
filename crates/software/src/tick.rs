//! The scanner's notion of time.
//!
//! A [`Tick`] is advanced once per full sweep of the matrix rather than once per column, which makes it a relative
//! timestamp whose real-world length depends on how often the scan step is called. It wraps at [`MAX_TICK`], so ticks
//! must only ever be compared through [`wraparound_delta`].

/// Modulus of the tick counter; values are always in `0..MAX_TICK`.
pub const MAX_TICK: u16 = 0x7FFF;

/// A 15-bit wrapping timestamp.
#[repr(transparent)]
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Tick(u16);

impl Tick {
    /// The tick a freshly constructed scanner starts from.
    pub const ZERO: Self = Self(0);

    /// Constructs a [`Tick`], folding values at or beyond [`MAX_TICK`] back into range.
    pub const fn from_u16_lossy(value: u16) -> Self {
        Self(value % MAX_TICK)
    }

    /// Getter.
    pub const fn value(self) -> u16 {
        self.0
    }

    /// The tick following this one, wrapping to zero at [`MAX_TICK`].
    #[inline]
    pub const fn next(self) -> Self {
        // self.0 < MAX_TICK < u16::MAX, so the addition can't overflow
        Self((self.0 + 1) % MAX_TICK)
    }
}

impl From<Tick> for u16 {
    fn from(value: Tick) -> Self {
        value.0
    }
}

/// Returns the number of ticks from `t1` to `t2`, assuming the counter wrapped at most once in between.
///
/// The true interval must be shorter than [`MAX_TICK`] ticks; anything longer aliases onto a shorter interval without
/// any indication that it happened.
#[inline]
pub const fn wraparound_delta(t1: Tick, t2: Tick) -> u16 {
    if t2.0 >= t1.0 {
        t2.0 - t1.0
    } else {
        t2.0 + (MAX_TICK - t1.0)
    }
}
