//! Tracking of the two push-button rotary encoders used for auxiliary control input.
//!
//! The encoder hardware itself is reached through two small traits, [`QuadratureCounter`] and [`DebouncedButton`], so
//! that interrupt-driven counters, the polled [`Quadrature`][crate::quadrature::Quadrature] decoder or test doubles can
//! all sit behind an [`Encoder`].

/// Identifies one of the two encoders.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Knob {
    /// The first encoder.
    One,
    /// The second encoder.
    Two,
}

impl Knob {
    /// Position of the encoder, suitable for indexing arrays of two.
    pub const fn index(self) -> usize {
        match self {
            Self::One => 0,
            Self::Two => 1,
        }
    }
}

/// A relative position counter fed by a quadrature encoder.
pub trait QuadratureCounter {
    /// Gives polled implementations a chance to sample their inputs. Interrupt-driven counters need not override this.
    fn sample(&mut self) {}

    /// Returns the current position.
    fn read(&mut self) -> i32;

    /// Overwrites the current position.
    fn write(&mut self, position: i32);
}

/// A push button whose raw input is filtered for contact bounce.
pub trait DebouncedButton {
    /// Refreshes the debounced state from the raw input, then returns `true` if that refresh saw the button settle at
    /// its pressed level.
    fn pressed_edge(&mut self) -> bool;
}

/// A rotary encoder with an integrated push button.
pub struct Encoder<Q, B> {
    counter: Q,
    button: B,
    /// Position deltas are measured from here. As the counter is zeroed whenever a delta is reported, this stays at
    /// zero, so the counter's absolute value carries no meaning across reads.
    baseline: i32,
}

impl<Q: QuadratureCounter, B: DebouncedButton> Encoder<Q, B> {
    /// Constructs an [`Encoder`].
    pub fn new(counter: Q, button: B) -> Self {
        Self {
            counter,
            button,
            baseline: 0,
        }
    }

    /// Returns `true` exactly once per press, on the update at which the debounced button reaches its pressed level.
    pub fn button_pressed(&mut self) -> bool {
        self.button.pressed_edge()
    }

    /// Returns the signed movement since the baseline once it exceeds one count, resetting the counter to zero;
    /// otherwise returns 0 and leaves the counter alone.
    ///
    /// Movement beyond the reported amount that accumulates between the read and the reset is lost.
    pub fn delta(&mut self) -> i32 {
        let delta = self.counter.read().wrapping_sub(self.baseline);
        if delta.unsigned_abs() > 1 {
            self.counter.write(0);
            delta
        } else {
            0
        }
    }

    /// Lets a polled counter sample its inputs.
    pub fn sample(&mut self) {
        self.counter.sample();
    }

    /// Returns the underlying counter.
    pub fn counter(&self) -> &Q {
        &self.counter
    }
}
