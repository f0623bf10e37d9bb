//! A polled quadrature decoder for mechanical rotary encoders.
//!
//! Each sample of the two phase pins is compared with the previous one and the position moves by the number of quarter
//! steps implied by the change. A change of both phases at once means a step was missed in between; it is counted as
//! two steps in the direction last travelled.

use crate::encoder::QuadratureCounter;
use embedded_hal::digital::InputPin;

/// Position change indexed by `(new_state << 2) | old_state`, where a state is `(b << 1) | a`.
const TRANSITIONS: [i8; 16] = [0, 1, -1, 2, -1, 0, -2, 1, 1, -2, 0, -1, 2, -1, 1, 0];

/// Decodes the two phase outputs of a rotary encoder into a signed position.
pub struct Quadrature<A, B> {
    a: A,
    b: B,
    state: u8,
    position: i32,
}

impl<A: InputPin, B: InputPin<Error = A::Error>> Quadrature<A, B> {
    /// Constructs a [`Quadrature`] at position zero, taking the pins' present levels as the starting state.
    pub fn new(mut a: A, mut b: B) -> Result<Self, A::Error> {
        let state = Self::read_state(&mut a, &mut b)?;
        Ok(Self {
            a,
            b,
            state,
            position: 0,
        })
    }

    /// Samples the phase pins and updates the position.
    pub fn poll(&mut self) -> Result<(), A::Error> {
        let state = Self::read_state(&mut self.a, &mut self.b)?;
        let change = TRANSITIONS[usize::from((state << 2) | self.state)];
        self.position = self.position.wrapping_add(i32::from(change));
        self.state = state;
        Ok(())
    }

    /// Getter.
    pub fn position(&self) -> i32 {
        self.position
    }

    /// Overwrites the position without disturbing the phase state.
    pub fn set_position(&mut self, position: i32) {
        self.position = position;
    }

    fn read_state(a: &mut A, b: &mut B) -> Result<u8, A::Error> {
        Ok((u8::from(b.is_high()?) << 1) | u8::from(a.is_high()?))
    }
}

impl<A: InputPin, B: InputPin<Error = A::Error>> QuadratureCounter for Quadrature<A, B> {
    fn sample(&mut self) {
        if self.poll().is_err() {
            warn!("Failed to read encoder phase inputs");
        }
    }

    fn read(&mut self) -> i32 {
        self.position
    }

    fn write(&mut self, position: i32) {
        self.set_position(position);
    }
}
