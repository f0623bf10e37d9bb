//! Pin doubles backed by shared cells, so tests can set inputs and inspect outputs while a driver owns the pins.

use core::{cell::Cell, convert::Infallible};
use embedded_hal::digital::{ErrorType, InputPin, OutputPin};

/// An input that reads whatever level the test last stored in the cell.
pub struct FakeInput<'a>(pub &'a Cell<bool>);

impl ErrorType for FakeInput<'_> {
    type Error = Infallible;
}

impl InputPin for FakeInput<'_> {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.0.get())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.0.get())
    }
}

/// An output that stores its level in the cell.
pub struct FakeOutput<'a>(pub &'a Cell<bool>);

impl ErrorType for FakeOutput<'_> {
    type Error = Infallible;
}

impl OutputPin for FakeOutput<'_> {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.0.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.0.set(true);
        Ok(())
    }
}

/// An output whose level is stored in `level`, and which fails to go high while `faulty` is set.
pub struct FaultyOutput<'a> {
    pub level: &'a Cell<bool>,
    pub faulty: &'a Cell<bool>,
}

/// The error [`FaultyOutput`] reports.
#[derive(Debug)]
pub struct PinFault;

impl embedded_hal::digital::Error for PinFault {
    fn kind(&self) -> embedded_hal::digital::ErrorKind {
        embedded_hal::digital::ErrorKind::Other
    }
}

impl ErrorType for FaultyOutput<'_> {
    type Error = PinFault;
}

impl OutputPin for FaultyOutput<'_> {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.level.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        if self.faulty.get() {
            return Err(PinFault);
        }
        self.level.set(true);
        Ok(())
    }
}
