//! A software debouncer for push buttons.
//!
//! The debounced state only follows the raw input once the input has held steady for a full interval, so a change is
//! reported a short while after the contact settles rather than on its first edge.

use crate::encoder::DebouncedButton;
use embassy_time::{Duration, Instant};
use embedded_hal::digital::InputPin;

/// How long an input has to hold steady before the debounced state follows it.
pub const DEBOUNCE_INTERVAL: Duration = Duration::from_millis(10);

/// Debounces a single [`InputPin`].
pub struct Debouncer<P> {
    pin: P,
    interval: Duration,
    /// When the raw input last changed, or when the debounced state last changed.
    since: Instant,
    /// Last raw level seen, bounces included.
    unstable: bool,
    debounced: bool,
    changed: bool,
}

impl<P: InputPin> Debouncer<P> {
    /// Constructs a [`Debouncer`] using [`DEBOUNCE_INTERVAL`], taking the pin's present level as the debounced state.
    pub fn new(pin: P) -> Result<Self, P::Error> {
        Self::with_interval(pin, DEBOUNCE_INTERVAL)
    }

    /// Constructs a [`Debouncer`] with a custom interval, taking the pin's present level as the debounced state.
    pub fn with_interval(mut pin: P, interval: Duration) -> Result<Self, P::Error> {
        let level = pin.is_high()?;
        Ok(Self {
            pin,
            interval,
            since: Instant::now(),
            unstable: level,
            debounced: level,
            changed: false,
        })
    }

    /// Samples the pin. Returns `true` if the debounced state changed.
    pub fn update(&mut self) -> Result<bool, P::Error> {
        self.update_at(Instant::now())
    }

    /// Samples the pin as of `now`. Returns `true` if the debounced state changed.
    pub fn update_at(&mut self, now: Instant) -> Result<bool, P::Error> {
        self.changed = false;
        let level = self.pin.is_high()?;
        if level != self.unstable {
            self.since = now;
            self.unstable = level;
        } else if level != self.debounced
            && now
                .checked_duration_since(self.since)
                .is_some_and(|steady| steady >= self.interval)
        {
            self.since = now;
            self.debounced = level;
            self.changed = true;
        }
        Ok(self.changed)
    }

    /// Returns `true` if the last update changed the debounced state.
    pub fn changed(&self) -> bool {
        self.changed
    }

    /// The debounced level.
    pub fn is_high(&self) -> bool {
        self.debounced
    }

    /// The debounced level, inverted.
    pub fn is_low(&self) -> bool {
        !self.debounced
    }

    /// Returns `true` if the last update saw the debounced state fall from high to low.
    pub fn fell(&self) -> bool {
        self.changed && !self.debounced
    }

    /// Returns `true` if the last update saw the debounced state rise from low to high.
    pub fn rose(&self) -> bool {
        self.changed && self.debounced
    }
}

/// Buttons are wired to ground against a pull-up, so pressed reads low.
impl<P: InputPin> DebouncedButton for Debouncer<P> {
    fn pressed_edge(&mut self) -> bool {
        match self.update() {
            Ok(_) => self.fell(),
            Err(_) => {
                warn!("Failed to read button input");
                false
            }
        }
    }
}
