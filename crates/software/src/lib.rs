//! This crate contains architecture-agnostic logic for scanning a velocity-sensitive keyboard matrix in which every key
//! closes two contacts on its way down, plus two push-button rotary encoders for auxiliary control.
//!
//! Strike velocity is derived from the number of full matrix sweeps between the top and bottom contacts of a key
//! closing. Results leave the scanner as [`event::KeyEvent`]s carrying the key's row and column and a
//! [`wmidi::Velocity`], with zero velocity standing in for release.
//!
//! Pins are reached through [`embedded_hal`] traits, so the same code runs on a microcontroller and in host tests.

#![deny(missing_docs)]
#![no_std]

// must come first so the logging macros are visible to the modules below
#[macro_use]
mod fmt;

pub mod active_keys;
pub mod column;
pub mod debounce;
pub mod diagnostics;
pub mod encoder;
pub mod error;
pub mod event;
pub mod grid;
pub mod key_state;
pub mod matrix;
pub mod quadrature;
pub mod queue;
pub mod scanner;
pub mod tick;
pub mod velocity;

#[cfg(test)]
mod testing;
