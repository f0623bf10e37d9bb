//! Wiring of the matrix and encoders to the Nucleo-F767ZI's pins.
//!
//! | Function                 | Pins                     | Configuration       |
//! |--------------------------|--------------------------|---------------------|
//! | Columns 0-9              | PE2-PE11                 | push-pull, low      |
//! | Top contact, rows 0-8    | PF0-PF5, PF10-PF12       | pull-down           |
//! | Bottom contact, rows 0-8 | PG0-PG5, PG9, PG10, PG12 | pull-down           |
//! | Encoder buttons 1, 2     | PD0, PD1                 | pull-up, active low |
//! | Encoder 1 phases A, B    | PB4, PB5                 | pull-up             |
//! | Encoder 2 phases A, B    | PB8, PB9                 | pull-up             |

use defmt::*;
use embassy_stm32::{
    Peri, Peripherals,
    gpio::{Input, Level, Output, Pin, Pull, Speed},
};
use velocity_keyscan_lib::{
    debounce::Debouncer, encoder::Encoder, quadrature::Quadrature, scanner::KeyScan,
};

/// The encoder type as wired to the board.
pub type BoardEncoder = Encoder<Quadrature<Input<'static>, Input<'static>>, Debouncer<Input<'static>>>;

/// The scanner as wired to the board.
pub type BoardScanner = KeyScan<
    Output<'static>,
    Input<'static>,
    Quadrature<Input<'static>, Input<'static>>,
    Debouncer<Input<'static>>,
>;

fn column(pin: Peri<'static, impl Pin>) -> Output<'static> {
    Output::new(pin, Level::Low, Speed::VeryHigh)
}

fn contact(pin: Peri<'static, impl Pin>) -> Input<'static> {
    Input::new(pin, Pull::Down)
}

fn encoder(
    a: Peri<'static, impl Pin>,
    b: Peri<'static, impl Pin>,
    button: Peri<'static, impl Pin>,
) -> BoardEncoder {
    // GPIO reads on this chip cannot fail
    let Ok(counter) = Quadrature::new(Input::new(a, Pull::Up), Input::new(b, Pull::Up));
    let Ok(button) = Debouncer::new(Input::new(button, Pull::Up));
    Encoder::new(counter, button)
}

/// Configures the pins and constructs the scanner with column 0 energized.
pub fn scanner(p: Peripherals) -> BoardScanner {
    let columns = [
        column(p.PE2),
        column(p.PE3),
        column(p.PE4),
        column(p.PE5),
        column(p.PE6),
        column(p.PE7),
        column(p.PE8),
        column(p.PE9),
        column(p.PE10),
        column(p.PE11),
    ];
    let top_rows = [
        contact(p.PF0),
        contact(p.PF1),
        contact(p.PF2),
        contact(p.PF3),
        contact(p.PF4),
        contact(p.PF5),
        contact(p.PF10),
        contact(p.PF11),
        contact(p.PF12),
    ];
    let bottom_rows = [
        contact(p.PG0),
        contact(p.PG1),
        contact(p.PG2),
        contact(p.PG3),
        contact(p.PG4),
        contact(p.PG5),
        contact(p.PG9),
        contact(p.PG10),
        contact(p.PG12),
    ];
    let encoders = [
        encoder(p.PB4, p.PB5, p.PD0),
        encoder(p.PB8, p.PB9, p.PD1),
    ];

    let mut scanner = KeyScan::new(columns, top_rows, bottom_rows, encoders);
    unwrap!(scanner.initialize());
    scanner
}
