//! Velocity Keyscan is [Embassy](https://embassy.dev)-based firmware which scans a velocity-sensitive keyboard matrix
//! of 10 columns by 9 rows, in which every key closes a top and a bottom contact on its way down, along with two
//! push-button rotary encoders. The firmware runs on the [Nucleo-F767ZI development
//! board](https://www.st.com/en/evaluation-tools/nucleo-f767zi.html), which is powered by an F7-series STM32
//! microcontroller.
//!
//! Scanning itself is implemented by `velocity_keyscan_lib`; this crate wires it to the board's pins, paces it, and
//! hands the resulting note events to a consumer task. Presently the consumer only logs them.
//!
//! Pressing the first encoder's button toggles verbose logging of notes, button presses and encoder movement.

#![no_std]
#![no_main]

mod board;
mod events;
mod scan;

use defmt::*;
use embassy_executor::Spawner;
use embassy_stm32::{Config, time::Hertz};
use embassy_sync::{
    blocking_mutex::raw::CriticalSectionRawMutex,
    channel::{Channel, Receiver, Sender},
    watch::{Receiver as WatchReceiver, Sender as WatchSender, Watch},
};
use velocity_keyscan_lib::{diagnostics::Diagnostics, event::KeyEvent};

#[cfg(feature = "defmt-rtt")]
use defmt_rtt as _;
#[cfg(not(feature = "panic-probe"))]
use panic_halt as _;
#[cfg(feature = "panic-probe")]
use panic_probe as _;

/// Number of events the channel between the scan and event tasks holds before the scan task starts dropping them.
const EVENT_CHANNEL_DEPTH: usize = 64;
type EventChannel = Channel<CriticalSectionRawMutex, KeyEvent, EVENT_CHANNEL_DEPTH>;
type EventSender<'a> = Sender<'a, CriticalSectionRawMutex, KeyEvent, EVENT_CHANNEL_DEPTH>;
type EventReceiver<'a> = Receiver<'a, CriticalSectionRawMutex, KeyEvent, EVENT_CHANNEL_DEPTH>;

/// Carries note events from the scan task to their consumer.
static EVENTS: EventChannel = Channel::new();

const DIAGNOSTICS_RECEIVER_CNT: usize = 1;
type DiagnosticsSync = Watch<CriticalSectionRawMutex, Diagnostics, DIAGNOSTICS_RECEIVER_CNT>;
type DiagnosticsSender<'a> =
    WatchSender<'a, CriticalSectionRawMutex, Diagnostics, DIAGNOSTICS_RECEIVER_CNT>;
type DiagnosticsReceiver<'a> =
    WatchReceiver<'a, CriticalSectionRawMutex, Diagnostics, DIAGNOSTICS_RECEIVER_CNT>;

/// Publishes the scanner's anomaly counters whenever they change.
static DIAGNOSTICS: DiagnosticsSync = Watch::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Initializing Velocity Keyscan");

    let mut config = Config::default();
    {
        use embassy_stm32::rcc::*;
        // hse: high-speed external clock
        config.rcc.hse = Some(Hse {
            freq: Hertz(8_000_000),
            mode: HseMode::Bypass,
        });

        // pll: phase-locked loop, crucial for dividing clock
        config.rcc.pll_src = PllSource::HSE;
        config.rcc.pll = Some(Pll {
            prediv: PllPreDiv::DIV4,
            mul: PllMul::MUL216,
            divp: Some(PllPDiv::DIV2), // 8mhz / 4 * 216 / 2 = 216Mhz
            divq: None,
            divr: None,
        });
        config.rcc.ahb_pre = AHBPrescaler::DIV1;
        config.rcc.apb1_pre = APBPrescaler::DIV4;
        config.rcc.apb2_pre = APBPrescaler::DIV2;
        config.rcc.sys = Sysclk::PLL1_P;
    }
    let p = embassy_stm32::init(config);

    let scanner = board::scanner(p);

    let diagnostics = unwrap!(
        DIAGNOSTICS.receiver(),
        "Diagnostics synchronizer should have a receiver available"
    );
    unwrap!(spawner.spawn(events::events(EVENTS.receiver(), diagnostics)));

    unwrap!(spawner.spawn(scan::scan(
        scanner,
        EVENTS.sender(),
        DIAGNOSTICS.sender()
    )));
}
