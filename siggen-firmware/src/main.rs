//! siggen-firmware
//!
//! Keypad-controlled waveform generator for the Raspberry Pi Pico 2.
//! Binds the RP2350 GPIO pins to the `siggen` core and runs its polling
//! loop forever:
//!
//! 1. The 4x4 keypad is scanned for a debounced key; `A`/`B`/`C` commands
//!    ended by `D` set amplitude, offset and frequency.
//! 2. The mode button cycles Sine → Triangle → Sawtooth → Square.
//! 3. Whenever the sample deadline is reached the next table sample is
//!    scaled and written to the 8-bit parallel DAC on eight GPIO lines.
//!
//! No interrupts are used by the loop itself; timing comes from comparing
//! the embassy time driver's millisecond count against software deadlines.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::block::ImageDef;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_time::Instant;
use {defmt_rtt as _, panic_probe as _};

use siggen::{ButtonDebouncer, Clock, DacOutput, GeneratorConfig, KeypadScanner, SignalGenerator};

/// Tell the RP2350 Boot ROM about our application.
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = ImageDef::secure_exe();

/// Millisecond clock backed by the RP2350 system timer.
struct TimerClock;

impl Clock for TimerClock {
    fn now_ms(&mut self) -> u32 {
        // Truncation gives the wrapping u32 counter the core expects.
        Instant::now().as_millis() as u32
    }
}

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let p = embassy_rp::init(Default::default());
    info!("siggen-firmware starting");

    // —— Pin assignments ————————————————————————————————————————————————————
    // KEY_ROW0..3 → GP2..GP5    outputs, driven high one at a time
    // KEY_COL0..3 → GP6..GP9    inputs, pull-down
    // MODE_BTN    → GP16        input, pull-down, active-high
    // DAC_D0..D7  → GP20, GP19, GP17, GP18, GP21, GP22, GP26, GP27
    // ———————————————————————————————————————————————————————————————————————

    let rows = [
        Output::new(p.PIN_2, Level::Low),
        Output::new(p.PIN_3, Level::Low),
        Output::new(p.PIN_4, Level::Low),
        Output::new(p.PIN_5, Level::Low),
    ];
    let cols = [
        Input::new(p.PIN_6, Pull::Down),
        Input::new(p.PIN_7, Pull::Down),
        Input::new(p.PIN_8, Pull::Down),
        Input::new(p.PIN_9, Pull::Down),
    ];
    let mode_button = Input::new(p.PIN_16, Pull::Down);

    // Ordered LSB first: dac_pins[n] carries bit n.
    let dac_pins = [
        Output::new(p.PIN_20, Level::Low),
        Output::new(p.PIN_19, Level::Low),
        Output::new(p.PIN_17, Level::Low),
        Output::new(p.PIN_18, Level::Low),
        Output::new(p.PIN_21, Level::Low),
        Output::new(p.PIN_22, Level::Low),
        Output::new(p.PIN_26, Level::Low),
        Output::new(p.PIN_27, Level::Low),
    ];

    let config = GeneratorConfig::default();
    let keypad = KeypadScanner::new(rows, cols, &config);
    let button = ButtonDebouncer::new(mode_button, &config);
    let dac = DacOutput::new(dac_pins);

    let mut clock = TimerClock;
    let mut generator = SignalGenerator::new(keypad, button, dac, config, clock.now_ms());

    let state = generator.state();
    info!(
        "Waveform: {}, amplitude: {}, offset: {} mV, frequency: {}",
        state.waveform().name(),
        state.parameters().amplitude(),
        state.parameters().offset_mv(),
        state.parameters().frequency(),
    );

    // The polling loop owns the core from here on and never yields.
    generator.run(&mut clock);
}
