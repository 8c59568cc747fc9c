//! Keypad-controlled waveform generator core for an 8-bit parallel DAC.
//!
//! This crate holds everything the generator does between the GPIO pins and
//! the millisecond clock: matrix keypad scanning, mode-button debouncing,
//! command entry and validation, and deadline-driven sample emission from
//! fixed waveform tables.
//!
//! # Architecture
//!
//! A single cooperative polling loop drives four independent tasks. Each
//! call to [`SignalGenerator::step()`] runs them in a fixed order:
//!
//! ```text
//! KeypadScanner ──key──▶ CommandBuffer ──update──▶ SignalParameters
//! ButtonDebouncer ──press──▶ Waveform selector
//! clock ≥ deadline ──▶ WaveformTable[phase] ──transform──▶ DacOutput
//! ```
//!
//! Nothing blocks and nothing sleeps. Every timing decision is a comparison
//! between a stored timestamp and the free-running clock passed to `step()`,
//! using wrapping arithmetic so the `u32` millisecond counter may roll over.
//!
//! # Quick start
//!
//! ```no_run
//! use embedded_hal::digital::{InputPin, OutputPin};
//! use siggen::{ButtonDebouncer, Clock, DacOutput, GeneratorConfig, KeypadScanner, SignalGenerator};
//!
//! fn start<R, C, B, D, K>(rows: [R; 4], cols: [C; 4], mode_button: B, dac_pins: [D; 8], mut clock: K) -> !
//! where
//!     R: OutputPin,
//!     C: InputPin,
//!     B: InputPin,
//!     D: OutputPin,
//!     K: Clock,
//! {
//!     let config = GeneratorConfig::default();
//!     let keypad = KeypadScanner::new(rows, cols, &config);
//!     let button = ButtonDebouncer::new(mode_button, &config);
//!     let dac = DacOutput::new(dac_pins);
//!
//!     let mut generator = SignalGenerator::new(keypad, button, dac, config, clock.now_ms());
//!     generator.run(&mut clock)
//! }
//! ```
//!
//! # Crate features
//!
//! - **`defmt`**: status output (waveform, samples, validation results) via
//!   [`defmt`], and [`defmt::Format`] implementations on public types.

#![no_std]

pub mod button;
pub mod command;
pub mod config;
pub mod dac;
pub mod error;
pub mod keypad;
pub mod parameters;
pub mod scheduler;
pub mod waveform;

#[cfg(test)]
mod mock;

// ── Re-exports for convenience ───────────────────────────────────────────

pub use button::ButtonDebouncer;
pub use command::{parse_command, Command, CommandBuffer, CommandOutcome, MAX_COMMAND_LEN};
pub use config::{GeneratorConfig, OutputPolicy, KEYMAP};
pub use dac::DacOutput;
pub use error::{CommandError, GpioError};
pub use keypad::{KeyPress, KeypadScanner};
pub use parameters::{shape_sample, ParameterUpdate, SignalParameters};
pub use scheduler::{Clock, Sample, SchedulerState, SignalGenerator, StepReport};
pub use waveform::{Phase, Waveform, WaveformTable, STANDARD_TABLES, TABLE_LEN};
