//! The polling loop: input handling and deadline-driven sample output.
//!
//! [`SignalGenerator::step()`] is one pass of the cooperative loop. It runs,
//! in this order and every time:
//!
//! 1. keypad scan, feeding an accepted key into the command buffer;
//! 2. mode-button poll, which may advance the waveform selector;
//! 3. deadline check, emitting one sample if the deadline has been reached.
//!
//! # Sample timing
//!
//! The next deadline advances by `1000 / frequency` ms per emitted sample,
//! measured from the previous deadline rather than from the current time,
//! so a step that runs late is followed by back-to-back samples until the
//! schedule is met again. When the interval is 0 (stored frequency above
//! 1000) the deadline is re-anchored to the current time instead and the
//! generator emits exactly one sample per step.
//!
//! All clock comparisons use wrapping arithmetic; the `u32` millisecond
//! counter may roll over while running.

use embedded_hal::digital::{InputPin, OutputPin};

use crate::button::ButtonDebouncer;
use crate::command::{CommandBuffer, CommandOutcome};
use crate::config::GeneratorConfig;
use crate::dac::DacOutput;
use crate::error::GpioError;
use crate::keypad::{KeyPress, KeypadScanner};
use crate::parameters::{shape_sample, SignalParameters};
use crate::waveform::{Phase, Waveform};

/// Free-running millisecond clock.
pub trait Clock {
    /// Milliseconds since an arbitrary epoch, wrapping at `u32::MAX`.
    fn now_ms(&mut self) -> u32;
}

/// A sample written to the DAC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Sample {
    pub waveform: Waveform,
    /// Table position the sample was read from.
    pub phase: Phase,
    /// Table value before the amplitude/offset transform.
    pub raw: u8,
    /// Code written to the DAC.
    pub value: u8,
}

/// What happened during one [`step()`](SignalGenerator::step).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StepReport {
    pub key: Option<KeyPress>,
    /// Set when the key finished (or overflowed) a command.
    pub command: Option<CommandOutcome>,
    /// New selector value after an accepted button press.
    pub waveform: Option<Waveform>,
    pub sample: Option<Sample>,
}

/// Everything the loop mutates, owned by a single context.
///
/// Each field has exactly one writer: the command buffer writes
/// `parameters`, the button debouncer writes `waveform`, and sample
/// emission writes `phase` and `next_deadline`.
#[derive(Debug, Clone)]
pub struct SchedulerState {
    parameters: SignalParameters,
    waveform: Waveform,
    phase: Phase,
    command: CommandBuffer,
    next_deadline: u32,
}

impl SchedulerState {
    /// Default parameters, first waveform, phase 0, first sample due now.
    pub fn new(config: &GeneratorConfig, now_ms: u32) -> Self {
        Self {
            parameters: SignalParameters::default(),
            waveform: Waveform::default(),
            phase: Phase::default(),
            command: CommandBuffer::new(config.terminator),
            next_deadline: now_ms,
        }
    }

    pub fn parameters(&self) -> &SignalParameters {
        &self.parameters
    }

    pub fn waveform(&self) -> Waveform {
        self.waveform
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Characters of the command being typed.
    pub fn pending_command(&self) -> &str {
        self.command.as_str()
    }

    pub fn next_deadline(&self) -> u32 {
        self.next_deadline
    }
}

/// `true` once `now` is at or past `deadline`, across clock wraparound.
fn deadline_reached(now_ms: u32, deadline: u32) -> bool {
    (now_ms.wrapping_sub(deadline) as i32) >= 0
}

/// Keypad, button and DAC bound to one [`SchedulerState`].
pub struct SignalGenerator<ROW, COL, BTN, DAC> {
    keypad: KeypadScanner<ROW, COL>,
    button: ButtonDebouncer<BTN>,
    dac: DacOutput<DAC>,
    config: GeneratorConfig,
    state: SchedulerState,
}

impl<ROW, COL, BTN, DAC> SignalGenerator<ROW, COL, BTN, DAC>
where
    ROW: OutputPin,
    COL: InputPin,
    BTN: InputPin,
    DAC: OutputPin,
{
    /// Create a generator whose first sample is due at `now_ms`.
    pub fn new(
        keypad: KeypadScanner<ROW, COL>,
        button: ButtonDebouncer<BTN>,
        dac: DacOutput<DAC>,
        config: GeneratorConfig,
        now_ms: u32,
    ) -> Self {
        let state = SchedulerState::new(&config, now_ms);
        Self {
            keypad,
            button,
            dac,
            config,
            state,
        }
    }

    pub fn state(&self) -> &SchedulerState {
        &self.state
    }

    /// Run one pass of the polling loop at time `now_ms`.
    ///
    /// The keypad, the button and the deadline check each run on every
    /// pass, whether or not an earlier one failed.
    ///
    /// # Errors
    /// * the first [`GpioError`] raised during this pass. It is returned
    ///   only after the deadline check has run.
    pub fn step(&mut self, now_ms: u32) -> Result<StepReport, GpioError> {
        let mut report = StepReport::default();
        let mut first_error = None;

        match self.keypad.scan(now_ms) {
            Ok(Some(press)) => {
                report.key = Some(press);
                report.command = self.state.command.push(press.key, &mut self.state.parameters);
            }
            Ok(None) => {}
            Err(e) => first_error = Some(e),
        }

        match self.button.poll(now_ms, &mut self.state.waveform) {
            Ok(true) => {
                #[cfg(feature = "defmt")]
                defmt::info!("Waveform: {}", self.state.waveform.name());
                report.waveform = Some(self.state.waveform);
            }
            Ok(false) => {}
            Err(e) => first_error = first_error.or(Some(e)),
        }

        match self.emit_if_due(now_ms) {
            Ok(sample) => report.sample = sample,
            Err(e) => first_error = first_error.or(Some(e)),
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(report),
        }
    }

    /// Write the sample at the current phase if its deadline has come.
    ///
    /// The phase and the deadline only move after a successful write, so a
    /// failed write is retried on the next step.
    fn emit_if_due(&mut self, now_ms: u32) -> Result<Option<Sample>, GpioError> {
        if !deadline_reached(now_ms, self.state.next_deadline) {
            return Ok(None);
        }

        let waveform = self.state.waveform;
        let phase = self.state.phase;
        let raw = self.config.tables[waveform.index()].sample(phase);
        let value = self
            .config
            .output_policy
            .apply(shape_sample(raw, &self.state.parameters));

        self.dac.write(value)?;
        self.state.phase = phase.next();

        let interval = self.state.parameters.sample_interval_ms();
        self.state.next_deadline = if interval == 0 {
            now_ms
        } else {
            self.state.next_deadline.wrapping_add(interval)
        };

        #[cfg(feature = "defmt")]
        defmt::trace!("{} sample: {}", waveform.name(), value);

        Ok(Some(Sample {
            waveform,
            phase,
            raw,
            value,
        }))
    }

    /// Step forever, reading the time from `clock` before every pass.
    ///
    /// GPIO errors are logged and the loop carries on with the next pass.
    pub fn run<C: Clock>(&mut self, clock: &mut C) -> ! {
        loop {
            if let Err(_e) = self.step(clock.now_ms()) {
                #[cfg(feature = "defmt")]
                defmt::error!("{}", _e);
            }
        }
    }
}
