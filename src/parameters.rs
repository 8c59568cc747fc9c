//! Signal parameters and the table-sample transform.
//!
//! Values are entered in millivolts and hertz but stored in the generator's
//! internal units:
//!
//! | Parameter | Entered range        | Stored as      | Default (stored) |
//! |-----------|----------------------|----------------|------------------|
//! | Amplitude | 100–2500 mV          | `mV / 4`       | 250              |
//! | Offset    | 50–1250 mV           | `mV`           | 100              |
//! | Frequency | 1–12 000 000 Hz      | `Hz * 50`      | 50               |
//!
//! These scalings, and the double halving of amplitude in
//! [`shape_sample`], are kept exactly as the reference firmware applies
//! them so existing front-panel settings produce the same DAC codes.

use core::ops::RangeInclusive;

use crate::error::CommandError;

/// Accepted amplitude entries, millivolts.
pub const AMPLITUDE_RANGE_MV: RangeInclusive<u32> = 100..=2500;
/// Accepted offset entries, millivolts.
pub const OFFSET_RANGE_MV: RangeInclusive<u32> = 50..=1250;
/// Accepted frequency entries, hertz.
pub const FREQUENCY_RANGE_HZ: RangeInclusive<u32> = 1..=12_000_000;

const AMPLITUDE_DIVISOR: u32 = 4;
const FREQUENCY_MULTIPLIER: u32 = 50;

/// Full-scale amplitude and offset, millivolts.
const FULL_SCALE_AMPLITUDE_MV: u32 = 2500;
const FULL_SCALE_OFFSET_MV: u32 = 1250;

/// An accepted parameter change, carrying the value as the user entered it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParameterUpdate {
    AmplitudeMv(u32),
    OffsetMv(u32),
    FrequencyHz(u32),
}

/// Amplitude, offset and frequency of the generated signal.
///
/// Only validated commands change these values; every setter checks the
/// entered value against its range and leaves the state untouched on
/// failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SignalParameters {
    amplitude: u32,
    offset_mv: u32,
    frequency: u32,
}

impl Default for SignalParameters {
    fn default() -> Self {
        Self {
            amplitude: 1000 / AMPLITUDE_DIVISOR,
            offset_mv: 100,
            frequency: FREQUENCY_MULTIPLIER,
        }
    }
}

impl SignalParameters {
    /// Stored amplitude (entered millivolts / 4).
    pub fn amplitude(&self) -> u32 {
        self.amplitude
    }

    /// Stored offset, millivolts.
    pub fn offset_mv(&self) -> u32 {
        self.offset_mv
    }

    /// Stored frequency (entered hertz * 50).
    pub fn frequency(&self) -> u32 {
        self.frequency
    }

    /// Validate and store an amplitude entry.
    ///
    /// Returns [`CommandError::InvalidAmplitude`] if `mv` is outside
    /// [`AMPLITUDE_RANGE_MV`].
    pub fn set_amplitude_mv(&mut self, mv: u32) -> Result<ParameterUpdate, CommandError> {
        if !AMPLITUDE_RANGE_MV.contains(&mv) {
            return Err(CommandError::InvalidAmplitude(mv));
        }
        self.amplitude = mv / AMPLITUDE_DIVISOR;
        Ok(ParameterUpdate::AmplitudeMv(mv))
    }

    /// Validate and store an offset entry.
    ///
    /// Returns [`CommandError::InvalidOffset`] if `mv` is outside
    /// [`OFFSET_RANGE_MV`].
    pub fn set_offset_mv(&mut self, mv: u32) -> Result<ParameterUpdate, CommandError> {
        if !OFFSET_RANGE_MV.contains(&mv) {
            return Err(CommandError::InvalidOffset(mv));
        }
        self.offset_mv = mv;
        Ok(ParameterUpdate::OffsetMv(mv))
    }

    /// Validate and store a frequency entry.
    ///
    /// Returns [`CommandError::InvalidFrequency`] if `hz` is outside
    /// [`FREQUENCY_RANGE_HZ`].
    pub fn set_frequency_hz(&mut self, hz: u32) -> Result<ParameterUpdate, CommandError> {
        if !FREQUENCY_RANGE_HZ.contains(&hz) {
            return Err(CommandError::InvalidFrequency(hz));
        }
        // 12_000_000 * 50 still fits in a u32.
        self.frequency = hz * FREQUENCY_MULTIPLIER;
        Ok(ParameterUpdate::FrequencyHz(hz))
    }

    /// Milliseconds between two emitted samples: `1000 / frequency`.
    ///
    /// Zero once the stored frequency exceeds 1000, i.e. for any entry
    /// above 20 Hz. The scheduler then emits one sample per step.
    pub fn sample_interval_ms(&self) -> u32 {
        1000 / self.frequency.max(1)
    }
}

/// Scale a raw table sample by amplitude and shift it by offset.
///
/// ```text
/// amp     = amplitude / 2
/// divisor = 2500 / amp
/// dc      = 255 - offset_mv * 255 / 1250
/// output  = sample / divisor - dc
/// ```
///
/// All divisions truncate. The result is not limited to `0..=255`; see
/// [`OutputPolicy`](crate::OutputPolicy) for how it reaches the DAC.
pub fn shape_sample(sample: u8, params: &SignalParameters) -> i32 {
    let amp = (params.amplitude / 2).max(1);
    let divisor = (FULL_SCALE_AMPLITUDE_MV / amp).max(1);
    let dc = 255 - (params.offset_mv * 255) / FULL_SCALE_OFFSET_MV;
    (sample as u32 / divisor) as i32 - dc as i32
}
