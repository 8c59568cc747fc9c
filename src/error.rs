//! Error types for command validation and GPIO access.

use core::fmt;

use embedded_hal::digital::ErrorKind;

/// Reasons a keypad command is rejected.
///
/// Every variant is recovered locally: the command buffer is cleared, the
/// outcome is reported, and the polling loop carries on. The user simply
/// enters the command again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandError {
    /// Amplitude parsed but lies outside 100–2500 mV.
    InvalidAmplitude(u32),
    /// Offset parsed but lies outside 50–1250 mV.
    InvalidOffset(u32),
    /// Frequency parsed but lies outside 1–12 000 000 Hz.
    InvalidFrequency(u32),
    /// The characters after the prefix are not a decimal number.
    Parse,
    /// The buffer reached [`MAX_COMMAND_LEN`](crate::MAX_COMMAND_LEN)
    /// characters without a terminator.
    BufferOverflow,
    /// The buffer was empty or started with something other than `A`/`B`/`C`.
    UnrecognizedPrefix,
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CommandError::InvalidAmplitude(v) => write!(f, "Invalid amplitude: {} mV", v),
            CommandError::InvalidOffset(v) => write!(f, "Invalid offset: {} mV", v),
            CommandError::InvalidFrequency(v) => write!(f, "Invalid frequency: {} Hz", v),
            CommandError::Parse => write!(f, "Command value is not a number"),
            CommandError::BufferOverflow => write!(f, "Command too long, buffer cleared"),
            CommandError::UnrecognizedPrefix => write!(f, "Unrecognized command"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for CommandError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            CommandError::InvalidAmplitude(v) => defmt::write!(f, "Invalid amplitude: {} mV", v),
            CommandError::InvalidOffset(v) => defmt::write!(f, "Invalid offset: {} mV", v),
            CommandError::InvalidFrequency(v) => defmt::write!(f, "Invalid frequency: {} Hz", v),
            CommandError::Parse => defmt::write!(f, "Command value is not a number"),
            CommandError::BufferOverflow => defmt::write!(f, "Command too long, buffer cleared"),
            CommandError::UnrecognizedPrefix => defmt::write!(f, "Unrecognized command"),
        }
    }
}

/// A GPIO read or write failed.
///
/// Pins of different types report different error types, so only the
/// portable [`ErrorKind`] is kept, tagged with the component that owns the
/// failing pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GpioError {
    /// Keypad row-select or column-sense line.
    Keypad(ErrorKind),
    /// Mode-select button line.
    Button(ErrorKind),
    /// One of the eight DAC data lines.
    Dac(ErrorKind),
}

impl GpioError {
    pub(crate) fn keypad<E: embedded_hal::digital::Error>(e: E) -> Self {
        GpioError::Keypad(e.kind())
    }

    pub(crate) fn button<E: embedded_hal::digital::Error>(e: E) -> Self {
        GpioError::Button(e.kind())
    }

    pub(crate) fn dac<E: embedded_hal::digital::Error>(e: E) -> Self {
        GpioError::Dac(e.kind())
    }
}

impl fmt::Display for GpioError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GpioError::Keypad(kind) => write!(f, "Keypad GPIO error: {:?}", kind),
            GpioError::Button(kind) => write!(f, "Button GPIO error: {:?}", kind),
            GpioError::Dac(kind) => write!(f, "DAC GPIO error: {:?}", kind),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for GpioError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            GpioError::Keypad(_kind) => defmt::write!(f, "Keypad GPIO error"),
            GpioError::Button(_kind) => defmt::write!(f, "Button GPIO error"),
            GpioError::Dac(_kind) => defmt::write!(f, "DAC GPIO error"),
        }
    }
}
