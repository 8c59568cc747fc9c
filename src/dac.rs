//! 8-bit parallel DAC driven through eight GPIO lines.

use embedded_hal::digital::{OutputPin, PinState};

use crate::error::GpioError;

/// Split `value` into its eight bits, least significant first.
///
/// `bits(value)[n]` is the level of data line `Dn`.
pub fn bits(value: u8) -> [bool; 8] {
    core::array::from_fn(|n| value & (1 << n) != 0)
}

/// Parallel DAC on eight output lines, `pins[0]` = D0 (LSB).
///
/// All eight lines are written in one call with nothing interleaved, so
/// the byte on the bus is consistent once [`write()`](Self::write) returns.
pub struct DacOutput<P> {
    pins: [P; 8],
}

impl<P> DacOutput<P>
where
    P: OutputPin,
{
    pub fn new(pins: [P; 8]) -> Self {
        Self { pins }
    }

    /// Drive all eight lines to `value`.
    ///
    /// # Errors
    /// * [`GpioError::Dac`] from the first line that fails. Lines before
    ///   it already carry their new level.
    pub fn write(&mut self, value: u8) -> Result<(), GpioError> {
        for (pin, bit) in self.pins.iter_mut().zip(bits(value)) {
            pin.set_state(PinState::from(bit))
                .map_err(GpioError::dac)?;
        }
        Ok(())
    }
}
