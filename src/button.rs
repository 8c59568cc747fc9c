//! Debounced mode-select button.

use embedded_hal::digital::InputPin;

use crate::config::GeneratorConfig;
use crate::error::GpioError;
use crate::waveform::Waveform;

/// Advances the waveform selector on each debounced press.
///
/// A press is a low → high transition of the input. It is accepted only if
/// more than the debounce window has passed since the previous accepted
/// press; bounces inside the window are ignored. Holding the button does
/// not repeat.
///
/// The comparison is strict: with a 300 ms window, a press exactly 300 ms
/// after the last accepted one is still a bounce, and one at 301 ms counts.
pub struct ButtonDebouncer<BTN> {
    pin: BTN,
    debounce_ms: u32,
    last_event: Option<u32>,
    was_high: bool,
}

impl<BTN> ButtonDebouncer<BTN>
where
    BTN: InputPin,
{
    pub fn new(pin: BTN, config: &GeneratorConfig) -> Self {
        Self {
            pin,
            debounce_ms: config.button_debounce_ms,
            last_event: None,
            was_high: false,
        }
    }

    /// Sample the button and, on an accepted press, move `selector` to the
    /// next waveform.
    ///
    /// Returns `true` if `selector` was advanced.
    ///
    /// # Errors
    /// * [`GpioError::Button`] if the input cannot be read
    pub fn poll(&mut self, now_ms: u32, selector: &mut Waveform) -> Result<bool, GpioError> {
        let high = self.pin.is_high().map_err(GpioError::button)?;
        let rising = high && !self.was_high;
        self.was_high = high;

        if !rising || !self.window_elapsed(now_ms) {
            return Ok(false);
        }

        *selector = selector.next();
        self.last_event = Some(now_ms);
        Ok(true)
    }

    fn window_elapsed(&self, now_ms: u32) -> bool {
        match self.last_event {
            Some(last) => now_ms.wrapping_sub(last) > self.debounce_ms,
            None => true,
        }
    }
}
