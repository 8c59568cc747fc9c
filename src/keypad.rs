//! 4x4 matrix keypad scanner.
//!
//! # Theory of operation
//!
//! Each key shorts one row line to one column line. Columns are inputs
//! with pull-downs. To scan, each row in turn is driven high, every column
//! is read, and the row is driven low again before the next one, so a
//! column can only ever see the single row being driven.
//!
//! A high column while its row is driven is a pressed key. The scanner is
//! level-triggered and rate-limited: a key is accepted only if more than
//! the debounce window has passed since the previous accepted key. A key
//! held down therefore repeats once per window, and contact bounce inside
//! the window is dropped. A key exactly one window after the previous one
//! is still inside it.

use embedded_hal::digital::{InputPin, OutputPin};

use crate::config::GeneratorConfig;
use crate::error::GpioError;

/// A key accepted by the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyPress {
    pub row: u8,
    pub col: u8,
    /// Character from the keymap at `[row][col]`.
    pub key: char,
}

pub struct KeypadScanner<ROW, COL> {
    rows: [ROW; 4],
    cols: [COL; 4],
    keymap: [[char; 4]; 4],
    debounce_ms: u32,
    last_event: Option<u32>,
}

impl<ROW, COL> KeypadScanner<ROW, COL>
where
    ROW: OutputPin,
    COL: InputPin,
{
    /// Create a scanner. Row lines should start low.
    pub fn new(rows: [ROW; 4], cols: [COL; 4], config: &GeneratorConfig) -> Self {
        Self {
            rows,
            cols,
            keymap: config.keymap,
            debounce_ms: config.keypad_debounce_ms,
            last_event: None,
        }
    }

    /// Scan every row once.
    ///
    /// Returns the first pressed key found if the debounce window since the
    /// previous accepted key has elapsed, otherwise `None`. No row is left
    /// driven when this returns, even on error.
    ///
    /// # Errors
    /// * [`GpioError::Keypad`] if a row or column line fails
    pub fn scan(&mut self, now_ms: u32) -> Result<Option<KeyPress>, GpioError> {
        for row in 0..self.rows.len() {
            self.rows[row].set_high().map_err(GpioError::keypad)?;
            let found = self.read_columns(row, now_ms);
            self.rows[row].set_low().map_err(GpioError::keypad)?;

            if let Some(press) = found? {
                self.last_event = Some(now_ms);
                #[cfg(feature = "defmt")]
                defmt::debug!("Key {} at ({}, {})", press.key, press.row, press.col);
                return Ok(Some(press));
            }
        }
        Ok(None)
    }

    fn read_columns(&mut self, row: usize, now_ms: u32) -> Result<Option<KeyPress>, GpioError> {
        for col in 0..self.cols.len() {
            if self.cols[col].is_high().map_err(GpioError::keypad)? && self.window_elapsed(now_ms) {
                return Ok(Some(KeyPress {
                    row: row as u8,
                    col: col as u8,
                    key: self.keymap[row][col],
                }));
            }
        }
        Ok(None)
    }

    fn window_elapsed(&self, now_ms: u32) -> bool {
        match self.last_event {
            Some(last) => now_ms.wrapping_sub(last) > self.debounce_ms,
            None => true,
        }
    }
}
