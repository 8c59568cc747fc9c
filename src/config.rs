//! Generator configuration.

use crate::waveform::{WaveformTable, STANDARD_TABLES};

/// Character grid of the 4x4 membrane keypad, indexed `[row][col]`.
pub const KEYMAP: [[char; 4]; 4] = [
    ['1', '2', '3', 'A'],
    ['4', '5', '6', 'B'],
    ['7', '8', '9', 'C'],
    ['*', '0', '#', 'D'],
];

/// What to do with a transformed sample that falls outside `0..=255`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputPolicy {
    /// Keep the low 8 bits of the two's complement value. This is what the
    /// DAC lines show when the raw integer is written bit by bit.
    #[default]
    Wrap,
    /// Saturate to 0 or 255.
    Clamp,
}

impl OutputPolicy {
    /// Reduce a transformed sample to a DAC code.
    pub fn apply(self, value: i32) -> u8 {
        match self {
            OutputPolicy::Wrap => value as u8,
            OutputPolicy::Clamp => value.clamp(0, u8::MAX as i32) as u8,
        }
    }
}

/// Configuration for input handling and sample output.
///
/// [`GeneratorConfig::default()`] reproduces the reference hardware:
/// 500 ms keypad debounce, 300 ms button debounce, `D` as the command
/// terminator and the built-in waveform tables.
#[derive(Debug, Clone, Copy)]
pub struct GeneratorConfig {
    /// Minimum time between two accepted key presses. Default: 500.
    pub keypad_debounce_ms: u32,
    /// Minimum time between two accepted mode-button presses. Default: 300.
    pub button_debounce_ms: u32,
    /// Keypad character grid. Default: [`KEYMAP`].
    pub keymap: [[char; 4]; 4],
    /// Key that ends a command. Default: `'D'`.
    pub terminator: char,
    /// Out-of-range sample handling. Default: [`OutputPolicy::Wrap`].
    pub output_policy: OutputPolicy,
    /// Waveform tables in selector order. Default: [`STANDARD_TABLES`].
    pub tables: &'static [WaveformTable; 4],
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            keypad_debounce_ms: 500,
            button_debounce_ms: 300,
            keymap: KEYMAP,
            terminator: 'D',
            output_policy: OutputPolicy::Wrap,
            tables: &STANDARD_TABLES,
        }
    }
}
