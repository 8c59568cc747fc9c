//! Waveform tables, the waveform selector, and the phase index.
//!
//! Each waveform is one period of [`TABLE_LEN`] unsigned 8-bit samples.
//! The tables are constant data; the generator only ever indexes them with
//! a [`Phase`], which cannot leave `0..TABLE_LEN`.

/// Number of samples in one waveform period.
pub const TABLE_LEN: usize = 100;

/// One period of a waveform as raw 8-bit DAC codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaveformTable {
    samples: [u8; TABLE_LEN],
}

impl WaveformTable {
    pub const fn new(samples: [u8; TABLE_LEN]) -> Self {
        Self { samples }
    }

    /// Sample at `phase`.
    pub fn sample(&self, phase: Phase) -> u8 {
        self.samples[phase.index()]
    }

    #[cfg(test)]
    pub(crate) fn samples(&self) -> &[u8; TABLE_LEN] {
        &self.samples
    }
}

// ── Phase ────────────────────────────────────────────────────────────────

/// Position within the active waveform table, always in `0..TABLE_LEN`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Phase(u8);

impl Phase {
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// The following phase, wrapping to 0 after `TABLE_LEN - 1`.
    pub fn next(self) -> Self {
        Phase(((self.0 as usize + 1) % TABLE_LEN) as u8)
    }
}

// ── Waveform selector ────────────────────────────────────────────────────

/// Which of the four tables is being played.
///
/// The discriminant is the selector index (0–3) advanced by the mode button.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Waveform {
    #[default]
    Sine = 0,
    Triangle = 1,
    Sawtooth = 2,
    Square = 3,
}

impl Waveform {
    /// All waveforms in selector order.
    pub const ALL: [Waveform; 4] = [
        Waveform::Sine,
        Waveform::Triangle,
        Waveform::Sawtooth,
        Waveform::Square,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Selector for `index`, wrapping modulo 4.
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }

    /// The next waveform in the cycle Sine → Triangle → Sawtooth → Square → Sine.
    pub fn next(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// Human-readable name for status output.
    pub fn name(self) -> &'static str {
        match self {
            Waveform::Sine => "Sine",
            Waveform::Triangle => "Triangle",
            Waveform::Sawtooth => "Sawtooth",
            Waveform::Square => "Square",
        }
    }
}

// ── Built-in tables ──────────────────────────────────────────────────────

/// Sine, centred on 128.
pub const SINE: WaveformTable = WaveformTable::new([
    128, 136, 144, 152, 160, 167, 175, 182, 189, 196, 203, 209, 215, 221, 226, 231, 236, 240,
    243, 247, 249, 251, 253, 254, 255, 255, 255, 254, 252, 250, 248, 245, 242, 238, 234, 229,
    224, 218, 213, 206, 200, 193, 186, 179, 171, 163, 156, 148, 140, 132, 123, 115, 107, 99,
    92, 84, 76, 69, 62, 55, 49, 42, 37, 31, 26, 21, 17, 13, 10, 7, 5, 3, 1, 0, 0, 0, 1, 2, 4,
    6, 8, 12, 15, 19, 24, 29, 34, 40, 46, 52, 59, 66, 73, 80, 88, 95, 103, 111, 119, 127,
]);

/// Symmetric triangle, 0 → 255 → 5.
pub const TRIANGLE: WaveformTable = WaveformTable::new([
    0, 5, 10, 15, 20, 26, 31, 36, 41, 46, 51, 56, 61, 66, 71, 76, 82, 87, 92, 97, 102, 107, 112,
    117, 122, 127, 133, 138, 143, 148, 153, 158, 163, 168, 173, 178, 184, 189, 194, 199, 204,
    209, 214, 219, 224, 229, 235, 240, 245, 250, 255, 250, 245, 240, 235, 229, 224, 219, 214,
    209, 204, 199, 194, 189, 184, 178, 173, 168, 163, 158, 153, 148, 143, 138, 133, 127, 122,
    117, 112, 107, 102, 97, 92, 87, 82, 77, 71, 66, 61, 56, 51, 46, 41, 36, 31, 25, 20, 15, 10,
    5,
]);

/// Rising ramp starting at mid-scale, wrapping from 255 to 0 halfway through.
pub const SAWTOOTH: WaveformTable = WaveformTable::new([
    129, 131, 134, 137, 139, 142, 144, 147, 149, 152, 155, 157, 160, 162, 165, 167, 170, 173,
    175, 178, 180, 183, 185, 188, 191, 193, 196, 198, 201, 203, 206, 209, 211, 214, 216, 219,
    222, 224, 227, 229, 232, 234, 237, 240, 242, 245, 247, 250, 252, 255, 0, 3, 5, 8, 10, 13,
    15, 18, 21, 23, 26, 28, 31, 33, 36, 39, 41, 44, 46, 49, 52, 54, 57, 59, 62, 64, 67, 70, 72,
    75, 77, 80, 82, 85, 88, 90, 93, 95, 98, 100, 103, 106, 108, 111, 113, 116, 118, 121, 124,
    126,
]);

/// 50 % duty square wave.
pub const SQUARE: WaveformTable = WaveformTable::new(square_samples());

const fn square_samples() -> [u8; TABLE_LEN] {
    let mut samples = [0u8; TABLE_LEN];
    let mut i = 0;
    while i < TABLE_LEN / 2 {
        samples[i] = 255;
        i += 1;
    }
    samples
}

/// The four built-in tables, indexed by [`Waveform::index()`].
pub static STANDARD_TABLES: [WaveformTable; 4] = [SINE, TRIANGLE, SAWTOOTH, SQUARE];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_cycles_through_every_index_once() {
        let mut phase = Phase::default();
        let mut seen = [false; TABLE_LEN];
        for _ in 0..TABLE_LEN {
            assert!(!seen[phase.index()]);
            seen[phase.index()] = true;
            phase = phase.next();
        }
        assert!(seen.iter().all(|&s| s));
        assert_eq!(phase, Phase::default());
    }

    #[test]
    fn selector_cycles_in_order() {
        let mut w = Waveform::default();
        let mut order = [Waveform::Sine; 5];
        for slot in order.iter_mut() {
            *slot = w;
            w = w.next();
        }
        assert_eq!(
            order,
            [
                Waveform::Sine,
                Waveform::Triangle,
                Waveform::Sawtooth,
                Waveform::Square,
                Waveform::Sine,
            ]
        );
    }

    #[test]
    fn from_index_wraps() {
        assert_eq!(Waveform::from_index(4), Waveform::Sine);
        assert_eq!(Waveform::from_index(7), Waveform::Square);
    }

    #[test]
    fn standard_tables_match_selector_order() {
        assert_eq!(STANDARD_TABLES[Waveform::Sine.index()], SINE);
        assert_eq!(STANDARD_TABLES[Waveform::Triangle.index()], TRIANGLE);
        assert_eq!(STANDARD_TABLES[Waveform::Sawtooth.index()], SAWTOOTH);
        assert_eq!(STANDARD_TABLES[Waveform::Square.index()], SQUARE);
    }

    #[test]
    fn square_is_half_high_half_low() {
        let high = SQUARE.samples().iter().filter(|&&s| s == 255).count();
        let low = SQUARE.samples().iter().filter(|&&s| s == 0).count();
        assert_eq!(high, 50);
        assert_eq!(low, 50);
        assert_eq!(SQUARE.sample(Phase::default()), 255);
    }

    #[test]
    fn sine_peaks_and_troughs() {
        assert_eq!(SINE.samples().iter().max(), Some(&255));
        assert_eq!(SINE.samples().iter().min(), Some(&0));
        assert_eq!(SINE.sample(Phase::default()), 128);
    }
}
