//! Keypad command entry and parsing.
//!
//! A command is a one-letter prefix followed by a decimal value and ended
//! by the terminator key:
//!
//! ```text
//! A<mV>D   amplitude, 100–2500
//! B<mV>D   offset,    50–1250
//! C<Hz>D   frequency, 1–12 000 000
//! ```
//!
//! The buffer holds at most [`MAX_COMMAND_LEN`] characters. Reaching that
//! length without a terminator discards the entry.

use heapless::String;

use crate::error::CommandError;
use crate::parameters::{ParameterUpdate, SignalParameters};

/// Characters (prefix included) at which an unterminated entry is discarded.
pub const MAX_COMMAND_LEN: usize = 10;

/// Result of a finished command: the accepted update, or why it was refused.
pub type CommandOutcome = Result<ParameterUpdate, CommandError>;

/// A parsed but not yet range-checked command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    AmplitudeMv(u32),
    OffsetMv(u32),
    FrequencyHz(u32),
}

impl Command {
    /// Range-check the value and store it in `params`.
    pub fn apply(self, params: &mut SignalParameters) -> CommandOutcome {
        match self {
            Command::AmplitudeMv(mv) => params.set_amplitude_mv(mv),
            Command::OffsetMv(mv) => params.set_offset_mv(mv),
            Command::FrequencyHz(hz) => params.set_frequency_hz(hz),
        }
    }
}

/// Split `text` into prefix and value.
///
/// # Errors
/// * [`CommandError::UnrecognizedPrefix`] if `text` is empty or does not
///   start with `A`, `B` or `C`
/// * [`CommandError::Parse`] if the rest is not a decimal `u32`
pub fn parse_command(text: &str) -> Result<Command, CommandError> {
    let mut chars = text.chars();
    let command: fn(u32) -> Command = match chars.next() {
        Some('A') => Command::AmplitudeMv,
        Some('B') => Command::OffsetMv,
        Some('C') => Command::FrequencyHz,
        _ => return Err(CommandError::UnrecognizedPrefix),
    };

    let value = chars
        .as_str()
        .parse::<u32>()
        .map_err(|_| CommandError::Parse)?;
    Ok(command(value))
}

/// Accumulates key presses into a pending command.
#[derive(Debug, Clone)]
pub struct CommandBuffer {
    text: String<MAX_COMMAND_LEN>,
    terminator: char,
}

impl CommandBuffer {
    pub fn new(terminator: char) -> Self {
        Self {
            text: String::new(),
            terminator,
        }
    }

    /// Characters entered since the last terminator or overflow.
    pub fn as_str(&self) -> &str {
        self.text.as_str()
    }

    /// Feed one key press.
    ///
    /// Returns `None` while a command is still being typed. Returns
    /// `Some(outcome)` when the terminator finishes a command or when the
    /// entry overflows. In both cases the buffer is empty afterwards, and
    /// `params` is only modified by an accepted command.
    pub fn push(&mut self, key: char, params: &mut SignalParameters) -> Option<CommandOutcome> {
        if key == self.terminator {
            let outcome = parse_command(&self.text).and_then(|command| command.apply(params));

            #[cfg(feature = "defmt")]
            defmt::debug!("Command input: {}", self.text.as_str());
            log_outcome(&outcome);

            self.text.clear();
            return Some(outcome);
        }

        if self.text.push(key).is_err() || self.text.len() >= MAX_COMMAND_LEN {
            self.text.clear();
            let outcome = Err(CommandError::BufferOverflow);
            log_outcome(&outcome);
            return Some(outcome);
        }

        None
    }
}

#[cfg(feature = "defmt")]
fn log_outcome(outcome: &CommandOutcome) {
    match outcome {
        Ok(ParameterUpdate::AmplitudeMv(mv)) => defmt::info!("New amplitude: {} mV", mv),
        Ok(ParameterUpdate::OffsetMv(mv)) => defmt::info!("New offset: {} mV", mv),
        Ok(ParameterUpdate::FrequencyHz(hz)) => defmt::info!("New frequency: {} Hz", hz),
        Err(CommandError::UnrecognizedPrefix) => defmt::debug!("Unrecognized command"),
        Err(e) => defmt::warn!("{}", e),
    }
}

#[cfg(not(feature = "defmt"))]
fn log_outcome(_outcome: &CommandOutcome) {}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_keys(
        buffer: &mut CommandBuffer,
        params: &mut SignalParameters,
        keys: &str,
    ) -> Option<CommandOutcome> {
        let mut last = None;
        for key in keys.chars() {
            last = buffer.push(key, params);
        }
        last
    }

    #[test]
    fn parse_each_prefix() {
        assert_eq!(parse_command("A1000"), Ok(Command::AmplitudeMv(1000)));
        assert_eq!(parse_command("B50"), Ok(Command::OffsetMv(50)));
        assert_eq!(parse_command("C12000000"), Ok(Command::FrequencyHz(12_000_000)));
    }

    #[test]
    fn parse_rejects_missing_or_unknown_prefix() {
        assert_eq!(parse_command(""), Err(CommandError::UnrecognizedPrefix));
        assert_eq!(parse_command("5A100"), Err(CommandError::UnrecognizedPrefix));
        assert_eq!(parse_command("#12"), Err(CommandError::UnrecognizedPrefix));
    }

    #[test]
    fn parse_rejects_non_numeric_value() {
        assert_eq!(parse_command("A"), Err(CommandError::Parse));
        assert_eq!(parse_command("A12*"), Err(CommandError::Parse));
        assert_eq!(parse_command("BC5"), Err(CommandError::Parse));
    }

    #[test]
    fn amplitude_command_updates_parameters() {
        let mut buffer = CommandBuffer::new('D');
        let mut params = SignalParameters::default();
        let outcome = type_keys(&mut buffer, &mut params, "A1000D");
        assert_eq!(outcome, Some(Ok(ParameterUpdate::AmplitudeMv(1000))));
        assert_eq!(params.amplitude(), 250);
        assert_eq!(buffer.as_str(), "");
    }

    #[test]
    fn out_of_range_amplitude_is_refused() {
        let mut buffer = CommandBuffer::new('D');
        let mut params = SignalParameters::default();
        params.set_amplitude_mv(2000).unwrap();
        let before = params;

        let outcome = type_keys(&mut buffer, &mut params, "A50D");
        assert_eq!(outcome, Some(Err(CommandError::InvalidAmplitude(50))));
        assert_eq!(params, before);
        assert_eq!(buffer.as_str(), "");
    }

    #[test]
    fn offset_and_frequency_commands() {
        let mut buffer = CommandBuffer::new('D');
        let mut params = SignalParameters::default();

        assert_eq!(
            type_keys(&mut buffer, &mut params, "B1250D"),
            Some(Ok(ParameterUpdate::OffsetMv(1250)))
        );
        assert_eq!(params.offset_mv(), 1250);

        assert_eq!(
            type_keys(&mut buffer, &mut params, "C21D"),
            Some(Ok(ParameterUpdate::FrequencyHz(21)))
        );
        assert_eq!(params.frequency(), 1050);

        assert_eq!(
            type_keys(&mut buffer, &mut params, "C0D"),
            Some(Err(CommandError::InvalidFrequency(0)))
        );
        assert_eq!(params.frequency(), 1050);
    }

    #[test]
    fn non_numeric_value_is_refused() {
        let mut buffer = CommandBuffer::new('D');
        let mut params = SignalParameters::default();
        let before = params;
        assert_eq!(
            type_keys(&mut buffer, &mut params, "B1#0D"),
            Some(Err(CommandError::Parse))
        );
        assert_eq!(params, before);
    }

    #[test]
    fn terminator_alone_is_unrecognized() {
        let mut buffer = CommandBuffer::new('D');
        let mut params = SignalParameters::default();
        assert_eq!(
            buffer.push('D', &mut params),
            Some(Err(CommandError::UnrecognizedPrefix))
        );
    }

    #[test]
    fn characters_are_buffered_until_terminator() {
        let mut buffer = CommandBuffer::new('D');
        let mut params = SignalParameters::default();
        assert_eq!(type_keys(&mut buffer, &mut params, "C12"), None);
        assert_eq!(buffer.as_str(), "C12");
    }

    #[test]
    fn tenth_character_overflows_and_clears() {
        let mut buffer = CommandBuffer::new('D');
        let mut params = SignalParameters::default();
        let before = params;

        assert_eq!(type_keys(&mut buffer, &mut params, "A12345678"), None);
        assert_eq!(buffer.as_str().len(), 9);

        assert_eq!(
            buffer.push('9', &mut params),
            Some(Err(CommandError::BufferOverflow))
        );
        assert_eq!(buffer.as_str(), "");
        assert_eq!(params, before);

        // A terminator right after an overflow has nothing to act on.
        assert_eq!(
            buffer.push('D', &mut params),
            Some(Err(CommandError::UnrecognizedPrefix))
        );
    }

    #[test]
    fn longest_accepted_entry() {
        let mut buffer = CommandBuffer::new('D');
        let mut params = SignalParameters::default();
        assert_eq!(
            type_keys(&mut buffer, &mut params, "C12000000D"),
            Some(Ok(ParameterUpdate::FrequencyHz(12_000_000)))
        );
    }

    #[test]
    fn custom_terminator() {
        let mut buffer = CommandBuffer::new('#');
        let mut params = SignalParameters::default();
        assert_eq!(
            type_keys(&mut buffer, &mut params, "B500#"),
            Some(Ok(ParameterUpdate::OffsetMv(500)))
        );
    }
}
