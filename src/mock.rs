//! Simulated GPIO lines for unit tests.
//!
//! All pins borrow `Cell`s owned by the test, so the test can drive inputs
//! and inspect outputs while the component under test owns the pins.

use core::cell::Cell;
use core::convert::Infallible;

use embedded_hal::digital::{Error, ErrorKind, ErrorType, InputPin, OutputPin};

/// Output line recording its level in a shared cell.
pub struct MockOutput<'a>(pub &'a Cell<bool>);

impl ErrorType for MockOutput<'_> {
    type Error = Infallible;
}

impl OutputPin for MockOutput<'_> {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.0.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.0.set(true);
        Ok(())
    }
}

/// Input line reading its level from a shared cell.
pub struct MockInput<'a>(pub &'a Cell<bool>);

impl ErrorType for MockInput<'_> {
    type Error = Infallible;
}

impl InputPin for MockInput<'_> {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.0.get())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.0.get())
    }
}

/// A 4x4 key matrix: a column reads high only while the row of the
/// pressed key is driven high.
pub struct KeyMatrix {
    pub rows: [Cell<bool>; 4],
    pub pressed: Cell<Option<(usize, usize)>>,
}

impl KeyMatrix {
    pub fn new() -> Self {
        Self {
            rows: Default::default(),
            pressed: Cell::new(None),
        }
    }

    pub fn press(&self, row: usize, col: usize) {
        self.pressed.set(Some((row, col)));
    }

    pub fn release(&self) {
        self.pressed.set(None);
    }

    pub fn row_pins(&self) -> [MockOutput<'_>; 4] {
        core::array::from_fn(|row| MockOutput(&self.rows[row]))
    }

    pub fn col_pins(&self) -> [MockColumn<'_>; 4] {
        core::array::from_fn(|col| MockColumn { matrix: self, col })
    }

    pub fn any_row_driven(&self) -> bool {
        self.rows.iter().any(Cell::get)
    }
}

/// Column-sense line of a [`KeyMatrix`].
pub struct MockColumn<'a> {
    matrix: &'a KeyMatrix,
    col: usize,
}

impl ErrorType for MockColumn<'_> {
    type Error = Infallible;
}

impl InputPin for MockColumn<'_> {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(match self.matrix.pressed.get() {
            Some((row, col)) => col == self.col && self.matrix.rows[row].get(),
            None => false,
        })
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|high| !high)
    }
}

/// Pin error reported by [`FailingPin`].
#[derive(Debug)]
pub struct PinFault;

impl Error for PinFault {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// A line whose every read and write fails.
pub struct FailingPin;

impl ErrorType for FailingPin {
    type Error = PinFault;
}

impl InputPin for FailingPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Err(PinFault)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Err(PinFault)
    }
}

impl OutputPin for FailingPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Err(PinFault)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Err(PinFault)
    }
}
