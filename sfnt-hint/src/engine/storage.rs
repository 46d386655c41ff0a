//! Storage area instructions.

use super::Engine;
use crate::error::HintErrorKind;

impl Engine<'_> {
    /// WS[] (0x42) Write Store
    ///
    /// Pops a value and a storage location, in that order, and writes
    /// the value to the location.
    pub(super) fn op_ws(&mut self) -> Result<(), HintErrorKind> {
        let value = self.value_stack.pop()?;
        let index = self.value_stack.pop_usize()?;
        self.storage.set(index, value)
    }

    /// RS[] (0x43) Read Store
    ///
    /// Pops a storage location and pushes the value held there.
    pub(super) fn op_rs(&mut self) -> Result<(), HintErrorKind> {
        let index = self.value_stack.pop_usize()?;
        let value = self.storage.get(index)?;
        self.value_stack.push(value)
    }
}

#[cfg(test)]
mod tests {
    use super::super::MockEngine;
    use crate::code::opcodes::*;
    use crate::error::HintErrorKind;

    #[test]
    fn unwritten_locations_read_zero() {
        let mut mock = MockEngine::new();
        let mut engine = mock.engine();
        engine.run(&[0xB0, 7, RS]).unwrap();
        assert_eq!(engine.value_stack().peek(), Some(0));
    }

    #[test]
    fn out_of_range_location_fails() {
        let mut mock = MockEngine::new();
        let mut engine = mock.engine();
        // the mock storage has 16 slots
        let err = engine.run(&[0xB1, 16, 1, WS]).unwrap_err();
        assert_eq!(err.kind, HintErrorKind::InvalidStorageIndex(16));
    }
}
