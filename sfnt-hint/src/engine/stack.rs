//! Stack manipulation instructions.

use super::Engine;
use crate::code::Args;
use crate::error::HintErrorKind;

impl Engine<'_> {
    /// NPUSHB[] / NPUSHW[] / PUSHB[] / PUSHW[]
    ///
    /// Pushes the instruction's inline operands. The decoder has
    /// already widened counts and sliced the operand bytes, so all four
    /// forms behave identically here.
    pub(super) fn op_push(&mut self, args: &Args) -> Result<(), HintErrorKind> {
        self.value_stack.push_args(args)
    }
}

#[cfg(test)]
mod tests {
    use super::super::MockEngine;
    use crate::code::opcodes::*;

    #[test]
    fn pushes_appear_in_operand_order() {
        let mut mock = MockEngine::new();
        let mut engine = mock.engine();
        // PUSHB[010] then PUSHW[000]
        let program = [0xB2, 10, 20, 30, 0xB8, 0xFF, 0xFF];
        engine.run(&program).unwrap();
        assert_eq!(engine.value_stack().len(), 4);
        assert_eq!(engine.value_stack().peek(), Some(-1));
    }

    #[test]
    fn npushb_count_of_zero_pushes_nothing() {
        let mut mock = MockEngine::new();
        let mut engine = mock.engine();
        engine.run(&[NPUSHB, 0]).unwrap();
        assert!(engine.value_stack().is_empty());
    }
}
