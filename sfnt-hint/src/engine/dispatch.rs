//! Instruction dispatch.

use super::Engine;
use crate::code::{opcodes, Decoder, Instruction};
use crate::error::{HintError, HintErrorKind};

impl Engine<'_> {
    /// Executes `bytecode` to completion.
    ///
    /// The first failing instruction aborts the run with its location;
    /// state mutated before the failure is left in place.
    pub fn run(&mut self, bytecode: &[u8]) -> Result<(), HintError> {
        let mut decoder = Decoder::new(bytecode);
        while let Some(decoded) = decoder.maybe_next() {
            let ins = match decoded {
                Ok(ins) => ins,
                Err(kind) => {
                    return Err(HintError {
                        pc: decoder.pc(),
                        opcode: None,
                        kind,
                    })
                }
            };
            self.dispatch(&ins).map_err(|kind| HintError {
                pc: ins.pc,
                opcode: Some(ins.opcode),
                kind,
            })?;
        }
        Ok(())
    }

    fn dispatch(&mut self, ins: &Instruction) -> Result<(), HintErrorKind> {
        use opcodes::*;
        match ins.opcode {
            SVTCA0..=SFVTCA1 => self.op_svtca(ins.opcode),
            SPVTL0 | SPVTL1 => self.op_spvtl(ins.opcode),
            NPUSHB | NPUSHW | PUSHB000..=PUSHW111 => self.op_push(&ins.arguments),
            WS => self.op_ws(),
            RS => self.op_rs(),
            WCVTP => self.op_wcvtp(),
            WCVTF => self.op_wcvtf(),
            RCVT => self.op_rcvt(),
            other => Err(HintErrorKind::UnhandledOpcode(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::MockEngine;
    use crate::code::opcodes::*;
    use crate::error::{HintError, HintErrorKind};
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_program_is_a_no_op() {
        let mut mock = MockEngine::new();
        let mut engine = mock.engine();
        engine.run(&[]).unwrap();
        assert!(engine.value_stack().is_empty());
    }

    #[test]
    fn wcvtp_rcvt_round_trip() {
        let mut mock = MockEngine::new();
        let mut engine = mock.engine();
        // write 25 to cvt[3], then read it back
        let program = [0xB1, 3, 25, WCVTP, 0xB0, 3, RCVT];
        engine.run(&program).unwrap();
        assert_eq!(engine.value_stack().peek(), Some(25));
        assert_eq!(engine.value_stack().len(), 1);
    }

    #[test]
    fn ws_rs_round_trip() {
        let mut mock = MockEngine::new();
        let mut engine = mock.engine();
        let program = [NPUSHW, 2, 0, 5, 0xFF, 0x00, WS, 0xB0, 5, RS];
        engine.run(&program).unwrap();
        assert_eq!(engine.value_stack().peek(), Some(-256));
    }

    #[test]
    fn unhandled_opcode_reports_location() {
        let mut mock = MockEngine::new();
        let mut engine = mock.engine();
        // IUP[0], which this engine does not implement
        let program = [0xB0, 1, 0x30];
        assert_eq!(
            engine.run(&program),
            Err(HintError {
                pc: 2,
                opcode: Some(0x30),
                kind: HintErrorKind::UnhandledOpcode(0x30),
            })
        );
        // the push before the failure still happened
        assert_eq!(engine.value_stack().peek(), Some(1));
    }

    #[test]
    fn truncated_push_reports_end_of_bytecode() {
        let mut mock = MockEngine::new();
        let mut engine = mock.engine();
        let program = [NPUSHB, 3, 1];
        assert_eq!(
            engine.run(&program),
            Err(HintError {
                pc: 2,
                opcode: None,
                kind: HintErrorKind::UnexpectedEndOfBytecode,
            })
        );
    }

    #[test]
    fn underflow_on_missing_operands() {
        let mut mock = MockEngine::new();
        let mut engine = mock.engine();
        assert_eq!(
            engine.run(&[WS]),
            Err(HintError {
                pc: 0,
                opcode: Some(WS),
                kind: HintErrorKind::ValueStackUnderflow,
            })
        );
    }

    #[test]
    fn overflow_past_the_stack_limit() {
        let mut mock = MockEngine::new();
        let mut engine = mock.engine();
        // the mock stack holds 32 values; push 40
        let mut program = vec![NPUSHB, 40];
        program.extend(std::iter::repeat(1).take(40));
        let err = engine.run(&program).unwrap_err();
        assert_eq!(err.kind, HintErrorKind::ValueStackOverflow);
    }

    #[test]
    fn invalid_cvt_index_is_reported() {
        let mut mock = MockEngine::new();
        let mut engine = mock.engine();
        // the mock cvt has 8 entries
        let program = [0xB1, 99, 5, WCVTP];
        let err = engine.run(&program).unwrap_err();
        assert_eq!(err.kind, HintErrorKind::InvalidCvtIndex(99));
    }
}
