//! Bytecode definitions and decoding.

use crate::error::HintErrorKind;

/// Opcodes for the implemented instruction set.
///
/// Anything not named here is rejected at dispatch with
/// [`HintErrorKind::UnhandledOpcode`].
pub mod opcodes {
    /// Set freedom and projection vectors to the y axis.
    pub const SVTCA0: u8 = 0x00;
    /// Set freedom and projection vectors to the x axis.
    pub const SVTCA1: u8 = 0x01;
    pub const SPVTCA0: u8 = 0x02;
    pub const SPVTCA1: u8 = 0x03;
    pub const SFVTCA0: u8 = 0x04;
    pub const SFVTCA1: u8 = 0x05;
    pub const SPVTL0: u8 = 0x06;
    pub const SPVTL1: u8 = 0x07;
    pub const NPUSHB: u8 = 0x40;
    pub const NPUSHW: u8 = 0x41;
    pub const WS: u8 = 0x42;
    pub const RS: u8 = 0x43;
    pub const WCVTP: u8 = 0x44;
    pub const RCVT: u8 = 0x45;
    pub const WCVTF: u8 = 0x70;
    pub const PUSHB000: u8 = 0xB0;
    pub const PUSHB111: u8 = 0xB7;
    pub const PUSHW000: u8 = 0xB8;
    pub const PUSHW111: u8 = 0xBF;
}

/// Immediate push operands attached to a decoded instruction.
///
/// Holds the raw operand bytes; [`values`](Self::values) widens them to
/// `i32` on demand, zero-extending bytes and sign-extending words.
#[derive(Copy, Clone, Default, Debug, PartialEq, Eq)]
pub struct Args<'a> {
    bytes: &'a [u8],
    is_words: bool,
}

impl<'a> Args<'a> {
    /// The number of operand values.
    pub fn len(&self) -> usize {
        if self.is_words {
            self.bytes.len() / 2
        } else {
            self.bytes.len()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Returns an iterator over the operand values.
    pub fn values(&self) -> impl Iterator<Item = i32> + 'a {
        let size = if self.is_words { 2 } else { 1 };
        self.bytes.chunks(size).map(|chunk| match chunk {
            [byte] => *byte as i32,
            [hi, lo] => i16::from_be_bytes([*hi, *lo]) as i32,
            _ => 0,
        })
    }
}

/// A decoded instruction and the program offset where it began.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Instruction<'a> {
    pub opcode: u8,
    pub arguments: Args<'a>,
    pub pc: usize,
}

/// Decodes instructions from bytecode, one at a time.
///
/// Each successful decode advances past the opcode and all of its inline
/// operands, so the next opcode is never read from inside an operand
/// stream; a decode can only advance or fail.
pub struct Decoder<'a> {
    bytecode: &'a [u8],
    pc: usize,
}

impl<'a> Decoder<'a> {
    pub fn new(bytecode: &'a [u8]) -> Self {
        Self { bytecode, pc: 0 }
    }

    /// The current byte offset into the program.
    pub fn pc(&self) -> usize {
        self.pc
    }

    /// Decodes the instruction at the current program counter.
    ///
    /// Returns `None` at the end of the program; a truncated operand
    /// stream yields [`HintErrorKind::UnexpectedEndOfBytecode`].
    pub fn maybe_next(&mut self) -> Option<Result<Instruction<'a>, HintErrorKind>> {
        let pc = self.pc;
        let opcode = *self.bytecode.get(pc)?;
        self.pc += 1;
        Some(self.decode_args(opcode).map(|arguments| Instruction {
            opcode,
            arguments,
            pc,
        }))
    }

    fn decode_args(&mut self, opcode: u8) -> Result<Args<'a>, HintErrorKind> {
        use opcodes::*;
        let (count, is_words) = match opcode {
            NPUSHB => (self.read_count()?, false),
            NPUSHW => (self.read_count()?, true),
            PUSHB000..=PUSHB111 => ((opcode - PUSHB000) as usize + 1, false),
            PUSHW000..=PUSHW111 => ((opcode - PUSHW000) as usize + 1, true),
            _ => return Ok(Args::default()),
        };
        let len = if is_words { count * 2 } else { count };
        let bytes = self
            .bytecode
            .get(self.pc..self.pc + len)
            .ok_or(HintErrorKind::UnexpectedEndOfBytecode)?;
        self.pc += len;
        Ok(Args { bytes, is_words })
    }

    fn read_count(&mut self) -> Result<usize, HintErrorKind> {
        let count = *self
            .bytecode
            .get(self.pc)
            .ok_or(HintErrorKind::UnexpectedEndOfBytecode)?;
        self.pc += 1;
        Ok(count as usize)
    }
}
