//! Hinting error definitions.

use std::fmt;

/// Errors that may occur while interpreting TrueType bytecode.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum HintErrorKind {
    /// An instruction's operands ran past the end of the program.
    UnexpectedEndOfBytecode,
    /// The opcode is not part of the implemented instruction set.
    UnhandledOpcode(u8),
    ValueStackOverflow,
    ValueStackUnderflow,
    InvalidCvtIndex(usize),
    InvalidStorageIndex(usize),
}

impl fmt::Display for HintErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedEndOfBytecode => write!(f, "unexpected end of bytecode"),
            Self::UnhandledOpcode(opcode) => write!(f, "unhandled opcode 0x{opcode:02X}"),
            Self::ValueStackOverflow => write!(f, "value stack overflow"),
            Self::ValueStackUnderflow => write!(f, "value stack underflow"),
            Self::InvalidCvtIndex(index) => write!(f, "invalid cvt index {index}"),
            Self::InvalidStorageIndex(index) => write!(f, "invalid storage index {index}"),
        }
    }
}

impl std::error::Error for HintErrorKind {}

/// A hinting failure together with the location where it occurred.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct HintError {
    /// Byte offset of the failing instruction, or of the end of the
    /// program for a truncated operand fetch.
    pub pc: usize,
    /// The failing instruction's opcode, when one was decoded.
    pub opcode: Option<u8>,
    pub kind: HintErrorKind,
}

impl fmt::Display for HintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.opcode {
            Some(opcode) => write!(
                f,
                "error executing opcode 0x{opcode:02X} at pc {}: {}",
                self.pc, self.kind
            ),
            None => write!(f, "error at pc {}: {}", self.pc, self.kind),
        }
    }
}

impl std::error::Error for HintError {}
